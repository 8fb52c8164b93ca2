// Math utilities for orbital motion

use glam::{Mat4, Quat, Vec3};
use std::f64::consts::TAU;

/// Translation, rotation and uniform scale of one body, composed as T * R * S.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Generate the world matrix. Scale is applied first, translation last.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Angle swept after `time` seconds at `rate` radians per second, wrapped to [0, 2π).
///
/// The product is formed in f64 so long runs keep their precision before the
/// narrowing cast.
pub fn swept_angle(time: f64, rate: f32) -> f32 {
    (time * f64::from(rate)).rem_euclid(TAU) as f32
}

/// Point on a circle of `radius` in the X-Z plane, tilted about world X by `inclination`.
pub fn orbit_offset(angle: f32, radius: f32, inclination: f32) -> Vec3 {
    if radius == 0.0 {
        return Vec3::ZERO;
    }
    let flat = Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);
    if inclination == 0.0 {
        flat
    } else {
        Quat::from_rotation_x(inclination) * flat
    }
}

/// Unit direction for yaw/pitch given in degrees.
///
/// `(cos yaw cos pitch, sin pitch, sin yaw cos pitch)`, the convention shared
/// by the free-fly look vector and the locked-orbit camera placement.
pub fn spherical_direction(yaw_deg: f32, pitch_deg: f32) -> Vec3 {
    let (yaw, pitch) = (yaw_deg.to_radians(), pitch_deg.to_radians());
    Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
}

/// Inverse of [`spherical_direction`]: yaw and pitch in degrees of a unit vector.
pub fn yaw_pitch_of(direction: Vec3) -> (f32, f32) {
    let yaw = direction.z.atan2(direction.x).to_degrees();
    let pitch = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
    (yaw, pitch)
}
