// Celestial body parameters

use glam::Vec3;
use std::path::PathBuf;

use crate::error::SceneError;

/// Which shader the renderer selects for a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Self-lit, drawn with its texture colour only (stars).
    Emissive,
    /// Lit by the scenario's light source.
    Lit,
}

/// Static orbital and rotational parameters of one body, fixed at scenario load.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    /// Uniform scale applied last when composing the world transform.
    pub radius: f32,
    /// Distance from the parent's position. Zero means the body does not orbit.
    pub orbit_radius: f32,
    /// Signed orbital rate in radians per simulated second; negative is retrograde.
    pub orbit_speed: f32,
    /// Tilt of the orbital plane about world X, in radians.
    pub orbit_inclination: f32,
    /// Signed spin rate in radians per simulated second.
    pub rotation_speed: f32,
    pub rotation_axis: Vec3,
    pub parent: Option<String>,
    pub is_emissive: bool,
    pub texture_path: Option<PathBuf>,
}

impl CelestialBody {
    /// A stationary, non-rotating lit body spinning about world up.
    pub fn new(name: impl Into<String>, radius: f32) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit_radius: 0.0,
            orbit_speed: 0.0,
            orbit_inclination: 0.0,
            rotation_speed: 0.0,
            rotation_axis: Vec3::Y,
            parent: None,
            is_emissive: false,
            texture_path: None,
        }
    }

    pub fn orbiting(mut self, parent: impl Into<String>, orbit_radius: f32, orbit_speed: f32) -> Self {
        self.parent = Some(parent.into());
        self.orbit_radius = orbit_radius;
        self.orbit_speed = orbit_speed;
        self
    }

    pub fn inclined(mut self, inclination: f32) -> Self {
        self.orbit_inclination = inclination;
        self
    }

    pub fn spinning(mut self, rotation_speed: f32, axis: Vec3) -> Self {
        self.rotation_speed = rotation_speed;
        self.rotation_axis = axis;
        self
    }

    pub fn emissive(mut self) -> Self {
        self.is_emissive = true;
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_path = Some(path.into());
        self
    }

    pub fn shading(&self) -> Shading {
        if self.is_emissive {
            Shading::Emissive
        } else {
            Shading::Lit
        }
    }

    /// Checks the parameters that can be judged without the rest of the scenario.
    pub(crate) fn validate(&self) -> Result<(), SceneError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(SceneError::InvalidRadius {
                name: self.name.clone(),
                radius: self.radius,
            });
        }
        let invalid = |field| SceneError::InvalidParameter {
            name: self.name.clone(),
            field,
        };
        if !(self.orbit_radius >= 0.0 && self.orbit_radius.is_finite()) {
            return Err(invalid("orbit_radius"));
        }
        for (field, value) in [
            ("orbit_speed", self.orbit_speed),
            ("orbit_inclination", self.orbit_inclination),
            ("rotation_speed", self.rotation_speed),
        ] {
            if !value.is_finite() {
                return Err(invalid(field));
            }
        }
        if !self.rotation_axis.is_finite() {
            return Err(invalid("rotation_axis"));
        }
        if self.rotation_axis.try_normalize().is_none() {
            return Err(SceneError::InvalidAxis(self.name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_orbit_and_parent() {
        let moon = CelestialBody::new("Moon", 0.15)
            .orbiting("Earth", 1.5, 1.5)
            .with_texture("textures/moon.jpg");
        assert_eq!(moon.parent.as_deref(), Some("Earth"));
        assert_eq!(moon.orbit_radius, 1.5);
        assert_eq!(moon.shading(), Shading::Lit);
        assert!(moon.validate().is_ok());
    }

    #[test]
    fn zero_axis_is_rejected() {
        let body = CelestialBody::new("Bad", 1.0).spinning(1.0, Vec3::ZERO);
        assert_eq!(body.validate(), Err(SceneError::InvalidAxis("Bad".into())));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let body = CelestialBody::new("Flat", 0.0);
        assert!(matches!(body.validate(), Err(SceneError::InvalidRadius { .. })));
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let cases = [
            ("orbit_radius", CelestialBody::new("X", 1.0).orbiting("Sun", f32::NAN, 0.1)),
            ("orbit_radius", CelestialBody::new("X", 1.0).orbiting("Sun", -2.0, 0.1)),
            ("orbit_speed", CelestialBody::new("X", 1.0).orbiting("Sun", 5.0, f32::INFINITY)),
            ("orbit_inclination", CelestialBody::new("X", 1.0).inclined(f32::NAN)),
            ("rotation_speed", CelestialBody::new("X", 1.0).spinning(f32::NEG_INFINITY, Vec3::Y)),
            ("rotation_axis", CelestialBody::new("X", 1.0).spinning(1.0, Vec3::new(0.0, f32::NAN, 0.0))),
        ];
        for (field, body) in cases {
            assert_eq!(
                body.validate(),
                Err(SceneError::InvalidParameter {
                    name: "X".into(),
                    field,
                })
            );
        }
    }

    #[test]
    fn retrograde_and_stationary_bodies_are_valid() {
        assert!(CelestialBody::new("Sun", 2.0).validate().is_ok());
        let retro = CelestialBody::new("Retro", 0.4).orbiting("Sun", 5.0, -0.3).inclined(-0.2);
        assert!(retro.validate().is_ok());
    }

    #[test]
    fn emissive_bodies_use_emissive_shading() {
        assert_eq!(CelestialBody::new("Sun", 2.0).emissive().shading(), Shading::Emissive);
    }
}
