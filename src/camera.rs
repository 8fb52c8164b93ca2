// Camera control for the orrery

use glam::{Mat3, Mat4, Vec3};

use crate::body::CelestialBody;
use crate::error::CameraError;
use crate::input::{FrameInput, MovementIntent};
use crate::math::{spherical_direction, yaw_pitch_of};
use crate::registry::{BodyId, BodyRegistry};
use crate::transform::FrameTransforms;

// Default camera values, angles in degrees
pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 5.0;
pub const SPRINT_SPEED: f32 = 15.0;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;

const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = ZOOM;
const PITCH_LIMIT: f32 = 89.0;

// Locked-orbit distances, in multiples of the target's radius
const LOCK_DISTANCE: f32 = 5.0;
const MIN_LOCK_DISTANCE: f32 = 1.5;
const MAX_LOCK_DISTANCE: f32 = 50.0;
const ORBIT_ZOOM_SENSITIVITY: f32 = 0.5;
const ORBIT_ZOOM_STEP: f32 = 0.1;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Position, Euler orientation and lens of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: YAW,
            pitch: PITCH,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
        };
        camera.update_vectors();
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Rotation-only view for drawing the sky around the camera.
    pub fn skybox_view(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()))
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.zoom.to_radians(),
            aspect_ratio.max(f32::EPSILON),
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    /// Current field of view relative to the default one.
    pub fn zoom_factor(&self) -> f32 {
        self.zoom / ZOOM
    }

    /// Moves along `front`/`right` and world up. Held directions add up.
    pub fn process_movement(&mut self, movement: &MovementIntent, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        if movement.forward {
            self.position += self.front * velocity;
        }
        if movement.backward {
            self.position -= self.front * velocity;
        }
        if movement.left {
            self.position -= self.right * velocity;
        }
        if movement.right {
            self.position += self.right * velocity;
        }
        if movement.up {
            self.position.y += velocity;
        }
        if movement.down {
            self.position.y -= velocity;
        }
    }

    /// Turns by a screen-space mouse delta; +y moves the view down.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch -= dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, scroll: f32) {
        self.zoom = (self.zoom - scroll).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Recomputes `front`, `right` and `up` from yaw and pitch.
    pub fn update_vectors(&mut self) {
        self.front = spherical_direction(self.yaw, self.pitch);
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Faces `target`, deriving yaw and pitch from the new front vector.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(front) = (target - self.position).try_normalize() else {
            return;
        };
        self.front = front;
        self.right = front.cross(self.world_up).normalize();
        self.up = self.right.cross(front).normalize();
        (self.yaw, self.pitch) = yaw_pitch_of(front);
    }
}

/// Orbit parameters while the camera is locked to a body.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitLock {
    pub target: BodyId,
    pub name: String,
    pub distance: f32,
    /// Degrees, of the camera as seen from the target.
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CameraMode {
    FreeFly,
    LockedOrbit(OrbitLock),
}

/// Drives the camera in free-fly or locked-orbit mode.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    mode: CameraMode,
    cycle_position: Option<usize>,
}

impl CameraController {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            mode: CameraMode::FreeFly,
            cycle_position: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    pub fn locked_target(&self) -> Option<&str> {
        match &self.mode {
            CameraMode::FreeFly => None,
            CameraMode::LockedOrbit(lock) => Some(&lock.name),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    /// Locks onto `name`. Clears any cycle position.
    pub fn lock(
        &mut self,
        name: &str,
        registry: &BodyRegistry,
        frame: &FrameTransforms,
    ) -> Result<BodyId, CameraError> {
        let (id, body, target) = resolve_target(name, registry, frame)?;
        self.engage(id, body, target);
        self.cycle_position = None;
        Ok(id)
    }

    pub fn unlock(&mut self) -> Result<(), CameraError> {
        if self.mode == CameraMode::FreeFly {
            return Err(CameraError::NotLocked);
        }
        self.mode = CameraMode::FreeFly;
        self.cycle_position = None;
        self.camera.update_vectors();
        Ok(())
    }

    /// Locks onto the entry after the last one cycled to, wrapping around.
    ///
    /// Starts from the first entry when no cycle is in progress, including
    /// after a direct [`lock`](Self::lock) or [`unlock`](Self::unlock).
    pub fn cycle<S: AsRef<str>>(
        &mut self,
        names: &[S],
        registry: &BodyRegistry,
        frame: &FrameTransforms,
    ) -> Result<BodyId, CameraError> {
        if names.is_empty() {
            return Err(CameraError::EmptyCycle);
        }
        let next = self.cycle_position.map_or(0, |i| (i + 1) % names.len());
        let (id, body, target) = resolve_target(names[next].as_ref(), registry, frame)?;
        self.engage(id, body, target);
        self.cycle_position = Some(next);
        Ok(id)
    }

    /// Enters locked orbit around `body`, keeping the current viewing ray.
    fn engage(&mut self, id: BodyId, body: &CelestialBody, target: Vec3) {
        let direction = (self.camera.position - target)
            .try_normalize()
            .unwrap_or(-self.camera.front);
        let (yaw, pitch) = yaw_pitch_of(direction);

        self.camera.zoom = ZOOM;
        self.mode = CameraMode::LockedOrbit(OrbitLock {
            target: id,
            name: body.name.clone(),
            distance: body.radius * LOCK_DISTANCE,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        });
        log::info!("Camera locked to {}", body.name);
    }

    /// Applies one frame of input and places the camera.
    ///
    /// `frame` must already hold this frame's transforms so a locked camera
    /// tracks its target without lag.
    pub fn update(
        &mut self,
        delta_time: f32,
        input: &FrameInput,
        registry: &BodyRegistry,
        frame: &FrameTransforms,
    ) {
        let look_scale = self.camera.zoom_factor().clamp(0.1, 1.0);
        let dx = input.mouse_delta.x * look_scale;
        let dy = input.mouse_delta.y * look_scale;

        match &mut self.mode {
            CameraMode::FreeFly => {
                let base = if input.movement.sprint { SPRINT_SPEED } else { SPEED };
                self.camera.movement_speed = base * self.camera.zoom_factor().max(0.1);
                self.camera.process_movement(&input.movement, delta_time);
                self.camera.process_mouse_movement(dx, dy);
                self.camera.process_mouse_scroll(input.scroll_delta);
            }
            CameraMode::LockedOrbit(lock) => {
                let (Some(body), Some(target)) = (registry.get(lock.target), frame.position(lock.target)) else {
                    log::warn!("Locked target {} is missing from this frame", lock.name);
                    return;
                };
                let sensitivity = self.camera.mouse_sensitivity;
                lock.yaw += dx * sensitivity;
                lock.pitch = (lock.pitch + dy * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);

                lock.distance -=
                    input.scroll_delta * ORBIT_ZOOM_SENSITIVITY * lock.distance * ORBIT_ZOOM_STEP;
                lock.distance = lock.distance.clamp(
                    body.radius * MIN_LOCK_DISTANCE,
                    body.radius * MAX_LOCK_DISTANCE,
                );

                self.camera.position = target + spherical_direction(lock.yaw, lock.pitch) * lock.distance;
                self.camera.look_at(target);
            }
        }
    }
}

fn resolve_target<'a>(
    name: &str,
    registry: &'a BodyRegistry,
    frame: &FrameTransforms,
) -> Result<(BodyId, &'a CelestialBody, Vec3), CameraError> {
    let not_found = || CameraError::TargetNotFound(name.to_string());
    let id = registry.id_of(name).ok_or_else(not_found)?;
    let body = registry.get(id).ok_or_else(not_found)?;
    let target = frame.position(id).ok_or_else(not_found)?;
    Ok((id, body, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::TransformEvaluator;
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    struct Fixture {
        registry: BodyRegistry,
        evaluator: TransformEvaluator,
    }

    impl Fixture {
        fn new() -> Self {
            let mut registry = BodyRegistry::new();
            registry.register(CelestialBody::new("Sun", 2.0).emissive()).unwrap();
            registry
                .register(CelestialBody::new("Earth", 0.5).orbiting("Sun", 10.0, 0.2))
                .unwrap();
            registry
                .register(CelestialBody::new("A", 1.0).orbiting("Sun", 20.0, 0.1))
                .unwrap();
            registry
                .register(CelestialBody::new("B", 1.0).orbiting("Sun", 30.0, 0.1))
                .unwrap();
            registry
                .register(CelestialBody::new("C", 1.0).orbiting("Sun", 40.0, 0.1))
                .unwrap();
            registry
                .register(CelestialBody::new("D", 1.0).orbiting("Sun", 50.0, 0.1))
                .unwrap();
            let evaluator = TransformEvaluator::new(&registry).unwrap();
            Self { registry, evaluator }
        }

        fn frame(&self) -> &FrameTransforms {
            self.evaluator.current()
        }

        fn name_of(&self, id: BodyId) -> &str {
            &self.registry.get(id).unwrap().name
        }
    }

    fn still() -> FrameInput {
        FrameInput::default()
    }

    fn looking(dx: f32, dy: f32) -> FrameInput {
        FrameInput {
            mouse_delta: Vec2::new(dx, dy),
            ..FrameInput::default()
        }
    }

    fn scrolling(scroll: f32) -> FrameInput {
        FrameInput {
            scroll_delta: scroll,
            ..FrameInput::default()
        }
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let camera = Camera::new(Vec3::new(0.0, 5.0, 20.0));
        assert_abs_diff_eq!(camera.front, Vec3::NEG_Z, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.right, Vec3::X, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.up, Vec3::Y, epsilon = 1e-6);
    }

    #[test]
    fn pitch_saturates_at_limit() {
        let mut camera = Camera::new(Vec3::ZERO);
        for _ in 0..20 {
            camera.process_mouse_movement(0.0, -500.0);
            assert!(camera.pitch <= 89.0);
        }
        assert_eq!(camera.pitch, 89.0);
        for _ in 0..20 {
            camera.process_mouse_movement(0.0, 500.0);
        }
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn mouse_up_raises_view() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, -100.0);
        assert_abs_diff_eq!(camera.pitch, 10.0, epsilon = 1e-5);
        assert!(camera.front.y > 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom, 35.0);
        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, 1.0);
        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn diagonal_movement_is_vector_sum() {
        let mut camera = Camera::new(Vec3::ZERO);
        let movement = MovementIntent {
            forward: true,
            right: true,
            ..MovementIntent::default()
        };
        camera.process_movement(&movement, 0.5);
        let expected = (camera.front + camera.right) * SPEED * 0.5;
        assert_abs_diff_eq!(camera.position, expected, epsilon = 1e-5);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut camera = Camera::new(Vec3::ONE);
        let movement = MovementIntent {
            forward: true,
            backward: true,
            up: true,
            down: true,
            ..MovementIntent::default()
        };
        camera.process_movement(&movement, 1.0);
        assert_abs_diff_eq!(camera.position, Vec3::ONE, epsilon = 1e-5);
    }

    #[test]
    fn zooming_in_slows_free_flight() {
        let fixture = Fixture::new();
        let forward = FrameInput {
            movement: MovementIntent {
                forward: true,
                ..MovementIntent::default()
            },
            ..FrameInput::default()
        };

        let mut wide = CameraController::new(Camera::new(Vec3::ZERO));
        wide.update(1.0, &forward, &fixture.registry, fixture.frame());
        assert_abs_diff_eq!(wide.camera().position.length(), 5.0, epsilon = 1e-4);

        let mut narrow = CameraController::new(Camera::new(Vec3::ZERO));
        narrow.update(0.0, &scrolling(36.0), &fixture.registry, fixture.frame());
        assert_eq!(narrow.camera().zoom, 9.0);
        narrow.update(1.0, &forward, &fixture.registry, fixture.frame());
        assert_abs_diff_eq!(narrow.camera().position.length(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn zooming_in_softens_mouse_look() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::ZERO));
        controller.update(0.0, &scrolling(36.0), &fixture.registry, fixture.frame());
        controller.update(0.0, &looking(100.0, 0.0), &fixture.registry, fixture.frame());
        // 100 * 0.2 (zoom factor) * 0.1 (sensitivity)
        assert_abs_diff_eq!(controller.camera().yaw, YAW + 2.0, epsilon = 1e-4);
    }

    #[test]
    fn lock_initialises_orbit_from_current_position() {
        let fixture = Fixture::new();
        let mut camera = Camera::new(Vec3::new(10.0, 0.0, 4.0));
        camera.zoom = 20.0;
        let mut controller = CameraController::new(camera);

        let id = controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        assert_eq!(fixture.name_of(id), "Earth");
        assert_eq!(controller.camera().zoom, ZOOM);
        let CameraMode::LockedOrbit(lock) = controller.mode() else {
            panic!("expected locked orbit");
        };
        assert_eq!(lock.distance, 2.5);
        assert_abs_diff_eq!(lock.yaw, 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(lock.pitch, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn locked_camera_stays_on_the_viewing_ray() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(10.0, 3.0, 4.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        controller.update(0.016, &still(), &fixture.registry, fixture.frame());

        let earth = Vec3::new(10.0, 0.0, 0.0);
        let camera = controller.camera();
        let ray = Vec3::new(0.0, 3.0, 4.0).normalize();
        assert_abs_diff_eq!(camera.position, earth + ray * 2.5, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.front, -ray, epsilon = 1e-4);
    }

    #[test]
    fn lock_unknown_target_leaves_state_unchanged() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(1.0, 2.0, 3.0)));
        let before = controller.camera().clone();
        let err = controller.lock("Pluto", &fixture.registry, fixture.frame()).unwrap_err();
        assert_eq!(err, CameraError::TargetNotFound("Pluto".into()));
        assert_eq!(controller.mode(), &CameraMode::FreeFly);
        assert_eq!(controller.camera(), &before);
    }

    #[test]
    fn unlock_requires_a_lock() {
        let mut controller = CameraController::new(Camera::new(Vec3::ZERO));
        assert_eq!(controller.unlock(), Err(CameraError::NotLocked));
    }

    #[test]
    fn immediate_unlock_keeps_orientation() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        let front = controller.camera().front;
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        controller.unlock().unwrap();
        assert_abs_diff_eq!(controller.camera().front, front, epsilon = 1e-5);
    }

    #[test]
    fn unlock_resumes_from_locked_view() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        controller.update(0.016, &looking(40.0, 25.0), &fixture.registry, fixture.frame());
        let locked_front = controller.camera().front;
        let locked_position = controller.camera().position;

        controller.unlock().unwrap();
        assert_eq!(controller.mode(), &CameraMode::FreeFly);
        assert_abs_diff_eq!(controller.camera().front, locked_front, epsilon = 1e-4);

        controller.update(0.016, &still(), &fixture.registry, fixture.frame());
        assert_abs_diff_eq!(controller.camera().front, locked_front, epsilon = 1e-4);
        assert_abs_diff_eq!(controller.camera().position, locked_position, epsilon = 1e-4);
    }

    #[test]
    fn locked_distance_is_clamped_to_radius_multiples() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        let earth = Vec3::new(10.0, 0.0, 0.0);

        for _ in 0..200 {
            controller.update(0.016, &scrolling(-5.0), &fixture.registry, fixture.frame());
        }
        assert_abs_diff_eq!(controller.camera().position.distance(earth), 25.0, epsilon = 1e-3);

        for _ in 0..200 {
            controller.update(0.016, &scrolling(5.0), &fixture.registry, fixture.frame());
        }
        assert_abs_diff_eq!(controller.camera().position.distance(earth), 0.75, epsilon = 1e-4);
    }

    #[test]
    fn orbit_zoom_is_proportional_to_distance() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        controller.update(0.016, &scrolling(1.0), &fixture.registry, fixture.frame());
        let CameraMode::LockedOrbit(lock) = controller.mode() else {
            panic!("expected locked orbit");
        };
        assert_abs_diff_eq!(lock.distance, 2.5 * 0.95, epsilon = 1e-5);
    }

    #[test]
    fn orbit_pitch_is_clamped() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        for _ in 0..50 {
            controller.update(0.016, &looking(0.0, 300.0), &fixture.registry, fixture.frame());
        }
        let CameraMode::LockedOrbit(lock) = controller.mode() else {
            panic!("expected locked orbit");
        };
        assert_eq!(lock.pitch, 89.0);
        assert!(controller.camera().front.is_finite());
    }

    #[test]
    fn locked_camera_follows_moving_target() {
        let mut fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        let earth = fixture.registry.id_of("Earth").unwrap();

        for step in 1..10 {
            let frame = fixture.evaluator.evaluate(&fixture.registry, step as f64 * 0.7).unwrap();
            controller.update(0.016, &still(), &fixture.registry, frame);
            let target = frame.position(earth).unwrap();
            assert_abs_diff_eq!(controller.camera().position.distance(target), 2.5, epsilon = 1e-4);
            assert_abs_diff_eq!(
                controller.camera().front,
                (target - controller.camera().position).normalize(),
                epsilon = 1e-4
            );
        }
    }

    #[test]
    fn cycle_wraps_around_the_list() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        let names = ["A", "B", "C"];
        let mut visited = Vec::new();
        for _ in 0..4 {
            let id = controller.cycle(&names, &fixture.registry, fixture.frame()).unwrap();
            visited.push(fixture.name_of(id).to_string());
        }
        assert_eq!(visited, ["A", "B", "C", "A"]);
        assert_eq!(controller.locked_target(), Some("A"));
    }

    #[test]
    fn direct_lock_outside_the_cycle_restarts_it() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        let names = ["A", "B", "C"];
        controller.cycle(&names, &fixture.registry, fixture.frame()).unwrap();
        controller.cycle(&names, &fixture.registry, fixture.frame()).unwrap();
        controller.lock("D", &fixture.registry, fixture.frame()).unwrap();
        assert_eq!(controller.locked_target(), Some("D"));

        let id = controller.cycle(&names, &fixture.registry, fixture.frame()).unwrap();
        assert_eq!(fixture.name_of(id), "A");
    }

    #[test]
    fn failed_cycle_step_keeps_position() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(0.0, 5.0, 20.0)));
        let names = ["A", "Ghost", "C"];
        controller.cycle(&names, &fixture.registry, fixture.frame()).unwrap();
        assert!(controller.cycle(&names, &fixture.registry, fixture.frame()).is_err());
        assert_eq!(controller.locked_target(), Some("A"));
        // Still stuck on the unresolvable entry rather than skipping it.
        assert!(controller.cycle(&names, &fixture.registry, fixture.frame()).is_err());
    }

    #[test]
    fn cycling_an_empty_list_fails() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::ZERO));
        let names: [&str; 0] = [];
        assert_eq!(
            controller.cycle(&names, &fixture.registry, fixture.frame()),
            Err(CameraError::EmptyCycle)
        );
    }

    #[test]
    fn lock_from_target_position_falls_back_to_view_ray() {
        let fixture = Fixture::new();
        let mut controller = CameraController::new(Camera::new(Vec3::new(10.0, 0.0, 0.0)));
        controller.lock("Earth", &fixture.registry, fixture.frame()).unwrap();
        controller.update(0.016, &still(), &fixture.registry, fixture.frame());
        // Camera was looking down -Z from inside Earth, so it backs out along +Z.
        assert_abs_diff_eq!(controller.camera().position, Vec3::new(10.0, 0.0, 2.5), epsilon = 1e-4);
    }
}
