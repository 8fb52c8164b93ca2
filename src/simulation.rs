// Frame driver tying clock, transforms and camera together

use glam::{Mat4, Vec3};

use crate::assets::{TextureHandle, TextureLoader};
use crate::body::Shading;
use crate::camera::{Camera, CameraController};
use crate::clock::SimulationClock;
use crate::error::{ActionError, AssetError, SceneError};
use crate::input::{FrameInput, InputAction};
use crate::registry::BodyId;
use crate::scenario::Scenario;
use crate::transform::{FrameTransforms, TransformEvaluator};

/// One body as the renderer should draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub body: BodyId,
    pub world: Mat4,
    pub texture: Option<TextureHandle>,
    pub shading: Shading,
}

/// Everything the render pass needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub items: Vec<DrawItem>,
    /// Cubemap drawn behind the bodies, if one was loaded.
    pub skybox: Option<TextureHandle>,
    /// `view` with its translation removed, so the sky stays at infinity.
    pub skybox_view: Mat4,
}

/// Owns all per-frame state. Drive with [`Simulation::tick`] once per frame.
#[derive(Debug)]
pub struct Simulation {
    scenario: Scenario,
    evaluator: TransformEvaluator,
    clock: SimulationClock,
    camera: CameraController,
    textures: Vec<Option<TextureHandle>>,
    skybox: Option<TextureHandle>,
}

impl Simulation {
    pub fn new(scenario: Scenario) -> Result<Self, SceneError> {
        let evaluator = TransformEvaluator::new(&scenario.registry)?;
        let camera = CameraController::new(Camera::new(scenario.initial_camera_position));
        let textures = vec![None; scenario.registry.len()];
        Ok(Self {
            scenario,
            evaluator,
            clock: SimulationClock::new(),
            camera,
            textures,
            skybox: None,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn transforms(&self) -> &FrameTransforms {
        self.evaluator.current()
    }

    /// Loads every body's texture and the skybox. On failure no handle is kept.
    pub fn load_textures(&mut self, loader: &mut impl TextureLoader) -> Result<(), AssetError> {
        let mut textures = Vec::with_capacity(self.textures.len());
        for body in self.scenario.registry.all() {
            let handle = match &body.texture_path {
                Some(path) => {
                    let handle = loader.load(path)?;
                    log::info!("Loaded texture {} for {}", path.display(), body.name);
                    Some(handle)
                }
                None => None,
            };
            textures.push(handle);
        }
        let skybox = match &self.scenario.skybox {
            Some(dir) => {
                let handle = loader.load_cubemap(dir)?;
                log::info!("Loaded skybox from {}", dir.display());
                Some(handle)
            }
            None => None,
        };
        self.textures = textures;
        self.skybox = skybox;
        Ok(())
    }

    pub fn texture(&self, id: BodyId) -> Option<TextureHandle> {
        self.textures.get(id.index()).copied().flatten()
    }

    /// Advances the clock, evaluates every body, then moves the camera
    /// against this frame's transforms.
    pub fn tick(&mut self, wall_dt: f32, input: &FrameInput) -> Result<(), SceneError> {
        let mut clock = self.clock.clone();
        let time = clock.advance(f64::from(wall_dt));
        let frame = self.evaluator.evaluate(&self.scenario.registry, time)?;
        self.clock = clock;
        self.camera.update(wall_dt, input, &self.scenario.registry, frame);
        Ok(())
    }

    /// Applies a discrete command. Window-level commands are ignored here.
    pub fn handle_action(&mut self, action: &InputAction) -> Result<(), ActionError> {
        let registry = &self.scenario.registry;
        let frame = self.evaluator.current();
        match action {
            InputAction::LockBody(name) => {
                self.camera.lock(name, registry, frame)?;
            }
            InputAction::CycleLock => {
                let names: Vec<&str> = registry.names().collect();
                self.camera.cycle(&names, registry, frame)?;
            }
            InputAction::Unlock => {
                self.camera.unlock()?;
                log::info!("Camera unlocked");
            }
            InputAction::SelectSpeed(index) => {
                let speed = self.clock.select_preset(*index)?;
                log::info!("Simulation speed {speed:.1}x");
            }
            InputAction::ToggleFullscreen | InputAction::Quit => {}
        }
        Ok(())
    }

    pub fn render_frame(&self, aspect_ratio: f32) -> RenderFrame {
        let camera = self.camera.camera();
        let items = self
            .transforms()
            .iter()
            .filter_map(|(id, world)| {
                let body = self.scenario.registry.get(id)?;
                Some(DrawItem {
                    body: id,
                    world,
                    texture: self.texture(id),
                    shading: body.shading(),
                })
            })
            .collect();
        RenderFrame {
            view: self.camera.view_matrix(),
            projection: camera.projection_matrix(aspect_ratio),
            camera_position: camera.position,
            light_position: self.scenario.light_position,
            light_color: self.scenario.light_color,
            items,
            skybox: self.skybox,
            skybox_view: camera.skybox_view(),
        }
    }

    /// Speed and lock state for the window title.
    pub fn status_line(&self) -> String {
        format!(
            "Speed: {:.1}x | Lock: {}",
            self.clock.speed(),
            self.camera.locked_target().unwrap_or("None")
        )
    }
}
