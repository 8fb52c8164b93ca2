// Scenario definitions: the bodies plus light and camera start state

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::Deserialize;

use crate::body::CelestialBody;
use crate::error::{AppError, ConfigError, SceneError};
use crate::registry::BodyRegistry;

/// A validated set of bodies with the scene-wide light and camera start.
#[derive(Debug)]
pub struct Scenario {
    pub registry: BodyRegistry,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub initial_camera_position: Vec3,
    /// Directory holding the six cubemap faces, if the scene has a sky.
    pub skybox: Option<PathBuf>,
}

impl Scenario {
    /// Registers `bodies` and checks the parent graph. Any configuration
    /// error fails the whole scenario.
    pub fn new(
        bodies: impl IntoIterator<Item = CelestialBody>,
        light_position: Vec3,
        light_color: Vec3,
        initial_camera_position: Vec3,
    ) -> Result<Self, SceneError> {
        let mut registry = BodyRegistry::new();
        for body in bodies {
            registry.register(body)?;
        }
        registry.evaluation_order()?;
        Ok(Self {
            registry,
            light_position,
            light_color,
            initial_camera_position,
            skybox: None,
        })
    }

    pub fn with_skybox(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skybox = Some(dir.into());
        self
    }

    /// Sun, Earth, Mars and the Moon with compressed distances.
    ///
    /// Speeds are chosen for visual effect rather than realism.
    pub fn solar_system_basic() -> Result<Self, SceneError> {
        let bodies = [
            CelestialBody::new("Sun", 2.0)
                .emissive()
                .spinning(0.05, Vec3::Y)
                .with_texture("textures/sun.jpg"),
            CelestialBody::new("Earth", 0.5)
                .orbiting("Sun", 10.0, 0.2)
                .spinning(1.0, Vec3::Y)
                .with_texture("textures/earth.jpg"),
            CelestialBody::new("Mars", 0.3)
                .orbiting("Sun", 15.0, 0.15)
                .spinning(0.9, Vec3::Y)
                .with_texture("textures/mars.jpg"),
            // Tidally locked
            CelestialBody::new("Moon", 0.15)
                .orbiting("Earth", 1.5, 1.5)
                .with_texture("textures/moon.jpg"),
        ];
        Ok(Self::new(bodies, Vec3::ZERO, Vec3::ONE, Vec3::new(0.0, 5.0, 20.0))?.with_skybox("textures/skybox"))
    }

    pub fn from_ron_str(source: &str, path: &Path) -> Result<Self, AppError> {
        let file: ScenarioFile = ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.into_scenario()?)
    }

    /// Reads a RON scenario file. Relative texture paths stay relative to
    /// the working directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_ron_str(&source, path)?;
        log::info!(
            "Loaded scenario {} with {} bodies",
            path.display(),
            scenario.registry.len()
        );
        Ok(scenario)
    }
}

/// On-disk scenario layout.
#[derive(Debug, Deserialize)]
struct ScenarioFile {
    bodies: Vec<BodyEntry>,
    #[serde(default)]
    light_position: [f32; 3],
    #[serde(default = "white")]
    light_color: [f32; 3],
    #[serde(default = "default_camera_position")]
    initial_camera_position: [f32; 3],
    #[serde(default)]
    skybox: Option<PathBuf>,
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 5.0, 20.0]
}

fn world_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Debug, Deserialize)]
struct BodyEntry {
    name: String,
    radius: f32,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    orbit_radius: f32,
    #[serde(default)]
    orbit_speed: f32,
    #[serde(default)]
    orbit_inclination: f32,
    #[serde(default)]
    rotation_speed: f32,
    #[serde(default = "world_up")]
    rotation_axis: [f32; 3],
    #[serde(default)]
    emissive: bool,
    #[serde(default)]
    texture: Option<PathBuf>,
}

impl From<BodyEntry> for CelestialBody {
    fn from(entry: BodyEntry) -> Self {
        CelestialBody {
            name: entry.name,
            radius: entry.radius,
            orbit_radius: entry.orbit_radius,
            orbit_speed: entry.orbit_speed,
            orbit_inclination: entry.orbit_inclination,
            rotation_speed: entry.rotation_speed,
            rotation_axis: Vec3::from_array(entry.rotation_axis),
            parent: entry.parent,
            is_emissive: entry.emissive,
            texture_path: entry.texture,
        }
    }
}

impl ScenarioFile {
    fn into_scenario(self) -> Result<Scenario, SceneError> {
        let mut scenario = Scenario::new(
            self.bodies.into_iter().map(CelestialBody::from),
            Vec3::from_array(self.light_position),
            Vec3::from_array(self.light_color),
            Vec3::from_array(self.initial_camera_position),
        )?;
        scenario.skybox = self.skybox;
        Ok(scenario)
    }
}
