// Error types for the orrery

use std::path::PathBuf;

/// Configuration errors detected while building a scenario. Fatal to startup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SceneError {
    #[error("a body named `{0}` is already registered")]
    DuplicateName(String),

    #[error("body `{body}` names parent `{parent}`, which is not registered")]
    DanglingParent { body: String, parent: String },

    #[error("body `{0}` has a zero-length rotation axis")]
    InvalidAxis(String),

    #[error("body `{name}` has non-positive radius {radius}")]
    InvalidRadius { name: String, radius: f32 },

    #[error("body `{name}` has an invalid {field}")]
    InvalidParameter { name: String, field: &'static str },

    #[error("parent chain through `{0}` forms a cycle")]
    CyclicParent(String),

    #[error("no body named `{0}`")]
    NotFound(String),
}

/// Recoverable camera control errors. State is left unchanged.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CameraError {
    #[error("cannot lock camera: no body named `{0}`")]
    TargetNotFound(String),

    #[error("camera is not locked to a body")]
    NotLocked,

    #[error("cannot cycle over an empty list of bodies")]
    EmptyCycle,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ClockError {
    #[error("simulation speed must be a finite, non-negative number (got {0})")]
    InvalidSpeed(f64),

    #[error("no speed preset at index {0}")]
    UnknownPreset(usize),
}

/// Errors that can occur when reading configuration or scenario files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cubemap face {path} is {}x{}, expected {expected}x{expected}", found.0, found.1)]
    CubemapFace {
        path: PathBuf,
        expected: u32,
        found: (u32, u32),
    },
}

/// Errors surfaced by the simulation while handling discrete input.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActionError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Clock(#[from] ClockError),
}

/// Startup and event-loop failures of the windowed application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("surface reports no usable format or alpha mode")]
    UnsupportedSurface,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
