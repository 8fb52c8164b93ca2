//! Orrery-3D: an animated solar system.
//!
//! The simulation core (`registry`, `transform`, `camera`, `clock`,
//! `simulation`) is independent of the window and GPU; `renderer` and `app`
//! draw its output with wgpu and winit.

pub mod app;
pub mod assets;
pub mod body;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod math;
pub mod mesh;
pub mod registry;
pub mod renderer;
pub mod scenario;
pub mod simulation;
pub mod transform;
