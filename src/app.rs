// Windowed application: owns the event loop and routes input into the simulation

use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    dpi::LogicalSize,
    event::{DeviceEvent, Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{CursorGrabMode, Fullscreen, Window, WindowBuilder},
};

use crate::config::WindowConfig;
use crate::error::AppError;
use crate::input::{InputAction, InputState};
use crate::renderer::Renderer;
use crate::scenario::Scenario;
use crate::simulation::Simulation;

const TITLE_REFRESH: Duration = Duration::from_secs(1);

// Frames drawn since the title last changed
struct FpsCounter {
    frames: u32,
    since: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
        }
    }

    /// Counts a frame. Returns the rate once per refresh interval.
    fn frame(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.since);
        if elapsed < TITLE_REFRESH {
            return None;
        }
        let fps = (self.frames as f64 / elapsed.as_secs_f64()).round() as u32;
        self.frames = 0;
        self.since = now;
        Some(fps)
    }
}

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    simulation: Simulation,
    input: InputState,
    title: String,
    last_frame: Instant,
    fps: FpsCounter,
}

impl App {
    pub async fn new(
        event_loop: &EventLoop<()>,
        settings: &WindowConfig,
        scenario: Scenario,
    ) -> Result<Self, AppError> {
        let fullscreen = settings.fullscreen.then_some(Fullscreen::Borderless(None));
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&settings.title)
                .with_inner_size(LogicalSize::new(settings.width, settings.height))
                .with_fullscreen(fullscreen)
                .build(event_loop)?,
        );
        grab_cursor(&window);

        let mut renderer = Renderer::new(window.clone()).await?;
        let mut simulation = Simulation::new(scenario)?;
        simulation.load_textures(&mut renderer)?;
        log::info!(
            "Scenario ready with {} bodies",
            simulation.scenario().registry.len()
        );

        Ok(Self {
            window,
            renderer,
            simulation,
            input: InputState::new(),
            title: settings.title.clone(),
            last_frame: Instant::now(),
            fps: FpsCounter::new(),
        })
    }

    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<(), AppError> {
        event_loop.run(move |event, target| {
            target.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, window_id } if window_id == self.window.id() => {
                    self.handle_window_event(event, target);
                }
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    self.input.handle_mouse_motion(delta.0, delta.1);
                }
                Event::AboutToWait => {
                    self.window.request_redraw();
                }
                _ => {}
            }
        })?;
        Ok(())
    }

    fn handle_window_event(&mut self, event: WindowEvent, target: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => target.exit(),
            WindowEvent::Resized(physical_size) => self.renderer.resize(physical_size),
            WindowEvent::Focused(focused) => self.input.set_focused(focused),
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(action) = self.input.handle_key(&event) {
                    self.dispatch(action, target);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => self.input.handle_scroll(delta),
            WindowEvent::RedrawRequested => self.redraw(target),
            _ => {}
        }
    }

    fn dispatch(&mut self, action: InputAction, target: &EventLoopWindowTarget<()>) {
        match action {
            InputAction::Quit => target.exit(),
            InputAction::ToggleFullscreen => {
                let fullscreen = match self.window.fullscreen() {
                    Some(_) => None,
                    None => Some(Fullscreen::Borderless(None)),
                };
                log::info!("Fullscreen {}", if fullscreen.is_some() { "on" } else { "off" });
                self.window.set_fullscreen(fullscreen);
            }
            action => {
                if let Err(err) = self.simulation.handle_action(&action) {
                    log::warn!("{err}");
                }
            }
        }
    }

    fn redraw(&mut self, target: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        let wall_dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let frame_input = self.input.take_frame();
        if let Err(err) = self.simulation.tick(wall_dt, &frame_input) {
            log::error!("Skipping frame update: {err}");
        }

        let frame = self.simulation.render_frame(self.renderer.aspect_ratio());
        match self.renderer.render(&frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory");
                target.exit();
            }
            Err(err) => log::warn!("Dropped frame: {err}"),
        }

        if let Some(fps) = self.fps.frame(now) {
            self.window.set_title(&format!(
                "{} | FPS: {} | {}",
                self.title,
                fps,
                self.simulation.status_line()
            ));
        }
    }
}

fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grabbed {
        log::warn!("Could not capture cursor: {err}");
    }
    window.set_cursor_visible(false);
}
