// Orrery-3D: an animated solar system in Rust

use clap::Parser;
use winit::event_loop::EventLoop;

use orrery_3d::app::App;
use orrery_3d::config::{AppConfig, CliArgs};
use orrery_3d::error::AppError;
use orrery_3d::scenario::Scenario;

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // Initialize logging
    let filter = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(err) = run(args).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load(&args.config);
    config.apply_cli_overrides(&args);

    let scenario = match &config.scenario {
        Some(path) => {
            log::info!("Loading scenario {}", path.display());
            Scenario::load(path)?
        }
        None => Scenario::solar_system_basic()?,
    };

    // Create event loop
    let event_loop = EventLoop::new()?;

    let app = App::new(&event_loop, &config.window, scenario).await?;
    app.run(event_loop)
}
