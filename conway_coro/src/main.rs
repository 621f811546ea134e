// main.rs - Sparse Conway's Game of Life driven by a fixed tick
// Window mode renders with egui, headless mode logs each generation

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;       // Window state
mod cli;       // Command line
mod config;    // JSON configuration
mod headless;  // Timer loop without a window
mod stats;     // Memory telemetry
mod ui;        // eframe::App implementation

use app::GameOfLife;
use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.command == Some(Commands::DumpDefaultConfig) {
        println!("{}", serde_json::to_string_pretty(&AppConfig::default())?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);
    let cells = config.seed_cells()?;
    info!(seed_cells = cells.len(), interval_ms = config.tick_interval_ms, "configuration loaded");

    if cli.headless {
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        return runtime.block_on(headless::run(&config, &cells));
    }

    let app = GameOfLife::new(&config, &cells)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sparse Conway's Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("failed to start window: {err}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
