// app.rs - Window state wrapped around the sparse simulation

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use egui::Color32;
use life_engine::{PATTERNS, Simulation, Viewport, random_seed};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::stats::{MemoryReading, MemoryStats};

/// Memory telemetry is refreshed at most this often.
const STATS_REFRESH: Duration = Duration::from_secs(1);

pub struct GameOfLife {
    sim: Simulation,

    pub viewport: Viewport,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub cell_size: f32,
    pub stats_rows: u32,
    pub parallel: bool,

    runtime: tokio::runtime::Runtime,

    memory: MemoryStats,
    pub memory_reading: MemoryReading,
    last_stats: Instant,
    random_draws: u64,
    pending_seed: Option<Vec<(i64, i64)>>,
}

impl GameOfLife {
    pub fn new(config: &AppConfig, cells: &[(i64, i64)]) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
        let [lr, lg, lb] = config.live_color;
        let [dr, dg, db] = config.dead_color;
        let selected_pattern = PATTERNS
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(&config.pattern))
            .unwrap_or(0);

        let mut memory = MemoryStats::new();
        let memory_reading = memory.refresh();

        Ok(Self {
            sim: Simulation::default(),
            viewport: Viewport::default(),
            is_running: true,
            last_update: Instant::now(),
            update_interval: config.tick_interval(),
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            selected_pattern,
            cell_size: config.cell_size.max(2.0),
            stats_rows: config.stats_rows,
            parallel: config.parallel,
            runtime,
            memory,
            memory_reading,
            last_stats: Instant::now(),
            random_draws: 0,
            pending_seed: Some(cells.to_vec()),
        })
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    /// Recomputes the clamp from the drawable area, measured in cells. The
    /// start-up seed waits for the first size so it can be clipped.
    pub fn resize(&mut self, columns: u32, rows: u32) {
        let viewport = Viewport::from_screen(columns, rows, self.stats_rows);
        if viewport != self.viewport {
            info!(width = viewport.width, height = viewport.height, "viewport resized");
            self.viewport = viewport;
            self.sim.clip_to(viewport);
        }
        if let Some(cells) = self.pending_seed.take() {
            self.sim.reseed(&viewport.clip(&cells));
        }
    }

    pub fn update_generation(&mut self) {
        let viewport = self.viewport;
        let outcome = if self.parallel {
            match self.runtime.block_on(self.sim.tick_rows(viewport)) {
                Ok(outcome) => outcome,
                Err(err) => {
                    error!(%err, "generation failed, pausing");
                    self.is_running = false;
                    return;
                }
            }
        } else {
            self.sim.tick(viewport)
        };

        if outcome.repeated {
            self.is_running = false;
        }
    }

    pub fn refresh_stats(&mut self) {
        if self.last_stats.elapsed() >= STATS_REFRESH {
            self.memory_reading = self.memory.refresh();
            self.last_stats = Instant::now();
        }
    }

    pub fn clear_grid(&mut self) {
        self.sim.clear();
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            self.sim.reseed(&self.viewport.clip(pattern.cells));
            info!(pattern = pattern.name, "pattern applied");
        }
    }

    pub fn apply_random_pattern(&mut self) {
        self.random_draws += 1;
        let cells = random_seed(self.viewport, self.random_draws);
        self.sim.reseed(&cells);
    }

    pub fn toggle_cell(&mut self, row: i64, col: i64) {
        if self.viewport.contains(row, col) {
            self.sim.toggle(row, col);
        }
    }
}
