use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use life_engine::find_pattern;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Milliseconds between generations.
    pub tick_interval_ms: u64,
    /// Rows kept free at the bottom of the screen for statistics.
    pub stats_rows: u32,
    /// Named start-up pattern, used when `cells` is empty.
    pub pattern: String,
    /// Explicit seed as `[row, col]` pairs.
    pub cells: Vec<(i64, i64)>,
    /// Compute generations with one task per row.
    pub parallel: bool,
    /// Edge length of one drawn cell in points.
    pub cell_size: f32,
    /// Headless viewport width.
    pub width: u32,
    /// Headless viewport height.
    pub height: u32,
    /// Headless run length; `None` runs until the population repeats.
    pub generations: Option<u64>,
    pub live_color: [u8; 3],
    pub dead_color: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 300,
            stats_rows: 5,
            pattern: "Scatter".to_string(),
            cells: Vec::new(),
            parallel: true,
            cell_size: 12.0,
            width: 80,
            height: 40,
            generations: None,
            live_color: [255, 99, 71],
            dead_color: [24, 24, 24],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// The start-up population: explicit cells win over the named pattern.
    pub fn seed_cells(&self) -> Result<Vec<(i64, i64)>> {
        if !self.cells.is_empty() {
            return Ok(self.cells.clone());
        }
        let pattern = find_pattern(&self.pattern)?;
        Ok(pattern.cells.to_vec())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
