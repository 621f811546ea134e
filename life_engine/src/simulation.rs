// simulation.rs - State the driver owns and replaces every tick

use std::sync::Arc;

use tracing::{debug, warn};

use crate::engine;
use crate::error::LifeError;
use crate::grid::SparseGrid;
use crate::seed;
use crate::viewport::Viewport;

/// Number of recent generations remembered for cycle detection.
pub const HISTORY_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    pub generation: u64,
    pub population: usize,
    /// The new generation equals one of the last [`HISTORY_LEN`] generations.
    pub repeated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Simulation {
    grid: Arc<SparseGrid>,
    generation: u64,
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl Simulation {
    pub fn new(cells: &[(i64, i64)]) -> Self {
        let mut sim = Self::default();
        sim.reseed(cells);
        sim
    }

    pub fn grid(&self) -> &SparseGrid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation on the calling thread.
    pub fn tick(&mut self, viewport: Viewport) -> TickOutcome {
        let next = engine::step(&self.grid, viewport);
        self.replace(next)
    }

    /// Advances one generation using one task per grid row.
    pub async fn tick_rows(&mut self, viewport: Viewport) -> Result<TickOutcome, LifeError> {
        let next = engine::step_rows(Arc::clone(&self.grid), viewport).await?;
        Ok(self.replace(next))
    }

    /// Starts over from `cells` at generation zero.
    pub fn reseed(&mut self, cells: &[(i64, i64)]) {
        self.grid = Arc::new(seed::load_seed(cells));
        self.generation = 0;
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.remember();
    }

    pub fn clear(&mut self) {
        self.reseed(&[]);
    }

    /// Flips one cell between generations. Returns the new liveness.
    pub fn toggle(&mut self, row: i64, col: i64) -> bool {
        let alive = Arc::make_mut(&mut self.grid).toggle(row, col);
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.remember();
        alive
    }

    /// Drops live cells outside `viewport`, e.g. after the screen shrank.
    /// Returns how many were removed.
    pub fn clip_to(&mut self, viewport: Viewport) -> usize {
        let outside: Vec<_> = self
            .grid
            .live_cells()
            .into_iter()
            .filter(|&(row, col)| !viewport.contains(row, col))
            .collect();
        if !outside.is_empty() {
            let grid = Arc::make_mut(&mut self.grid);
            for &(row, col) in &outside {
                grid.remove(row, col);
            }
            warn!(removed = outside.len(), "live cells outside the viewport removed");
        }
        outside.len()
    }

    fn replace(&mut self, next: SparseGrid) -> TickOutcome {
        self.grid = Arc::new(next);
        self.generation += 1;

        let repeated = self.check_for_cycle();
        let outcome = TickOutcome {
            generation: self.generation,
            population: self.grid.population(),
            repeated,
        };
        if repeated {
            warn!(generation = outcome.generation, population = outcome.population, "population is repeating");
        } else {
            debug!(generation = outcome.generation, population = outcome.population, "tick");
        }
        outcome
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.grid.fingerprint();
        let seen = self.history_count.min(HISTORY_LEN);
        if self.grid_history[..seen].contains(&current_hash) {
            return true;
        }
        self.remember();
        false
    }

    fn remember(&mut self) {
        self.grid_history[self.history_count % HISTORY_LEN] = self.grid.fingerprint();
        self.history_count += 1;
    }
}
