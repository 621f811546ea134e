// headless.rs - Timer-driven run without a window

use anyhow::Result;
use life_engine::{Simulation, SparseGrid, Viewport};
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::config::AppConfig;
use crate::stats::MemoryStats;

/// Upper bound when no generation limit is configured.
const MAX_GENERATIONS: u64 = 10_000;

pub async fn run(config: &AppConfig, cells: &[(i64, i64)]) -> Result<()> {
    let viewport = Viewport::new(config.width, config.height);
    let sim = simulate(config, viewport, cells).await?;

    let memory = MemoryStats::new().refresh();
    info!(
        generation = sim.generation(),
        population = sim.grid().population(),
        resident_bytes = memory.resident_bytes,
        virtual_bytes = memory.virtual_bytes,
        "headless run completed"
    );
    println!("{}", render(sim.grid(), viewport));
    Ok(())
}

/// Ticks the clipped seed until the generation limit, or until the grid
/// repeats when no limit is set, and returns the final state.
pub async fn simulate(config: &AppConfig, viewport: Viewport, cells: &[(i64, i64)]) -> Result<Simulation> {
    let mut sim = Simulation::new(&viewport.clip(cells));
    let limit = config.generations.unwrap_or(MAX_GENERATIONS);
    info!(
        width = viewport.width,
        height = viewport.height,
        population = sim.grid().population(),
        limit,
        parallel = config.parallel,
        "headless run started"
    );

    let mut ticker = interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for _ in 0..limit {
        ticker.tick().await;
        let outcome = if config.parallel {
            sim.tick_rows(viewport).await?
        } else {
            sim.tick(viewport)
        };
        info!(generation = outcome.generation, population = outcome.population, "tick");
        if outcome.repeated && config.generations.is_none() {
            break;
        }
    }
    Ok(sim)
}

/// `#` for live cells, `.` for dead ones, one line per viewport row.
pub fn render(grid: &SparseGrid, viewport: Viewport) -> String {
    let mut out = String::new();
    for row in 0..=i64::from(viewport.height) {
        if row > 0 {
            out.push('\n');
        }
        for col in 0..=i64::from(viewport.width) {
            out.push(if grid.is_alive(row, col) { '#' } else { '.' });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_engine::load_seed;

    #[test]
    fn render_draws_inclusive_viewport() {
        let grid = load_seed(&[(0, 1), (1, 1), (2, 1)]);
        assert_eq!(render(&grid, Viewport::new(2, 2)), ".#.\n.#.\n.#.");
    }

    fn quick_config(generations: Option<u64>, parallel: bool) -> AppConfig {
        AppConfig {
            tick_interval_ms: 1,
            width: 10,
            height: 10,
            generations,
            parallel,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn blinker_after_three_generations() {
        for parallel in [false, true] {
            let config = quick_config(Some(3), parallel);
            let viewport = Viewport::new(config.width, config.height);
            let sim = simulate(&config, viewport, &[(1, 0), (1, 1), (1, 2)]).await.unwrap();
            assert_eq!(sim.generation(), 3, "parallel = {parallel}");
            assert_eq!(sim.grid().live_cells(), vec![(0, 1), (1, 1), (2, 1)]);
        }
    }

    #[tokio::test]
    async fn unlimited_run_stops_on_still_life() {
        let config = quick_config(None, true);
        let viewport = Viewport::new(config.width, config.height);
        let block = [(4, 4), (4, 5), (5, 4), (5, 5)];
        let sim = simulate(&config, viewport, &block).await.unwrap();
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.grid().live_cells(), block.to_vec());
    }

    #[tokio::test]
    async fn seed_outside_viewport_is_clipped() {
        let config = quick_config(Some(1), false);
        let viewport = Viewport::new(config.width, config.height);
        let sim = simulate(&config, viewport, &[(1, 1), (1, 2), (2, 1), (2, 2), (40, 40)]).await.unwrap();
        assert_eq!(sim.grid().live_cells(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[tokio::test]
    async fn short_run_completes() {
        run(&quick_config(Some(3), false), &[(1, 0), (1, 1), (1, 2)]).await.unwrap();
    }
}
