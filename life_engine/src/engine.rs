// engine.rs - Generation engine: neighbour propagation, then rule application

use std::sync::Arc;

use tracing::debug;

use crate::cell::Cell;
use crate::error::LifeError;
use crate::grid::SparseGrid;
use crate::viewport::Viewport;

/// Phase one. Every live cell of `grid` gets an entry, and every in-viewport
/// neighbour of a live cell gets an entry holding its live-neighbour count.
pub fn propagate(grid: &SparseGrid, viewport: Viewport) -> SparseGrid {
    let mut counted = SparseGrid::new();
    for (row, col, cell) in grid.iter() {
        if cell.alive {
            count_around(&mut counted, grid, viewport, row, col);
        }
    }
    counted
}

/// Phase two. Keeps exactly the cells alive in the next generation, each
/// with a neutral count. Rows without survivors are never created.
pub fn apply_rules(counted: &SparseGrid) -> SparseGrid {
    SparseGrid::from_seed(
        counted
            .iter()
            .filter(|(_, _, cell)| cell.next_alive())
            .map(|(row, col, _)| (row, col)),
    )
}

/// One full generation.
pub fn step(grid: &SparseGrid, viewport: Viewport) -> SparseGrid {
    debug_assert!(grid.is_settled(), "step needs a settled grid");

    let counted = propagate(grid, viewport);
    let next = apply_rules(&counted);

    debug!(counted = counted.len(), population = next.population(), "generation computed");
    debug_assert!(next.is_settled());
    next
}

/// One full generation with propagation split into one cooperative task per
/// source row. Each task counts into its own partial grid; the partials are
/// merged before the rules run, so the result equals [`step`].
///
/// Must be called from within a tokio runtime.
pub async fn step_rows(grid: Arc<SparseGrid>, viewport: Viewport) -> Result<SparseGrid, LifeError> {
    debug_assert!(grid.is_settled(), "step_rows needs a settled grid");

    // Spawn all row coroutines up front so they interleave
    let mut handles = Vec::with_capacity(grid.row_count());
    for (row, cols) in grid.rows() {
        let columns: Vec<i64> = cols
            .iter()
            .filter(|(_, cell)| cell.alive)
            .map(|(&col, _)| col)
            .collect();
        let source = Arc::clone(&grid);
        handles.push((row, tokio::spawn(propagate_row(row, columns, source, viewport))));
    }

    let mut counted = SparseGrid::new();
    for (row, handle) in handles {
        let partial = handle.await.map_err(|source| LifeError::RowTask { row, source })?;
        counted.absorb(partial);
    }

    let next = apply_rules(&counted);
    debug!(
        rows = grid.row_count(),
        counted = counted.len(),
        population = next.population(),
        "generation computed by row tasks"
    );
    debug_assert!(next.is_settled());
    Ok(next)
}

/// Row coroutine: counts around every live cell of one source row.
async fn propagate_row(row: i64, columns: Vec<i64>, source: Arc<SparseGrid>, viewport: Viewport) -> SparseGrid {
    let mut partial = SparseGrid::new();
    for col in columns {
        count_around(&mut partial, &source, viewport, row, col);
        tokio::task::yield_now().await;
    }
    partial
}

fn count_around(counted: &mut SparseGrid, source: &SparseGrid, viewport: Viewport, row: i64, col: i64) {
    // A live cell is not its own neighbour; it only needs an entry
    let own = counted.cell_or(row, col, Cell::LIVE);
    counted.insert(row, col, Cell { alive: true, ..own });

    for (r, c) in viewport.neighbours(row, col) {
        counted.add_neighbour(r, c, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOMY: Viewport = Viewport::new(20, 20);

    #[test]
    fn propagate_counts_around_single_cell() {
        let grid = SparseGrid::from_seed([(5, 5)]);
        let counted = propagate(&grid, ROOMY);
        assert_eq!(counted.len(), 9);
        assert_eq!(counted.get(5, 5), Some(Cell::LIVE));
        for (dr, dc) in crate::viewport::MOORE_OFFSETS {
            assert_eq!(counted.get(5 + dr, 5 + dc), Some(Cell { alive: false, neighbours: 1 }));
        }
    }

    #[test]
    fn propagate_marks_live_neighbours_alive() {
        let grid = SparseGrid::from_seed([(1, 1), (1, 2)]);
        let counted = propagate(&grid, ROOMY);
        assert_eq!(counted.get(1, 1), Some(Cell { alive: true, neighbours: 1 }));
        assert_eq!(counted.get(1, 2), Some(Cell { alive: true, neighbours: 1 }));
        assert_eq!(counted.get(0, 1), Some(Cell { alive: false, neighbours: 2 }));
    }

    #[test]
    fn propagate_respects_viewport_corner() {
        let vp = Viewport::new(3, 3);
        let grid = SparseGrid::from_seed([(3, 3)]);
        let counted = propagate(&grid, vp);
        let mut seen: Vec<_> = counted.iter().map(|(r, c, _)| (r, c)).collect();
        seen.sort();
        assert_eq!(seen, vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    }

    #[test]
    fn apply_rules_keeps_only_next_generation() {
        let mut counted = SparseGrid::new();
        counted.insert(0, 0, Cell { alive: true, neighbours: 2 });
        counted.insert(0, 1, Cell { alive: true, neighbours: 4 });
        counted.insert(1, 0, Cell { alive: false, neighbours: 3 });
        counted.insert(2, 0, Cell { alive: false, neighbours: 2 });
        let next = apply_rules(&counted);
        assert_eq!(next.live_cells(), vec![(0, 0), (1, 0)]);
        assert_eq!(next.row_count(), 2);
        assert!(next.is_settled());
    }

    #[test]
    fn lone_cell_dies() {
        let next = step(&SparseGrid::from_seed([(4, 4)]), ROOMY);
        assert!(next.is_empty());
    }

    #[test]
    fn empty_grid_stays_empty() {
        assert!(step(&SparseGrid::new(), ROOMY).is_empty());
    }

    #[tokio::test]
    async fn row_tasks_match_sequential_step() {
        let grid = SparseGrid::from_seed([(1, 1), (2, 2), (3, 0), (3, 1), (3, 2)]);
        let expected = step(&grid, ROOMY);
        let actual = step_rows(Arc::new(grid), ROOMY).await.unwrap();
        assert_eq!(actual, expected);
    }
}
