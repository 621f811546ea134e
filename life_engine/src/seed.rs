// seed.rs - Turns initial coordinates into the first settled grid

use crate::error::LifeError;
use crate::grid::SparseGrid;
use crate::viewport::Viewport;

/// Builds the starting grid. Repeated coordinates collapse into one cell.
pub fn load_seed(cells: &[(i64, i64)]) -> SparseGrid {
    SparseGrid::from_seed(cells.iter().copied())
}

/// Like [`load_seed`], but coordinates outside `viewport` are dropped so the
/// first generation already respects the clamp.
pub fn load_seed_within(cells: &[(i64, i64)], viewport: Viewport) -> SparseGrid {
    load_seed(&viewport.clip(cells))
}

/// Parses `"row,col"`, tolerating whitespace around either number.
pub fn parse_cell(text: &str) -> Result<(i64, i64), LifeError> {
    let invalid = || LifeError::InvalidSeedCell(text.to_string());
    let (row, col) = text.split_once(',').ok_or_else(invalid)?;
    let row = row.trim().parse().map_err(|_| invalid())?;
    let col = col.trim().parse().map_err(|_| invalid())?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_idempotent() {
        let with_dupes = load_seed(&[(1, 1), (2, 3), (1, 1), (2, 3), (2, 3)]);
        let deduped = load_seed(&[(1, 1), (2, 3)]);
        assert_eq!(with_dupes, deduped);
        assert_eq!(with_dupes.population(), 2);
        assert!(with_dupes.is_settled());
    }

    #[test]
    fn seed_within_clips() {
        let grid = load_seed_within(&[(0, 0), (11, 0), (0, 11)], Viewport::new(10, 10));
        assert_eq!(grid.live_cells(), vec![(0, 0)]);
    }

    #[test]
    fn parse_cell_accepts_signed_pairs() {
        assert_eq!(parse_cell("3,4").unwrap(), (3, 4));
        assert_eq!(parse_cell(" -2 , 7 ").unwrap(), (-2, 7));
    }

    #[test]
    fn parse_cell_rejects_garbage() {
        for bad in ["", "3", "3;4", "a,1", "1,b", "1,2,3"] {
            assert!(
                matches!(parse_cell(bad), Err(LifeError::InvalidSeedCell(ref s)) if s.as_str() == bad),
                "`{bad}` should be rejected"
            );
        }
    }
}
