// viewport.rs - Clamping bounds for neighbour propagation

use tracing::warn;

/// The 8 Moore-neighbourhood offsets as (row, col) deltas.
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Inclusive bounds: a coordinate is inside when `0 <= row <= height` and
/// `0 <= col <= width`. Cells outside never receive counts and are never born.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Derives the clamp from a drawing surface of `columns` x `rows` cells,
    /// keeping `reserved_rows` at the bottom free for the statistics panel.
    ///
    /// The upper bounds are the raw dimensions, so one column past the right
    /// edge and one row past the last grid row are still tracked.
    pub fn from_screen(columns: u32, rows: u32, reserved_rows: u32) -> Self {
        Self::new(columns, rows.saturating_sub(reserved_rows))
    }

    #[inline]
    pub fn contains(&self, row: i64, col: i64) -> bool {
        (0..=i64::from(self.height)).contains(&row) && (0..=i64::from(self.width)).contains(&col)
    }

    /// In-viewport neighbours of `(row, col)`. Offsets that would overflow
    /// `i64` are skipped; they can never land inside the viewport.
    pub fn neighbours(&self, row: i64, col: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| Some((row.checked_add(dr)?, col.checked_add(dc)?)))
            .filter(move |&(r, c)| self.contains(r, c))
    }

    /// Drops coordinates outside the viewport.
    pub fn clip(&self, cells: &[(i64, i64)]) -> Vec<(i64, i64)> {
        let kept: Vec<_> = cells.iter().copied().filter(|&(r, c)| self.contains(r, c)).collect();
        let dropped = cells.len() - kept.len();
        if dropped > 0 {
            warn!(dropped, width = self.width, height = self.height, "seed cells outside viewport ignored");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let vp = Viewport::new(4, 2);
        assert!(vp.contains(0, 0));
        assert!(vp.contains(2, 4));
        assert!(!vp.contains(3, 4));
        assert!(!vp.contains(2, 5));
        assert!(!vp.contains(-1, 0));
        assert!(!vp.contains(0, -1));
    }

    #[test]
    fn corner_has_three_neighbours() {
        let vp = Viewport::new(10, 10);
        let mut around: Vec<_> = vp.neighbours(0, 0).collect();
        around.sort();
        assert_eq!(around, vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(vp.neighbours(10, 10).count(), 3);
        assert_eq!(vp.neighbours(5, 5).count(), 8);
    }

    #[test]
    fn extreme_coordinates_have_no_neighbours() {
        let vp = Viewport::new(10, 10);
        assert_eq!(vp.neighbours(i64::MAX, 0).count(), 0);
        assert_eq!(vp.neighbours(0, i64::MIN).count(), 0);
        assert_eq!(vp.neighbours(i64::MIN, i64::MAX).count(), 0);
    }

    #[test]
    fn from_screen_reserves_stats_rows() {
        assert_eq!(Viewport::from_screen(80, 24, 5), Viewport::new(80, 19));
        assert_eq!(Viewport::from_screen(80, 3, 5), Viewport::new(80, 0));
    }

    #[test]
    fn clip_drops_outside_cells() {
        let vp = Viewport::new(3, 3);
        let kept = vp.clip(&[(0, 0), (3, 3), (4, 0), (-1, 2), (2, 2)]);
        assert_eq!(kept, vec![(0, 0), (3, 3), (2, 2)]);
    }
}
