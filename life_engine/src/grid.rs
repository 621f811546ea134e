// grid.rs - Sparse grid types for Conway's Game of Life

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::cell::Cell;

pub type TRow = HashMap<i64, Cell>;       // column -> cell
pub type TRows = HashMap<i64, TRow>;      // row -> columns

/// Only live cells, and during propagation the cells next to them, are
/// stored. A missing entry is a dead cell with no counted neighbours.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SparseGrid {
    rows: TRows,
}

impl SparseGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a settled grid from live coordinates. Duplicates are harmless.
    pub fn from_seed<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut grid = Self::new();
        for (row, col) in cells {
            grid.set_alive(row, col);
        }
        grid
    }

    pub fn get(&self, row: i64, col: i64) -> Option<Cell> {
        self.rows.get(&row).and_then(|cols| cols.get(&col)).copied()
    }

    /// Lookup with a fallback value; never inserts.
    pub fn cell_or(&self, row: i64, col: i64, default: Cell) -> Cell {
        self.get(row, col).unwrap_or(default)
    }

    pub fn is_alive(&self, row: i64, col: i64) -> bool {
        self.get(row, col).is_some_and(|cell| cell.alive)
    }

    pub fn insert(&mut self, row: i64, col: i64, cell: Cell) {
        self.rows.entry(row).or_default().insert(col, cell);
    }

    pub fn set_alive(&mut self, row: i64, col: i64) {
        self.insert(row, col, Cell::LIVE);
    }

    /// Removes one entry, dropping the row map once it is empty.
    pub fn remove(&mut self, row: i64, col: i64) -> Option<Cell> {
        let cols = self.rows.get_mut(&row)?;
        let removed = cols.remove(&col);
        if cols.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Flips one cell of a settled grid. Returns the new liveness.
    pub fn toggle(&mut self, row: i64, col: i64) -> bool {
        if self.remove(row, col).is_some_and(|cell| cell.alive) {
            false
        } else {
            self.set_alive(row, col);
            true
        }
    }

    /// Counts one live neighbour for `(row, col)`. A missing entry is created
    /// first, taking its liveness from `source`.
    pub fn add_neighbour(&mut self, row: i64, col: i64, source: &SparseGrid) {
        let current = self.cell_or(row, col, Cell::placeholder(source.is_alive(row, col)));
        self.insert(row, col, current.with_extra_neighbour());
    }

    /// Merges a partial count grid into this one. Counts add up; a cell is
    /// alive when either side saw it alive.
    pub fn absorb(&mut self, partial: SparseGrid) {
        for (row, cols) in partial.rows {
            let target = self.rows.entry(row).or_default();
            for (col, cell) in cols {
                let merged = match target.get(&col) {
                    Some(existing) => Cell {
                        alive: existing.alive || cell.alive,
                        neighbours: existing.neighbours + cell.neighbours,
                    },
                    None => cell,
                };
                target.insert(col, merged);
            }
        }
    }

    /// All entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, Cell)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, &cell)| (row, col, cell)))
    }

    pub fn rows(&self) -> impl Iterator<Item = (i64, &TRow)> + '_ {
        self.rows.iter().map(|(&row, cols)| (row, cols))
    }

    /// Live coordinates in row-major order.
    pub fn live_cells(&self) -> Vec<(i64, i64)> {
        let mut cells: Vec<_> = self
            .iter()
            .filter(|(_, _, cell)| cell.alive)
            .map(|(row, col, _)| (row, col))
            .collect();
        cells.sort_unstable();
        cells
    }

    pub fn population(&self) -> usize {
        self.iter().filter(|(_, _, cell)| cell.alive).count()
    }

    /// Number of stored entries, live or not.
    pub fn len(&self) -> usize {
        self.rows.values().map(TRow::len).sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Every entry alive with a neutral count, and no empty rows.
    pub fn is_settled(&self) -> bool {
        self.rows
            .values()
            .all(|cols| !cols.is_empty() && cols.values().all(|cell| cell.settled()))
    }

    /// Hash of the live set that does not depend on map iteration order.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for cell in self.live_cells() {
            cell.hash(&mut hasher);
        }
        hasher.finish()
    }
}
