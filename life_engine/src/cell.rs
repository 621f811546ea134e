// cell.rs - Value-typed cell stored in the sparse grid

/// One grid entry: liveness plus the neighbour count gathered while the
/// next generation is being computed. Cells are plain values; every update
/// reads the old value and writes a new one back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub alive: bool,
    pub neighbours: u8,
}

impl Cell {
    /// A live cell with a neutral count, as found in a settled grid.
    pub const LIVE: Cell = Cell { alive: true, neighbours: 0 };

    /// Entry created on demand during propagation, before any count lands on it.
    pub const fn placeholder(alive: bool) -> Self {
        Cell { alive, neighbours: 0 }
    }

    #[must_use]
    pub const fn with_extra_neighbour(self) -> Self {
        Cell { alive: self.alive, neighbours: self.neighbours + 1 }
    }

    /// Conway's rules applied to a counted cell.
    pub const fn next_alive(self) -> bool {
        matches!(
            (self.alive, self.neighbours),
            (true, 2) | (true, 3)   // Survival
            | (false, 3)            // Birth
        )
    }

    /// True for entries allowed to persist between generations.
    pub const fn settled(self) -> bool {
        self.alive && self.neighbours == 0
    }
}
