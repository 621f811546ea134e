use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::LifeError;
use crate::viewport::Viewport;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Scatter",
        cells: &[
            (1, 1), (2, 1), (2, 5), (2, 7), (8, 7), (8, 9), (8, 8), (3, 2),
            (3, 6), (3, 7), (8, 2), (8, 3), (8, 4), (9, 5), (9, 4), (9, 2),
        ],
    },
    Pattern {
        name: "Glider",
        cells: &[(6, 7), (7, 8), (8, 6), (8, 7), (8, 8)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(25, 24), (25, 25), (25, 26)],
    },
    Pattern {
        name: "Toad",
        cells: &[(24, 25), (24, 26), (24, 27), (25, 24), (25, 25), (25, 26)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(10, 10), (10, 11), (11, 10), (11, 11), (12, 12), (12, 13), (13, 12), (13, 13)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top section
            (20, 24), (20, 25), (20, 26), (20, 30), (20, 31), (20, 32),
            (22, 22), (22, 27), (22, 29), (22, 34),
            (23, 22), (23, 27), (23, 29), (23, 34),
            (24, 22), (24, 27), (24, 29), (24, 34),
            (25, 24), (25, 25), (25, 26), (25, 30), (25, 31), (25, 32),
            // Bottom section (mirrored)
            (27, 24), (27, 25), (27, 26), (27, 30), (27, 31), (27, 32),
            (28, 22), (28, 27), (28, 29), (28, 34),
            (29, 22), (29, 27), (29, 29), (29, 34),
            (30, 22), (30, 27), (30, 29), (30, 34),
            (32, 24), (32, 25), (32, 26), (32, 30), (32, 31), (32, 32),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(25, 25), (25, 26), (24, 26), (26, 25), (26, 24)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (5, 1), (5, 2), (6, 1), (6, 2),
            (5, 11), (6, 11), (7, 11), (4, 12), (8, 12), (3, 13), (9, 13),
            (3, 14), (9, 14), (6, 15), (4, 16), (8, 16), (5, 17), (6, 17),
            (7, 17), (6, 18), (3, 21), (4, 21), (5, 21), (3, 22), (4, 22),
            (5, 22), (2, 23), (6, 23), (1, 25), (2, 25), (6, 25), (7, 25),
            (3, 35), (4, 35), (3, 36), (4, 36),
        ],
    },
];

/// Case-insensitive lookup by name.
pub fn find_pattern(name: &str) -> Result<&'static Pattern, LifeError> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
}

/// Pseudo-random soup filling the viewport at roughly one cell in three.
pub fn random_seed(viewport: Viewport, seed_value: u64) -> Vec<(i64, i64)> {
    // Simple pseudo-random generator
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    let mut cells = Vec::new();
    for row in 0..=i64::from(viewport.height) {
        for col in 0..=i64::from(viewport.width) {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if (seed >> 16) % 3 == 0 {
                cells.push((row, col));
            }
        }
    }
    cells
}
