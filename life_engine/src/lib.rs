//! Sparse incremental Game of Life engine.
//!
//! Only live cells and their neighbours are tracked. Each generation first
//! propagates neighbour counts out of every live cell (clamped to a
//! [`Viewport`]), then applies the survival/birth rules and prunes everything
//! that is not alive.

pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod seed;
pub mod simulation;
pub mod viewport;

pub use cell::Cell;
pub use engine::{apply_rules, propagate, step, step_rows};
pub use error::LifeError;
pub use grid::SparseGrid;
pub use patterns::{PATTERNS, Pattern, find_pattern, random_seed};
pub use seed::{load_seed, load_seed_within, parse_cell};
pub use simulation::{Simulation, TickOutcome};
pub use viewport::{MOORE_OFFSETS, Viewport};
