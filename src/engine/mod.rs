//! Simulation engine - grid state, update rule, and change deltas.

mod cell;
mod delta;
mod grid;

pub use cell::CellState;
pub use delta::Delta;
pub use grid::Grid;
