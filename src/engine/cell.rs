//! Cell state type shared by the grid and the delta protocol.

use std::fmt::{self, Display, Formatter};

/// State of a single cell.
///
/// `repr(u8)` so a state doubles as its own neighbour-count contribution
/// and packs densely in the delta scratch buffers.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellState {
    Dead = 0,
    Alive = 1,
}

impl CellState {
    /// Whether this state counts as a living neighbour.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// The opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl Display for CellState {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                CellState::Alive => '█',
                CellState::Dead => '·',
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips_both_ways() {
        assert_eq!(CellState::Alive.toggled(), CellState::Dead);
        assert_eq!(CellState::Dead.toggled(), CellState::Alive);
    }

    #[test]
    fn test_alive_counts_as_one_neighbour() {
        assert_eq!(CellState::Alive as u8, 1);
        assert_eq!(CellState::Dead as u8, 0);
    }
}
