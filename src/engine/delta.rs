//! Per-generation change sets.
//!
//! A [`Delta`] is a borrowed, zero-copy view into scratch buffers owned by the
//! grid. The borrow ends at the next mutating call on the grid, at which point
//! the backing memory is cleared and reused for the following generation. The
//! borrow checker enforces that a consumer reads or copies the delta before
//! issuing further mutations.

use super::CellState;

/// Scratch storage for one generation's changes.
///
/// Two parallel vectors rather than a vector of pairs: the renderer side
/// consumes indexes and states as separate slices.
#[derive(Debug, Default)]
pub(crate) struct DeltaBuf {
    indexes: Vec<u32>,
    states: Vec<CellState>,
}

impl DeltaBuf {
    /// Reset for the next generation, keeping allocations.
    pub(crate) fn clear(&mut self) {
        self.indexes.clear();
        self.states.clear();
    }

    /// Record one changed cell. Callers must push in ascending index order.
    pub(crate) fn push(&mut self, index: u32, new_state: CellState) {
        debug_assert!(
            self.indexes.last().is_none_or(|&last| last < index),
            "change for cell {index} pushed out of order"
        );

        self.indexes.push(index);
        self.states.push(new_state);
    }

    pub(crate) fn view(&self) -> Delta<'_> {
        Delta {
            indexes: &self.indexes,
            states: &self.states,
        }
    }
}

/// Ordered set of cells that changed in one generation step.
///
/// Invariants: indexes are ascending, contain no duplicates, and cover exactly
/// the cells whose state differs between the pre- and post-step grids.
#[derive(Debug, Clone, Copy)]
pub struct Delta<'a> {
    indexes: &'a [u32],
    states: &'a [CellState],
}

impl<'a> Delta<'a> {
    /// Number of changed cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Indexes of the changed cells, ascending.
    #[inline]
    pub fn indexes(&self) -> &'a [u32] {
        self.indexes
    }

    /// New states, parallel to [`Delta::indexes`].
    #[inline]
    pub fn states(&self) -> &'a [CellState] {
        self.states
    }

    /// Iterate over `(index, new_state)` pairs in ascending index order.
    pub fn iter(self) -> impl ExactSizeIterator<Item = (u32, CellState)> + 'a {
        self.indexes
            .iter()
            .copied()
            .zip(self.states.iter().copied())
    }
}
