//! Initial universe seeding.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Set of cell indexes that start a simulation alive.
///
/// A seed is just a list of linear indexes. Random generation guarantees
/// uniqueness and range up front; explicit lists are validated again by grid
/// construction, so a seed deserialized from untrusted input cannot corrupt a
/// grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    indexes: Vec<u32>,
}

impl Seed {
    /// Wrap an explicit index list without validating it.
    pub fn from_indexes(indexes: Vec<u32>) -> Self {
        Self { indexes }
    }

    /// Draw `count` distinct indexes from `[0, bound)` using the thread RNG.
    ///
    /// Fails before any sampling happens when the range cannot supply enough
    /// unique values.
    pub fn random(count: usize, bound: u32) -> Result<Self, ValidationError> {
        Self::random_with(&mut rand::thread_rng(), count, bound)
    }

    /// Like [`Seed::random`] with a caller-supplied RNG, for deterministic
    /// seeding.
    pub fn random_with<R: Rng + ?Sized>(
        rng: &mut R,
        count: usize,
        bound: u32,
    ) -> Result<Self, ValidationError> {
        if count > bound as usize {
            return Err(ValidationError::RangeTooNarrow {
                requested: count,
                available: bound as usize,
            });
        }

        let mut indexes: Vec<u32> = index::sample(rng, bound as usize, count)
            .into_iter()
            .map(|value| value as u32)
            .collect();
        indexes.sort_unstable();

        Ok(Self { indexes })
    }

    /// The seeded indexes.
    #[inline]
    pub fn indexes(&self) -> &[u32] {
        &self.indexes
    }

    /// Number of seeded cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

/// Seed validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("grid dimensions {width}x{height} contain no cells")]
    EmptyGrid { width: u32, height: u32 },
    #[error("seed index {index} is out of range for a grid of {cells} cells")]
    IndexOutOfRange { index: u32, cells: usize },
    #[error("seed index {0} appears more than once")]
    DuplicateIndex(u32),
    #[error("cannot draw {requested} unique indexes from a range of {available}")]
    RangeTooNarrow { requested: usize, available: usize },
}
