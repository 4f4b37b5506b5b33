//! Double-buffered Life grid.

use std::fmt::{self, Display, Formatter};
use std::mem;

use crate::schema::{Seed, ValidationError};

use super::delta::DeltaBuf;
use super::{CellState, Delta};

/// Grid state container and update-rule driver.
///
/// Cells live in a flat row-major buffer indexed by `y * width + x`. A second
/// buffer of the same size receives the next generation so that neighbour
/// counts always read a fully-settled previous state; the buffers swap roles
/// after every [`Grid::advance`].
#[derive(Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<CellState>,
    next: Vec<CellState>,
    delta: DeltaBuf,
}

impl Grid {
    /// Build a grid with exactly the seed indexes alive.
    ///
    /// Fails without constructing anything if the dimensions are zero, a seed
    /// index falls outside `[0, width * height)`, or an index repeats.
    pub fn new(width: u32, height: u32, seed: &Seed) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptyGrid { width, height });
        }

        let num_cells = width as usize * height as usize;
        let mut cells = vec![CellState::Dead; num_cells];

        for &index in seed.indexes() {
            if index as usize >= num_cells {
                return Err(ValidationError::IndexOutOfRange {
                    index,
                    cells: num_cells,
                });
            }
            if cells[index as usize].is_alive() {
                return Err(ValidationError::DuplicateIndex(index));
            }
            cells[index as usize] = CellState::Alive;
        }

        Ok(Self {
            width,
            height,
            cells,
            next: vec![CellState::Dead; num_cells],
            delta: DeltaBuf::default(),
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total cell count (`width * height`).
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// State of the cell at `index`.
    #[inline]
    pub fn state(&self, index: u32) -> CellState {
        self.cells[index as usize]
    }

    /// Indexes of all living cells, ascending.
    pub fn alive_indexes(&self) -> Vec<u32> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_alive())
            .map(|(index, _)| index as u32)
            .collect()
    }

    /// Flip the cell at `index` in place.
    ///
    /// No delta is produced and no generation advances; the flip becomes
    /// observable through the next [`Grid::advance`] delta, together with one
    /// rule evaluation.
    pub fn toggle(&mut self, index: u32) {
        let cell = &mut self.cells[index as usize];
        *cell = cell.toggled();
    }

    /// Living neighbours of `(x, y)`, with positions outside the grid treated
    /// as permanently dead (bounded, non-wrapping edges).
    fn count_alive_neighbours(&self, x: u32, y: u32) -> u8 {
        let mut count = 0u8;

        for y_offset in -1i64..=1 {
            for x_offset in -1i64..=1 {
                if x_offset == 0 && y_offset == 0 {
                    continue;
                }

                let neighbour_x = x as i64 + x_offset;
                let neighbour_y = y as i64 + y_offset;
                if neighbour_x < 0
                    || neighbour_x >= self.width as i64
                    || neighbour_y < 0
                    || neighbour_y >= self.height as i64
                {
                    continue;
                }

                let index = neighbour_y as usize * self.width as usize + neighbour_x as usize;
                count += self.cells[index] as u8;
            }
        }

        count
    }

    /// Compute the next generation and return the set of changed cells.
    ///
    /// The returned [`Delta`] borrows scratch buffers owned by the grid; it
    /// must be consumed before the next mutating call, which reuses the
    /// backing memory.
    pub fn advance(&mut self) -> Delta<'_> {
        self.delta.clear();

        for index in 0..self.cells.len() {
            let x = index as u32 % self.width;
            let y = index as u32 / self.width;

            let state = self.cells[index];
            let neighbours = self.count_alive_neighbours(x, y);

            let next_state = match (state, neighbours) {
                (CellState::Alive, 2 | 3) => CellState::Alive,
                (CellState::Dead, 3) => CellState::Alive,
                _ => CellState::Dead,
            };

            self.next[index] = next_state;
            if next_state != state {
                self.delta.push(index as u32, next_state);
            }
        }

        mem::swap(&mut self.cells, &mut self.next);

        self.delta.view()
    }
}

impl Display for Grid {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            for state in row {
                write!(formatter, "{state}")?;
            }
            writeln!(formatter)?;
        }

        Ok(())
    }
}
