//! Fixed-size per-position storage.

use std::ops::{Index, IndexMut};

use crate::{Position, position::Positions};

/// A square grid of per-cell values indexed by [`Position`].
///
/// This replaces position-keyed maps: every position of the board the grid
/// was built for has an entry from the start, lookups are plain array
/// accesses, and the shape can never drift from the board's.
///
/// # Examples
///
/// ```
/// use annealace_core::{Position, PositionGrid};
///
/// let mut locked = PositionGrid::filled(4, false);
/// locked[Position::new(0, 3)] = true;
///
/// assert!(locked[Position::new(0, 3)]);
/// assert!(!locked[Position::new(3, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGrid<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> PositionGrid<T> {
    /// Creates a `size × size` grid holding copies of `value`.
    #[must_use]
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size * size],
        }
    }
}

impl<T> PositionGrid<T> {
    /// Side length of the grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over every position of the grid in row-major order.
    #[must_use]
    pub fn positions(&self) -> Positions {
        Positions::new(self.size)
    }

    #[inline]
    fn offset(&self, pos: Position) -> usize {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position {pos} out of bounds for grid of size {}",
            self.size
        );
        pos.row * self.size + pos.col
    }
}

impl<T> Index<Position> for PositionGrid<T> {
    type Output = T;

    #[inline]
    fn index(&self, pos: Position) -> &T {
        &self.cells[self.offset(pos)]
    }
}

impl<T> IndexMut<Position> for PositionGrid<T> {
    #[inline]
    fn index_mut(&mut self, pos: Position) -> &mut T {
        let offset = self.offset(pos);
        &mut self.cells[offset]
    }
}
