//! Board position types.

use std::fmt::{self, Display};
use std::iter::FusedIterator;

/// A cell coordinate on an N×N board.
///
/// Positions are 0-indexed and value-equal, so they can be used directly to
/// address entries in per-position grids.
///
/// # Examples
///
/// ```
/// use annealace_core::Position;
///
/// let pos = Position::new(2, 7);
/// assert_eq!(pos.row, 2);
/// assert_eq!(pos.col, 7);
/// assert_eq!(pos.to_string(), "(2, 7)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index (0-based).
    pub row: usize,
    /// Column index (0-based).
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterator over every position of a square grid, in row-major order.
///
/// Returned by [`Board::positions`](crate::Board::positions) and
/// [`PositionGrid::positions`](crate::PositionGrid::positions).
#[derive(Debug, Clone)]
pub struct Positions {
    size: usize,
    next: usize,
}

impl Positions {
    pub(crate) fn new(size: usize) -> Self {
        Self { size, next: 0 }
    }
}

impl Iterator for Positions {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.size * self.size {
            return None;
        }
        let pos = Position::new(self.next / self.size, self.next % self.size);
        self.next += 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size * self.size - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}
impl FusedIterator for Positions {}
