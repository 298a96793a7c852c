//! The puzzle board: digit storage, sub-block geometry, parsing, and
//! formatting.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{DigitSet, Position, position::Positions};

/// Errors produced when constructing a board from text or rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    /// The input contained no rows at all.
    #[display("puzzle input is empty")]
    Empty,
    /// The number of rows does not match the size implied by the first row.
    #[display("expected {expected} rows, found {found}")]
    RowCount {
        /// Expected row count (the board size).
        expected: usize,
        /// Number of rows actually present.
        found: usize,
    },
    /// A row's length differs from the board size.
    #[display("row {row} has {found} cells, expected {expected}")]
    RowLength {
        /// Index of the offending row.
        row: usize,
        /// Expected cell count (the board size).
        expected: usize,
        /// Number of cells actually present.
        found: usize,
    },
    /// A cell character was not a decimal digit.
    #[display("row {row}, column {col}: invalid character {found:?}")]
    InvalidCharacter {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The character found.
        found: char,
    },
    /// A cell digit exceeds the board size.
    #[display("row {row}, column {col}: digit {digit} exceeds board size {size}")]
    DigitOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The digit found.
        digit: u8,
        /// The board size.
        size: usize,
    },
    /// The board size is not a perfect square, so it has no sub-block
    /// geometry.
    #[display("board size {size} is not a perfect square")]
    NotSquare {
        /// The offending size.
        size: usize,
    },
    /// The board size exceeds the largest supported digit domain.
    #[display("board size {size} exceeds the supported maximum of 16")]
    TooLarge {
        /// The offending size.
        size: usize,
    },
}

/// An N×N digit grid where `0` marks an empty cell.
///
/// `N` must be a perfect square no larger than 16, the widest digit domain a
/// [`DigitSet`] can hold; the sub-block side is `√N`. Every cell value
/// lies in `[0, N]`, enforced at construction and on every write. Boards are
/// plain values: cloning produces an independent copy with no shared storage,
/// which the solver depends on when snapshotting search states.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use annealace_core::{Board, Position};
///
/// let board = Board::from_str("1204\n3412\n2143\n4321")?;
/// assert_eq!(board.get(Position::new(0, 2)), 0);
/// assert_eq!(board.block_origin(Position::new(3, 3)), Position::new(2, 2));
/// assert_eq!(board.to_string(), "1204\n3412\n2143\n4321");
/// # Ok::<(), annealace_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    block_size: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Builds a board from rows of cell values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseBoardError`] if there are no rows, any row's length
    /// differs from the row count, the size is not a perfect square or
    /// exceeds 16, or any value exceeds the board size.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, ParseBoardError> {
        let size = rows.first().ok_or(ParseBoardError::Empty)?.len();
        if rows.len() != size {
            return Err(ParseBoardError::RowCount {
                expected: size,
                found: rows.len(),
            });
        }
        let block_size = size.isqrt();
        if block_size * block_size != size {
            return Err(ParseBoardError::NotSquare { size });
        }
        // Digit sets hold at most 16 members, so larger boards have digits
        // they could never represent.
        if size > 16 {
            return Err(ParseBoardError::TooLarge { size });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ParseBoardError::RowLength {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            for (col, &digit) in values.iter().enumerate() {
                if usize::from(digit) > size {
                    return Err(ParseBoardError::DigitOutOfRange {
                        row,
                        col,
                        digit,
                        size,
                    });
                }
                cells.push(digit);
            }
        }

        Ok(Self {
            size,
            block_size,
            cells,
        })
    }

    /// Side length of the board.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Side length of one sub-block (`√N`).
    #[must_use]
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns the digit at `pos`, `0` meaning empty.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    #[must_use]
    #[inline]
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[self.offset(pos)]
    }

    /// Writes `digit` at `pos`. `0` clears the cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds or `digit` exceeds the board size.
    #[inline]
    pub fn set(&mut self, pos: Position, digit: u8) {
        assert!(
            usize::from(digit) <= self.size,
            "digit {digit} exceeds board size {}",
            self.size
        );
        let offset = self.offset(pos);
        self.cells[offset] = digit;
    }

    /// Returns `true` if no cell is empty.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(|&digit| digit != 0)
    }

    /// Iterates over every position of the board in row-major order.
    #[must_use]
    pub fn positions(&self) -> Positions {
        Positions::new(self.size)
    }

    /// Top-left position of the sub-block containing `pos`.
    #[must_use]
    pub fn block_origin(&self, pos: Position) -> Position {
        Position::new(
            pos.row / self.block_size * self.block_size,
            pos.col / self.block_size * self.block_size,
        )
    }

    /// Non-zero digits present in `row`.
    #[must_use]
    pub fn row_digits(&self, row: usize) -> DigitSet {
        let mut set = DigitSet::new();
        for col in 0..self.size {
            let digit = self.get(Position::new(row, col));
            if digit != 0 {
                set.insert(digit);
            }
        }
        set
    }

    /// Non-zero digits present in `col`.
    #[must_use]
    pub fn col_digits(&self, col: usize) -> DigitSet {
        let mut set = DigitSet::new();
        for row in 0..self.size {
            let digit = self.get(Position::new(row, col));
            if digit != 0 {
                set.insert(digit);
            }
        }
        set
    }

    /// Non-zero digits present in the sub-block containing `pos`.
    #[must_use]
    pub fn block_digits(&self, pos: Position) -> DigitSet {
        let origin = self.block_origin(pos);
        let mut set = DigitSet::new();
        for row in origin.row..origin.row + self.block_size {
            for col in origin.col..origin.col + self.block_size {
                let digit = self.get(Position::new(row, col));
                if digit != 0 {
                    set.insert(digit);
                }
            }
        }
        set
    }

    #[inline]
    fn offset(&self, pos: Position) -> usize {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position {pos} out of bounds for board of size {}",
            self.size
        );
        pos.row * self.size + pos.col
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses a board from one text row per line.
    ///
    /// Each line must hold exactly `size` characters `'0'..='9'`, where the
    /// size is taken from the first line and `'0'` marks an empty cell.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (row, line) in s.lines().enumerate() {
            let mut values = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let digit = ch
                    .to_digit(10)
                    .ok_or(ParseBoardError::InvalidCharacter { row, col, found: ch })?;
                #[expect(clippy::cast_possible_truncation)]
                values.push(digit as u8);
            }
            rows.push(values);
        }
        Self::from_rows(&rows)
    }
}

impl Display for Board {
    /// Formats the board as one concatenated digit string per row.
    ///
    /// The output of a parsed board reproduces the source rows byte for byte.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                write!(f, "{}", self.get(Position::new(row, col)))?;
            }
        }
        Ok(())
    }
}
