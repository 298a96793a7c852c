//! Core data structures for the annealace puzzle solver.
//!
//! This crate provides the board representation and the supporting types the
//! solver builds on:
//!
//! - [`board`]: the N×N digit grid with sub-block geometry, text parsing, and
//!   formatting. `0` marks an empty cell.
//! - [`position`]: `(row, col)` coordinates used to address cells.
//! - [`grid`]: generic fixed-size per-position storage, used instead of
//!   position-keyed maps.
//! - [`digit_set`]: compact bitmask sets of candidate digits.
//!
//! Boards are plain value types. Cloning one yields a fully independent copy,
//! which the solver relies on to keep its current and best search states from
//! aliasing each other.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr as _;
//!
//! use annealace_core::{Board, Position};
//!
//! let board = Board::from_str("1234\n3412\n2143\n4321")?;
//! assert_eq!(board.size(), 4);
//! assert_eq!(board.block_size(), 2);
//! assert_eq!(board.get(Position::new(1, 0)), 3);
//! # Ok::<(), annealace_core::ParseBoardError>(())
//! ```

pub mod board;
pub mod digit_set;
pub mod grid;
pub mod position;

pub use self::{
    board::{Board, ParseBoardError},
    digit_set::DigitSet,
    grid::PositionGrid,
    position::Position,
};
