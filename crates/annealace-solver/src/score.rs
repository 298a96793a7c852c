//! Objective scoring over boards.
//!
//! The score of a board is its conflict count plus its empty-cell count. It
//! is `0` exactly when the board is completely filled and conflict-free.
//! Scoring is a pure function of the board and never fails.

use annealace_core::{Board, DigitSet, Position};

/// Counts repeated digits across all rows, columns, and sub-blocks.
///
/// Each line (row, column, or sub-block) is scanned in order while tracking
/// the digits already seen; every non-zero cell whose digit was seen earlier
/// in the same line adds exactly one conflict. A line holding `k` copies of
/// the same digit therefore contributes `k - 1` conflicts, not the pairwise
/// count `k * (k - 1) / 2`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use annealace_core::Board;
/// use annealace_solver::count_conflicts;
///
/// let board = Board::from_str("1234\n3412\n2143\n4321")?;
/// assert_eq!(count_conflicts(&board), 0);
/// # Ok::<(), annealace_core::ParseBoardError>(())
/// ```
#[must_use]
pub fn count_conflicts(board: &Board) -> u32 {
    let size = board.size();
    let mut conflicts = 0;

    for i in 0..size {
        let mut row_seen = DigitSet::new();
        let mut col_seen = DigitSet::new();
        for j in 0..size {
            let row_digit = board.get(Position::new(i, j));
            if row_digit != 0 {
                if row_seen.contains(row_digit) {
                    conflicts += 1;
                }
                row_seen.insert(row_digit);
            }
            let col_digit = board.get(Position::new(j, i));
            if col_digit != 0 {
                if col_seen.contains(col_digit) {
                    conflicts += 1;
                }
                col_seen.insert(col_digit);
            }
        }
    }

    let block = board.block_size();
    for block_row in (0..size).step_by(block) {
        for block_col in (0..size).step_by(block) {
            let mut seen = DigitSet::new();
            for row in block_row..block_row + block {
                for col in block_col..block_col + block {
                    let digit = board.get(Position::new(row, col));
                    if digit != 0 {
                        if seen.contains(digit) {
                            conflicts += 1;
                        }
                        seen.insert(digit);
                    }
                }
            }
        }
    }

    conflicts
}

/// Number of empty cells on the board.
#[must_use]
pub fn count_empty_tiles(board: &Board) -> u32 {
    #[expect(clippy::cast_possible_truncation)]
    let empty = board
        .positions()
        .filter(|&pos| board.get(pos) == 0)
        .count() as u32;
    empty
}

/// Conflicts plus empty cells. Lower is better; `0` means solved.
#[must_use]
pub fn objective_score(board: &Board) -> u32 {
    count_conflicts(board) + count_empty_tiles(board)
}

/// Whether the digit at `pos` occurs more than once in its row, column, or
/// sub-block.
///
/// This is the local check used while probing a trial placement; it is much
/// cheaper than re-running [`count_conflicts`] over the whole board. The cell
/// at `pos` must be non-empty.
#[must_use]
pub fn has_conflicts(board: &Board, pos: Position) -> bool {
    let digit = board.get(pos);
    debug_assert!(digit != 0, "has_conflicts probed an empty cell at {pos}");
    let size = board.size();

    let row_count = (0..size)
        .filter(|&col| board.get(Position::new(pos.row, col)) == digit)
        .count();
    if row_count > 1 {
        return true;
    }

    let col_count = (0..size)
        .filter(|&row| board.get(Position::new(row, pos.col)) == digit)
        .count();
    if col_count > 1 {
        return true;
    }

    let origin = board.block_origin(pos);
    let block = board.block_size();
    let mut block_count = 0;
    for row in origin.row..origin.row + block {
        for col in origin.col..origin.col + block {
            if board.get(Position::new(row, col)) == digit {
                block_count += 1;
            }
        }
    }
    block_count > 1
}
