//! Constraint analysis: locked positions, forbidden digit sets, and forced
//! placements.
//!
//! The deterministic half of the solver lives here. A [`LockedPositions`]
//! grid records which cells may never change again; [`ForbiddenSets`] records,
//! for each open cell, the digits its row, column, and sub-block already rule
//! out. From those two, [`find_naked_single`] and [`find_hidden_single`]
//! derive placements that require no trial and error.

use annealace_core::{Board, DigitSet, Position, PositionGrid};

/// Tracks which positions must never be mutated again.
///
/// A position is locked when it was given in the original puzzle or was later
/// deduced with certainty. Locks are only ever added, never cleared, so a
/// locked cell keeps its digit for the rest of the run.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use annealace_core::{Board, Position};
/// use annealace_solver::LockedPositions;
///
/// let board = Board::from_str("1204\n3412\n2143\n4321")?;
/// let locked = LockedPositions::from_board(&board);
/// assert!(locked.is_locked(Position::new(0, 0)));
/// assert!(!locked.is_locked(Position::new(0, 2)));
/// # Ok::<(), annealace_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LockedPositions {
    grid: PositionGrid<bool>,
}

impl LockedPositions {
    /// Locks every non-zero cell of the original puzzle.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let mut grid = PositionGrid::filled(board.size(), false);
        for pos in board.positions() {
            if board.get(pos) != 0 {
                grid[pos] = true;
            }
        }
        Self { grid }
    }

    /// Returns `true` if `pos` is permanently fixed.
    #[must_use]
    #[inline]
    pub fn is_locked(&self, pos: Position) -> bool {
        self.grid[pos]
    }

    /// Marks `pos` as permanently fixed.
    #[inline]
    pub fn lock(&mut self, pos: Position) {
        self.grid[pos] = true;
    }

    /// Side length of the underlying grid.
    #[must_use]
    pub fn size(&self) -> usize {
        self.grid.size()
    }
}

/// Per-position forbidden digit sets for the open cells of one board
/// snapshot.
///
/// For every empty, unlocked position this records the union of non-zero
/// digits found in its row, column, and sub-block. Positions that were filled
/// or locked when the snapshot was taken carry no entry.
///
/// The controller recomputes the snapshot only when the locking state
/// changes, not after every stochastic move, so entries can lag behind the
/// current board. Consumers that need the current cell contents must check
/// the board as well.
#[derive(Debug, Clone)]
pub struct ForbiddenSets {
    sets: PositionGrid<Option<DigitSet>>,
}

impl ForbiddenSets {
    /// Computes forbidden sets for every open position of `board`.
    #[must_use]
    pub fn compute(board: &Board, locked: &LockedPositions) -> Self {
        let mut sets = PositionGrid::filled(board.size(), None);
        for pos in board.positions() {
            if board.get(pos) == 0 && !locked.is_locked(pos) {
                let forbidden =
                    board.row_digits(pos.row) | board.col_digits(pos.col) | board.block_digits(pos);
                sets[pos] = Some(forbidden);
            }
        }
        Self { sets }
    }

    /// Forbidden digits for `pos`, or `None` if `pos` was not open when this
    /// snapshot was computed.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<DigitSet> {
        self.sets[pos]
    }

    /// Positions that were open when this snapshot was computed, in row-major
    /// order.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.sets.positions().filter(|&pos| self.sets[pos].is_some())
    }
}

/// Digits of `1..=domain` absent from `forbidden`, in ascending order.
///
/// Together with `forbidden` these partition `{1..=domain}`: no digit appears
/// on both sides and every digit appears on one.
#[must_use]
pub fn missing_numbers(forbidden: DigitSet, domain: usize) -> Vec<u8> {
    forbidden.missing(domain).iter().collect()
}

/// Finds the first open cell with exactly one remaining candidate.
///
/// An open position whose forbidden set holds all but one digit of the domain
/// is a naked single: the missing digit is the only value that can go there.
/// Cells are scanned in row-major order and cells filled since the snapshot
/// are skipped, so the result is deterministic for a given board and
/// snapshot.
#[must_use]
pub fn find_naked_single(board: &Board, forbidden: &ForbiddenSets) -> Option<(Position, u8)> {
    let domain = board.size();
    for pos in forbidden.open_positions() {
        if board.get(pos) != 0 {
            continue;
        }
        let set = forbidden.get(pos)?;
        if set.len() == domain - 1
            && let Some(digit) = set.missing(domain).as_single()
        {
            return Some((pos, digit));
        }
    }
    None
}

/// Finds a digit that only one open cell can still take.
///
/// Unlike the naked single this reasons across all open cells at once: if a
/// candidate digit is forbidden at every open position except one, it must be
/// placed at that position. Runs after the naked-single check and before any
/// randomized placement.
#[must_use]
pub fn find_hidden_single(board: &Board, forbidden: &ForbiddenSets) -> Option<(Position, u8)> {
    let domain = board.size();
    #[expect(clippy::cast_possible_truncation)]
    let max_digit = domain as u8;
    for digit in 1..=max_digit {
        let mut host = None;
        let mut unique = true;
        for pos in forbidden.open_positions() {
            if board.get(pos) != 0 {
                continue;
            }
            let set = forbidden.get(pos)?;
            if !set.contains(digit) {
                if host.is_some() {
                    unique = false;
                    break;
                }
                host = Some(pos);
            }
        }
        if unique && let Some(pos) = host {
            return Some((pos, digit));
        }
    }
    None
}
