//! Single-cell board mutations: deterministic fills, randomized trials, and
//! deadlock escape.

use annealace_core::{Board, Position};
use rand::seq::SliceRandom as _;
use rand::{Rng, RngExt as _};

use crate::{
    constraint::{ForbiddenSets, LockedPositions, find_hidden_single, find_naked_single},
    score::has_conflicts,
};

/// A candidate board produced by [`NeighborGenerator::generate`].
#[derive(Debug, Clone)]
pub struct Neighbor {
    /// The proposed board, always an independent copy of the input.
    pub board: Board,
    /// Whether a deterministic fill locked a new position during this call.
    pub locked_changed: bool,
}

/// A finite, restartable sequence of trial digits `1..=N` in shuffled order.
///
/// The order is fixed once at construction; [`restart`](Self::restart)
/// rewinds to the first digit without reshuffling. This keeps the trial loops
/// independent of the random source once a sequence has been drawn.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64Mcg;
///
/// use annealace_solver::ShuffledDigits;
///
/// let mut rng = Pcg64Mcg::seed_from_u64(7);
/// let mut digits = ShuffledDigits::new(9, &mut rng);
/// let first_pass: Vec<u8> = digits.by_ref().collect();
///
/// digits.restart();
/// let second_pass: Vec<u8> = digits.collect();
/// assert_eq!(first_pass, second_pass);
/// ```
#[derive(Debug, Clone)]
pub struct ShuffledDigits {
    digits: Vec<u8>,
    next: usize,
}

impl ShuffledDigits {
    /// Draws a shuffled ordering of `1..=domain` from `rng`.
    #[must_use]
    pub fn new<R: Rng>(domain: usize, rng: &mut R) -> Self {
        #[expect(clippy::cast_possible_truncation)]
        let max_digit = domain as u8;
        let mut digits: Vec<u8> = (1..=max_digit).collect();
        digits.shuffle(rng);
        Self { digits, next: 0 }
    }

    /// Rewinds to the beginning of the same ordering.
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for ShuffledDigits {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let digit = self.digits.get(self.next).copied();
        if digit.is_some() {
            self.next += 1;
        }
        digit
    }
}

/// Proposes single-cell mutations of a board.
///
/// Each call tries, in priority order:
///
/// 1. a naked-single fill (deterministic, locks the cell),
/// 2. a hidden-single fill (deterministic, locks the cell),
/// 3. a randomized trial placement at one open cell,
/// 4. when the whole board is deadlocked, an escape that reassigns one
///    previously filled, unlocked cell.
///
/// When nothing applies the input board is returned unchanged (as a copy).
/// Locked positions are never mutated.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeighborGenerator;

impl NeighborGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        NeighborGenerator
    }

    /// Produces the next candidate board.
    ///
    /// The returned board never aliases `board`. Deterministic fills extend
    /// `locked` and report it through [`Neighbor::locked_changed`] so the
    /// caller knows to refresh its forbidden-set snapshot.
    pub fn generate<R: Rng>(
        self,
        rng: &mut R,
        board: &Board,
        locked: &mut LockedPositions,
        forbidden: &ForbiddenSets,
    ) -> Neighbor {
        if let Some((pos, digit)) = find_naked_single(board, forbidden) {
            log::debug!("naked single: {digit} at {pos}");
            return Self::forced_fill(board, locked, pos, digit);
        }
        if let Some((pos, digit)) = find_hidden_single(board, forbidden) {
            log::debug!("hidden single: {digit} at {pos}");
            return Self::forced_fill(board, locked, pos, digit);
        }

        let open = open_positions(board, locked);
        if open.is_empty() {
            return Neighbor {
                board: board.clone(),
                locked_changed: false,
            };
        }

        let pick = open[rng.random_range(0..open.len())];
        let mut next = board.clone();
        for digit in ShuffledDigits::new(board.size(), rng) {
            next.set(pick, digit);
            if !has_conflicts(&next, pick) {
                return Neighbor {
                    board: next,
                    locked_changed: false,
                };
            }
        }

        // No digit fits the chosen cell. Only a full deadlock justifies
        // touching cells that are already filled.
        if is_deadlocked(board, &open) {
            log::debug!("deadlock: no digit fits any of {} open cells", open.len());
            if let Some(escaped) = escape(rng, board, locked) {
                return Neighbor {
                    board: escaped,
                    locked_changed: false,
                };
            }
        }

        Neighbor {
            board: board.clone(),
            locked_changed: false,
        }
    }

    fn forced_fill(
        board: &Board,
        locked: &mut LockedPositions,
        pos: Position,
        digit: u8,
    ) -> Neighbor {
        let mut next = board.clone();
        next.set(pos, digit);
        locked.lock(pos);
        Neighbor {
            board: next,
            locked_changed: true,
        }
    }
}

/// Currently empty, unlocked positions of `board`, in row-major order.
fn open_positions(board: &Board, locked: &LockedPositions) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| board.get(pos) == 0 && !locked.is_locked(pos))
        .collect()
}

/// Whether no digit can be placed without a local conflict at any open
/// position.
fn is_deadlocked(board: &Board, open: &[Position]) -> bool {
    #[expect(clippy::cast_possible_truncation)]
    let max_digit = board.size() as u8;
    let mut probe = board.clone();
    for &pos in open {
        for digit in 1..=max_digit {
            probe.set(pos, digit);
            if !has_conflicts(&probe, pos) {
                return false;
            }
        }
        probe.set(pos, 0);
    }
    true
}

/// Reassigns one previously filled, unlocked cell to a different digit.
///
/// Visits the candidate cells in random order; for each, removes its digit
/// and tries the remaining digits in shuffled order, skipping the digit just
/// removed. Returns the first conflict-free reassignment, or `None` when
/// every candidate fails.
fn escape<R: Rng>(rng: &mut R, board: &Board, locked: &LockedPositions) -> Option<Board> {
    let mut refillable: Vec<Position> = board
        .positions()
        .filter(|&pos| board.get(pos) != 0 && !locked.is_locked(pos))
        .collect();
    refillable.shuffle(rng);

    for pos in refillable {
        let removed = board.get(pos);
        let mut next = board.clone();
        next.set(pos, 0);
        for digit in ShuffledDigits::new(board.size(), rng) {
            if digit == removed {
                continue;
            }
            next.set(pos, digit);
            if !has_conflicts(&next, pos) {
                log::debug!("escape: replaced {removed} with {digit} at {pos}");
                return Some(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::score::objective_score;

    fn rng(seed: u64) -> Pcg64Mcg {
        Pcg64Mcg::seed_from_u64(seed)
    }

    #[test]
    fn test_shuffled_digits_is_permutation() {
        let mut digits: Vec<u8> = ShuffledDigits::new(9, &mut rng(3)).collect();
        digits.sort_unstable();
        assert_eq!(digits, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_full_board_returned_unchanged() {
        let board = Board::from_str("1234\n3412\n2143\n4321").unwrap();
        let mut locked = LockedPositions::from_board(&board);
        let forbidden = ForbiddenSets::compute(&board, &locked);

        let neighbor =
            NeighborGenerator::new().generate(&mut rng(1), &board, &mut locked, &forbidden);
        assert_eq!(neighbor.board, board);
        assert!(!neighbor.locked_changed);
    }

    #[test]
    fn test_locked_empty_cells_are_not_mutated() {
        // The only empty cell is locked-as-resolved; nothing may change.
        let board = Board::from_str("1204\n3412\n2143\n4321").unwrap();
        let mut locked = LockedPositions::from_board(&board);
        locked.lock(Position::new(0, 2));
        let forbidden = ForbiddenSets::compute(&board, &locked);

        let neighbor =
            NeighborGenerator::new().generate(&mut rng(1), &board, &mut locked, &forbidden);
        assert_eq!(neighbor.board, board);
    }

    #[test]
    fn test_naked_single_fills_and_locks() {
        let board = Board::from_str("1204\n3412\n2143\n4321").unwrap();
        let mut locked = LockedPositions::from_board(&board);
        let forbidden = ForbiddenSets::compute(&board, &locked);

        let neighbor =
            NeighborGenerator::new().generate(&mut rng(1), &board, &mut locked, &forbidden);
        assert!(neighbor.locked_changed);
        assert_eq!(neighbor.board.get(Position::new(0, 2)), 3);
        assert!(locked.is_locked(Position::new(0, 2)));
        // The input board itself is untouched.
        assert_eq!(board.get(Position::new(0, 2)), 0);
    }

    #[test]
    fn test_stochastic_fill_respects_local_conflicts() {
        // Two holes, far apart; whichever cell is picked, the placed digit
        // must not conflict locally.
        let mut rows = vec![vec![0; 9]; 9];
        rows[0] = vec![1, 2, 3, 4, 5, 6, 7, 0, 0];
        let board = Board::from_rows(&rows).unwrap();
        let mut locked = LockedPositions::from_board(&board);
        let forbidden = ForbiddenSets::compute(&board, &locked);

        for seed in 0..20 {
            let neighbor = NeighborGenerator::new().generate(
                &mut rng(seed),
                &board,
                &mut locked.clone(),
                &forbidden,
            );
            let changed: Vec<Position> = board
                .positions()
                .filter(|&pos| neighbor.board.get(pos) != board.get(pos))
                .collect();
            assert_eq!(changed.len(), 1, "exactly one cell changes per move");
            assert!(!has_conflicts(&neighbor.board, changed[0]));
        }
    }

    // Deadlocked 4×4 fixture: rows 0-2 are given, row 3 was filled by earlier
    // moves as [3, 1, 2, _]. Every digit conflicts at the remaining hole
    // (1, 2, 3 sit in its row; 4 in its column), and only clearing (3, 0)
    // admits a new digit.
    fn deadlocked_board() -> Board {
        Board::from_str("1234\n3412\n2341\n3120").unwrap()
    }

    fn deadlocked_locked() -> LockedPositions {
        let givens = Board::from_str("1234\n3412\n2341\n0000").unwrap();
        LockedPositions::from_board(&givens)
    }

    #[test]
    fn test_deadlock_detection() {
        let board = deadlocked_board();
        let locked = deadlocked_locked();
        let open = open_positions(&board, &locked);
        assert_eq!(open, [Position::new(3, 3)]);
        assert!(is_deadlocked(&board, &open));
    }

    #[test]
    fn test_deadlock_escape_reassigns_one_cell() {
        let board = deadlocked_board();
        let mut locked = deadlocked_locked();
        let forbidden = ForbiddenSets::compute(&board, &locked);

        // (3, 1) and (3, 2) admit no replacement digit, so the escape must
        // land on (3, 0) regardless of visit order.
        for seed in 0..20 {
            let neighbor = NeighborGenerator::new().generate(
                &mut rng(seed),
                &board,
                &mut locked,
                &forbidden,
            );
            assert_eq!(neighbor.board.get(Position::new(3, 0)), 4);
            assert_eq!(neighbor.board.get(Position::new(3, 3)), 0);
            assert!(!neighbor.locked_changed);
        }
    }

    #[test]
    fn test_deadlock_without_escape_returns_input() {
        // Same deadlock, but every filled cell is locked: the escape has no
        // cell to reassign and the board comes back unchanged.
        let board = deadlocked_board();
        let mut locked = LockedPositions::from_board(&board);
        let forbidden = ForbiddenSets::compute(&board, &locked);

        let neighbor =
            NeighborGenerator::new().generate(&mut rng(5), &board, &mut locked, &forbidden);
        assert_eq!(neighbor.board, board);
    }

    #[test]
    fn test_locked_cells_survive_many_generations() {
        let mut rows = vec![vec![0; 9]; 9];
        rows[0] = vec![5, 3, 0, 0, 7, 0, 0, 0, 0];
        rows[4] = vec![4, 0, 0, 8, 0, 3, 0, 0, 1];
        let initial = Board::from_rows(&rows).unwrap();
        let mut locked = LockedPositions::from_board(&initial);
        let mut forbidden = ForbiddenSets::compute(&initial, &locked);
        let mut board = initial.clone();
        let mut rng = rng(11);

        for _ in 0..200 {
            let neighbor =
                NeighborGenerator::new().generate(&mut rng, &board, &mut locked, &forbidden);
            if neighbor.locked_changed {
                forbidden = ForbiddenSets::compute(&neighbor.board, &locked);
            }
            board = neighbor.board;
            for pos in initial.positions() {
                if initial.get(pos) != 0 {
                    assert_eq!(board.get(pos), initial.get(pos));
                }
            }
        }
        // The walk must have made some progress on the objective.
        assert!(objective_score(&board) < objective_score(&initial));
    }
}
