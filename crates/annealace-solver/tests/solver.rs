//! End-to-end tests over full 9×9 puzzles.

use std::str::FromStr as _;

use annealace_core::{Board, Position};
use annealace_solver::{
    AnnealingConfig, AnnealingSolver, CancelToken, count_conflicts, objective_score,
};

/// Regression fixture: a consistent 9×9 puzzle with 38 givens and no
/// conflicts, so its initial objective score is exactly 43.
const FIXTURE_9X9: &str = "\
000000000
672195348
000000000
859761423
000000000
713924856
000000000
287419635
000000079";

/// A fully solved 9×9 grid.
const SOLVED_9X9: &str = "\
534678912
672195348
198342567
859761423
426853791
713924856
961537284
287419635
345286179";

#[test]
fn test_fixture_scores_43_before_solving() {
    let board = Board::from_str(FIXTURE_9X9).unwrap();
    assert_eq!(count_conflicts(&board), 0);
    assert_eq!(objective_score(&board), 43);
}

#[test]
fn test_fixture_round_trips_through_display() {
    let board = Board::from_str(FIXTURE_9X9).unwrap();
    let printed = board.to_string();
    for (line, source) in printed.lines().zip(FIXTURE_9X9.lines()) {
        assert_eq!(line, source);
    }
    assert_eq!(printed.lines().count(), 9);
}

#[test]
fn test_solved_board_returns_unmodified() {
    let board = Board::from_str(SOLVED_9X9).unwrap();
    let solver = AnnealingSolver::new(AnnealingConfig::default().with_seed(0));
    let outcome = solver.solve(&board).unwrap();

    assert!(outcome.is_solved());
    assert_eq!(outcome.iterations, 0);
    assert_eq!(outcome.board, board);
}

#[test]
fn test_givens_survive_a_full_run() {
    let initial = Board::from_str(FIXTURE_9X9).unwrap();
    // A short, hot run exercises plenty of accepted moves.
    let config = AnnealingConfig::default()
        .with_min_temperature(0.5)
        .with_seed(1234);
    let outcome = AnnealingSolver::new(config).solve(&initial).unwrap();

    for pos in initial.positions() {
        if initial.get(pos) != 0 {
            assert_eq!(
                outcome.board.get(pos),
                initial.get(pos),
                "given at {pos} was mutated"
            );
        }
    }
}

#[test]
fn test_run_never_worsens_the_best_score() {
    let initial = Board::from_str(FIXTURE_9X9).unwrap();
    let config = AnnealingConfig::default()
        .with_min_temperature(0.01)
        .with_seed(7);
    let outcome = AnnealingSolver::new(config).solve(&initial).unwrap();

    assert!(outcome.score <= objective_score(&initial));
    assert!(objective_score(&outcome.board) == outcome.score);
}

#[test]
fn test_single_hole_puzzle_is_solved() {
    let mut rows: Vec<Vec<u8>> = SOLVED_9X9
        .lines()
        .map(|line| line.bytes().map(|b| b - b'0').collect())
        .collect();
    rows[4][4] = 0;
    let board = Board::from_rows(&rows).unwrap();

    let solver = AnnealingSolver::new(AnnealingConfig::default().with_seed(5));
    let outcome = solver.solve(&board).unwrap();

    assert!(outcome.is_solved());
    assert_eq!(outcome.board.get(Position::new(4, 4)), 5);
    assert_eq!(outcome.board, Board::from_str(SOLVED_9X9).unwrap());
}

#[test]
fn test_cancelled_run_reports_best_board() {
    let board = Board::from_str(FIXTURE_9X9).unwrap();
    let token = CancelToken::new();
    token.cancel();

    let solver = AnnealingSolver::new(AnnealingConfig::default().with_seed(3));
    let outcome = solver.solve_with_cancel(&board, Some(&token)).unwrap();

    assert!(outcome.cancelled);
    assert!(!outcome.is_solved());
    assert_eq!(outcome.board, board);
}
