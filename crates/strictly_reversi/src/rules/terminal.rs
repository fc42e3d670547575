//! Game-over detection.

use super::capture::has_legal_move;
use crate::board::Board;
use crate::topology::Topology;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Consecutive forced passes that end the game.
pub const PASS_LIMIT: u32 = 2;

/// Why a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum TerminalReason {
    /// One colour has no discs left.
    Wipeout,
    /// Every cell holds a disc.
    BoardFull,
    /// Both players were forced to pass in succession.
    ConsecutivePasses,
    /// The player to move has no legal cell.
    NoLegalMoves,
}

impl TerminalReason {
    /// A stalled player may still pass; every other reason is final.
    pub fn allows_pass(self) -> bool {
        self == TerminalReason::NoLegalMoves
    }
}

/// Checks the terminal predicate, reporting the first clause that holds.
///
/// Clauses are checked in order: wipeout, full board, pass limit, then
/// an exhaustive scan for a legal move by `to_move`.
#[instrument(skip(board))]
pub fn terminal_reason(
    board: &Board,
    topology: Topology,
    to_move: Color,
    pass_count: u32,
) -> Option<TerminalReason> {
    let scores = board.scores();
    if *scores.black() == 0 || *scores.white() == 0 {
        return Some(TerminalReason::Wipeout);
    }
    if board.is_full() {
        return Some(TerminalReason::BoardFull);
    }
    if pass_count >= PASS_LIMIT {
        return Some(TerminalReason::ConsecutivePasses);
    }
    if !has_legal_move(board, topology, to_move) {
        return Some(TerminalReason::NoLegalMoves);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    #[test]
    fn test_opening_is_not_terminal() {
        let board = Topology::Square.initial_board(8).unwrap();
        assert_eq!(terminal_reason(&board, Topology::Square, Color::Black, 0), None);
    }

    #[test]
    fn test_pass_limit_is_terminal() {
        let board = Topology::Hex.initial_board(3).unwrap();
        assert_eq!(
            terminal_reason(&board, Topology::Hex, Color::Black, PASS_LIMIT),
            Some(TerminalReason::ConsecutivePasses)
        );
    }

    #[test]
    fn test_wipeout_is_terminal() {
        let mut board = Topology::Square.initial_board(4).unwrap();
        board.flip(Coord::new(2, 1)).unwrap();
        board.flip(Coord::new(1, 2)).unwrap();
        assert_eq!(
            terminal_reason(&board, Topology::Square, Color::White, 0),
            Some(TerminalReason::Wipeout)
        );
    }

    #[test]
    fn test_full_board_is_terminal() {
        let board = Topology::Square.initial_board(2).unwrap();
        assert_eq!(
            terminal_reason(&board, Topology::Square, Color::Black, 0),
            Some(TerminalReason::BoardFull)
        );
    }

    #[test]
    fn test_stalled_player_is_terminal_but_may_pass() {
        // One disc each, not sharing any line.
        let mut board = Board::from_coords(Topology::Square.coordinates(4).unwrap());
        board.set_occupant(Coord::new(0, 0), Color::White).unwrap();
        board.set_occupant(Coord::new(3, 1), Color::Black).unwrap();
        let reason = terminal_reason(&board, Topology::Square, Color::White, 0);
        assert_eq!(reason, Some(TerminalReason::NoLegalMoves));
        assert!(reason.is_some_and(TerminalReason::allows_pass));
    }
}
