//! Sandwich scanning: legality, capture counts and flip lists.

use crate::board::{Board, Coord};
use crate::topology::Topology;
use crate::types::{Color, Occupant};
use tracing::instrument;

/// Length of the opponent run captured along one direction.
///
/// Walks `from + d, from + 2d, ...` while cells exist and hold discs.
/// Returns the number of opponent discs when the run is closed by a
/// disc of `player`'s colour, and 0 when it hits the edge, an empty
/// cell, or an own disc with no opponent run before it.
pub fn captured_run(board: &Board, from: Coord, direction: (i32, i32), player: Color) -> usize {
    let mut run = 0;
    let mut steps = 1;
    loop {
        match board.occupant(from.step(direction, steps)) {
            Some(Occupant::Occupied(color)) if color == player => return run,
            Some(Occupant::Occupied(_)) => run += 1,
            Some(Occupant::Empty) | None => return 0,
        }
        steps += 1;
    }
}

/// Total discs `player` would capture by playing `at`.
///
/// Occupied or missing cells capture nothing.
#[instrument(skip(board))]
pub fn capture_cells(board: &Board, topology: Topology, at: Coord, player: Color) -> usize {
    if board.occupant(at) != Some(Occupant::Empty) {
        return 0;
    }
    topology
        .directions()
        .iter()
        .map(|&direction| captured_run(board, at, direction, player))
        .sum()
}

/// Checks if `player` may place a disc at `at`.
pub fn is_legal(board: &Board, topology: Topology, at: Coord, player: Color) -> bool {
    board.occupant(at) == Some(Occupant::Empty)
        && topology
            .directions()
            .iter()
            .any(|&direction| captured_run(board, at, direction, player) > 0)
}

/// Every legal cell for `player`, in upper-left order.
#[instrument(skip(board))]
pub fn legal_moves(board: &Board, topology: Topology, player: Color) -> Vec<Coord> {
    board
        .empty_coords()
        .filter(|&at| is_legal(board, topology, at, player))
        .collect()
}

/// Checks if `player` has at least one legal cell.
pub fn has_legal_move(board: &Board, topology: Topology, player: Color) -> bool {
    board
        .empty_coords()
        .any(|at| is_legal(board, topology, at, player))
}

/// Opponent discs flipped by `player` playing `at`.
///
/// Only discs strictly between `at` and the closing disc are listed;
/// the closing disc itself is never included.
pub fn discs_to_flip(board: &Board, topology: Topology, at: Coord, player: Color) -> Vec<Coord> {
    topology
        .directions()
        .iter()
        .flat_map(|&direction| {
            let run = captured_run(board, at, direction, player) as i32;
            (1..=run).map(move |steps| at.step(direction, steps))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_opening() -> Board {
        Topology::Hex.initial_board(3).unwrap()
    }

    #[test]
    fn test_opening_hex_moves_for_black() {
        let board = hex_opening();
        let moves = legal_moves(&board, Topology::Hex, Color::Black);
        assert_eq!(
            moves,
            vec![
                Coord::new(1, -2),
                Coord::new(-1, -1),
                Coord::new(2, -1),
                Coord::new(-2, 1),
                Coord::new(1, 1),
                Coord::new(-1, 2),
            ]
        );
    }

    #[test]
    fn test_run_stops_at_edge() {
        let mut board = Topology::Square.initial_board(4).unwrap();
        // Row 0: _ W W W, no closing black disc before the edge.
        for q in 1..4 {
            board.set_occupant(Coord::new(q, 0), Color::White).unwrap();
        }
        assert_eq!(captured_run(&board, Coord::new(0, 0), (1, 0), Color::Black), 0);
    }

    #[test]
    fn test_run_stops_at_gap() {
        let mut board = Topology::Square.initial_board(6).unwrap();
        board.set_occupant(Coord::new(1, 0), Color::White).unwrap();
        board.set_occupant(Coord::new(3, 0), Color::Black).unwrap();
        assert_eq!(captured_run(&board, Coord::new(0, 0), (1, 0), Color::Black), 0);
    }

    #[test]
    fn test_adjacent_own_disc_captures_nothing() {
        let mut board = Topology::Square.initial_board(6).unwrap();
        board.set_occupant(Coord::new(1, 0), Color::Black).unwrap();
        board.set_occupant(Coord::new(2, 0), Color::White).unwrap();
        board.set_occupant(Coord::new(3, 0), Color::Black).unwrap();
        assert_eq!(captured_run(&board, Coord::new(0, 0), (1, 0), Color::Black), 0);
    }

    #[test]
    fn test_long_run_counts_every_disc() {
        let mut board = Topology::Square.initial_board(8).unwrap();
        for q in 1..=4 {
            board.set_occupant(Coord::new(q, 7), Color::White).unwrap();
        }
        board.set_occupant(Coord::new(5, 7), Color::Black).unwrap();
        board.set_occupant(Coord::new(6, 7), Color::White).unwrap();

        let at = Coord::new(0, 7);
        assert_eq!(captured_run(&board, at, (1, 0), Color::Black), 4);
        let flips = discs_to_flip(&board, Topology::Square, at, Color::Black);
        assert_eq!(flips.len(), 4);
        assert!(!flips.contains(&Coord::new(5, 7)));
        assert!(!flips.contains(&Coord::new(6, 7)));
    }

    #[test]
    fn test_occupied_cell_captures_nothing() {
        let board = hex_opening();
        assert_eq!(
            capture_cells(&board, Topology::Hex, Coord::new(1, 0), Color::White),
            0
        );
        assert!(!is_legal(&board, Topology::Hex, Coord::new(1, 0), Color::White));
    }
}
