//! Position builders for unit tests.

use crate::board::{Board, Coord};
use crate::engine::ReversiEngine;
use crate::topology::Topology;
use crate::types::Color;

/// Builds a started engine with only the listed discs on the board.
pub(crate) fn position(
    topology: Topology,
    size: usize,
    discs: &[(i32, i32, Color)],
    to_move: Color,
) -> ReversiEngine {
    let mut board = Board::from_coords(topology.coordinates(size).unwrap());
    for &(q, r, color) in discs {
        board.set_occupant(Coord::new(q, r), color).unwrap();
    }
    ReversiEngine::from_board(topology, size, board, to_move).unwrap()
}
