//! Game rules for Reversi.
//!
//! Pure functions over a [`Board`](crate::Board) and a
//! [`Topology`](crate::Topology). Rules are separated from the engine so
//! the same scan serves legality checks, hints, strategies and search.

pub mod capture;
pub mod terminal;

pub use capture::{
    capture_cells, captured_run, discs_to_flip, has_legal_move, is_legal, legal_moves,
};
pub use terminal::{terminal_reason, TerminalReason, PASS_LIMIT};
