//! Move-selection strategies.
//!
//! A strategy reads an engine and proposes a cell for a player. It never
//! touches the live game: the caller applies the proposal through
//! [`ReversiEngine::make_move`]. Every scan walks the board in upper-left
//! order (row, then column), so "first found" means upper-left.

mod avoid_corner;
mod combined;
mod corner;
mod descriptor;
mod max_capture;
mod minimax;

pub use avoid_corner::AvoidCornerStrategy;
pub use combined::CombinedStrategy;
pub use corner::CornerStrategy;
pub use descriptor::StrategySpec;
pub use max_capture::MaxCaptureStrategy;
pub use minimax::MinimaxStrategy;

use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::ReversiResult;
use crate::types::Color;

/// Picks a move for `player`.
pub trait Strategy {
    /// Proposes a cell.
    ///
    /// `Ok(None)` and a `NoCandidate` error both mean the player should
    /// pass; the error form is used by strategies that must always find
    /// a legal cell.
    ///
    /// # Errors
    ///
    /// Returns `NoCandidate` when no cell qualifies, and propagates
    /// engine errors (for example, a game that has not started).
    fn determine_move(&self, engine: &ReversiEngine, player: Color) -> ReversiResult<Option<Coord>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        (**self).determine_move(engine, player)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
