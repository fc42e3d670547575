//! Greedy strategy: capture as many discs as possible.

use super::Strategy;
use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::{ReversiError, ReversiResult};
use crate::types::Color;
use tracing::{debug, instrument};

/// Plays the legal cell capturing the most discs, upper-left on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxCaptureStrategy;

impl Strategy for MaxCaptureStrategy {
    #[instrument(skip(self, engine))]
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        let mut best: Option<(Coord, usize)> = None;
        for at in engine.legal_moves(player)? {
            let captured = engine.capture_cells(at, player)?;
            // Strict improvement keeps the earlier, upper-left cell on ties.
            if best.is_none_or(|(_, most)| captured > most) {
                best = Some((at, captured));
            }
        }

        let (at, captured) = best
            .ok_or_else(|| ReversiError::no_candidate(format!("{} has no legal cell", player)))?;
        debug!(%at, captured, "Max capture chose");
        Ok(Some(at))
    }

    fn name(&self) -> &'static str {
        "max_capture"
    }
}
