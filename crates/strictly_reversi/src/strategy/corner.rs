//! Corner-first strategy.

use super::Strategy;
use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::{ReversiError, ReversiResult};
use crate::types::Color;
use tracing::{debug, instrument};

/// Takes the first legal corner in the topology's declared order.
///
/// Corners are not ranked by capture count. With no legal corner it
/// falls back to the first legal cell in upper-left order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerStrategy;

impl Strategy for CornerStrategy {
    #[instrument(skip(self, engine))]
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        for corner in engine.corners()? {
            if engine.exists(corner) && engine.is_legal(corner, player)? {
                debug!(%corner, "Corner available");
                return Ok(Some(corner));
            }
        }

        let fallback = engine.legal_moves(player)?.into_iter().next().ok_or_else(|| {
            ReversiError::no_candidate(format!("{} has no legal cell, corner or otherwise", player))
        })?;
        debug!(%fallback, "No legal corner, falling back");
        Ok(Some(fallback))
    }

    fn name(&self) -> &'static str {
        "corner"
    }
}
