//! Strategy that keeps away from corners.

use super::Strategy;
use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::{ReversiError, ReversiResult};
use crate::types::Color;
use tracing::{debug, instrument};

/// Plays the legal cell farthest from its nearest corner.
///
/// Distance is Manhattan distance over the stored axes. The first cell
/// reaching the maximum wins; later cells at the same distance do not
/// replace it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvoidCornerStrategy;

impl AvoidCornerStrategy {
    fn distance_to_nearest(at: Coord, corners: &[Coord]) -> i32 {
        corners
            .iter()
            .map(|&corner| at.manhattan(corner))
            .min()
            .unwrap_or(i32::MAX)
    }
}

impl Strategy for AvoidCornerStrategy {
    #[instrument(skip(self, engine))]
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        let corners = engine.corners()?;
        let mut best: Option<(Coord, i32)> = None;
        for at in engine.legal_moves(player)? {
            let distance = Self::distance_to_nearest(at, &corners);
            if best.is_none_or(|(_, farthest)| distance > farthest) {
                best = Some((at, distance));
            }
        }

        let (at, distance) = best.ok_or_else(|| {
            ReversiError::no_candidate(format!(
                "{} has no legal cell to keep off the corners",
                player
            ))
        })?;
        debug!(%at, distance, "Avoid corner chose");
        Ok(Some(at))
    }

    fn name(&self) -> &'static str {
        "avoid_corner"
    }
}
