//! Fixed-depth minimax search with alpha-beta pruning.

use super::Strategy;
use crate::board::Coord;
use crate::engine::ReversiEngine;
use crate::error::ReversiResult;
use crate::types::Color;
use tracing::{debug, instrument};

/// Searches `depth` plies ahead and maximizes the disc margin.
///
/// Leaves are scored as own discs minus opponent discs, from the point
/// of view of the player the search was started for. Search runs on a
/// private copy of the engine, applying and undoing moves in place, so
/// the live game is never touched.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxStrategy {
    depth: u32,
}

/// Search bookkeeping for one call to `determine_move`.
struct Search {
    root: Color,
    nodes: u64,
}

impl MinimaxStrategy {
    /// Creates a searcher looking `depth` plies ahead.
    ///
    /// Depth 0 never proposes a move.
    pub fn new(depth: u32) -> Self {
        Self { depth }
    }

    /// Search depth in plies.
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Search {
    fn evaluate(&self, engine: &ReversiEngine) -> ReversiResult<i32> {
        Ok(engine.scores()?.margin(self.root))
    }

    /// Returns the best cell at this node (if any) and its score.
    fn alpha_beta(
        &mut self,
        engine: &mut ReversiEngine,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> ReversiResult<(Option<Coord>, i32)> {
        self.nodes += 1;
        if depth == 0 || engine.is_game_over()? {
            return Ok((None, self.evaluate(engine)?));
        }

        let mover = engine.current_player()?;
        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for at in engine.legal_moves(mover)? {
            let undo = engine.apply_unchecked(at)?;
            let (_, score) = self.alpha_beta(engine, depth - 1, !maximizing, alpha, beta)?;
            engine.undo(undo)?;

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(at);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(at);
                }
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        Ok((best_move, best_score))
    }
}

impl Strategy for MinimaxStrategy {
    #[instrument(skip(self, engine), fields(depth = self.depth))]
    fn determine_move(
        &self,
        engine: &ReversiEngine,
        player: Color,
    ) -> ReversiResult<Option<Coord>> {
        let mut scratch = engine.clone();
        scratch.force_turn(player);

        let mut search = Search {
            root: player,
            nodes: 0,
        };
        let (best, score) = search.alpha_beta(&mut scratch, self.depth, true, i32::MIN, i32::MAX)?;
        debug!(best = ?best, score, nodes = search.nodes, "Minimax finished");
        Ok(best)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
