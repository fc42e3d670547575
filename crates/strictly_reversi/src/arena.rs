//! Plays full matches between two strategies.

use crate::board::Coord;
use crate::config::GameConfig;
use crate::engine::ReversiEngine;
use crate::error::{ReversiError, ReversiResult};
use crate::events::GameListener;
use crate::strategy::Strategy;
use crate::types::{Color, Outcome, Scores};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A disc placed during a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Colour that moved.
    pub color: Color,
    /// Cell the disc went to.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    pub fn new(color: Color, coord: Coord) -> Self {
        Self { color, coord }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.color, self.coord)
    }
}

/// Result of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchReport {
    /// Winner or tie.
    outcome: Outcome,
    /// Final disc counts.
    scores: Scores,
    /// Every placement, in play order.
    moves: Vec<Move>,
    /// Forced passes over the whole match.
    passes: u32,
}

/// Drives an engine with one strategy per colour until the game ends.
pub struct Arena {
    engine: ReversiEngine,
    black: Box<dyn Strategy>,
    white: Box<dyn Strategy>,
}

impl Arena {
    /// Builds an arena from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the board size is invalid.
    #[instrument(skip(config), fields(topology = %config.topology(), size = config.size()))]
    pub fn new(config: &GameConfig) -> ReversiResult<Self> {
        let engine = ReversiEngine::new(*config.topology(), *config.size())?;
        Ok(Self::from_parts(engine, config.black().build(), config.white().build()))
    }

    /// Builds an arena around an existing engine.
    ///
    /// A started engine is played from its current position; an
    /// unstarted one is started by [`play`](Self::play).
    pub fn from_parts(
        engine: ReversiEngine,
        black: Box<dyn Strategy>,
        white: Box<dyn Strategy>,
    ) -> Self {
        Self {
            engine,
            black,
            white,
        }
    }

    /// Subscribes to the underlying engine's events.
    pub fn add_listener(&mut self, listener: impl GameListener + 'static) {
        self.engine.add_listener(listener);
    }

    /// The engine being played.
    pub fn engine(&self) -> &ReversiEngine {
        &self.engine
    }

    fn strategy(&self, color: Color) -> &dyn Strategy {
        match color {
            Color::Black => self.black.as_ref(),
            Color::White => self.white.as_ref(),
        }
    }

    /// Plays until the game is over.
    ///
    /// A side left without legal moves is passed rather than ending the
    /// match, so play stops on a wipeout, a full board, or two passes in
    /// a row.
    ///
    /// # Errors
    ///
    /// Returns a `State` error if a strategy declines to move while a
    /// legal move exists, and propagates strategy and engine errors other
    /// than `NoCandidate`.
    #[instrument(skip(self), fields(black = self.black.name(), white = self.white.name()))]
    pub fn play(&mut self) -> ReversiResult<MatchReport> {
        if !self.engine.is_started() {
            self.engine.game_started()?;
        }
        info!("Match started");

        let mut moves = Vec::new();
        let mut passes = 0;
        loop {
            if let Some(reason) = self.engine.final_reason()? {
                debug!(%reason, "Game over");
                break;
            }
            let player = self.engine.current_player()?;
            let strategy = self.strategy(player);
            let choice = match strategy.determine_move(&self.engine, player) {
                Ok(choice) => choice,
                Err(e) if e.is_no_candidate() => None,
                Err(e) => return Err(e),
            };

            match choice {
                Some(at) => {
                    debug!(%player, %at, strategy = strategy.name(), "Playing move");
                    self.engine.make_move(at)?;
                    moves.push(Move::new(player, at));
                }
                None => {
                    if self.engine.has_valid_moves()? {
                        return Err(ReversiError::state(format!(
                            "{} strategy passed while {} had legal moves",
                            strategy.name(),
                            player
                        )));
                    }
                    debug!(%player, "Passing");
                    self.engine.wanna_pass()?;
                    passes += 1;
                }
            }
        }

        let scores = self.engine.scores()?;
        let outcome = self.engine.return_winner()?;
        info!(%outcome, %scores, moves = moves.len(), passes, "Match finished");
        Ok(MatchReport {
            outcome,
            scores,
            moves,
            passes,
        })
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("engine", &self.engine)
            .field("black", &self.black.name())
            .field("white", &self.white.name())
            .finish()
    }
}
