//! Error types for the engine, strategies and configuration.

use crate::board::Coord;
use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ReversiErrorKind {
    /// Operation issued before the game started, or a mutation after it ended.
    #[display("State error: {}", _0)]
    State(String),

    /// Bad input: an illegal move target or an unusable board size.
    #[display("Invalid argument: {}", _0)]
    Argument(String),

    /// The coordinate is not part of the board topology.
    #[display("No cell at {}", _0)]
    NotFound(Coord),

    /// A strategy found no qualifying cell; the caller should pass.
    #[display("No candidate move: {}", _0)]
    NoCandidate(String),
}

/// Reversi error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Reversi error: {} at {}:{}", kind, file, line)]
pub struct ReversiError {
    /// Error kind.
    pub kind: ReversiErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ReversiError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: ReversiErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Operation not allowed in the current game phase.
    #[track_caller]
    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ReversiErrorKind::State(message.into()))
    }

    /// Illegal move target.
    #[track_caller]
    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(ReversiErrorKind::Argument(message.into()))
    }

    /// Coordinate outside the board.
    #[track_caller]
    pub fn not_found(coord: Coord) -> Self {
        Self::new(ReversiErrorKind::NotFound(coord))
    }

    /// Strategy has nothing to offer.
    #[track_caller]
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::new(ReversiErrorKind::NoCandidate(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ReversiErrorKind {
        &self.kind
    }

    /// True when a strategy reported that the turn must pass.
    pub fn is_no_candidate(&self) -> bool {
        matches!(self.kind, ReversiErrorKind::NoCandidate(_))
    }
}

/// Result alias used throughout the crate.
pub type ReversiResult<T> = Result<T, ReversiError>;

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
