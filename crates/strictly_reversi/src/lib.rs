//! Strictly Reversi - Reversi on hexagonal and square boards
//!
//! One engine plays both board shapes. The board geometry lives in a
//! [`Topology`]; the capture and game-over rules are pure functions in
//! [`rules`]; move selection is pluggable through the [`Strategy`] trait.
//!
//! # Architecture
//!
//! - **Board**: coordinate-addressed cells, scanned in upper-left order
//! - **Topology**: directions, coordinates, opening discs and corners
//! - **Engine**: turn order, move legality, captures, passes and game over
//! - **Strategies**: greedy, corner-seeking, corner-avoiding, minimax and combinations
//! - **Arena**: plays two strategies against each other from a TOML config
//!
//! # Example
//!
//! ```
//! use strictly_reversi::{Coord, MaxCaptureStrategy, ReversiEngine, Strategy};
//!
//! # fn main() -> Result<(), strictly_reversi::ReversiError> {
//! let mut engine = ReversiEngine::hex(3)?;
//! engine.game_started()?;
//!
//! let player = engine.current_player()?;
//! if let Some(at) = MaxCaptureStrategy.determine_move(&engine, player)? {
//!     engine.make_move(at)?;
//! }
//! assert_eq!(engine.get(Coord::new(1, -2))?.occupant().color(), Some(player));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arena;
mod board;
mod config;
mod engine;
mod error;
mod events;
mod strategy;
mod topology;
mod types;

pub mod rules;

#[cfg(test)]
mod testing;

// Crate-level exports - Board model
pub use board::{Board, Cell, Coord};
pub use topology::Topology;
pub use types::{Color, Occupant, Outcome, Scores};

// Crate-level exports - Engine
pub use engine::ReversiEngine;
pub use events::{EventBus, GameEvent, GameListener};
pub use rules::{TerminalReason, PASS_LIMIT};

// Crate-level exports - Strategies
pub use strategy::{
    AvoidCornerStrategy, CombinedStrategy, CornerStrategy, MaxCaptureStrategy, MinimaxStrategy,
    Strategy, StrategySpec,
};

// Crate-level exports - Matches and configuration
pub use arena::{Arena, MatchReport, Move};
pub use config::GameConfig;

// Crate-level exports - Errors
pub use error::{ConfigError, ReversiError, ReversiErrorKind, ReversiResult};
