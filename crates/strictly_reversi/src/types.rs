//! Core domain types for Reversi.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Disc colour, which doubles as player identity.
///
/// Black is the first player and always opens the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// First player.
    Black,
    /// Second player.
    White,
}

impl Color {
    /// Returns the opponent colour.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-letter symbol used in board dumps.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

/// What sits on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Occupant {
    /// No disc.
    #[default]
    Empty,
    /// A disc of the given colour.
    Occupied(Color),
}

impl Occupant {
    /// Returns the colour of the disc, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Occupant::Empty => None,
            Occupant::Occupied(color) => Some(color),
        }
    }

    /// Checks if no disc is present.
    pub fn is_empty(self) -> bool {
        self == Occupant::Empty
    }
}

/// Disc counts for both colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters, new)]
pub struct Scores {
    black: usize,
    white: usize,
}

impl Scores {
    /// Disc count for one colour.
    pub fn of(&self, color: Color) -> usize {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Own minus opponent disc count, from `color`'s point of view.
    pub fn margin(&self, color: Color) -> i32 {
        self.of(color) as i32 - self.of(color.opponent()) as i32
    }

    /// Decides the outcome: strictly more discs wins.
    pub fn outcome(&self) -> Outcome {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Color::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Color::White),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

impl std::fmt::Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Black {} - White {}", self.black, self.white)
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The colour with strictly more discs.
    Winner(Color),
    /// Equal disc counts.
    Tie,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(*color),
            Outcome::Tie => None,
        }
    }

    /// Returns true if the game was tied.
    pub fn is_tie(&self) -> bool {
        matches!(self, Outcome::Tie)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{} wins", color),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
