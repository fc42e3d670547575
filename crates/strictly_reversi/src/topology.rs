//! Board geometries.
//!
//! Hex and square Reversi share every rule; they differ only in the
//! direction vectors, which coordinates exist, where the opening discs
//! go, and which cells count as corners.

use crate::board::{Board, Coord};
use crate::error::{ReversiError, ReversiResult};
use crate::types::Color;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Axial neighbours on a hex board.
const HEX_DIRECTIONS: [(i32, i32); 6] = [(0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1), (1, 0)];

/// N, NE, E, SE, S, SW, W, NW on a square board.
const SQUARE_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Board topology.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Topology {
    /// Hexagon of radius `size` in axial coordinates.
    #[default]
    Hex,
    /// `size` x `size` grid.
    Square,
}

impl Topology {
    /// Unit steps to every neighbour.
    pub fn directions(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Hex => &HEX_DIRECTIONS,
            Topology::Square => &SQUARE_DIRECTIONS,
        }
    }

    /// Smallest size this topology can seed.
    pub fn min_size(self) -> usize {
        match self {
            Topology::Hex => 1,
            Topology::Square => 2,
        }
    }

    /// Checks that a board of this size can be built and seeded.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error for sizes below [`Topology::min_size`].
    #[instrument]
    pub fn validate_size(self, size: usize) -> ReversiResult<()> {
        if size == 0 {
            return Err(ReversiError::argument("Size cannot be zero"));
        }
        if size < self.min_size() {
            return Err(ReversiError::argument(format!(
                "{} boards need size >= {}, got {}",
                self,
                self.min_size(),
                size
            )));
        }
        if i32::try_from(size).is_err() {
            return Err(ReversiError::argument(format!("Size {} is too large", size)));
        }
        Ok(())
    }

    /// Validated size as a coordinate bound.
    fn extent(self, size: usize) -> ReversiResult<i32> {
        self.validate_size(size)?;
        i32::try_from(size)
            .map_err(|_| ReversiError::argument(format!("Size {} is too large", size)))
    }

    /// Number of cells a board of this size has.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid or the count overflows.
    pub fn cell_count(self, size: usize) -> ReversiResult<usize> {
        self.validate_size(size)?;
        let count = match self {
            Topology::Hex => size
                .checked_add(1)
                .and_then(|next| next.checked_mul(size))
                .and_then(|ring| ring.checked_mul(3))
                .and_then(|cells| cells.checked_add(1)),
            Topology::Square => size.checked_mul(size),
        };
        count.ok_or_else(|| ReversiError::argument(format!("Size {} is too large", size)))
    }

    /// Every coordinate on a board of this size.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid.
    pub fn coordinates(self, size: usize) -> ReversiResult<Vec<Coord>> {
        let n = self.extent(size)?;
        let coords = match self {
            Topology::Hex => (-n..=n)
                .flat_map(|r| {
                    let lo = (-n).max(-r - n);
                    let hi = n.min(-r + n);
                    (lo..=hi).map(move |q| Coord::new(q, r))
                })
                .collect(),
            Topology::Square => (0..n)
                .flat_map(|r| (0..n).map(move |q| Coord::new(q, r)))
                .collect(),
        };
        Ok(coords)
    }

    /// Opening discs.
    ///
    /// Hex alternates six discs around an empty centre; square places
    /// the 2x2 centre block with matching colours on the diagonal.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid.
    pub fn seed(self, size: usize) -> ReversiResult<Vec<(Coord, Color)>> {
        let n = self.extent(size)?;
        let discs = match self {
            Topology::Hex => vec![
                (Coord::new(0, 1), Color::White),
                (Coord::new(-1, 1), Color::Black),
                (Coord::new(-1, 0), Color::White),
                (Coord::new(0, -1), Color::Black),
                (Coord::new(1, -1), Color::White),
                (Coord::new(1, 0), Color::Black),
            ],
            Topology::Square => {
                let h = n / 2;
                vec![
                    (Coord::new(h - 1, h - 1), Color::Black),
                    (Coord::new(h, h - 1), Color::White),
                    (Coord::new(h - 1, h), Color::White),
                    (Coord::new(h, h), Color::Black),
                ]
            }
        };
        Ok(discs)
    }

    /// Corner cells in their fixed preference order.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid.
    pub fn corners(self, size: usize) -> ReversiResult<Vec<Coord>> {
        let s = self.extent(size)?;
        let corners = match self {
            Topology::Hex => vec![
                Coord::new(s, -s),
                Coord::new(s, 0),
                Coord::new(-s, s),
                Coord::new(-s, 0),
                Coord::new(0, s),
                Coord::new(0, -s),
            ],
            Topology::Square => vec![
                Coord::new(0, 0),
                Coord::new(0, s - 1),
                Coord::new(s - 1, 0),
                Coord::new(s - 1, s - 1),
            ],
        };
        Ok(corners)
    }

    /// Builds the seeded opening board.
    ///
    /// # Errors
    ///
    /// Returns an `Argument` error if the size is invalid.
    #[instrument]
    pub fn initial_board(self, size: usize) -> ReversiResult<Board> {
        let mut board = Board::from_coords(self.coordinates(size)?);
        for (coord, color) in self.seed(size)? {
            board.set_occupant(coord, color)?;
        }
        Ok(board)
    }
}
