//! Coordinate-addressed occupancy store.
//!
//! The board knows nothing about game rules: it holds cells, answers
//! lookups, and applies the occupant changes the engine asks for.

use crate::error::{ReversiError, ReversiResult};
use crate::types::{Color, Occupant, Scores};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Board coordinate.
///
/// Hex boards use axial addressing (implicit `s = -q - r`); square
/// boards use column `q` and row `r`.
///
/// Ordering is "upper-left": by row `r`, then by column `q`. Every
/// ordered scan of a board follows it, so ties resolve the same way
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Coord {
    /// Column (axial q).
    pub q: i32,
    /// Row (axial r).
    pub r: i32,
}

impl Coord {
    /// Moves `steps` times along a direction vector.
    pub fn step(self, (dq, dr): (i32, i32), steps: i32) -> Self {
        Self::new(self.q + dq * steps, self.r + dr * steps)
    }

    /// Implicit third axial axis.
    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Manhattan distance over the two stored axes.
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.q - other.q).abs() + (self.r - other.r).abs()
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.r, self.q).cmp(&(other.r, other.q))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    occupant: Occupant,
}

impl Cell {
    /// Creates an empty cell.
    pub fn new(coord: Coord) -> Self {
        Self {
            coord,
            occupant: Occupant::Empty,
        }
    }

    /// Returns the cell coordinate.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Returns the current occupant.
    pub fn occupant(&self) -> Occupant {
        self.occupant
    }

    /// Checks if the cell holds no disc.
    pub fn is_empty(&self) -> bool {
        self.occupant.is_empty()
    }

    /// Places or recolours a disc.
    pub fn set_occupant(&mut self, color: Color) {
        self.occupant = Occupant::Occupied(color);
    }

    /// Toggles the disc colour. Empty cells stay empty.
    pub fn flip(&mut self) {
        if let Occupant::Occupied(color) = self.occupant {
            self.occupant = Occupant::Occupied(color.opponent());
        }
    }

    /// Removes the disc. Only search undo may do this.
    pub(crate) fn clear(&mut self) {
        self.occupant = Occupant::Empty;
    }
}

/// Collection of cells keyed by coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: BTreeMap<Coord, Cell>,
}

impl Board {
    /// Builds an empty board covering the given coordinates.
    #[instrument(skip(coords))]
    pub fn from_coords(coords: impl IntoIterator<Item = Coord>) -> Self {
        let cells: BTreeMap<Coord, Cell> = coords
            .into_iter()
            .map(|coord| (coord, Cell::new(coord)))
            .collect();
        debug!(cells = cells.len(), "Board created");
        Self { cells }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Checks if the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if a coordinate belongs to the board.
    pub fn exists(&self, coord: Coord) -> bool {
        self.cells.contains_key(&coord)
    }

    /// Gets the cell at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the coordinate is off the board.
    pub fn get(&self, coord: Coord) -> ReversiResult<Cell> {
        self.cells
            .get(&coord)
            .copied()
            .ok_or_else(|| ReversiError::not_found(coord))
    }

    /// Gets the occupant at a coordinate, `None` when off the board.
    pub fn occupant(&self, coord: Coord) -> Option<Occupant> {
        self.cells.get(&coord).map(Cell::occupant)
    }

    /// Places or recolours a disc.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the coordinate is off the board.
    pub fn set_occupant(&mut self, coord: Coord, color: Color) -> ReversiResult<()> {
        self.cell_mut(coord)?.set_occupant(color);
        Ok(())
    }

    /// Toggles the disc at a coordinate; no-op on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the coordinate is off the board.
    pub fn flip(&mut self, coord: Coord) -> ReversiResult<()> {
        self.cell_mut(coord)?.flip();
        Ok(())
    }

    pub(crate) fn clear(&mut self, coord: Coord) -> ReversiResult<()> {
        self.cell_mut(coord)?.clear();
        Ok(())
    }

    fn cell_mut(&mut self, coord: Coord) -> ReversiResult<&mut Cell> {
        self.cells
            .get_mut(&coord)
            .ok_or_else(|| ReversiError::not_found(coord))
    }

    /// All cells in upper-left order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Coordinates of empty cells in upper-left order.
    pub fn empty_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .values()
            .filter(|cell| cell.is_empty())
            .map(Cell::coord)
    }

    /// Disc counts per colour.
    pub fn scores(&self) -> Scores {
        let (black, white) = self
            .cells
            .values()
            .fold((0, 0), |(black, white), cell| match cell.occupant() {
                Occupant::Occupied(Color::Black) => (black + 1, white),
                Occupant::Occupied(Color::White) => (black, white + 1),
                Occupant::Empty => (black, white),
            });
        Scores::new(black, white)
    }

    /// Checks if every cell holds a disc.
    pub fn is_full(&self) -> bool {
        self.cells.values().all(|cell| !cell.is_empty())
    }

    /// Formats the board row by row, `_` for empty cells.
    pub fn display(&self) -> String {
        let mut result = String::new();
        let mut row = None;
        for cell in self.cells.values() {
            let r = cell.coord().r;
            if row.is_some_and(|prev| prev != r) {
                result.push('\n');
            } else if row.is_some() {
                result.push(' ');
            }
            row = Some(r);
            result.push(match cell.occupant() {
                Occupant::Empty => '_',
                Occupant::Occupied(color) => color.symbol(),
            });
        }
        result
    }
}
