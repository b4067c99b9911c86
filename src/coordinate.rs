//! Bounded grid positions and the two ship axes.

use core::fmt;

use crate::common::CoordinateError;
use crate::config::BOARD_SIZE;

/// Orientation of a ship, or of a hunt's locked axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const BOTH: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// The other axis.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Unit step `(d_row, d_col)` along this axis.
    pub fn step(self) -> (isize, isize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A position on the `BOARD_SIZE`×`BOARD_SIZE` grid.
///
/// A `Coordinate` can only be obtained through a bounds check, so every value
/// in circulation is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(usize, usize)", into = "(usize, usize)"))]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Result<Self, CoordinateError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(CoordinateError::OutOfRange { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..BOARD_SIZE * BOARD_SIZE`.
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// Inverse of [`Coordinate::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE).ok()
    }

    /// The coordinate displaced by `(d_row, d_col)`, if it stays on the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row().checked_add_signed(d_row)?;
        let col = self.col().checked_add_signed(d_col)?;
        Self::new(row, col).ok()
    }

    /// The coordinate `distance` cells further along `orientation`.
    pub fn along(self, orientation: Orientation, distance: isize) -> Option<Self> {
        let (dr, dc) = orientation.step();
        self.offset(dr * distance, dc * distance)
    }

    /// Orthogonal neighbours on the board, in up/down/left/right order.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Neighbours along a single axis.
    pub fn axis_neighbors(self, orientation: Orientation) -> impl Iterator<Item = Coordinate> {
        [-1, 1]
            .into_iter()
            .filter_map(move |d| self.along(orientation, d))
    }

    /// Every on-board coordinate within Chebyshev distance `radius`, self included.
    pub fn area(self, radius: usize) -> impl Iterator<Item = Coordinate> {
        let r = radius as isize;
        (-r..=r).flat_map(move |dr| (-r..=r).filter_map(move |dc| self.offset(dr, dc)))
    }

    /// True when the two coordinates share an edge.
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.row().abs_diff(other.row()) + self.col().abs_diff(other.col()) == 1
    }

    /// Axis joining two adjacent coordinates.
    pub fn axis_to(self, other: Coordinate) -> Option<Orientation> {
        if !self.is_adjacent(other) {
            None
        } else if self.row == other.row {
            Some(Orientation::Horizontal)
        } else {
            Some(Orientation::Vertical)
        }
    }

    /// All coordinates of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Self::from_index)
    }
}

impl TryFrom<(usize, usize)> for Coordinate {
    type Error = CoordinateError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    fn from(c: Coordinate) -> Self {
        (c.row(), c.col())
    }
}

impl fmt::Display for Coordinate {
    /// Battleship notation: column letter, 1-based row (`A1`..`J10`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}
