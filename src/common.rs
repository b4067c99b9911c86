//! Common types for broadside: shot outcomes, the shot journal and error enums.

use thiserror::Error;

use crate::cell::ShipId;
use crate::coordinate::Coordinate;
use crate::ship::ShipKind;

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// No ship at the target.
    Miss,
    /// Damaged a ship that is still afloat.
    Hit,
    /// Damaged the last intact segment of a ship, carrying its kind.
    Sunk(ShipKind),
    /// The cell was fired upon before; nothing changed.
    AlreadyShot,
    /// A fresh cell, but the ship segment under it was already damaged
    /// (only reachable after a relocation). Ship damage is not counted twice.
    AlreadyHit,
    /// The target is outside the grid.
    Invalid,
}

impl ShotResult {
    /// True for outcomes that damaged a ship.
    pub fn is_hit(self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sunk(_))
    }

    /// True when the shooter earns another shot under the fire-again rule.
    pub fn fires_again(self) -> bool {
        self.is_hit()
    }
}

/// How a cell came to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotSource {
    /// A regular turn shot.
    Fire,
    /// A forced reveal triggered by a skill.
    Reveal,
}

/// One state-changing resolution, journaled for external subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotEvent {
    pub coord: Coordinate,
    pub result: ShotResult,
    pub ship: Option<ShipId>,
    pub source: ShotSource,
}

/// A row/column pair outside the grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },
}

/// Reasons a placement or relocation is rejected. Rejections never mutate the board.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("ship placement is out of bounds")]
    OutOfBounds,
    #[error("ship placement overlaps another ship")]
    Overlap,
    #[error("ship placement touches another ship")]
    TooClose,
    #[error("ship needs {expected} segments, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("ship segments are not a straight consecutive line")]
    NonCollinear,
    #[error("ship is already placed")]
    AlreadyPlaced,
    #[error("no such ship on this board")]
    UnknownShip,
    #[error("a sunk ship cannot be moved")]
    ShipSunk,
    #[error("ship placement covers a cell that was already fired upon")]
    FiredUpon,
    #[error("no room left to place the ship")]
    NoRoom,
}

/// Errors raised by the targeting engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TargetingError {
    #[error("every cell has been fired upon")]
    NoLegalMove,
}

/// A snapshot that would break a board invariant if restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RestoreError {
    #[error("ship {0} is malformed: {1}")]
    Ship(usize, PlacementError),
    #[error("ships {0} and {1} share a cell")]
    SharedCell(usize, usize),
    #[error("ships {0} and {1} touch while separation is required")]
    TooClose(usize, usize),
    #[error("cell {0} disagrees with the damage of the ship under it")]
    DamageMismatch(Coordinate),
    #[error("cell {0} does not link to the ship occupying it")]
    MissingLink(Coordinate),
    #[error("cell {0} links to a ship that is not there")]
    DanglingLink(Coordinate),
    #[error("cell {0} records a hit without a shot")]
    HitWithoutShot(Coordinate),
    #[error("expected {expected} cells, got {actual}")]
    CellCount { expected: usize, actual: usize },
}
