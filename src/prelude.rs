//! Commonly used types for ease of import.

pub use crate::{
    Board, Coordinate, Difficulty, GameStatus, Orientation, PlacementError, Rules, Ship, ShipKind,
    ShotResult, Skirmish, TargetingEngine, STANDARD_FLEET,
};
