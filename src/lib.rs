//! Combat resolution and CPU targeting for a Battleship-style grid game.
//!
//! The [`Board`] owns its cells and ships and resolves shots into
//! [`ShotResult`]s. The [`TargetingEngine`] picks the CPU's next shot for one
//! of four [`Difficulty`] tiers and learns from the results it is given.

mod bitboard;
mod board;
mod cell;
mod common;
mod config;
mod coordinate;
mod density;
mod game;
mod logging;
pub mod prelude;
mod ship;
pub mod targeting;

pub use bitboard::BitBoard;
pub use board::*;
pub use cell::*;
pub use common::*;
pub use config::*;
pub use coordinate::*;
pub use density::ProbabilityMap;
pub use game::*;
pub use logging::init_logging;
pub use ship::*;
pub use targeting::{Difficulty, EngineState, Mode, Strategy, TargetingEngine, TargetingState};
