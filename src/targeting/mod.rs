//! CPU shot selection.
//!
//! This module defines the [`Strategy`] trait and the engine that drives it:
//! - [`Easy`]: uniform random, ignores hits
//! - [`Normal`]: random with a parity bias, adjacency follow-up
//! - [`Hard`]: interior-first search, axis-locking follow-up
//! - [`Expert`]: density-map search, axis-locking follow-up
//!
//! The engine proposes coordinates and is told the results; it never
//! touches the opponent's board.

use core::fmt;

use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::CoordSet;
use crate::common::{ShotResult, TargetingError};
use crate::config::TargetingTuning;
use crate::coordinate::{Coordinate, Orientation};
use crate::density::ProbabilityMap;
use crate::ship::ShipKind;

pub mod easy;
pub mod expert;
pub mod hard;
pub mod normal;
pub mod state;

pub use easy::Easy;
pub use expert::Expert;
pub use hard::Hard;
pub use normal::Normal;
pub use state::{Mode, TargetingState};

/// Interface implemented by each difficulty tier.
///
/// A strategy holds no state of its own; everything it learns lives in the
/// [`TargetingState`] so the engine can be snapshotted as a whole.
pub trait Strategy: Send {
    /// Choose the next target. May return `None` when the tier's heuristic
    /// has nothing to offer; the engine then falls back to uniform random.
    fn propose_next(&mut self, state: &TargetingState, rng: &mut SmallRng) -> Option<Coordinate>;

    /// Update `state` after `coord` was resolved as `result`.
    fn on_result(&mut self, state: &mut TargetingState, coord: Coordinate, result: ShotResult);

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// The four CPU tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Strategy implementing this tier.
    pub fn strategy(self) -> Box<dyn Strategy> {
        match self {
            Difficulty::Easy => Box::new(Easy),
            Difficulty::Normal => Box::new(Normal),
            Difficulty::Hard => Box::new(Hard),
            Difficulty::Expert => Box::new(Expert),
        }
    }

    fn uses_density(self) -> bool {
        self == Difficulty::Expert
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Serializable engine state for saving and restoring games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineState {
    pub difficulty: Difficulty,
    pub targeting: TargetingState,
}

/// The CPU opponent's brain for one engagement against one board.
pub struct TargetingEngine {
    difficulty: Difficulty,
    strategy: Box<dyn Strategy>,
    state: TargetingState,
    rng: SmallRng,
}

impl TargetingEngine {
    /// Engine for `difficulty` against a board carrying `fleet`.
    pub fn new(difficulty: Difficulty, fleet: &[ShipKind], rng: SmallRng) -> Self {
        Self::with_tuning(difficulty, fleet, TargetingTuning::default(), rng)
    }

    pub fn with_tuning(
        difficulty: Difficulty,
        fleet: &[ShipKind],
        tuning: TargetingTuning,
        rng: SmallRng,
    ) -> Self {
        let state = TargetingState::new(fleet, tuning, difficulty.uses_density());
        Self::from_parts(difficulty, state, rng)
    }

    /// Engine with a deterministic random source.
    pub fn seeded(difficulty: Difficulty, fleet: &[ShipKind], seed: u64) -> Self {
        Self::new(difficulty, fleet, SmallRng::seed_from_u64(seed))
    }

    /// Restore an engine from a previously saved state.
    pub fn from_state(state: EngineState, rng: SmallRng) -> Self {
        Self::from_parts(state.difficulty, state.targeting, rng)
    }

    fn from_parts(difficulty: Difficulty, state: TargetingState, rng: SmallRng) -> Self {
        Self {
            difficulty,
            strategy: difficulty.strategy(),
            state,
            rng,
        }
    }

    /// Pick the next coordinate to fire at. Never repeats a coordinate.
    pub fn next_shot(&mut self) -> Result<Coordinate, TargetingError> {
        let queued = self.state.pop_pending();
        let choice = match queued {
            Some(c) => Some(c),
            None => self
                .strategy
                .propose_next(&self.state, &mut self.rng)
                .filter(|c| !self.state.is_fired(*c)),
        };
        let choice = match choice {
            Some(c) => Some(c),
            None => state::pick(&self.state.unfired(), &mut self.rng),
        };
        let coord = choice.ok_or(TargetingError::NoLegalMove)?;
        self.state.mark_fired(coord);
        debug!(
            "{} proposes {} ({:?}, {} queued)",
            self.strategy.name(),
            coord,
            self.state.mode(),
            self.state.pending().len()
        );
        Ok(coord)
    }

    /// Feed back the outcome of firing at `coord`.
    pub fn process_result(&mut self, coord: Coordinate, result: ShotResult) {
        if result == ShotResult::Invalid {
            return;
        }
        self.state.mark_fired(coord);
        if let ShotResult::Sunk(kind) = result {
            self.state.record_sunk(kind);
        }
        self.strategy.on_result(&mut self.state, coord, result);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn pending(&self) -> Vec<Coordinate> {
        self.state.pending().iter().copied().collect()
    }

    pub fn last_hit(&self) -> Option<Coordinate> {
        self.state.last_hit()
    }

    pub fn locked_axis(&self) -> Option<Orientation> {
        self.state.locked_axis()
    }

    pub fn fired(&self) -> &CoordSet {
        self.state.fired()
    }

    pub fn density(&self) -> Option<&ProbabilityMap> {
        self.state.density()
    }

    /// Enemy ships not yet reported sunk.
    pub fn remaining_fleet(&self) -> &[ShipKind] {
        self.state.afloat()
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> EngineState {
        EngineState {
            difficulty: self.difficulty,
            targeting: self.state.clone(),
        }
    }
}

impl fmt::Debug for TargetingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingEngine")
            .field("difficulty", &self.difficulty)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
