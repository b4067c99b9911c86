use rand::rngs::SmallRng;

use super::state::{pick, TargetingState};
use super::Strategy;
use crate::common::ShotResult;
use crate::coordinate::Coordinate;

/// Interior-first search with axis-locking follow-up.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hard;

impl Strategy for Hard {
    fn propose_next(&mut self, state: &TargetingState, rng: &mut SmallRng) -> Option<Coordinate> {
        let interior = state.unfired_interior(state.tuning().interior_margin);
        pick(&interior, rng).or_else(|| pick(&state.unfired(), rng))
    }

    fn on_result(&mut self, state: &mut TargetingState, coord: Coordinate, result: ShotResult) {
        state.follow_up_axis(coord, result);
    }

    fn name(&self) -> &'static str {
        "hard"
    }
}
