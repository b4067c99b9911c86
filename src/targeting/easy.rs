use rand::rngs::SmallRng;

use super::state::{pick, TargetingState};
use super::Strategy;
use crate::common::ShotResult;
use crate::coordinate::Coordinate;

/// Uniform random over never-fired cells. Results are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Easy;

impl Strategy for Easy {
    fn propose_next(&mut self, state: &TargetingState, rng: &mut SmallRng) -> Option<Coordinate> {
        pick(&state.unfired(), rng)
    }

    fn on_result(&mut self, _state: &mut TargetingState, _coord: Coordinate, _result: ShotResult) {}

    fn name(&self) -> &'static str {
        "easy"
    }
}
