use rand::rngs::SmallRng;

use super::state::{pick, TargetingState};
use super::Strategy;
use crate::common::ShotResult;
use crate::coordinate::Coordinate;

/// Density-map search with axis-locking follow-up.
///
/// Search fires at the highest-density unfired cell, breaking ties uniformly.
/// The map is rebuilt after every result; a sink damps the area around the
/// sunk ship first, since no other ship may sit next to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expert;

impl Strategy for Expert {
    fn propose_next(&mut self, state: &TargetingState, rng: &mut SmallRng) -> Option<Coordinate> {
        let map = state.density()?;
        pick(&map.best_cells(state.fired()), rng)
    }

    fn on_result(&mut self, state: &mut TargetingState, coord: Coordinate, result: ShotResult) {
        if let ShotResult::Sunk(_) = result {
            let segments = state.sunk_segments(coord);
            state.mark_sunk_area(&segments);
        }
        state.follow_up_axis(coord, result);
        state.rebuild_density();
    }

    fn name(&self) -> &'static str {
        "expert"
    }
}
