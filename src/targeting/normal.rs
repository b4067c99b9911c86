use rand::rngs::SmallRng;
use rand::Rng;

use super::state::{pick, TargetingState};
use super::Strategy;
use crate::common::ShotResult;
use crate::config::TargetingTuning;
use crate::coordinate::Coordinate;

/// Random search, biased part of the time toward a checkerboard.
///
/// Any ship of two or more cells covers at least one cell with
/// `(row + col) % 2 == 0`, so the parity half of the board is enough to find
/// every such ship.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normal;

impl Strategy for Normal {
    fn propose_next(&mut self, state: &TargetingState, rng: &mut SmallRng) -> Option<Coordinate> {
        let unfired = state.unfired();
        let bias = state.tuning().parity_bias;
        let bias = if bias.is_finite() {
            bias.clamp(0.0, 1.0)
        } else {
            TargetingTuning::default().parity_bias
        };
        if rng.random_bool(bias) {
            let parity: Vec<Coordinate> = unfired
                .iter()
                .copied()
                .filter(|c| (c.row() + c.col()) % 2 == 0)
                .collect();
            if let Some(c) = pick(&parity, rng) {
                return Some(c);
            }
        }
        pick(&unfired, rng)
    }

    fn on_result(&mut self, state: &mut TargetingState, coord: Coordinate, result: ShotResult) {
        state.follow_up_adjacent(coord, result);
    }

    fn name(&self) -> &'static str {
        "normal"
    }
}
