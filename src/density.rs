//! Placement-count density over the opponent board, used by the EXPERT tier.
//!
//! For every ship still afloat, every horizontal and vertical run of its
//! length that lies entirely on never-fired cells adds one to each cell of
//! the run. Two overlays sit on top of the base count: live hits lift their
//! unfired neighbours, and cells near a sunk ship are damped because the
//! separation rule keeps other ships away from it. Fired cells are always 0.

use log::trace;

use crate::board::CoordSet;
use crate::config::{TargetingTuning, BOARD_SIZE};
use crate::coordinate::{Coordinate, Orientation};
use crate::ship::ShipKind;

const GRID_SIZE: usize = BOARD_SIZE;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbabilityMap {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
    damped: CoordSet,
}

impl ProbabilityMap {
    pub fn new() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
            damped: CoordSet::new(),
        }
    }

    /// Density at `coord`.
    pub fn get(&self, coord: Coordinate) -> u32 {
        self.cells[coord.row()][coord.col()]
    }

    /// The whole grid, row-major.
    pub fn grid(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Cells whose density is currently damped by a nearby sunk ship.
    pub fn damped(&self) -> CoordSet {
        self.damped
    }

    /// Damp the area around a sunk ship's segments on every later rebuild.
    pub fn mark_sunk(&mut self, segments: &[Coordinate], radius: usize) {
        for &s in segments {
            for c in s.area(radius) {
                self.damped.insert(c);
            }
        }
    }

    /// Zero a freshly fired cell without a full rebuild.
    pub fn clear(&mut self, coord: Coordinate) {
        self.cells[coord.row()][coord.col()] = 0;
    }

    /// Recompute the whole map from the fired set, the fleet still afloat and
    /// the hits of the ship currently being hunted.
    pub fn rebuild(
        &mut self,
        fired: &CoordSet,
        afloat: &[ShipKind],
        live_hits: &[Coordinate],
        tuning: &TargetingTuning,
    ) {
        let mut cells = [[0u32; GRID_SIZE]; GRID_SIZE];

        for kind in afloat {
            let len = kind.length();
            for anchor in Coordinate::all() {
                for orient in Orientation::BOTH {
                    // A one-cell run is the same either way round.
                    if len == 1 && orient == Orientation::Vertical {
                        continue;
                    }
                    let run: Option<Vec<Coordinate>> = (0..len as isize)
                        .map(|k| anchor.along(orient, k).filter(|c| !fired.contains(*c)))
                        .collect();
                    if let Some(run) = run {
                        for c in run {
                            cells[c.row()][c.col()] += 1;
                        }
                    }
                }
            }
        }

        for c in self.damped.iter() {
            cells[c.row()][c.col()] /= tuning.sunk_damping.max(1);
        }
        for hit in live_hits {
            for n in hit.neighbors().filter(|n| !fired.contains(*n)) {
                let cell = &mut cells[n.row()][n.col()];
                *cell = cell.saturating_add(tuning.hit_boost);
            }
        }
        for c in fired.iter() {
            cells[c.row()][c.col()] = 0;
        }

        self.cells = cells;
        trace!("density rebuilt for {} ships afloat", afloat.len());
    }

    /// Unfired cells sharing the highest density.
    pub fn best_cells(&self, fired: &CoordSet) -> Vec<Coordinate> {
        let mut best = Vec::new();
        let mut top = 0u32;
        for c in Coordinate::all().filter(|c| !fired.contains(*c)) {
            let v = self.get(c);
            if best.is_empty() || v > top {
                top = v;
                best.clear();
                best.push(c);
            } else if v == top {
                best.push(c);
            }
        }
        best
    }
}

impl Default for ProbabilityMap {
    fn default() -> Self {
        Self::new()
    }
}
