//! Search state shared by every tier, and the two hunt follow-up policies.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use crate::board::CoordSet;
use crate::common::ShotResult;
use crate::config::{TargetingTuning, BOARD_SIZE};
use crate::coordinate::{Coordinate, Orientation};
use crate::density::ProbabilityMap;
use crate::ship::ShipKind;

/// Whether the engine is sweeping for ships or finishing one off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    Search,
    Hunt,
}

/// Everything the engine knows about its opponent's board.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingState {
    fired: CoordSet,
    pending: VecDeque<Coordinate>,
    mode: Mode,
    last_hit: Option<Coordinate>,
    locked: Option<Orientation>,
    /// Hits on the ship currently hunted, oldest first.
    hunt_hits: Vec<Coordinate>,
    /// Enemy ships not yet reported sunk.
    afloat: Vec<ShipKind>,
    density: Option<ProbabilityMap>,
    tuning: TargetingTuning,
}

impl TargetingState {
    pub fn new(fleet: &[ShipKind], tuning: TargetingTuning, with_density: bool) -> Self {
        let mut state = Self {
            fired: CoordSet::new(),
            pending: VecDeque::new(),
            mode: Mode::Search,
            last_hit: None,
            locked: None,
            hunt_hits: Vec::new(),
            afloat: fleet.to_vec(),
            density: with_density.then(ProbabilityMap::new),
            tuning,
        };
        state.rebuild_density();
        state
    }

    pub fn fired(&self) -> &CoordSet {
        &self.fired
    }

    pub fn is_fired(&self, coord: Coordinate) -> bool {
        self.fired.contains(coord)
    }

    pub fn pending(&self) -> &VecDeque<Coordinate> {
        &self.pending
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_hit(&self) -> Option<Coordinate> {
        self.last_hit
    }

    pub fn locked_axis(&self) -> Option<Orientation> {
        self.locked
    }

    pub fn hunt_hits(&self) -> &[Coordinate] {
        &self.hunt_hits
    }

    pub fn afloat(&self) -> &[ShipKind] {
        &self.afloat
    }

    pub fn density(&self) -> Option<&ProbabilityMap> {
        self.density.as_ref()
    }

    pub fn tuning(&self) -> &TargetingTuning {
        &self.tuning
    }

    /// Never-fired coordinates in row-major order.
    pub fn unfired(&self) -> Vec<Coordinate> {
        Coordinate::all().filter(|c| !self.fired.contains(*c)).collect()
    }

    /// Never-fired coordinates at least `margin` cells away from every edge.
    pub fn unfired_interior(&self, margin: usize) -> Vec<Coordinate> {
        let inside = |i: usize| i >= margin && i + margin < BOARD_SIZE;
        Coordinate::all()
            .filter(|c| inside(c.row()) && inside(c.col()) && !self.fired.contains(*c))
            .collect()
    }

    pub(crate) fn mark_fired(&mut self, coord: Coordinate) {
        self.fired.insert(coord);
        if let Some(map) = self.density.as_mut() {
            map.clear(coord);
        }
    }

    /// Front of the queue, skipping anything fired since it was queued.
    pub(crate) fn pop_pending(&mut self) -> Option<Coordinate> {
        while let Some(c) = self.pending.pop_front() {
            if !self.fired.contains(c) {
                return Some(c);
            }
        }
        None
    }

    fn has_pending(&self) -> bool {
        self.pending.iter().any(|c| !self.fired.contains(*c))
    }

    fn enqueue(&mut self, coord: Coordinate) {
        if !self.fired.contains(coord) && !self.pending.contains(&coord) {
            self.pending.push_back(coord);
        }
    }

    fn enqueue_neighbors(&mut self, coord: Coordinate) {
        for n in coord.neighbors() {
            self.enqueue(n);
        }
    }

    pub(crate) fn record_sunk(&mut self, kind: ShipKind) {
        if let Some(i) = self.afloat.iter().position(|&k| k == kind) {
            self.afloat.swap_remove(i);
        }
    }

    fn record_hit(&mut self, coord: Coordinate) {
        if self.mode == Mode::Search {
            debug!("hit at {}, switching to hunt", coord);
        }
        self.mode = Mode::Hunt;
        self.last_hit = Some(coord);
        if !self.hunt_hits.contains(&coord) {
            self.hunt_hits.push(coord);
        }
    }

    fn end_hunt(&mut self) {
        if self.mode == Mode::Hunt {
            debug!("target destroyed or lost, back to search");
        }
        self.mode = Mode::Search;
        self.pending.clear();
        self.last_hit = None;
        self.locked = None;
        self.hunt_hits.clear();
    }

    /// Hunt hits forming a contiguous line through `coord` along `axis`, ordered.
    fn run_through(&self, coord: Coordinate, axis: Orientation) -> Vec<Coordinate> {
        let is_hit = |c: &Coordinate| self.hunt_hits.contains(c);
        let mut start = coord;
        while let Some(prev) = start.along(axis, -1).filter(|c| is_hit(c)) {
            start = prev;
        }
        let mut run = vec![start];
        while let Some(next) = run[run.len() - 1].along(axis, 1).filter(|c| is_hit(c)) {
            run.push(next);
        }
        run
    }

    /// Lock the hunt onto `axis` and aim only at the two ends of the run of
    /// hits through `coord`, the end beyond `coord` first.
    fn lock(&mut self, axis: Orientation, coord: Coordinate) {
        if self.locked != Some(axis) {
            debug!("locking hunt at {} to {:?}", coord, axis);
        }
        self.locked = Some(axis);
        self.pending.clear();
        let run = self.run_through(coord, axis);
        let low = run[0].along(axis, -1);
        let high = run[run.len() - 1].along(axis, 1);
        let ends = if run[0] == coord && run.len() > 1 {
            [low, high]
        } else {
            [high, low]
        };
        for end in ends.into_iter().flatten() {
            self.enqueue(end);
        }
    }

    /// The queue ran dry without finishing the ship: widen the search around
    /// the known hits, or give up on the hunt if nothing is left to try.
    fn recover(&mut self) {
        let hits = self.hunt_hits.clone();
        if let Some(axis) = self.locked {
            let flipped = axis.flipped();
            debug!("hunt axis {:?} exhausted, trying {:?}", axis, flipped);
            self.locked = Some(flipped);
            for &h in &hits {
                for n in h.axis_neighbors(flipped) {
                    self.enqueue(n);
                }
            }
            if !self.has_pending() {
                self.locked = None;
            }
        }
        if !self.has_pending() {
            for &h in &hits {
                self.enqueue_neighbors(h);
            }
        }
        if !self.has_pending() {
            self.end_hunt();
        }
    }

    /// NORMAL follow-up: every hit queues its orthogonal neighbours, consumed FIFO.
    pub(crate) fn follow_up_adjacent(&mut self, coord: Coordinate, result: ShotResult) {
        match result {
            ShotResult::Hit | ShotResult::AlreadyHit => {
                self.record_hit(coord);
                self.enqueue_neighbors(coord);
            }
            ShotResult::Sunk(_) => self.end_hunt(),
            ShotResult::Miss => {
                if self.mode == Mode::Hunt && !self.has_pending() {
                    self.recover();
                }
            }
            ShotResult::AlreadyShot | ShotResult::Invalid => {}
        }
    }

    /// HARD/EXPERT follow-up: like the adjacent policy until a second hit
    /// lines up with an earlier one, then only along that axis.
    pub(crate) fn follow_up_axis(&mut self, coord: Coordinate, result: ShotResult) {
        match result {
            ShotResult::Hit | ShotResult::AlreadyHit => {
                self.record_hit(coord);
                let axes: Vec<Orientation> = self
                    .hunt_hits
                    .iter()
                    .filter_map(|&h| coord.axis_to(h))
                    .collect();
                let axis = match self.locked {
                    Some(current) if axes.contains(&current) => Some(current),
                    _ => axes.first().copied(),
                };
                match axis {
                    Some(axis) => {
                        self.lock(axis, coord);
                        if !self.has_pending() {
                            self.recover();
                        }
                    }
                    None => self.enqueue_neighbors(coord),
                }
            }
            ShotResult::Sunk(_) => self.end_hunt(),
            ShotResult::Miss => {
                if self.mode == Mode::Hunt && !self.has_pending() {
                    self.recover();
                }
            }
            ShotResult::AlreadyShot | ShotResult::Invalid => {}
        }
    }

    /// Best guess at the cells of the ship just sunk at `coord`.
    pub(crate) fn sunk_segments(&self, coord: Coordinate) -> Vec<Coordinate> {
        let mut segments = match self.locked {
            Some(axis) => self.run_through(coord, axis),
            None => self.hunt_hits.clone(),
        };
        if !segments.contains(&coord) {
            segments.push(coord);
        }
        segments
    }

    pub(crate) fn mark_sunk_area(&mut self, segments: &[Coordinate]) {
        let radius = self.tuning.sunk_radius;
        if let Some(map) = self.density.as_mut() {
            map.mark_sunk(segments, radius);
        }
    }

    pub(crate) fn rebuild_density(&mut self) {
        if let Some(map) = self.density.as_mut() {
            map.rebuild(&self.fired, &self.afloat, &self.hunt_hits, &self.tuning);
        }
    }
}

/// Uniform pick among `candidates`.
pub(crate) fn pick<R: Rng + ?Sized>(candidates: &[Coordinate], rng: &mut R) -> Option<Coordinate> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
