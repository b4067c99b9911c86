//! Game board: the cell grid, the ships placed on it and shot resolution.

use core::fmt;

use log::{debug, trace};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::cell::{Cell, ShipId};
use crate::common::{PlacementError, RestoreError, ShotEvent, ShotResult, ShotSource};
use crate::config::{Rules, BOARD_SIZE};
use crate::coordinate::{Coordinate, Orientation};
use crate::ship::{layout, Ship, ShipKind};

/// Coordinate set sized for the game board.
pub type CoordSet = BitBoard<u128, BOARD_SIZE>;

/// Whole-fleet placements are retried this many times before giving up.
const AUTO_PLACE_ATTEMPTS: usize = 64;

/// Main board state: cells, placed ships and the shot journal.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: Vec<Ship>,
    rules: Rules,
    events: Vec<ShotEvent>,
}

impl Board {
    /// Create an empty board under the default rules.
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    pub fn with_rules(rules: Rules) -> Self {
        Board {
            cells: [[Cell::default(); BOARD_SIZE]; BOARD_SIZE],
            ships: Vec::new(),
            rules,
            events: Vec::new(),
        }
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn cell(&self, coord: Coordinate) -> &Cell {
        &self.cells[coord.row()][coord.col()]
    }

    fn cell_mut(&mut self, coord: Coordinate) -> &mut Cell {
        &mut self.cells[coord.row()][coord.col()]
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    /// The ship currently linked from `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<(ShipId, &Ship)> {
        let id = self.cell(coord).ship()?;
        self.ship(id).map(|ship| (id, ship))
    }

    /// Returns `true` when every ship on the board is sunk.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Place an unplaced ship from `anchor` along `orientation`.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlacementError> {
        if ship.is_placed() {
            return Err(PlacementError::AlreadyPlaced);
        }
        let segments = layout(ship.kind(), anchor, orientation)?;
        self.check_clearance(&segments, None)?;
        ship.place(segments)?;
        Ok(self.commit(ship))
    }

    /// Shorthand for placing a fresh ship of `kind`.
    pub fn place(
        &mut self,
        kind: ShipKind,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<ShipId, PlacementError> {
        self.place_ship(Ship::new(kind), anchor, orientation)
    }

    /// Place a ship of `kind` on an explicit list of segments.
    pub fn place_ship_segments(
        &mut self,
        kind: ShipKind,
        segments: Vec<Coordinate>,
    ) -> Result<ShipId, PlacementError> {
        let mut ship = Ship::new(kind);
        ship.place(segments)?;
        self.check_clearance(ship.segments(), None)?;
        Ok(self.commit(ship))
    }

    fn commit(&mut self, ship: Ship) -> ShipId {
        let id = ShipId(self.ships.len());
        for &c in ship.segments() {
            self.cell_mut(c).link(id);
        }
        debug!("placed {} {} at {:?}", ship.kind(), id, ship.segments());
        self.ships.push(ship);
        id
    }

    /// Reject `segments` if they overlap or (under separation) touch a ship
    /// other than `moving`.
    fn check_clearance(&self, segments: &[Coordinate], moving: Option<ShipId>) -> Result<(), PlacementError> {
        let foreign = |c: Coordinate| self.cell(c).ship().is_some_and(|id| Some(id) != moving);
        if segments.iter().any(|&c| foreign(c)) {
            return Err(PlacementError::Overlap);
        }
        if self.rules.separation && segments.iter().any(|&c| c.area(1).any(&foreign)) {
            return Err(PlacementError::TooClose);
        }
        Ok(())
    }

    /// Every legal `(anchor, orientation)` for a new ship of `kind`.
    pub fn legal_placements(&self, kind: ShipKind) -> Vec<(Coordinate, Orientation)> {
        let mut options = Vec::new();
        for anchor in Coordinate::all() {
            for orientation in Orientation::BOTH {
                if kind.length() == 1 && orientation == Orientation::Vertical {
                    continue;
                }
                let fits = layout(kind, anchor, orientation)
                    .and_then(|segments| self.check_clearance(&segments, None));
                if fits.is_ok() {
                    options.push((anchor, orientation));
                }
            }
        }
        options
    }

    /// Returns a random legal `(anchor, orientation)` for a ship of `kind`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(Coordinate, Orientation), PlacementError> {
        let options = self.legal_placements(kind);
        if options.is_empty() {
            return Err(PlacementError::NoRoom);
        }
        Ok(options[rng.random_range(0..options.len())])
    }

    /// Randomly place a whole fleet. Either every ship lands or the board is untouched.
    pub fn auto_place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fleet: &[ShipKind],
    ) -> Result<Vec<ShipId>, PlacementError> {
        'attempt: for attempt in 0..AUTO_PLACE_ATTEMPTS {
            let mut trial = self.clone();
            let mut ids = Vec::with_capacity(fleet.len());
            for &kind in fleet {
                match trial.random_placement(rng, kind) {
                    Ok((anchor, orientation)) => ids.push(trial.place(kind, anchor, orientation)?),
                    Err(_) => {
                        trace!("auto placement attempt {} dead-ended on {}", attempt, kind);
                        continue 'attempt;
                    }
                }
            }
            *self = trial;
            return Ok(ids);
        }
        Err(PlacementError::NoRoom)
    }

    /// Fire at `coord`.
    pub fn shoot_at(&mut self, coord: Coordinate) -> ShotResult {
        self.resolve(coord, ShotSource::Fire)
    }

    /// Fire at a raw `(row, col)`; out-of-range input yields `Invalid`.
    pub fn shoot(&mut self, row: usize, col: usize) -> ShotResult {
        match Coordinate::new(row, col) {
            Ok(coord) => self.shoot_at(coord),
            Err(_) => ShotResult::Invalid,
        }
    }

    /// Forced reveal from a skill: resolves the cell like a shot, journaled as a reveal.
    pub fn reveal(&mut self, coord: Coordinate) -> ShotResult {
        self.resolve(coord, ShotSource::Reveal)
    }

    /// Reveal the square of `radius` around `center` (radius 1 is a 3×3 area).
    pub fn reveal_area(&mut self, center: Coordinate, radius: usize) -> Vec<(Coordinate, ShotResult)> {
        center
            .area(radius)
            .map(|c| (c, self.reveal(c)))
            .collect()
    }

    fn resolve(&mut self, coord: Coordinate, source: ShotSource) -> ShotResult {
        if coord.row() >= BOARD_SIZE || coord.col() >= BOARD_SIZE {
            return ShotResult::Invalid;
        }
        if self.cell(coord).has_been_shot() {
            return ShotResult::AlreadyShot;
        }
        let ship_id = self.cell_mut(coord).mark_shot();
        let result = match ship_id {
            None => ShotResult::Miss,
            Some(id) => {
                let ship = &mut self.ships[id.0];
                if !ship.register_hit(coord) {
                    ShotResult::AlreadyHit
                } else if ship.is_sunk() {
                    ShotResult::Sunk(ship.kind())
                } else {
                    ShotResult::Hit
                }
            }
        };
        debug!("{:?} at {} -> {:?}", source, coord, result);
        self.events.push(ShotEvent {
            coord,
            result,
            ship: ship_id,
            source,
        });
        result
    }

    /// Undamaged segments of ships still afloat.
    pub fn intact_segments(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .flat_map(Ship::intact_segments)
    }

    /// Repair the damaged segment at `coord` and clear its shot marker.
    pub fn repair(&mut self, coord: Coordinate) -> bool {
        let Some(id) = self.cell(coord).ship() else {
            return false;
        };
        if !self.ships[id.0].repair(coord) {
            return false;
        }
        self.cell_mut(coord).clear_shot();
        debug!("repaired {} at {}", id, coord);
        true
    }

    /// Move a ship that is still afloat, carrying its damage along.
    ///
    /// The old cells lose their ship link but keep their shot markers.
    pub fn relocate_ship(
        &mut self,
        id: ShipId,
        anchor: Coordinate,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        let ship = self.ships.get(id.0).ok_or(PlacementError::UnknownShip)?;
        if ship.is_sunk() {
            return Err(PlacementError::ShipSunk);
        }
        let segments = layout(ship.kind(), anchor, orientation)?;
        self.check_clearance(&segments, Some(id))?;
        if segments.iter().any(|&c| self.cell(c).has_been_shot()) {
            return Err(PlacementError::FiredUpon);
        }
        let old = ship.segments().to_vec();
        self.ships[id.0].relocate(segments.clone())?;
        for c in old {
            self.cell_mut(c).unlink();
        }
        for &c in &segments {
            self.cell_mut(c).link(id);
        }
        debug!("relocated {} to {:?}", id, segments);
        Ok(())
    }

    /// Hand the shot journal to the caller, leaving it empty.
    pub fn drain_events(&mut self) -> Vec<ShotEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[ShotEvent] {
        &self.events
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  rules: {:?},\n  ships: {:?},\n  pending events: {}\n}}",
            self.rules,
            self.ships,
            self.events.len()
        )?;
        fmt::Display::fmt(self, f)
    }
}

/// Grid view: `.` water, `S` ship, `X` hit, `o` miss.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match (cell.has_been_shot(), cell.was_hit(), cell.ship().is_some()) {
                    (true, true, _) => 'X',
                    (true, false, _) => 'o',
                    (false, _, true) => 'S',
                    (false, _, false) => '.',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Stored form of a placed ship.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    pub kind: ShipKind,
    pub segments: Vec<Coordinate>,
    pub damage: Vec<bool>,
}

/// Serializable board state for saving and restoring games.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub rules: Rules,
    /// Row-major, `BOARD_SIZE * BOARD_SIZE` entries.
    pub cells: Vec<Cell>,
    pub ships: Vec<ShipState>,
}

impl From<&Board> for BoardState {
    fn from(b: &Board) -> Self {
        BoardState {
            rules: b.rules,
            cells: b.cells.iter().flatten().copied().collect(),
            ships: b
                .ships
                .iter()
                .map(|s| ShipState {
                    kind: s.kind(),
                    segments: s.segments().to_vec(),
                    damage: s.damage().to_vec(),
                })
                .collect(),
        }
    }
}

impl TryFrom<BoardState> for Board {
    type Error = RestoreError;

    fn try_from(state: BoardState) -> Result<Self, Self::Error> {
        let expected = BOARD_SIZE * BOARD_SIZE;
        if state.cells.len() != expected {
            return Err(RestoreError::CellCount {
                expected,
                actual: state.cells.len(),
            });
        }

        let mut ships = Vec::with_capacity(state.ships.len());
        let mut occupant: [Option<usize>; BOARD_SIZE * BOARD_SIZE] = [None; BOARD_SIZE * BOARD_SIZE];
        for (i, s) in state.ships.into_iter().enumerate() {
            let length = s.kind.length();
            let ship = Ship::from_parts(s.kind, s.segments, s.damage)
                .map_err(|e| RestoreError::Ship(i, e))?;
            if !ship.is_placed() {
                return Err(RestoreError::Ship(
                    i,
                    PlacementError::WrongLength {
                        expected: length,
                        actual: 0,
                    },
                ));
            }
            for c in ship.segments() {
                if let Some(other) = occupant[c.index()].replace(i) {
                    return Err(RestoreError::SharedCell(other, i));
                }
            }
            ships.push(ship);
        }

        if state.rules.separation {
            for (i, ship) in ships.iter().enumerate() {
                let touching = ship
                    .segments()
                    .iter()
                    .flat_map(|c| c.area(1))
                    .find_map(|n| occupant[n.index()].filter(|&j| j != i));
                if let Some(j) = touching {
                    return Err(RestoreError::TooClose(i.min(j), i.max(j)));
                }
            }
        }

        let mut cells = [[Cell::default(); BOARD_SIZE]; BOARD_SIZE];
        for (coord, cell) in Coordinate::all().zip(state.cells) {
            if cell.was_hit() && !cell.has_been_shot() {
                return Err(RestoreError::HitWithoutShot(coord));
            }
            match (cell.ship(), occupant[coord.index()]) {
                (Some(ShipId(linked)), Some(actual)) if linked == actual => {
                    // A shot at a linked cell always hit the segment beneath it.
                    let damaged = ships[actual]
                        .index_of(coord)
                        .is_some_and(|i| ships[actual].damage()[i]);
                    if cell.has_been_shot() && !(cell.was_hit() && damaged) {
                        return Err(RestoreError::DamageMismatch(coord));
                    }
                }
                (None, None) => {}
                (None, Some(_)) => return Err(RestoreError::MissingLink(coord)),
                (Some(_), _) => return Err(RestoreError::DanglingLink(coord)),
            }
            cells[coord.row()][coord.col()] = cell;
        }

        Ok(Board {
            cells,
            ships,
            rules: state.rules,
            events: Vec::new(),
        })
    }
}
