//! Ship kinds and the per-segment damage model.

use core::fmt;

use crate::common::PlacementError;
use crate::coordinate::{Coordinate, Orientation};

/// Closed set of ship classes: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
    Frigate,
}

impl ShipKind {
    pub const ALL: [ShipKind; 6] = [
        ShipKind::Carrier,
        ShipKind::Battleship,
        ShipKind::Cruiser,
        ShipKind::Submarine,
        ShipKind::Destroyer,
        ShipKind::Frigate,
    ];

    /// Ship's length in cells.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser | ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Frigate => 1,
        }
    }

    /// Ship's display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Frigate => "Frigate",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Segments the ship would occupy from `anchor` along `orientation`.
pub fn layout(
    kind: ShipKind,
    anchor: Coordinate,
    orientation: Orientation,
) -> Result<Vec<Coordinate>, PlacementError> {
    (0..kind.length() as isize)
        .map(|i| anchor.along(orientation, i).ok_or(PlacementError::OutOfBounds))
        .collect()
}

/// Infer the axis of a run of segments, rejecting anything that is not a
/// straight line of consecutive cells. A single segment has no axis.
pub fn infer_orientation(segments: &[Coordinate]) -> Result<Option<Orientation>, PlacementError> {
    let (first, second) = match segments {
        [] | [_] => return Ok(None),
        [a, b, ..] => (*a, *b),
    };
    let orientation = first.axis_to(second).ok_or(PlacementError::NonCollinear)?;
    let (dr, dc) = orientation.step();
    // The first pair fixes the travel direction; every later pair must repeat it.
    let forward = first.offset(dr, dc) == Some(second);
    let (dr, dc) = if forward { (dr, dc) } else { (-dr, -dc) };
    for pair in segments.windows(2) {
        if pair[0].offset(dr, dc) != Some(pair[1]) {
            return Err(PlacementError::NonCollinear);
        }
    }
    Ok(Some(orientation))
}

/// A ship with its placement and the damage state of each segment.
///
/// `hits` is a cache of the number of damaged segments; the ship is sunk
/// exactly when every segment is damaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    segments: Vec<Coordinate>,
    damage: Vec<bool>,
    hits: usize,
}

impl Ship {
    /// A fresh, unplaced ship.
    pub fn new(kind: ShipKind) -> Self {
        Self {
            kind,
            segments: Vec::new(),
            damage: Vec::new(),
            hits: 0,
        }
    }

    /// Rebuild a ship from stored parts, checking every invariant.
    pub fn from_parts(
        kind: ShipKind,
        segments: Vec<Coordinate>,
        damage: Vec<bool>,
    ) -> Result<Self, PlacementError> {
        if segments.is_empty() {
            if damage.is_empty() {
                return Ok(Self::new(kind));
            }
            return Err(PlacementError::WrongLength {
                expected: 0,
                actual: damage.len(),
            });
        }
        let mut ship = Self::new(kind);
        ship.place(segments)?;
        if damage.len() != ship.segments.len() {
            return Err(PlacementError::WrongLength {
                expected: ship.segments.len(),
                actual: damage.len(),
            });
        }
        ship.hits = damage.iter().filter(|&&d| d).count();
        ship.damage = damage;
        Ok(ship)
    }

    /// Assign segments to an unplaced ship. Damage starts zeroed.
    pub fn place(&mut self, segments: Vec<Coordinate>) -> Result<Option<Orientation>, PlacementError> {
        if self.is_placed() {
            return Err(PlacementError::AlreadyPlaced);
        }
        let orientation = Self::validate(self.kind, &segments)?;
        self.damage = vec![false; segments.len()];
        self.segments = segments;
        self.hits = 0;
        Ok(orientation)
    }

    fn validate(kind: ShipKind, segments: &[Coordinate]) -> Result<Option<Orientation>, PlacementError> {
        if segments.len() != kind.length() {
            return Err(PlacementError::WrongLength {
                expected: kind.length(),
                actual: segments.len(),
            });
        }
        infer_orientation(segments)
    }

    /// Move the ship onto new segments, keeping damage by segment index.
    pub(crate) fn relocate(&mut self, segments: Vec<Coordinate>) -> Result<(), PlacementError> {
        Self::validate(self.kind, &segments)?;
        self.segments = segments;
        Ok(())
    }

    /// Record damage at `coord`. Returns `false` if `coord` is not part of the
    /// ship or that segment was already damaged.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        match self.index_of(coord) {
            Some(i) if !self.damage[i] => {
                self.damage[i] = true;
                self.hits += 1;
                true
            }
            _ => false,
        }
    }

    /// Undo damage at `coord`. Sinking is terminal: a sunk ship cannot be repaired.
    pub fn repair(&mut self, coord: Coordinate) -> bool {
        if !self.is_placed() || self.is_sunk() {
            return false;
        }
        match self.index_of(coord) {
            Some(i) if self.damage[i] => {
                self.damage[i] = false;
                self.hits -= 1;
                true
            }
            _ => false,
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.is_placed() && self.hits == self.kind.length()
    }

    pub fn is_placed(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn segments(&self) -> &[Coordinate] {
        &self.segments
    }

    pub fn damage(&self) -> &[bool] {
        &self.damage
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Axis of the ship; `None` while unplaced or for one-cell ships.
    pub fn orientation(&self) -> Option<Orientation> {
        infer_orientation(&self.segments).ok().flatten()
    }

    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        self.segments.iter().position(|&c| c == coord)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.index_of(coord).is_some()
    }

    /// Segments that have not been damaged yet.
    pub fn intact_segments(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.segments
            .iter()
            .zip(&self.damage)
            .filter(|(_, &d)| !d)
            .map(|(&c, _)| c)
    }
}
