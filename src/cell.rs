use core::fmt;

/// Index of a ship in its board's ship list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single grid slot.
///
/// `ship` is a lookup key into the board's ship list, not ownership. A hit
/// always has a shot behind it; the ship link of a hit cell may be cleared
/// later when the ship relocates, leaving the shot marker in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    ship: Option<ShipId>,
    shot: bool,
    hit: bool,
}

impl Cell {
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    pub fn has_been_shot(&self) -> bool {
        self.shot
    }

    pub fn was_hit(&self) -> bool {
        self.hit
    }

    pub(crate) fn link(&mut self, id: ShipId) {
        self.ship = Some(id);
    }

    pub(crate) fn unlink(&mut self) {
        self.ship = None;
    }

    /// Mark the cell as fired upon; a hit requires a ship under it.
    pub(crate) fn mark_shot(&mut self) -> Option<ShipId> {
        self.shot = true;
        self.hit = self.ship.is_some();
        self.ship
    }

    pub(crate) fn clear_shot(&mut self) {
        self.shot = false;
        self.hit = false;
    }

    /// Build a cell verbatim, for snapshot restore. `Board::try_from` checks
    /// the result against the ship list.
    pub fn from_parts(ship: Option<ShipId>, shot: bool, hit: bool) -> Self {
        Self { ship, shot, hit }
    }
}
