use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const STANDARD_FLEET: [ShipKind; 5] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Placement and turn rules for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Ships may not touch, diagonals included.
    pub separation: bool,
    /// A hit or a sink grants the shooter another immediate shot.
    pub fire_again_on_hit: bool,
}

impl Rules {
    /// Default rules with the separation requirement lifted.
    pub const fn relaxed() -> Self {
        Self {
            separation: false,
            fire_again_on_hit: true,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            separation: true,
            fire_again_on_hit: true,
        }
    }
}

/// Constants steering the CPU difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetingTuning {
    /// Probability that a NORMAL search shot is restricted to the parity pattern.
    pub parity_bias: f64,
    /// Width of the border HARD skips while interior cells remain.
    pub interior_margin: usize,
    /// Density added to the unfired neighbours of a live hit.
    pub hit_boost: u32,
    /// Radius (Chebyshev) around a sunk ship whose density is damped.
    pub sunk_radius: usize,
    /// Divisor applied to damped cells.
    pub sunk_damping: u32,
}

impl Default for TargetingTuning {
    fn default() -> Self {
        Self {
            parity_bias: 0.3,
            interior_margin: 2,
            hit_boost: 8,
            sunk_radius: 2,
            sunk_damping: 4,
        }
    }
}

/// Look up a ship kind by its display name, ignoring case.
pub fn ship_kind_by_name(name: &str) -> Option<ShipKind> {
    ShipKind::ALL
        .iter()
        .copied()
        .find(|kind| kind.name().eq_ignore_ascii_case(name))
}
