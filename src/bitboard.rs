//! A fixed-size coordinate set packed into one unsigned integer.
//!
//! Boards are `N×N` grids stored row-major in the bits of `T`. The engine
//! uses `BitBoard<u128, BOARD_SIZE>` for its fired set and the density map's
//! damped zone, which keeps snapshots small and comparisons cheap.

use core::ops::{BitAnd, BitOr, Not};
use core::{any, fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::coordinate::Coordinate;

/// A set of coordinates on an `N×N` board, one bit per cell.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const BOARD_BITS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::BOARD_BITS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::BOARD_BITS) - T::one()
        }
    }

    #[inline]
    fn bit(coord: Coordinate) -> Option<T> {
        if coord.row() >= N || coord.col() >= N {
            return None;
        }
        Some(T::one() << (coord.row() * N + coord.col()))
    }

    /// Create an empty set. `N * N` must fit in the bits of `T`.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Every cell of the board.
    #[inline]
    pub fn full() -> Self {
        BitBoard { bits: Self::mask() }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// True when every cell of the board is in the set.
    pub fn is_full(&self) -> bool {
        self.bits == Self::mask()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        Self::bit(coord).is_some_and(|b| !(self.bits & b).is_zero())
    }

    /// Add `coord`; returns `true` if it was not present before.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(b) if (self.bits & b).is_zero() => {
                self.bits = self.bits | b;
                true
            }
            _ => false,
        }
    }

    /// Remove `coord`; returns `true` if it was present.
    pub fn remove(&mut self, coord: Coordinate) -> bool {
        match Self::bit(coord) {
            Some(b) if !(self.bits & b).is_zero() => {
                self.bits = self.bits & !b;
                true
            }
            _ => false,
        }
    }

    /// Creates a set from the raw integer, masking out bits beyond the board.
    #[inline]
    fn from_raw(raw: T) -> Self {
        BitBoard {
            bits: raw & Self::mask(),
        }
    }

    /// Members in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..Self::BOARD_BITS)
            .filter(move |&idx| !((self.bits >> idx) & T::one()).is_zero())
            .filter_map(|idx| Coordinate::new(idx / N, idx % N).ok())
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> FromIterator<Coordinate> for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut board = Self::new();
        for c in iter {
            board.insert(c);
        }
        board
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}, {}>:", any::type_name::<T>(), N)?;
        for r in 0..N {
            for c in 0..N {
                let set = !((self.bits >> (r * N + c)) & T::one()).is_zero();
                write!(f, "{} ", if set { '■' } else { '□' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard::from_raw(self.bits & rhs.bits)
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard::from_raw(self.bits | rhs.bits)
    }
}

/// Complement within board bounds.
impl<T, const N: usize> Not for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn not(self) -> Self {
        Self::from_raw(!self.bits)
    }
}
