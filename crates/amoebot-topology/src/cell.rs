//! Lattice cells in axial coordinates.
//!
//! Axial coordinates use two axes (q, r) at 60 degrees, with an implicit
//! third axis s = -q - r. Two values are stored while the hexagonal symmetry
//! of the neighborhood is kept.

use std::ops::{Add, Neg, Sub};

use crate::Direction;

/// A node of the triangular lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// First axial coordinate
    pub q: i64,
    /// Second axial coordinate
    pub r: i64,
}

impl Cell {
    /// Origin of the coordinate system.
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Largest coordinate magnitude a structure may use.
    ///
    /// Within this bound `s`, neighbors, differences and axis projections of
    /// cells never overflow `i64`.
    pub const LIMIT: i64 = i64::MAX / 4;

    /// Create a new cell.
    pub const fn new(q: i64, r: i64) -> Self {
        Self { q, r }
    }

    /// Whether both coordinates are within [`Cell::LIMIT`].
    pub const fn is_bounded(&self) -> bool {
        self.q.unsigned_abs() <= Self::LIMIT as u64 && self.r.unsigned_abs() <= Self::LIMIT as u64
    }

    /// Compute the implicit third axis: s = -q - r.
    pub const fn s(&self) -> i64 {
        -self.q - self.r
    }

    /// Lattice distance between two cells.
    ///
    /// max(|dq|, |dr|, |ds|) where ds = -dq - dr
    /// Exact for any pair of cells; saturates at `u64::MAX`.
    pub fn distance(&self, other: &Self) -> u64 {
        let dq = i128::from(self.q) - i128::from(other.q);
        let dr = i128::from(self.r) - i128::from(other.r);
        let ds = dq + dr;
        let d = dq.unsigned_abs().max(dr.unsigned_abs()).max(ds.unsigned_abs());
        u64::try_from(d).unwrap_or(u64::MAX)
    }

    /// The neighbor one step away in `direction`.
    ///
    /// Overflows for cells at the edge of `i64`; see [`Cell::checked_neighbor`].
    #[inline]
    pub fn neighbor(&self, direction: Direction) -> Self {
        *self + direction.offset()
    }

    /// The neighbor in `direction`, or `None` if it is not representable.
    pub fn checked_neighbor(&self, direction: Direction) -> Option<Self> {
        let offset = direction.offset();
        Some(Self {
            q: self.q.checked_add(offset.q)?,
            r: self.r.checked_add(offset.r)?,
        })
    }

    /// All six neighbors, indexed by [`Direction::index`].
    pub fn neighbors(&self) -> [Self; 6] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    /// The direction leading from `self` to an adjacent `other`.
    pub fn direction_to(&self, other: &Self) -> Option<Direction> {
        let dq = other.q.checked_sub(self.q)?;
        let dr = other.r.checked_sub(self.r)?;
        Direction::from_offset(Self::new(dq, dr))
    }

    /// Whether `other` is one of the six neighbors.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.direction_to(other).is_some()
    }
}

impl Add for Cell {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
        }
    }
}

impl Sub for Cell {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            q: self.q - other.q,
            r: self.r - other.r,
        }
    }
}

impl Neg for Cell {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            q: -self.q,
            r: -self.r,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
