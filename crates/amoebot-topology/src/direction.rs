//! Lattice directions and principal axes.
//!
//! Directions are enumerated 0..5 counter-clockwise starting at east. The
//! enumeration is fixed: pin addressing, port ordering and canonical circuit
//! ids all depend on it.

use std::fmt;
use std::str::FromStr;

use crate::Cell;

/// One of the six edge directions of a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    E,
    NE,
    NW,
    W,
    SW,
    SE,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Self; 6] = [Self::E, Self::NE, Self::NW, Self::W, Self::SW, Self::SE];

    const OFFSETS: [Cell; 6] = [
        Cell { q: 1, r: 0 },  // East
        Cell { q: 1, r: -1 }, // Northeast
        Cell { q: 0, r: -1 }, // Northwest
        Cell { q: -1, r: 0 }, // West
        Cell { q: -1, r: 1 }, // Southwest
        Cell { q: 0, r: 1 },  // Southeast
    ];

    /// Position in the enumeration (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction at `index` (taken modulo 6).
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Unit offset of this direction.
    #[inline]
    pub const fn offset(self) -> Cell {
        Self::OFFSETS[self as usize]
    }

    /// Direction whose offset is exactly `offset`, if any.
    pub fn from_offset(offset: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }

    /// The opposite direction.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self as usize + 3)
    }

    /// Rotate counter-clockwise by `steps` × 60°.
    #[inline]
    pub const fn rotate_ccw(self, steps: usize) -> Self {
        Self::from_index(self as usize + steps % 6)
    }

    /// The principal axis this direction lies on.
    #[inline]
    pub const fn axis(self) -> Axis {
        Axis::ALL[self as usize % 3]
    }

    /// Compass label, as accepted by [`FromStr`].
    pub const fn label(self) -> &'static str {
        match self {
            Self::E => "E",
            Self::NE => "NE",
            Self::NW => "NW",
            Self::W => "W",
            Self::SW => "SW",
            Self::SE => "SE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A direction label that is not one of `E NE NW W SW SE`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction {0:?} (expected one of E, NE, NW, W, SW, SE)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|d| d.label() == upper)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// The three principal axes of the triangular lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// 0°, through E and W
    EastWest,
    /// 60°, through NE and SW
    NorthEastSouthWest,
    /// 120°, through NW and SE
    NorthWestSouthEast,
}

impl Axis {
    /// All axes by increasing angle.
    pub const ALL: [Self; 3] = [Self::EastWest, Self::NorthEastSouthWest, Self::NorthWestSouthEast];

    /// Angle of the forward direction in degrees.
    pub const fn angle_degrees(self) -> u16 {
        match self {
            Self::EastWest => 0,
            Self::NorthEastSouthWest => 60,
            Self::NorthWestSouthEast => 120,
        }
    }

    /// The direction in which [`Axis::position`] increases.
    pub const fn forward(self) -> Direction {
        match self {
            Self::EastWest => Direction::E,
            Self::NorthEastSouthWest => Direction::NE,
            Self::NorthWestSouthEast => Direction::NW,
        }
    }

    /// Identifier of the lattice line through `cell` parallel to this axis.
    ///
    /// Constant along the line, distinct between parallel lines.
    pub const fn line_key(self, cell: Cell) -> i64 {
        match self {
            Self::EastWest => cell.r,
            Self::NorthEastSouthWest => cell.q + cell.r,
            Self::NorthWestSouthEast => cell.q,
        }
    }

    /// Coordinate of `cell` along its line; grows by one per forward step.
    pub const fn position(self, cell: Cell) -> i64 {
        match self {
            Self::EastWest => cell.q,
            Self::NorthEastSouthWest => cell.q,
            Self::NorthWestSouthEast => -cell.r,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.angle_degrees())
    }
}

/// Check if two cells are lattice neighbors.
pub fn are_adjacent(a: Cell, b: Cell) -> bool {
    a.is_adjacent(&b)
}

/// Count how many of a cell's 6 neighbors satisfy `is_occupied`.
pub fn count_occupied_neighbors<F>(cell: Cell, is_occupied: F) -> usize
where
    F: Fn(Cell) -> bool,
{
    cell.neighbors().iter().filter(|&&n| is_occupied(n)).count()
}
