//! Amoebots, their ports and pin addresses.
//!
//! An amoebot is contracted (one cell, the head) or expanded (head and tail
//! in adjacent cells). Every cell it occupies contributes one [`Port`] per
//! lattice direction, except the internal edge joining head and tail. Pins
//! sit on ports and are addressed by [`PinRef`]: `E.0` is pin 0 on the head's
//! east edge, `T:SW.1` is pin 1 on the tail's south-west edge.

use std::fmt;
use std::str::FromStr;

use amoebot_topology::{Cell, Direction};

/// Caller-chosen amoebot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmoebotId(pub u32);

impl fmt::Display for AmoebotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which occupied cell of an amoebot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum End {
    #[default]
    Head,
    Tail,
}

/// One incident lattice edge of an amoebot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    pub end: End,
    pub direction: Direction,
}

impl Port {
    /// A port on the head cell.
    pub const fn head(direction: Direction) -> Self {
        Self {
            end: End::Head,
            direction,
        }
    }

    /// A port on the tail cell.
    pub const fn tail(direction: Direction) -> Self {
        Self {
            end: End::Tail,
            direction,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            End::Head => write!(f, "{}", self.direction),
            End::Tail => write!(f, "T:{}", self.direction),
        }
    }
}

/// Address of a pin relative to its amoebot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinRef {
    pub port: Port,
    pub index: u8,
}

impl PinRef {
    pub const fn new(port: Port, index: u8) -> Self {
        Self { port, index }
    }

    /// Pin `index` on the head edge facing `direction`.
    pub const fn head(direction: Direction, index: u8) -> Self {
        Self::new(Port::head(direction), index)
    }

    /// Pin `index` on the tail edge facing `direction`.
    pub const fn tail(direction: Direction, index: u8) -> Self {
        Self::new(Port::tail(direction), index)
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.port, self.index)
    }
}

/// A pin token that does not match `[T:]DIR.INDEX`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed pin {0:?} (expected [T:]DIR.INDEX, e.g. E.0 or T:SW.1)")]
pub struct ParsePinError(pub String);

impl FromStr for PinRef {
    type Err = ParsePinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePinError(s.to_string());
        let token = s.trim();
        let (end, rest) = match token.split_once(':') {
            Some((prefix, rest)) if prefix.eq_ignore_ascii_case("t") => (End::Tail, rest),
            Some((prefix, rest)) if prefix.eq_ignore_ascii_case("h") => (End::Head, rest),
            Some(_) => return Err(malformed()),
            None => (End::Head, token),
        };
        let (dir, index) = rest.split_once('.').ok_or_else(malformed)?;
        let direction = dir.parse::<Direction>().map_err(|_| malformed())?;
        let index = index.parse::<u8>().map_err(|_| malformed())?;
        Ok(Self::new(Port { end, direction }, index))
    }
}

/// How an amoebot groups its pins into partition sets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PartitionLayout {
    /// Every pin is its own partition set.
    #[default]
    Isolated,
    /// All pins form one partition set.
    Joined,
    /// Explicit sets; pins left out become singleton sets.
    Sets(Vec<Vec<PinRef>>),
}

/// Input description of one amoebot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmoebotSpec {
    pub id: AmoebotId,
    pub head: Cell,
    pub tail: Option<Cell>,
    pub layout: PartitionLayout,
}

impl AmoebotSpec {
    /// A contracted amoebot at `cell` with isolated pins.
    pub fn contracted(id: u32, cell: Cell) -> Self {
        Self {
            id: AmoebotId(id),
            head: cell,
            tail: None,
            layout: PartitionLayout::Isolated,
        }
    }

    /// An expanded amoebot occupying `head` and `tail`.
    pub fn expanded(id: u32, head: Cell, tail: Cell) -> Self {
        Self {
            id: AmoebotId(id),
            head,
            tail: Some(tail),
            layout: PartitionLayout::Isolated,
        }
    }

    /// Replace the partition layout.
    pub fn with_layout(mut self, layout: PartitionLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Cells occupied, head first.
    pub fn cells(&self) -> impl Iterator<Item = (End, Cell)> + '_ {
        std::iter::once((End::Head, self.head)).chain(self.tail.map(|t| (End::Tail, t)))
    }

    pub fn is_expanded(&self) -> bool {
        self.tail.is_some()
    }
}
