//! Error types for amoebot-circuits.

use amoebot_topology::Cell;
use thiserror::Error;

use crate::amoebot::{AmoebotId, PinRef, Port};
use crate::partition::CircuitId;
use crate::structure::PinId;

/// Result type for circuit engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The structure is malformed or geometrically inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// Distinct numeric values were injected into one circuit.
    #[error("signal conflict in circuit {circuit}: values {values:?}")]
    SignalConflict { circuit: CircuitId, values: Vec<i64> },

    /// No analysis is registered under this name.
    #[error("unknown analysis {0:?}")]
    UnknownAnalysis(String),
}

/// The specific inconsistency behind [`Error::InvalidConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Pins per edge must be at least one.
    #[error("pins per edge must be at least 1")]
    NoPins,

    /// Two amoebots share an id.
    #[error("amoebot {0} declared twice")]
    DuplicateAmoebot(AmoebotId),

    /// A cell coordinate beyond [`Cell::LIMIT`].
    #[error("amoebot {amoebot}: cell {cell} lies outside the supported coordinate range")]
    CoordinateOutOfRange { amoebot: AmoebotId, cell: Cell },

    /// An expanded amoebot's tail is not adjacent to its head.
    #[error("amoebot {amoebot}: tail {tail} is not adjacent to head {head}")]
    DetachedTail {
        amoebot: AmoebotId,
        head: Cell,
        tail: Cell,
    },

    /// Two amoebots claim the same cell.
    #[error("cell {cell} claimed by amoebot {first} and amoebot {second}")]
    CellConflict {
        cell: Cell,
        first: AmoebotId,
        second: AmoebotId,
    },

    /// A reference to an amoebot id that does not exist.
    #[error("unknown amoebot {0}")]
    UnknownAmoebot(AmoebotId),

    /// A claimed neighbor relation between non-adjacent amoebots.
    #[error("amoebots {a} and {b} claim to be neighbors but are not adjacent")]
    UnsupportedBond { a: AmoebotId, b: AmoebotId },

    /// A pin index at or beyond the declared pin count.
    #[error("amoebot {amoebot}: pin {pin} out of range ({pins_per_edge} pins per edge)")]
    PinOutOfRange {
        amoebot: AmoebotId,
        pin: PinRef,
        pins_per_edge: u8,
    },

    /// A pin on a port with no neighboring amoebot across it.
    #[error("amoebot {amoebot}: port {port} has no neighbor")]
    InactivePort { amoebot: AmoebotId, port: Port },

    /// A pin listed in more than one partition set.
    #[error("amoebot {amoebot}: pin {pin} appears in more than one partition set")]
    PinReused { amoebot: AmoebotId, pin: PinRef },

    /// A pin handle outside the structure.
    #[error("unknown pin {0}")]
    UnknownPin(PinId),

    /// Consecutive chain members are not adjacent contracted amoebots.
    #[error("chain broken between amoebot {from} and amoebot {to}")]
    BrokenChain { from: AmoebotId, to: AmoebotId },

    /// Chain algorithms run on contracted amoebots only.
    #[error("amoebot {0} is expanded; chain members must be contracted")]
    ExpandedChainMember(AmoebotId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offenders() {
        let err: Error = ConfigError::CellConflict {
            cell: Cell::new(1, 2),
            first: AmoebotId(3),
            second: AmoebotId(7),
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("(1, 2)"));
        assert!(msg.contains("3"));
        assert!(msg.contains("7"));

        let err = Error::SignalConflict {
            circuit: CircuitId(4),
            values: vec![1, 2],
        };
        assert_eq!(err.to_string(), "signal conflict in circuit 4: values [1, 2]");
    }
}
