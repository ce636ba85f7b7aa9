//! Reconfigurable Circuits for Amoebot Structures
//!
//! Amoebots on the triangular lattice carry pins on every edge they share
//! with a neighbor. Each amoebot groups its own pins into partition sets; the
//! pins facing each other across an edge are paired. The transitive closure
//! of both relations splits all pins into **circuits**, and a signal placed
//! on any pin of a circuit is observed at all of its pins in the same round.
//!
//! # Pipeline
//!
//! 1. [`StructureBuilder`] validates geometry and pin addressing into an
//!    immutable [`Structure`].
//! 2. [`PinGraph::build`] derives pairing and linkage edges.
//! 3. [`CircuitPartition::compute`] finds circuits with canonical ids.
//! 4. [`propagate_beeps`] / [`propagate_values`] deliver signals.
//! 5. An [`AnalysisRegistry`] evaluates named structural predicates.
//!
//! [`Snapshot`] bundles steps 1 to 3 and is the usual entry point.
//!
//! # Determinism
//!
//! Pin handles follow a fixed global order (amoebot id, head before tail,
//! direction, pin index) and circuit ids follow the lowest pin they contain,
//! so the same structure always yields the same ids.

mod amoebot;
pub mod analysis;
mod error;
mod graph;
mod partition;
mod signal;
mod snapshot;
mod structure;

pub use amoebot::{AmoebotId, AmoebotSpec, End, ParsePinError, PartitionLayout, PinRef, Port};
pub use analysis::{AnalysisFn, AnalysisRegistry, Verdict};
pub use error::{ConfigError, Error, Result};
pub use graph::{EdgeKind, PinEdge, PinGraph};
pub use partition::{CircuitId, CircuitPartition, UnionFind};
pub use signal::{propagate_beeps, propagate_values, Propagation};
pub use snapshot::Snapshot;
pub use structure::{Amoebot, Pin, PinId, Structure, StructureBuilder, StructureSpec};
