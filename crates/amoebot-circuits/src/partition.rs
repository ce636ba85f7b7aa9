//! Circuit partitioning: connected components of the pin graph.
//!
//! Components are found with union-find (path halving, union by size) over
//! every edge, both kinds treated alike. A second pass relabels roots in
//! global pin order, so circuit ids are canonical: circuit 0 contains pin 0,
//! and ids increase with the lowest pin of each circuit. Identical input
//! always yields identical ids.

use std::fmt;

use tracing::debug;

use crate::amoebot::AmoebotId;
use crate::graph::PinGraph;
use crate::structure::{PinId, Structure};

/// Canonical circuit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitId(pub u32);

impl CircuitId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Disjoint-set forest over dense indices.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl UnionFind {
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len as u32).collect(),
            size: vec![1; len],
        }
    }

    /// Root of the set containing `x`.
    ///
    /// Panics if `x` is not below the `len` given to [`UnionFind::new`];
    /// the same holds for both arguments of [`UnionFind::union`].
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] as usize != x {
            let grandparent = self.parent[self.parent[x] as usize];
            self.parent[x] = grandparent;
            x = grandparent as usize;
        }
        x
    }

    /// Merge the sets of `a` and `b`; false if already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra as u32;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Assignment of every pin to exactly one circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitPartition {
    circuit_of: Vec<CircuitId>,
    pins: Vec<Vec<PinId>>,
    amoebots: Vec<Vec<AmoebotId>>,
}

impl CircuitPartition {
    /// Partition the pins of `structure` along the edges of `graph`.
    pub fn compute(structure: &Structure, graph: &PinGraph) -> Self {
        let pin_count = graph.pin_count();
        let mut forest = UnionFind::new(pin_count);
        for edge in graph.edges() {
            forest.union(edge.a.index(), edge.b.index());
        }

        const UNASSIGNED: u32 = u32::MAX;
        let mut label = vec![UNASSIGNED; pin_count];
        let mut circuit_of = Vec::with_capacity(pin_count);
        let mut pins: Vec<Vec<PinId>> = Vec::new();
        for index in 0..pin_count {
            let root = forest.find(index);
            if label[root] == UNASSIGNED {
                label[root] = pins.len() as u32;
                pins.push(Vec::new());
            }
            let circuit = CircuitId(label[root]);
            circuit_of.push(circuit);
            pins[circuit.index()].push(PinId(index as u32));
        }

        let amoebots = pins
            .iter()
            .map(|members| {
                let mut ids: Vec<AmoebotId> = members
                    .iter()
                    .filter_map(|&p| structure.pin(p).map(|pin| pin.amoebot))
                    .collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            })
            .collect();

        debug!(pins = pin_count, circuits = pins.len(), "circuits partitioned");
        Self {
            circuit_of,
            pins,
            amoebots,
        }
    }

    /// Number of circuits.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn pin_count(&self) -> usize {
        self.circuit_of.len()
    }

    pub fn circuit_of(&self, pin: PinId) -> Option<CircuitId> {
        self.circuit_of.get(pin.index()).copied()
    }

    /// Member pins of `circuit`, ascending.
    pub fn pins(&self, circuit: CircuitId) -> &[PinId] {
        self.pins.get(circuit.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Amoebots owning at least one pin of `circuit`, ascending.
    pub fn amoebots(&self, circuit: CircuitId) -> &[AmoebotId] {
        self.amoebots.get(circuit.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Circuits touching amoebot `id`, ascending.
    pub fn circuits_of(&self, structure: &Structure, id: AmoebotId) -> Vec<CircuitId> {
        let Some(amoebot) = structure.amoebot(id) else {
            return Vec::new();
        };
        let mut circuits: Vec<CircuitId> = amoebot
            .partition_sets()
            .iter()
            .filter_map(|set| self.circuit_of(set[0]))
            .collect();
        circuits.sort_unstable();
        circuits.dedup();
        circuits
    }

    /// All circuit ids in order.
    pub fn ids(&self) -> impl Iterator<Item = CircuitId> {
        (0..self.pins.len() as u32).map(CircuitId)
    }

    /// Circuits with their member pins.
    pub fn iter(&self) -> impl Iterator<Item = (CircuitId, &[PinId])> {
        self.pins
            .iter()
            .enumerate()
            .map(|(i, members)| (CircuitId(i as u32), members.as_slice()))
    }
}
