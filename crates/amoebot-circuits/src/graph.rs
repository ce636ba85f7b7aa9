//! The pin graph: pins as nodes, two kinds of edges.
//!
//! - **Pairing** edges join the two pins facing each other across a lattice
//!   edge. They are fixed by geometry.
//! - **Linkage** edges join pins of one partition set inside an amoebot. A
//!   set of n pins contributes a spanning path of n - 1 edges, which keeps
//!   the graph linear in the number of pins.
//!
//! Adjacency is stored in compressed sparse row form indexed by [`PinId`].

use tracing::debug;

use crate::structure::{PinId, Structure};

/// Why two pins are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    /// Inter-amoebot: facing pins across a shared lattice edge
    Pairing,
    /// Intra-amoebot: pins in the same partition set
    Linkage,
}

/// An undirected pin-to-pin edge, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinEdge {
    pub a: PinId,
    pub b: PinId,
    pub kind: EdgeKind,
}

/// Dual-edge-type graph over all pins of a structure.
#[derive(Debug, Clone)]
pub struct PinGraph {
    edges: Vec<PinEdge>,
    offsets: Vec<u32>,
    adjacency: Vec<(PinId, EdgeKind)>,
}

impl PinGraph {
    /// Derive the pin graph of a validated structure.
    pub fn build(structure: &Structure) -> Self {
        let pin_count = structure.pin_count();
        let mut edges = Vec::with_capacity(pin_count);

        for index in 0..pin_count {
            let pin = PinId(index as u32);
            if let Some(partner) = structure.partner(pin) {
                if pin < partner {
                    edges.push(PinEdge {
                        a: pin,
                        b: partner,
                        kind: EdgeKind::Pairing,
                    });
                }
            }
        }

        for amoebot in structure.amoebots() {
            for set in amoebot.partition_sets() {
                edges.extend(set.windows(2).map(|w| PinEdge {
                    a: w[0],
                    b: w[1],
                    kind: EdgeKind::Linkage,
                }));
            }
        }

        let graph = Self::from_edges(pin_count, edges);
        debug!(
            pins = pin_count,
            pairing = graph.edge_count(EdgeKind::Pairing),
            linkage = graph.edge_count(EdgeKind::Linkage),
            "pin graph built"
        );
        graph
    }

    fn from_edges(pin_count: usize, edges: Vec<PinEdge>) -> Self {
        let mut degree = vec![0u32; pin_count + 1];
        for e in &edges {
            degree[e.a.index() + 1] += 1;
            degree[e.b.index() + 1] += 1;
        }
        for i in 1..degree.len() {
            degree[i] += degree[i - 1];
        }
        let offsets = degree;

        let mut cursor = offsets.clone();
        let mut adjacency = vec![(PinId(0), EdgeKind::Pairing); edges.len() * 2];
        for e in &edges {
            adjacency[cursor[e.a.index()] as usize] = (e.b, e.kind);
            cursor[e.a.index()] += 1;
            adjacency[cursor[e.b.index()] as usize] = (e.a, e.kind);
            cursor[e.b.index()] += 1;
        }

        Self {
            edges,
            offsets,
            adjacency,
        }
    }

    pub fn pin_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// All edges: pairings first, then linkages amoebot by amoebot.
    pub fn edges(&self) -> &[PinEdge] {
        &self.edges
    }

    pub fn edge_count(&self, kind: EdgeKind) -> usize {
        self.edges.iter().filter(|e| e.kind == kind).count()
    }

    /// Neighbors of `pin` with the kind of the connecting edge.
    pub fn neighbors(&self, pin: PinId) -> &[(PinId, EdgeKind)] {
        match (self.offsets.get(pin.index()), self.offsets.get(pin.index() + 1)) {
            (Some(&start), Some(&end)) => &self.adjacency[start as usize..end as usize],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amoebot::{AmoebotId, PartitionLayout, PinRef};
    use crate::structure::StructureBuilder;
    use amoebot_topology::{Cell, Direction};

    fn triangle() -> Structure {
        StructureBuilder::new()
            .contracted(0, Cell::new(0, 0))
            .contracted(1, Cell::new(1, 0))
            .contracted(2, Cell::new(0, 1))
            .pins_per_edge(2)
            .build()
            .unwrap()
    }

    #[test]
    fn one_pairing_per_matching_pin() {
        let s = triangle();
        let g = PinGraph::build(&s);
        // 3 shared edges × 2 pins
        assert_eq!(g.edge_count(EdgeKind::Pairing), 6);
        assert_eq!(g.edge_count(EdgeKind::Linkage), 0);
        for e in g.edges() {
            assert!(e.a < e.b);
            let (pa, pb) = (s.pin(e.a).unwrap(), s.pin(e.b).unwrap());
            assert_ne!(pa.amoebot, pb.amoebot);
            assert_eq!(pa.pin.index, pb.pin.index);
            assert_eq!(pa.pin.port.direction.opposite(), pb.pin.port.direction);
        }
    }

    #[test]
    fn partition_set_becomes_spanning_path() {
        let s = triangle()
            .reconfigure(AmoebotId(0), PartitionLayout::Joined)
            .unwrap();
        let g = PinGraph::build(&s);
        // Amoebot 0 has 4 pins (E and SE, 2 each) joined by 3 edges
        assert_eq!(g.edge_count(EdgeKind::Linkage), 3);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let s = triangle()
            .reconfigure(
                AmoebotId(1),
                PartitionLayout::Sets(vec![vec![PinRef::head(Direction::W, 0), PinRef::head(Direction::SW, 1)]]),
            )
            .unwrap();
        let g = PinGraph::build(&s);
        assert_eq!(g.pin_count(), s.pin_count());
        for i in 0..g.pin_count() {
            let pin = PinId(i as u32);
            for &(other, kind) in g.neighbors(pin) {
                assert!(g.neighbors(other).contains(&(pin, kind)));
            }
        }
        assert!(g.neighbors(PinId(999)).is_empty());
    }

    #[test]
    fn empty_structure_has_empty_graph() {
        let s = StructureBuilder::new().build().unwrap();
        let g = PinGraph::build(&s);
        assert_eq!(g.pin_count(), 0);
        assert!(g.edges().is_empty());
    }
}
