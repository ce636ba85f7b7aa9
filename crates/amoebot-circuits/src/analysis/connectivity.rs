//! Connectivity of the amoebot adjacency graph.

use std::collections::{HashSet, VecDeque};

use crate::structure::Structure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Connectivity {
    /// At most one component
    pub connected: bool,
    pub components: usize,
}

/// Count components by breadth-first search over shared lattice edges.
pub fn connectivity(structure: &Structure) -> Connectivity {
    let mut seen = HashSet::with_capacity(structure.amoebot_count());
    let mut components = 0;

    for start in structure.amoebots() {
        if !seen.insert(start.id()) {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::from([start.id()]);
        while let Some(id) = queue.pop_front() {
            for next in structure.adjacent_amoebots(id).unwrap_or_default() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    Connectivity {
        connected: components <= 1,
        components,
    }
}
