//! Global maxima by line tournament.
//!
//! For a direction `d`, every lattice line parallel to `d`'s axis elects its
//! local extreme amoebot (highest projection onto `d`). The local winners
//! then meet in pairwise rounds until one remains.

use std::collections::BTreeMap;

use amoebot_topology::{Cell, Direction};

use crate::amoebot::AmoebotId;
use crate::structure::Structure;

/// Winner of the tournament for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectionalMaximum {
    pub direction: Direction,
    pub amoebot: AmoebotId,
    /// Projection of the winner onto `direction`
    pub value: i64,
    /// Occupied lines parallel to the direction's axis
    pub lines: usize,
    /// Tournament rounds until one candidate remained
    pub rounds: usize,
}

/// Projection of `cell` onto `direction` in cube coordinates.
pub fn projection(cell: Cell, direction: Direction) -> i64 {
    let d = direction.offset();
    cell.q * d.q + cell.r * d.r + cell.s() * d.s()
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    amoebot: AmoebotId,
    value: i64,
}

/// Elect the local extreme of every line, in ascending line order.
fn local_maxima(structure: &Structure, direction: Direction) -> Vec<Candidate> {
    let axis = direction.axis();
    let mut by_line: BTreeMap<i64, Candidate> = BTreeMap::new();
    // Amoebots come in id order, so strict comparison keeps the lowest id on ties
    for amoebot in structure.amoebots() {
        for cell in amoebot.occupied_cells() {
            let candidate = Candidate {
                amoebot: amoebot.id(),
                value: projection(cell, direction),
            };
            by_line
                .entry(axis.line_key(cell))
                .and_modify(|best| {
                    if candidate.value > best.value {
                        *best = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }
    by_line.into_values().collect()
}

/// Pairwise elimination. The left candidate wins ties; an odd one out advances.
fn tournament(mut candidates: Vec<Candidate>) -> Option<(Candidate, usize)> {
    let mut rounds = 0;
    while candidates.len() > 1 {
        candidates = candidates
            .chunks(2)
            .filter_map(|pair| {
                pair.iter()
                    .copied()
                    .reduce(|left, right| if right.value > left.value { right } else { left })
            })
            .collect();
        rounds += 1;
    }
    candidates.pop().map(|winner| (winner, rounds))
}

/// Extreme amoebot for each of the six directions; empty for an empty structure.
pub fn global_maxima(structure: &Structure) -> Vec<DirectionalMaximum> {
    Direction::ALL
        .into_iter()
        .filter_map(|direction| {
            let candidates = local_maxima(structure, direction);
            let lines = candidates.len();
            tournament(candidates).map(|(winner, rounds)| DirectionalMaximum {
                direction,
                amoebot: winner.amoebot,
                value: winner.value,
                lines,
                rounds,
            })
        })
        .collect()
}
