//! Stripe detection.
//!
//! A set of cells is a stripe when it lies on one lattice line parallel to a
//! principal axis and covers that line without gaps between its ends. A
//! single cell is a degenerate stripe with no axis.

use std::collections::BTreeMap;

use amoebot_topology::{Axis, Cell};

use crate::amoebot::AmoebotId;
use crate::partition::{CircuitId, CircuitPartition};
use crate::structure::Structure;

/// Whether one circuit's amoebots form a straight contiguous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StripeVerdict {
    pub circuit: CircuitId,
    pub is_stripe: bool,
    /// Axis of the run; `None` for non-stripes and single cells
    pub axis: Option<Axis>,
}

/// One occupied lattice line parallel to an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LineSummary {
    pub axis: Axis,
    /// [`Axis::line_key`] shared by the line's cells
    pub key: i64,
    pub amoebots: Vec<AmoebotId>,
    /// No unoccupied cell between the first and last occupied one
    pub contiguous: bool,
}

fn consecutive(mut positions: Vec<i64>) -> bool {
    positions.sort_unstable();
    positions.dedup();
    positions.windows(2).all(|w| w[1] == w[0] + 1)
}

/// Classify a set of cells: `(is_stripe, axis)`.
pub fn classify_run(cells: &[Cell]) -> (bool, Option<Axis>) {
    let mut distinct = cells.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    match distinct.as_slice() {
        [] => (false, None),
        [_] => (true, None),
        [first, rest @ ..] => {
            let found = Axis::ALL.into_iter().find(|&axis| {
                let key = axis.line_key(*first);
                rest.iter().all(|&c| axis.line_key(c) == key)
                    && consecutive(distinct.iter().map(|&c| axis.position(c)).collect())
            });
            (found.is_some(), found)
        }
    }
}

fn circuit_cells(structure: &Structure, partition: &CircuitPartition, circuit: CircuitId) -> Vec<Cell> {
    partition
        .amoebots(circuit)
        .iter()
        .filter_map(|&id| structure.amoebot(id))
        .flat_map(|a| a.occupied_cells())
        .collect()
}

/// Stripe verdict for every circuit, by circuit id.
pub fn stripes(structure: &Structure, partition: &CircuitPartition) -> Vec<StripeVerdict> {
    partition
        .ids()
        .map(|circuit| {
            let (is_stripe, axis) = classify_run(&circuit_cells(structure, partition, circuit));
            StripeVerdict {
                circuit,
                is_stripe,
                axis,
            }
        })
        .collect()
}

/// Occupied lines for every axis, ordered by axis then key.
pub fn lines(structure: &Structure) -> Vec<LineSummary> {
    let mut summaries = Vec::new();
    for axis in Axis::ALL {
        let mut by_key: BTreeMap<i64, (Vec<AmoebotId>, Vec<i64>)> = BTreeMap::new();
        for amoebot in structure.amoebots() {
            for cell in amoebot.occupied_cells() {
                let entry = by_key.entry(axis.line_key(cell)).or_default();
                entry.0.push(amoebot.id());
                entry.1.push(axis.position(cell));
            }
        }
        summaries.extend(by_key.into_iter().map(|(key, (mut amoebots, positions))| {
            amoebots.sort_unstable();
            amoebots.dedup();
            LineSummary {
                axis,
                key,
                amoebots,
                contiguous: consecutive(positions),
            }
        }));
    }
    summaries
}
