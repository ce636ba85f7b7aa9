//! Primary and secondary circuit algorithm (PASC) on a chain.
//!
//! The chain is the structure's amoebots in id order; consecutive members
//! must be adjacent and contracted. Every iteration lays two pins per chain
//! edge into a primary and a secondary circuit. Passive amoebots connect
//! straight through, active ones cross primary and secondary. The reference
//! beeps on its primary pins, and each amoebot reads one bit: whether the
//! beep arrived on its secondary pin, flipped if it is itself active. Active
//! amoebots that read a 1 turn passive.
//!
//! After the last iteration every amoebot holds the binary representation of
//! its chain distance from the reference, least significant bit first.

use amoebot_topology::Direction;
use tracing::{debug, info};

use crate::amoebot::{AmoebotId, PartitionLayout, PinRef};
use crate::error::{ConfigError, Result};
use crate::graph::PinGraph;
use crate::partition::CircuitPartition;
use crate::signal::propagate_beeps;
use crate::structure::Structure;

/// Pins per chain edge: one primary, one secondary.
pub const PINS_PER_EDGE: u8 = 2;

const PRIMARY: u8 = 0;
const SECONDARY: u8 = 1;

/// Bits read by one amoebot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PascIdentifier {
    pub amoebot: AmoebotId,
    /// Least significant bit first, one per iteration
    pub bits: Vec<bool>,
}

impl PascIdentifier {
    /// The decoded chain distance.
    pub fn distance(&self) -> u64 {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit)
            .map(|(i, _)| 1u64 << i)
            .sum()
    }

    /// Bits most significant first, e.g. `"101"`.
    pub fn bit_string(&self) -> String {
        if self.bits.is_empty() {
            return "0".to_string();
        }
        self.bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// What happened in one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PascRound {
    /// 1-based
    pub iteration: usize,
    /// Active members other than the reference when the round started
    pub active: usize,
    /// Chain members the beep passed through, one relay step each
    pub steps: usize,
    /// Bit read by each chain member, in chain order
    pub bits: Vec<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PascOutcome {
    pub reference: Option<AmoebotId>,
    pub iterations: usize,
    /// Relay steps summed over all rounds
    pub steps: usize,
    pub rounds: Vec<PascRound>,
    /// One entry per chain member, in chain order
    pub identifiers: Vec<PascIdentifier>,
}

/// Chain member with the edges towards and away from the reference.
#[derive(Debug, Clone, Copy)]
struct Link {
    inward: Option<Direction>,
    outward: Option<Direction>,
    active: bool,
}

fn chain_links(structure: &Structure, reference: usize) -> Result<Vec<Link>> {
    let amoebots = structure.amoebots();
    if let Some(expanded) = amoebots.iter().find(|a| a.is_expanded()) {
        return Err(ConfigError::ExpandedChainMember(expanded.id()).into());
    }
    let mut steps = Vec::with_capacity(amoebots.len().saturating_sub(1));
    for pair in amoebots.windows(2) {
        let forward = pair[0]
            .head()
            .direction_to(&pair[1].head())
            .ok_or(ConfigError::BrokenChain {
                from: pair[0].id(),
                to: pair[1].id(),
            })?;
        steps.push(forward);
    }

    // steps[i] points from member i to member i + 1
    let towards_next = |i: usize| steps.get(i).copied();
    let towards_prev = |i: usize| i.checked_sub(1).map(|j| steps[j].opposite());
    Ok((0..amoebots.len())
        .map(|i| {
            let (inward, outward) = if i > reference {
                (towards_prev(i), towards_next(i))
            } else if i < reference {
                (towards_next(i), towards_prev(i))
            } else {
                (towards_prev(i), towards_next(i))
            };
            Link {
                inward,
                outward,
                active: i != reference,
            }
        })
        .collect())
}

fn layout(link: &Link, reference: bool) -> PartitionLayout {
    let pin = |dir: Option<Direction>, index| dir.map(|d| PinRef::head(d, index));
    let crossed = link.active && !reference;
    let sets = [PRIMARY, SECONDARY]
        .into_iter()
        .map(|index| {
            let through = if crossed { PRIMARY + SECONDARY - index } else { index };
            pin(link.inward, index)
                .into_iter()
                .chain(pin(link.outward, through))
                .collect()
        })
        .collect();
    PartitionLayout::Sets(sets)
}

/// Run PASC over the id-ordered chain with `reference` at distance 0.
pub fn run(structure: &Structure, reference: AmoebotId) -> Result<PascOutcome> {
    let position = structure
        .amoebots()
        .iter()
        .position(|a| a.id() == reference)
        .ok_or(ConfigError::UnknownAmoebot(reference))?;
    let mut links = chain_links(structure, position)?;
    let mut identifiers: Vec<PascIdentifier> = structure
        .amoebots()
        .iter()
        .map(|a| PascIdentifier {
            amoebot: a.id(),
            bits: Vec::new(),
        })
        .collect();

    let mut rounds: Vec<PascRound> = Vec::new();
    while links.iter().any(|l| l.active) {
        let active = links.iter().filter(|l| l.active).count();
        let mut spec = structure.spec().clone();
        spec.pins_per_edge = PINS_PER_EDGE;
        for (slot, member) in spec.amoebots.iter_mut().enumerate() {
            member.layout = layout(&links[slot], slot == position);
        }
        let round = Structure::new(spec)?;
        let partition = CircuitPartition::compute(&round, &PinGraph::build(&round));

        let reference_link = links[position];
        let sources = [reference_link.inward, reference_link.outward]
            .into_iter()
            .flatten()
            .map(|d| round.pin_id(reference, PinRef::head(d, PRIMARY)))
            .collect::<Result<Vec<_>>>()?;
        let beeps = propagate_beeps(&partition, &sources)?;

        let mut bits = Vec::with_capacity(links.len());
        let mut steps = 0;
        for (slot, link) in links.iter_mut().enumerate() {
            if slot == position {
                bits.push(false);
                continue;
            }
            let heard = match link.inward {
                Some(d) => {
                    let secondary = round.pin_id(identifiers[slot].amoebot, PinRef::head(d, SECONDARY))?;
                    beeps.at_pin(secondary).copied().unwrap_or(false)
                }
                None => false,
            };
            let bit = heard != link.active;
            if link.active && bit {
                link.active = false;
            }
            bits.push(bit);
            steps += 1;
        }
        for (identifier, &bit) in identifiers.iter_mut().zip(&bits) {
            identifier.bits.push(bit);
        }

        let iteration = rounds.len() + 1;
        debug!(iteration, active, steps, "pasc iteration");
        rounds.push(PascRound {
            iteration,
            active,
            steps,
            bits,
        });
    }

    let steps = rounds.iter().map(|r| r.steps).sum();
    info!(%reference, iterations = rounds.len(), steps, members = identifiers.len(), "pasc finished");
    Ok(PascOutcome {
        reference: Some(reference),
        iterations: rounds.len(),
        steps,
        rounds,
        identifiers,
    })
}
