//! Signal propagation over a circuit partition.
//!
//! A signal injected at any pin is observed at every pin of the same circuit
//! within the round. Beeps combine by logical OR. Numeric values must agree
//! within a circuit: the model does not arbitrate between distinct values, so
//! two of them in one circuit is a [`Error::SignalConflict`].

use std::collections::{BTreeMap, BTreeSet};

use crate::amoebot::AmoebotId;
use crate::error::{ConfigError, Error, Result};
use crate::partition::{CircuitId, CircuitPartition};
use crate::structure::{PinId, Structure};

/// Observed value per circuit after one propagation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation<'a, T> {
    partition: &'a CircuitPartition,
    values: Vec<T>,
}

impl<'a, T: Clone> Propagation<'a, T> {
    /// Values indexed by circuit id.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn at_circuit(&self, circuit: CircuitId) -> Option<&T> {
        self.values.get(circuit.index())
    }

    pub fn at_pin(&self, pin: PinId) -> Option<&T> {
        self.partition
            .circuit_of(pin)
            .and_then(|c| self.at_circuit(c))
    }

    /// What amoebot `id` observes on each circuit it touches.
    pub fn at_amoebot(&self, structure: &Structure, id: AmoebotId) -> Vec<(CircuitId, T)> {
        self.partition
            .circuits_of(structure, id)
            .into_iter()
            .filter_map(|c| self.at_circuit(c).map(|v| (c, v.clone())))
            .collect()
    }
}

impl Propagation<'_, bool> {
    /// Whether any circuit touching amoebot `id` carries a beep.
    pub fn heard_by(&self, structure: &Structure, id: AmoebotId) -> bool {
        self.at_amoebot(structure, id).iter().any(|&(_, beep)| beep)
    }

    pub fn beeping_circuits(&self) -> Vec<CircuitId> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &beep)| beep)
            .map(|(i, _)| CircuitId(i as u32))
            .collect()
    }
}

fn circuit_for(partition: &CircuitPartition, pin: PinId) -> Result<CircuitId> {
    Ok(partition.circuit_of(pin).ok_or(ConfigError::UnknownPin(pin))?)
}

/// Beep at `sources`; every circuit containing a source beeps.
pub fn propagate_beeps<'a>(
    partition: &'a CircuitPartition,
    sources: &[PinId],
) -> Result<Propagation<'a, bool>> {
    let mut values = vec![false; partition.len()];
    for &pin in sources {
        values[circuit_for(partition, pin)?.index()] = true;
    }
    Ok(Propagation { partition, values })
}

/// Inject numeric values; circuits without a source observe `None`.
pub fn propagate_values<'a>(
    partition: &'a CircuitPartition,
    sources: &[(PinId, i64)],
) -> Result<Propagation<'a, Option<i64>>> {
    let mut values: Vec<Option<i64>> = vec![None; partition.len()];
    let mut conflicts: BTreeMap<CircuitId, BTreeSet<i64>> = BTreeMap::new();

    for &(pin, value) in sources {
        let circuit = circuit_for(partition, pin)?;
        match values[circuit.index()] {
            None => values[circuit.index()] = Some(value),
            Some(existing) if existing == value => {}
            Some(existing) => {
                conflicts
                    .entry(circuit)
                    .or_insert_with(|| BTreeSet::from([existing]))
                    .insert(value);
            }
        }
    }

    if let Some((circuit, values)) = conflicts.into_iter().next() {
        return Err(Error::SignalConflict {
            circuit,
            values: values.into_iter().collect(),
        });
    }
    Ok(Propagation { partition, values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amoebot::{PartitionLayout, PinRef};
    use crate::graph::PinGraph;
    use crate::structure::StructureBuilder;
    use amoebot_topology::{Cell, Direction};

    fn row(n: u32) -> StructureBuilder {
        (0..n).fold(StructureBuilder::new(), |b, i| b.contracted(i, Cell::new(i as i64, 0)))
    }

    fn setup(builder: StructureBuilder) -> (Structure, CircuitPartition) {
        let s = builder.build().unwrap();
        let p = CircuitPartition::compute(&s, &PinGraph::build(&s));
        (s, p)
    }

    #[test]
    fn beep_reaches_whole_circuit() {
        let (s, p) = setup(row(4).layout(1, PartitionLayout::Joined).layout(2, PartitionLayout::Joined));
        let source = s.pin_id(AmoebotId(0), PinRef::head(Direction::E, 0)).unwrap();
        let beeps = propagate_beeps(&p, &[source]).unwrap();
        for i in 0..s.pin_count() {
            assert_eq!(beeps.at_pin(PinId(i as u32)), Some(&true));
        }
        for id in 0..4 {
            assert!(beeps.heard_by(&s, AmoebotId(id)));
        }
    }

    #[test]
    fn beep_stays_in_its_circuit() {
        let (s, p) = setup(row(3));
        let source = s.pin_id(AmoebotId(0), PinRef::head(Direction::E, 0)).unwrap();
        let beeps = propagate_beeps(&p, &[source]).unwrap();
        assert_eq!(beeps.beeping_circuits(), vec![CircuitId(0)]);
        assert!(beeps.heard_by(&s, AmoebotId(1)));
        assert!(!beeps.heard_by(&s, AmoebotId(2)));

        let middle = beeps.at_amoebot(&s, AmoebotId(1));
        assert_eq!(middle, vec![(CircuitId(0), true), (CircuitId(1), false)]);
    }

    #[test]
    fn no_sources_no_beep() {
        let (_, p) = setup(row(3));
        let beeps = propagate_beeps(&p, &[]).unwrap();
        assert!(beeps.values().iter().all(|&b| !b));
    }

    #[test]
    fn equal_values_do_not_conflict() {
        let (s, p) = setup(row(2));
        let a = s.pin_id(AmoebotId(0), PinRef::head(Direction::E, 0)).unwrap();
        let b = s.pin_id(AmoebotId(1), PinRef::head(Direction::W, 0)).unwrap();
        let values = propagate_values(&p, &[(a, 7), (b, 7), (a, 7)]).unwrap();
        assert_eq!(values.at_pin(b), Some(&Some(7)));
    }

    #[test]
    fn distinct_values_conflict() {
        let (s, p) = setup(row(3));
        let a = s.pin_id(AmoebotId(1), PinRef::head(Direction::E, 0)).unwrap();
        let b = s.pin_id(AmoebotId(2), PinRef::head(Direction::W, 0)).unwrap();
        let err = propagate_values(&p, &[(a, 3), (b, 1), (a, 2)]).unwrap_err();
        assert_eq!(
            err,
            Error::SignalConflict {
                circuit: CircuitId(1),
                values: vec![1, 2, 3],
            }
        );
    }

    #[test]
    fn values_absent_without_source() {
        let (s, p) = setup(row(3));
        let a = s.pin_id(AmoebotId(0), PinRef::head(Direction::E, 0)).unwrap();
        let values = propagate_values(&p, &[(a, -4)]).unwrap();
        assert_eq!(values.at_circuit(CircuitId(0)), Some(&Some(-4)));
        assert_eq!(values.at_circuit(CircuitId(1)), Some(&None));
    }

    #[test]
    fn unknown_source_pin_rejected() {
        let (_, p) = setup(row(2));
        let err = propagate_beeps(&p, &[PinId(99)]).unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnknownPin(PinId(99))));
    }
}
