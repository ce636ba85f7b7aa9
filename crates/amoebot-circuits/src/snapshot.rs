//! One configuration round: structure, pin graph and circuits together.

use tracing::debug;

use crate::amoebot::{AmoebotId, PartitionLayout, PinRef};
use crate::analysis::{run_pasc, AnalysisRegistry, PascOutcome, Verdict};
use crate::error::Result;
use crate::graph::{EdgeKind, PinGraph};
use crate::partition::CircuitPartition;
use crate::signal::{propagate_beeps, propagate_values, Propagation};
use crate::structure::{PinId, Structure, StructureSpec};

/// An immutable structure with its circuits computed.
///
/// Reconfiguration never mutates a snapshot; it yields the next one.
#[derive(Debug, Clone)]
pub struct Snapshot {
    structure: Structure,
    graph: PinGraph,
    partition: CircuitPartition,
}

impl Snapshot {
    /// Validate `spec` and partition it.
    pub fn build(spec: StructureSpec) -> Result<Self> {
        Ok(Self::new(Structure::new(spec)?))
    }

    pub fn new(structure: Structure) -> Self {
        let graph = PinGraph::build(&structure);
        let partition = CircuitPartition::compute(&structure, &graph);
        debug!(
            pairings = graph.edge_count(EdgeKind::Pairing),
            linkages = graph.edge_count(EdgeKind::Linkage),
            circuits = partition.len(),
            "snapshot ready"
        );
        Self {
            structure,
            graph,
            partition,
        }
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn graph(&self) -> &PinGraph {
        &self.graph
    }

    pub fn partition(&self) -> &CircuitPartition {
        &self.partition
    }

    /// The next snapshot, with amoebot `id` using `layout`.
    pub fn reconfigure(&self, id: AmoebotId, layout: PartitionLayout) -> Result<Self> {
        Ok(Self::new(self.structure.reconfigure(id, layout)?))
    }

    /// Resolve caller-facing pin addresses to handles.
    pub fn resolve(&self, pins: &[(AmoebotId, PinRef)]) -> Result<Vec<PinId>> {
        pins.iter()
            .map(|&(id, pin)| self.structure.pin_id(id, pin))
            .collect()
    }

    pub fn beeps(&self, sources: &[PinId]) -> Result<Propagation<'_, bool>> {
        propagate_beeps(&self.partition, sources)
    }

    pub fn values(&self, sources: &[(PinId, i64)]) -> Result<Propagation<'_, Option<i64>>> {
        propagate_values(&self.partition, sources)
    }

    /// Run the named analyses in order.
    pub fn analyze<S: AsRef<str>>(&self, registry: &AnalysisRegistry, names: &[S]) -> Result<Vec<(String, Verdict)>> {
        registry.run_all(names, &self.structure, &self.partition)
    }

    /// PASC over the id-ordered chain, measured from `reference`.
    pub fn pasc(&self, reference: AmoebotId) -> Result<PascOutcome> {
        run_pasc(&self.structure, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, Error};
    use crate::partition::CircuitId;
    use crate::structure::StructureBuilder;
    use amoebot_topology::{Cell, Direction};

    fn row(n: u32) -> Snapshot {
        let spec = (0..n)
            .fold(StructureBuilder::new(), |b, i| b.contracted(i, Cell::new(i as i64, 0)))
            .spec()
            .clone();
        Snapshot::build(spec).unwrap()
    }

    #[test]
    fn reconfigure_yields_new_snapshot() {
        let first = row(3);
        let second = first.reconfigure(AmoebotId(1), PartitionLayout::Joined).unwrap();
        assert_eq!(first.partition().len(), 2);
        assert_eq!(second.partition().len(), 1);
        assert_eq!(first.structure().pin_count(), second.structure().pin_count());
    }

    #[test]
    fn reconfigure_unknown_amoebot_fails() {
        let err = row(2).reconfigure(AmoebotId(5), PartitionLayout::Joined).unwrap_err();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::UnknownAmoebot(AmoebotId(5))));
    }

    #[test]
    fn beep_through_resolved_pins() {
        let snapshot = row(3).reconfigure(AmoebotId(1), PartitionLayout::Joined).unwrap();
        let sources = snapshot
            .resolve(&[(AmoebotId(0), PinRef::head(Direction::E, 0))])
            .unwrap();
        let beeps = snapshot.beeps(&sources).unwrap();
        assert!(beeps.heard_by(snapshot.structure(), AmoebotId(2)));
        assert_eq!(beeps.beeping_circuits(), vec![CircuitId(0)]);
    }

    #[test]
    fn resolving_inactive_port_fails() {
        let err = row(2).resolve(&[(AmoebotId(0), PinRef::head(Direction::W, 0))]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::InactivePort { .. })
        ));
    }

    #[test]
    fn pasc_from_any_reference() {
        let outcome = row(4).pasc(AmoebotId(3)).unwrap();
        let distances: Vec<u64> = outcome.identifiers.iter().map(|i| i.distance()).collect();
        assert_eq!(distances, vec![3, 2, 1, 0]);
        assert_eq!(outcome.rounds.len(), outcome.iterations);
    }

    #[test]
    fn analyze_with_builtins() {
        let results = row(3).analyze(&AnalysisRegistry::default(), &["stripe"]).unwrap();
        match &results[0].1 {
            Verdict::Stripes(verdicts) => assert!(verdicts.iter().all(|v| v.is_stripe)),
            other => panic!("unexpected verdict {other:?}"),
        }
    }
}
