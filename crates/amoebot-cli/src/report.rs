//! Report assembly and rendering.

use std::fmt::Write as _;

use amoebot_circuits::analysis::{PascOutcome, StripeVerdict};
use amoebot_circuits::{AmoebotId, AnalysisRegistry, CircuitId, EdgeKind, Error, PinId, Snapshot, Verdict};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::loader::Model;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub amoebots: usize,
    pub pins: usize,
    pub pins_per_edge: u8,
    pub pairing_edges: usize,
    pub linkage_edges: usize,
    pub circuits: usize,
}

/// One circuit and what it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitEntry {
    pub id: CircuitId,
    pub pins: usize,
    pub amoebots: Vec<AmoebotId>,
    pub beep: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisEntry {
    pub name: String,
    pub verdict: Verdict,
}

/// Everything one run found out about a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub circuits: Vec<CircuitEntry>,
    pub analyses: Vec<AnalysisEntry>,
}

impl Report {
    /// Inject the model's signals and run `analyses` over `snapshot`.
    ///
    /// With `pasc_reference` set, `pasc` measures distances from that
    /// amoebot instead of the lowest id.
    pub fn build<S: AsRef<str>>(
        snapshot: &Snapshot,
        model: &Model,
        registry: &AnalysisRegistry,
        analyses: &[S],
        pasc_reference: Option<AmoebotId>,
    ) -> Result<Self> {
        let beep_sources = snapshot.resolve(&model.beeps)?;
        let value_pins: Vec<(AmoebotId, _)> = model.values.iter().map(|&(id, pin, _)| (id, pin)).collect();
        let value_sources: Vec<(PinId, i64)> = snapshot
            .resolve(&value_pins)?
            .into_iter()
            .zip(model.values.iter().map(|&(_, _, v)| v))
            .collect();

        let beeps = snapshot.beeps(&beep_sources)?;
        let values = snapshot.values(&value_sources)?;
        let verdicts = match pasc_reference {
            None => snapshot.analyze(registry, analyses)?,
            Some(reference) => analyze_with_reference(snapshot, registry, analyses, reference)?,
        };

        let partition = snapshot.partition();
        let structure = snapshot.structure();
        let circuits = partition
            .ids()
            .map(|id| CircuitEntry {
                id,
                pins: partition.pins(id).len(),
                amoebots: partition.amoebots(id).to_vec(),
                beep: beeps.at_circuit(id).copied().unwrap_or(false),
                value: values.at_circuit(id).copied().flatten(),
            })
            .collect();

        Ok(Self {
            summary: Summary {
                amoebots: structure.amoebot_count(),
                pins: structure.pin_count(),
                pins_per_edge: structure.pins_per_edge(),
                pairing_edges: snapshot.graph().edge_count(EdgeKind::Pairing),
                linkage_edges: snapshot.graph().edge_count(EdgeKind::Linkage),
                circuits: partition.len(),
            },
            circuits,
            analyses: verdicts
                .into_iter()
                .map(|(name, verdict)| AnalysisEntry { name, verdict })
                .collect(),
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Human-readable form.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        let s = &self.summary;
        writeln!(
            out,
            "{} amoebots, {} pins ({} per edge), {} circuits",
            s.amoebots, s.pins, s.pins_per_edge, s.circuits
        )?;
        writeln!(out, "edges: {} pairing, {} linkage", s.pairing_edges, s.linkage_edges)?;

        writeln!(out, "\ncircuits:")?;
        for c in &self.circuits {
            write!(out, "  {:>3}: {} pins, amoebots {}", c.id.0, c.pins, join(&c.amoebots))?;
            if c.beep {
                write!(out, ", beep")?;
            }
            if let Some(v) = c.value {
                write!(out, ", value {v}")?;
            }
            writeln!(out)?;
        }

        for entry in &self.analyses {
            writeln!(out, "\n{}:", entry.name)?;
            write_verdict(out, &entry.verdict)?;
        }
        Ok(())
    }
}

fn analyze_with_reference<S: AsRef<str>>(
    snapshot: &Snapshot,
    registry: &AnalysisRegistry,
    analyses: &[S],
    reference: AmoebotId,
) -> Result<Vec<(String, Verdict)>> {
    if let Some(unknown) = analyses.iter().find(|n| !registry.contains(n.as_ref())) {
        return Err(Error::UnknownAnalysis(unknown.as_ref().to_string()).into());
    }
    analyses
        .iter()
        .map(|name| -> Result<(String, Verdict)> {
            let name = name.as_ref();
            let verdict = match name {
                "pasc" => Verdict::Pasc(snapshot.pasc(reference)?),
                _ => registry.run(name, snapshot.structure(), snapshot.partition())?,
            };
            Ok((name.to_string(), verdict))
        })
        .collect()
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn write_stripe(out: &mut String, v: &StripeVerdict) -> std::fmt::Result {
    match (v.is_stripe, v.axis) {
        (true, Some(axis)) => writeln!(out, "  circuit {}: stripe along {axis}", v.circuit),
        (true, None) => writeln!(out, "  circuit {}: stripe (single cell)", v.circuit),
        (false, _) => writeln!(out, "  circuit {}: not a stripe", v.circuit),
    }
}

fn write_pasc(out: &mut String, outcome: &PascOutcome) -> std::fmt::Result {
    let Some(reference) = outcome.reference else {
        return writeln!(out, "  empty chain");
    };
    writeln!(
        out,
        "  reference {reference}, {} iterations, {} steps",
        outcome.iterations, outcome.steps
    )?;
    for round in &outcome.rounds {
        writeln!(
            out,
            "  round {}: {} active, {} steps",
            round.iteration, round.active, round.steps
        )?;
    }
    for id in &outcome.identifiers {
        writeln!(out, "  amoebot {}: {} = {}", id.amoebot, id.bit_string(), id.distance())?;
    }
    Ok(())
}

fn write_verdict(out: &mut String, verdict: &Verdict) -> std::fmt::Result {
    match verdict {
        Verdict::Stripes(verdicts) => verdicts.iter().try_for_each(|v| write_stripe(out, v)),
        Verdict::Lines(lines) => lines.iter().try_for_each(|l| {
            writeln!(
                out,
                "  {} line {}: amoebots {}{}",
                l.axis,
                l.key,
                join(&l.amoebots),
                if l.contiguous { "" } else { " (gap)" }
            )
        }),
        Verdict::Maxima(maxima) => maxima.iter().try_for_each(|m| {
            writeln!(
                out,
                "  {}: amoebot {} (value {}, {} lines, {} rounds)",
                m.direction, m.amoebot, m.value, m.lines, m.rounds
            )
        }),
        Verdict::Connectivity(c) => writeln!(
            out,
            "  {} ({} component{})",
            if c.connected { "connected" } else { "disconnected" },
            c.components,
            if c.components == 1 { "" } else { "s" }
        ),
        Verdict::Pasc(outcome) => write_pasc(out, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_model;

    fn report(text: &str, analyses: &[&str]) -> Result<Report> {
        let model = parse_model(text, 1)?;
        let snapshot = Snapshot::build(model.spec.clone())?;
        Report::build(&snapshot, &model, &AnalysisRegistry::default(), analyses, None)
    }

    const ROW: &str = "0,0,0\n1,1,0\n2,2,0\nlink 1 *\nbeep 0 E.0\nvalue 2 W.0 5\n";

    #[test]
    fn summary_and_circuits() {
        let r = report(ROW, &[]).unwrap();
        assert_eq!(
            r.summary,
            Summary {
                amoebots: 3,
                pins: 4,
                pins_per_edge: 1,
                pairing_edges: 2,
                linkage_edges: 1,
                circuits: 1,
            }
        );
        assert_eq!(r.circuits.len(), 1);
        assert!(r.circuits[0].beep);
        assert_eq!(r.circuits[0].value, Some(5));
        assert!(r.analyses.is_empty());
    }

    #[test]
    fn text_rendering_mentions_verdicts() {
        let text = report(ROW, &["stripe", "connectivity", "pasc"]).unwrap().to_text();
        assert!(text.contains("3 amoebots, 4 pins (1 per edge), 1 circuits"));
        assert!(text.contains("circuit 0: stripe along 0°"));
        assert!(text.contains("connected (1 component)"));
        assert!(text.contains("amoebot 2: 10 = 2"));
        assert!(text.contains("reference 0, 2 iterations, 4 steps"));
        assert!(text.contains("round 2: 1 active, 2 steps"));
    }

    #[test]
    fn pasc_reference_override() {
        let model = parse_model(ROW, 1).unwrap();
        let snapshot = Snapshot::build(model.spec.clone()).unwrap();
        let registry = AnalysisRegistry::default();
        let r = Report::build(&snapshot, &model, &registry, &["stripe", "pasc"], Some(AmoebotId(2))).unwrap();
        match &r.analyses[1].verdict {
            Verdict::Pasc(outcome) => {
                assert_eq!(outcome.reference, Some(AmoebotId(2)));
                let distances: Vec<u64> = outcome.identifiers.iter().map(|i| i.distance()).collect();
                assert_eq!(distances, vec![2, 1, 0]);
            }
            other => panic!("unexpected verdict {other:?}"),
        }
        assert!(matches!(r.analyses[0].verdict, Verdict::Stripes(_)));

        let err = Report::build(&snapshot, &model, &registry, &["pasc"], Some(AmoebotId(9))).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        let err = Report::build(&snapshot, &model, &registry, &["pasc", "spiral"], Some(AmoebotId(0))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn extreme_coordinates_are_an_invalid_configuration() {
        let model = parse_model("0,9223372036854775807,0\n1,0,0\n", 1).unwrap();
        let err: crate::error::ReportError = Snapshot::build(model.spec).unwrap_err().into();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("outside the supported coordinate range"));
    }

    #[test]
    fn json_rendering_is_tagged() {
        let r = report(ROW, &["connectivity"]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&r.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["summary"]["circuits"], 1);
        assert_eq!(json["circuits"][0]["value"], 5);
        assert_eq!(json["analyses"][0]["name"], "connectivity");
        assert_eq!(json["analyses"][0]["verdict"]["kind"], "connectivity");
        assert_eq!(json["analyses"][0]["verdict"]["result"]["connected"], true);
    }

    #[test]
    fn conflicting_values_fail() {
        let text = "0,0,0\n1,1,0\nvalue 0 E.0 1\nvalue 1 W.0 2\n";
        let err = report(text, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn inactive_beep_pin_fails() {
        let err = report("0,0,0\n1,1,0\nbeep 0 W.0\n", &[]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
