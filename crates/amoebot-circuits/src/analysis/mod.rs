//! Structural analyses over a partitioned structure.
//!
//! An analysis is a plain function from a [`Structure`] and its
//! [`CircuitPartition`] to a [`Verdict`]. Analyses are looked up by name in an
//! [`AnalysisRegistry`]; adding one never touches the partitioner.
//!
//! Built-in analyses:
//!
//! | name            | verdict                                              |
//! |-----------------|------------------------------------------------------|
//! | `stripe`        | per circuit: contiguous straight run, and its axis   |
//! | `lines`         | per axis: occupied lattice lines and their gaps      |
//! | `global_maxima` | per direction: extreme amoebot via line tournament   |
//! | `connectivity`  | whether the amoebots form one connected component    |
//! | `pasc`          | chain distances from the lowest id via PASC          |

mod connectivity;
mod maxima;
pub mod pasc;
mod stripe;

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{Error, Result};
use crate::partition::CircuitPartition;
use crate::structure::Structure;

pub use connectivity::{connectivity, Connectivity};
pub use maxima::{global_maxima, projection, DirectionalMaximum};
pub use pasc::{run as run_pasc, PascIdentifier, PascOutcome, PascRound};
pub use stripe::{classify_run, lines, stripes, LineSummary, StripeVerdict};

/// Result of one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "result", rename_all = "snake_case"))]
pub enum Verdict {
    Stripes(Vec<StripeVerdict>),
    Lines(Vec<LineSummary>),
    Maxima(Vec<DirectionalMaximum>),
    Connectivity(Connectivity),
    Pasc(PascOutcome),
}

/// Signature every analysis implements.
pub type AnalysisFn = fn(&Structure, &CircuitPartition) -> Result<Verdict>;

/// Named analyses.
#[derive(Clone)]
pub struct AnalysisRegistry {
    analyses: BTreeMap<String, AnalysisFn>,
}

impl AnalysisRegistry {
    /// A registry with no analyses.
    pub fn empty() -> Self {
        Self {
            analyses: BTreeMap::new(),
        }
    }

    /// A registry with the built-in analyses.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("stripe", |s, p| Ok(Verdict::Stripes(stripes(s, p))));
        registry.register("lines", |s, _| Ok(Verdict::Lines(lines(s))));
        registry.register("global_maxima", |s, _| Ok(Verdict::Maxima(global_maxima(s))));
        registry.register("connectivity", |s, _| Ok(Verdict::Connectivity(connectivity(s))));
        registry.register("pasc", |s, _| {
            let outcome = match s.amoebots().first() {
                Some(reference) => run_pasc(s, reference.id())?,
                None => PascOutcome::default(),
            };
            Ok(Verdict::Pasc(outcome))
        });
        registry
    }

    /// Add or replace an analysis, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, analysis: AnalysisFn) -> Option<AnalysisFn> {
        self.analyses.insert(name.into(), analysis)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.analyses.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.analyses.keys().map(String::as_str)
    }

    /// Run a single analysis by name.
    pub fn run(&self, name: &str, structure: &Structure, partition: &CircuitPartition) -> Result<Verdict> {
        let analysis = self
            .analyses
            .get(name)
            .ok_or_else(|| Error::UnknownAnalysis(name.to_string()))?;
        debug!(analysis = name, "running analysis");
        analysis(structure, partition)
    }

    /// Run several analyses in order.
    ///
    /// Every name is checked first, so an unknown one fails before any
    /// analysis runs.
    pub fn run_all<S: AsRef<str>>(
        &self,
        names: &[S],
        structure: &Structure,
        partition: &CircuitPartition,
    ) -> Result<Vec<(String, Verdict)>> {
        if let Some(unknown) = names.iter().find(|n| !self.contains(n.as_ref())) {
            return Err(Error::UnknownAnalysis(unknown.as_ref().to_string()));
        }
        names
            .iter()
            .map(|n| {
                let name = n.as_ref();
                self.run(name, structure, partition).map(|v| (name.to_string(), v))
            })
            .collect()
    }
}

impl Default for AnalysisRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for AnalysisRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
