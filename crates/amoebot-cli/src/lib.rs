//! Amoebot Report
//!
//! Loads an amoebot model file, builds its circuits, injects the signals it
//! declares and prints the requested analyses.
//!
//! Usage:
//!   amoebot-report <model-file> [analysis ...] [--reference <id>]
//!   amoebot-report --ascii <grid-file>
//!
//! Environment:
//!   AMOEBOT_PINS_PER_EDGE  pins per edge when the model has no `pins` line (default 1)
//!   AMOEBOT_FORMAT         text or json (default text)
//!   AMOEBOT_ANALYSES       comma separated analyses when none are given (default stripe)
//!   RUST_LOG               log filter (default amoebot=info)

mod config;
mod error;
mod loader;
mod report;

use std::path::PathBuf;

use amoebot_circuits::{AmoebotId, AnalysisRegistry, Snapshot};
use tracing::{info, warn};

pub use config::{OutputFormat, ReportConfig, ANALYSES_VAR, FORMAT_VAR, PINS_VAR};
pub use error::{LoadError, ReportError, Result};
pub use loader::{ascii_to_model, load_ascii, load_model, parse_model, Model};
pub use report::{AnalysisEntry, CircuitEntry, Report, Summary};

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report {
        model: PathBuf,
        analyses: Vec<String>,
        /// Reference amoebot for `pasc` instead of the lowest id
        pasc_reference: Option<AmoebotId>,
    },
    Ascii { grid: PathBuf },
    Help,
}

impl Command {
    /// Parse arguments, program name excluded.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            [] => Err(ReportError::Usage("missing model file".to_string())),
            ["-h" | "--help" | "help", ..] => Ok(Self::Help),
            ["--ascii", grid] => Ok(Self::Ascii { grid: PathBuf::from(grid) }),
            ["--ascii", ..] => Err(ReportError::Usage("--ascii takes exactly one grid file".to_string())),
            _ => Self::parse_report(&args),
        }
    }

    fn parse_report(args: &[&str]) -> Result<Self> {
        let mut model = None;
        let mut analyses = Vec::new();
        let mut pasc_reference = None;
        let mut rest = args.iter().copied();
        while let Some(arg) = rest.next() {
            match arg {
                "--reference" => {
                    let value = rest
                        .next()
                        .ok_or_else(|| ReportError::Usage("--reference takes an amoebot id".to_string()))?;
                    let id = value
                        .parse::<u32>()
                        .map_err(|_| ReportError::Usage(format!("invalid amoebot id {value:?}")))?;
                    pasc_reference = Some(AmoebotId(id));
                }
                flag if flag.starts_with('-') => {
                    return Err(ReportError::Usage(format!("unknown option {flag}")));
                }
                _ if model.is_none() => model = Some(PathBuf::from(arg)),
                _ => analyses.push(arg.to_string()),
            }
        }
        let model = model.ok_or_else(|| ReportError::Usage("missing model file".to_string()))?;
        Ok(Self::Report {
            model,
            analyses,
            pasc_reference,
        })
    }
}

pub fn usage() -> &'static str {
    "amoebot-report - Circuit analyses for amoebot structures

Usage:
  amoebot-report <model-file> [analysis ...]   Analyze a model
  amoebot-report --ascii <grid-file>           Convert an ASCII grid to a model

Options:
  --reference <id>  Reference amoebot for pasc (default: lowest id)

Analyses: connectivity, global_maxima, lines, pasc, stripe

Environment:
  AMOEBOT_PINS_PER_EDGE  Pins per edge without a `pins` line (default: 1)
  AMOEBOT_FORMAT         text or json (default: text)
  AMOEBOT_ANALYSES       Comma separated default analyses (default: stripe)"
}

/// Run a command and return what should go to stdout.
pub fn execute(command: &Command, config: &ReportConfig) -> Result<String> {
    match command {
        Command::Help => Ok(usage().to_string()),
        Command::Ascii { grid } => Ok(load_ascii(grid)?),
        Command::Report {
            model,
            analyses,
            pasc_reference,
        } => {
            let analyses = if analyses.is_empty() {
                &config.analyses
            } else {
                analyses
            };
            if let Some(reference) = pasc_reference {
                if !analyses.iter().any(|a| a == "pasc") {
                    warn!(%reference, "--reference given but pasc not requested");
                }
            }
            let model = load_model(model, config.pins_per_edge)?;
            let snapshot = Snapshot::build(model.spec.clone())?;
            let report = Report::build(
                &snapshot,
                &model,
                &AnalysisRegistry::default(),
                analyses,
                *pasc_reference,
            )?;
            info!(
                amoebots = report.summary.amoebots,
                circuits = report.summary.circuits,
                analyses = report.analyses.len(),
                "report complete"
            );
            report.render(config.format)
        }
    }
}
