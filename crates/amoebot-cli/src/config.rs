//! Report configuration from the environment.

use std::fmt;
use std::str::FromStr;

use crate::error::LoadError;

pub const PINS_VAR: &str = "AMOEBOT_PINS_PER_EDGE";
pub const FORMAT_VAR: &str = "AMOEBOT_FORMAT";
pub const ANALYSES_VAR: &str = "AMOEBOT_ANALYSES";

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("expected text or json".to_string()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Configuration for one report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Pins per edge unless the model declares its own
    pub pins_per_edge: u8,

    /// Output format
    pub format: OutputFormat,

    /// Analyses to run when none are given on the command line
    pub analyses: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pins_per_edge: 1,
            format: OutputFormat::Text,
            analyses: vec!["stripe".to_string()],
        }
    }
}

impl ReportConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ReportConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let defaults = Self::default();

        let pins_per_edge = match lookup(PINS_VAR) {
            Some(value) => match value.trim().parse::<u8>() {
                Ok(pins) if pins > 0 => pins,
                _ => {
                    return Err(LoadError::Environment {
                        name: PINS_VAR,
                        value,
                        reason: "expected an integer from 1 to 255".to_string(),
                    })
                }
            },
            None => defaults.pins_per_edge,
        };

        let format = match lookup(FORMAT_VAR) {
            Some(value) => value.parse().map_err(|reason| LoadError::Environment {
                name: FORMAT_VAR,
                value,
                reason,
            })?,
            None => defaults.format,
        };

        let analyses = lookup(ANALYSES_VAR)
            .map(|s| split_list(&s))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.analyses);

        Ok(Self {
            pins_per_edge,
            format,
            analyses,
        })
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(ReportConfig::from_lookup(lookup(&[])).unwrap(), ReportConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = ReportConfig::from_lookup(lookup(&[
            (PINS_VAR, "3"),
            (FORMAT_VAR, "JSON"),
            (ANALYSES_VAR, "stripe, pasc,,lines"),
        ]))
        .unwrap();
        assert_eq!(config.pins_per_edge, 3);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.analyses, vec!["stripe", "pasc", "lines"]);
    }

    #[test]
    fn blank_analysis_list_falls_back() {
        let config = ReportConfig::from_lookup(lookup(&[(ANALYSES_VAR, " , ")])).unwrap();
        assert_eq!(config.analyses, vec!["stripe"]);
    }

    #[test]
    fn rejects_bad_values() {
        for (name, value) in [(PINS_VAR, "0"), (PINS_VAR, "many"), (FORMAT_VAR, "yaml")] {
            let err = ReportConfig::from_lookup(lookup(&[(name, value)])).unwrap_err();
            assert!(matches!(err, LoadError::Environment { name: n, .. } if n == name));
        }
    }
}
