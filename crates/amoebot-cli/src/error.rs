//! Error types for the report tool.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Problems reading a model, a grid or the environment.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a model or grid file
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Environment variable with an unusable value
    #[error("invalid {name}={value:?}: {reason}")]
    Environment {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}

/// Everything that ends a report run early.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Engine(#[from] amoebot_circuits::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bad command line
    #[error("{0}")]
    Usage(String),
}

impl ReportError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        use amoebot_circuits::Error as Engine;
        match self {
            Self::Load(_) | Self::Serialization(_) => 1,
            Self::Engine(Engine::InvalidConfiguration(_)) => 1,
            Self::Engine(Engine::UnknownAnalysis(_)) => 2,
            Self::Engine(Engine::SignalConflict { .. }) => 3,
            Self::Usage(_) => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amoebot_circuits::{CircuitId, ConfigError};

    #[test]
    fn exit_codes() {
        let conflict: ReportError = amoebot_circuits::Error::SignalConflict {
            circuit: CircuitId(0),
            values: vec![1, 2],
        }
        .into();
        assert_eq!(conflict.exit_code(), 3);
        let unknown: ReportError = amoebot_circuits::Error::UnknownAnalysis("x".into()).into();
        assert_eq!(unknown.exit_code(), 2);
        let invalid: ReportError = amoebot_circuits::Error::from(ConfigError::NoPins).into();
        assert_eq!(invalid.exit_code(), 1);
        assert_eq!(ReportError::from(LoadError::syntax(3, "bad")).exit_code(), 1);
        assert_eq!(ReportError::Usage("no model".into()).exit_code(), 64);
    }

    #[test]
    fn syntax_errors_carry_line() {
        assert_eq!(LoadError::syntax(7, "expected id,q,r").to_string(), "line 7: expected id,q,r");
    }
}
