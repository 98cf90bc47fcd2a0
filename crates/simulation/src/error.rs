//! Error taxonomy for job configuration and execution.

use producer::SinkError;
use std::error::Error;
use std::fmt;

/// A job specification that cannot be resolved into runnable parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is absent.
    Missing(&'static str),
    /// A field is present but unusable.
    Invalid {
        field: &'static str,
        message: String,
    },
    /// A job must carry exactly one of `end_date` and `data_size`.
    AmbiguousSpan,
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "missing required field '{}'", field),
            Self::Invalid { field, message } => {
                write!(f, "invalid field '{}': {}", field, message)
            }
            Self::AmbiguousSpan => {
                write!(f, "exactly one of 'end_date' and 'data_size' must be set")
            }
        }
    }
}

impl Error for ConfigError {}

/// Anything that can end a dataset run early.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Config(ConfigError),
    Sink(SinkError),
    Runtime(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {}", e),
            Self::Sink(e) => write!(f, "{}", e),
            Self::Runtime(msg) => write!(f, "runtime error: {}", msg),
        }
    }
}

impl Error for SimulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Sink(e) => Some(e),
            Self::Runtime(_) => None,
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SinkError> for SimulationError {
    fn from(e: SinkError) -> Self {
        Self::Sink(e)
    }
}
