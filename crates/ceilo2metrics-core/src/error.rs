//! Error types for the Ceilometer conversion pipeline

use crate::schema::{JsonPath, ValidationError};
use thiserror::Error;

/// Errors raised while unwrapping, validating or converting a test case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value did not satisfy one of the structural contracts
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The embedded `oslo.message` string is not valid JSON
    #[error("oslo.message is not valid JSON (line {line}, column {column}): {message}")]
    MalformedEnvelope {
        message: String,
        line: usize,
        column: usize,
    },

    /// A payload entry carried an empty `counter_name`
    #[error("counter_name at '{path}' must not be empty")]
    InvalidCounterName { path: JsonPath },

    /// The requested test case is not part of the fixture document
    #[error("Could not find test '{name}' in fixture")]
    TestCaseNotFound { name: String },

    /// The fixture document itself has an unusable shape
    #[error("Invalid fixture document: {message}")]
    InvalidFixture { message: String },
}

impl Error {
    pub(crate) fn malformed_envelope(err: &serde_json::Error) -> Self {
        Self::MalformedEnvelope {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    /// Error type string for diagnostics
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::MalformedEnvelope { .. } => "MalformedEnvelope",
            Self::InvalidCounterName { .. } => "InvalidCounterName",
            Self::TestCaseNotFound { .. } => "TestCaseNotFound",
            Self::InvalidFixture { .. } => "InvalidFixture",
        }
    }

    /// Instance path of the offending value, when the error has one
    pub fn path(&self) -> Option<&JsonPath> {
        match self {
            Self::Validation(err) => Some(&err.path),
            Self::InvalidCounterName { path } => Some(path),
            _ => None,
        }
    }

    /// Contract sub-path that rejected the value, for validation errors
    pub fn schema_path(&self) -> Option<&JsonPath> {
        match self {
            Self::Validation(err) => Some(&err.schema_path),
            _ => None,
        }
    }

    /// Re-root any carried instance path under `prefix`.
    pub(crate) fn prefixed(self, prefix: &JsonPath) -> Self {
        match self {
            Self::Validation(err) => Self::Validation(err.prefixed(prefix)),
            Self::InvalidCounterName { path } => Self::InvalidCounterName {
                path: path.prefixed(prefix),
            },
            other => other,
        }
    }
}

/// Result type alias for pipeline errors
pub type Result<T> = std::result::Result<T, Error>;
