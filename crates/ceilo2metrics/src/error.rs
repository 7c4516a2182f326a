use thiserror::Error;

/// Failure classification for a CLI invocation
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed invocation flags
    #[error(transparent)]
    Argument(#[from] clap::Error),

    /// The `--test` name is not part of the fixture document
    #[error("Could not find test '{name}' in {file}")]
    TestCaseNotFound { name: String, file: String },

    /// The pipeline rejected a test case
    #[error("Test '{test}' failed [{}]: {source}", .source.error_type())]
    Pipeline {
        test: String,
        #[source]
        source: ceilo2metrics_core::Error,
    },

    /// Configuration, file access and other setup failures
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Argument(err) => u8::try_from(err.exit_code()).unwrap_or(2),
            Self::TestCaseNotFound { .. } => 1,
            Self::Pipeline { .. } => 1,
            Self::Other(_) => 1,
        }
    }

    /// Error type string for diagnostics
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Argument(_) => "ArgumentError",
            Self::TestCaseNotFound { .. } => "TestCaseNotFound",
            Self::Pipeline { source, .. } => source.error_type(),
            Self::Other(_) => "InternalError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceilo2metrics_core::JsonPath;

    #[test]
    fn test_exit_codes_and_types() {
        let err = CliError::TestCaseNotFound {
            name: "t".into(),
            file: "f.json".into(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.error_type(), "TestCaseNotFound");
        assert_eq!(err.to_string(), "Could not find test 't' in f.json");

        let err = CliError::Pipeline {
            test: "t".into(),
            source: ceilo2metrics_core::Error::InvalidCounterName {
                path: JsonPath::key("payload").index(0).child("counter_name"),
            },
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.error_type(), "InvalidCounterName");
        assert!(err.to_string().contains("[InvalidCounterName]"));
        assert!(err.to_string().contains("payload/0/counter_name"));

        let err = CliError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.error_type(), "InternalError");
    }
}
