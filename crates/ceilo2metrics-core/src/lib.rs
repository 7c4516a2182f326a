// ceilo2metrics-core - Platform-agnostic core logic
//
// This crate contains the PURE processing logic for converting Ceilometer
// notifications embedded in test fixtures into metric records.
// No I/O, no async, no runtime dependencies.
//
// Flow: fixture → envelope → raw payload entries → metric records

pub mod counter_name;
pub mod envelope;
pub mod error;
pub mod fixture;
pub mod identity;
pub mod pipeline;
pub mod record;
pub mod schema;

// Re-export commonly used types
pub use counter_name::CounterName;
pub use envelope::{unwrap_notification, NotificationEnvelope, PayloadEntry};
pub use error::{Error, Result};
pub use fixture::{TestFixture, DEFAULT_RESULTS_FIELD};
pub use pipeline::{FailurePolicy, MetricPipeline, PipelineOutcome, RejectedEntry};
pub use record::{Labels, MetricRecord};
pub use schema::{validate, Contract, JsonPath, ValidationError};

use serde_json::Value as JsonValue;

/// Convert one test case into metric records, all-or-nothing.
///
/// Any payload entry that fails validation aborts the whole conversion.
/// Use [`MetricPipeline`] with [`FailurePolicy::Partial`] to keep the
/// records of the valid entries instead.
pub fn process_test_case(test_case: &JsonValue) -> Result<Vec<MetricRecord>> {
    MetricPipeline::default()
        .run(test_case)
        .map(|outcome| outcome.records)
}
