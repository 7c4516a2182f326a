// Metric pipeline orchestration
//
// unwrap envelope → validate each payload entry → parse counter name →
// build one MetricRecord per entry, preserving payload order.

use crate::envelope::{unwrap_notification, NotificationEnvelope, PayloadEntry};
use crate::error::{Error, Result};
use crate::record::MetricRecord;
use crate::schema::JsonPath;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

/// How the pipeline reacts to a payload entry that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The first bad entry aborts the run; no records are produced
    #[default]
    AllOrNothing,
    /// Bad entries are reported alongside the records of the good ones
    Partial,
}

/// A payload entry that was skipped under [`FailurePolicy::Partial`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    /// Position of the entry in the envelope payload
    pub index: usize,
    pub error: Error,
}

/// Result of a successful pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutcome {
    pub records: Vec<MetricRecord>,
    /// Always empty under [`FailurePolicy::AllOrNothing`]
    pub rejected: Vec<RejectedEntry>,
}

impl PipelineOutcome {
    /// True when every payload entry produced a record.
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricPipeline {
    policy: FailurePolicy,
}

impl MetricPipeline {
    pub fn new(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Convert the notification embedded in `test_case` into metric records.
    ///
    /// Envelope-level failures abort the run under every policy.
    pub fn run(&self, test_case: &JsonValue) -> Result<PipelineOutcome> {
        let envelope = unwrap_notification(test_case)?;
        self.run_envelope(&envelope)
    }

    /// Convert an already unwrapped envelope into metric records.
    pub fn run_envelope(&self, envelope: &NotificationEnvelope) -> Result<PipelineOutcome> {
        let mut outcome = PipelineOutcome {
            records: Vec::with_capacity(envelope.payload.len()),
            rejected: Vec::new(),
        };

        for (index, raw) in envelope.payload.iter().enumerate() {
            match build_record(&envelope.publisher_id, raw, index) {
                Ok(record) => {
                    debug!(
                        index,
                        metric_name = %record.metric_name,
                        item_key = %record.item_key,
                        "Built metric record"
                    );
                    outcome.records.push(record);
                }
                Err(error) => match self.policy {
                    FailurePolicy::AllOrNothing => return Err(error),
                    FailurePolicy::Partial => {
                        warn!(index, error = %error, "Rejected payload entry");
                        outcome.rejected.push(RejectedEntry { index, error });
                    }
                },
            }
        }

        info!(
            publisher = %envelope.publisher_id,
            records = outcome.records.len(),
            rejected = outcome.rejected.len(),
            "Converted Ceilometer notification"
        );

        Ok(outcome)
    }
}

fn build_record(publisher: &str, raw: &JsonValue, index: usize) -> Result<MetricRecord> {
    let prefix = JsonPath::key("payload").index(index);
    PayloadEntry::from_value(raw)
        .and_then(|entry| MetricRecord::from_entry(publisher, &entry))
        .map_err(|e| e.prefixed(&prefix))
}
