// Notification unwrapping
//
// A Ceilometer notification reaches us doubly encoded: the test case holds
// `request.oslo.message`, a *string* containing the JSON notification.
// Fixtures written by the Python test harness nest the request one level
// deeper under `testInput`; both layouts are accepted.

use crate::error::{Error, Result};
use crate::schema::{self, Contract, JsonPath, ValidationError};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value as JsonValue};
use tracing::debug;

/// Key under which fixture files nest the request of a test case.
pub const TEST_INPUT_KEY: &str = "testInput";

/// Decoded oslo message: the publisher plus raw, not yet validated samples.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NotificationEnvelope {
    pub publisher_id: String,
    pub payload: Vec<JsonValue>,
}

/// One validated Ceilometer sample.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayloadEntry {
    pub counter_name: String,
    pub resource_id: String,
    /// Kept as a JSON number so integer volumes stay integers on output
    pub counter_volume: Number,
    #[serde(default, deserialize_with = "string_or_none")]
    pub counter_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub counter_unit: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub project_id: Option<String>,
}

impl PayloadEntry {
    /// Validate `value` against the payload entry contract and decode it.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        schema::validate(value, Contract::PayloadEntry)?;
        PayloadEntry::deserialize(value).map_err(|e| {
            Error::Validation(ValidationError {
                path: JsonPath::root(),
                schema_path: JsonPath::root(),
                contract: Contract::PayloadEntry,
                message: e.to_string(),
            })
        })
    }
}

/// Optional string fields only count when they actually hold a string.
fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::String(value) => Ok(Some(value)),
        JsonValue::Null => Ok(None),
        other => {
            debug!(value = %other, "Ignoring non-string optional payload field");
            Ok(None)
        }
    }
}

/// Pick the value that carries `request`, and the path prefix it lives under.
fn resolve_test_input(test_case: &JsonValue) -> (&JsonValue, JsonPath) {
    match test_case.get(TEST_INPUT_KEY) {
        Some(input) => (input, JsonPath::key(TEST_INPUT_KEY)),
        None => (test_case, JsonPath::root()),
    }
}

/// Extract, decode and validate the notification embedded in a test case.
pub fn unwrap_notification(test_case: &JsonValue) -> Result<NotificationEnvelope> {
    let (input, prefix) = resolve_test_input(test_case);
    schema::validate(input, Contract::Fixture).map_err(|e| e.prefixed(&prefix))?;

    let oslo_message = input
        .pointer("/request/oslo.message")
        .and_then(JsonValue::as_str)
        .unwrap_or_default();

    let message: JsonValue =
        serde_json::from_str(oslo_message).map_err(|e| Error::malformed_envelope(&e))?;
    schema::validate(&message, Contract::Envelope)?;

    let envelope = NotificationEnvelope::deserialize(&message).map_err(|e| {
        Error::Validation(ValidationError {
            path: JsonPath::root(),
            schema_path: JsonPath::root(),
            contract: Contract::Envelope,
            message: e.to_string(),
        })
    })?;

    debug!(
        publisher = %envelope.publisher_id,
        entries = envelope.payload.len(),
        "Unwrapped oslo notification"
    );

    Ok(envelope)
}
