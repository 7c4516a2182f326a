// Test fixture documents
//
// A fixture maps test-case names to test cases. Results are attached to
// the selected case and the whole document is written back out with its
// original key order.

use crate::error::{Error, Result};
use crate::record::MetricRecord;
use serde_json::{Map, Value as JsonValue};
use std::str::FromStr;

/// Field under which results are attached to a test case by default.
pub const DEFAULT_RESULTS_FIELD: &str = "validatedResults";

#[derive(Debug, Clone, PartialEq)]
pub struct TestFixture {
    cases: Map<String, JsonValue>,
}

impl TestFixture {
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(cases) => Ok(Self { cases }),
            other => Err(Error::InvalidFixture {
                message: format!(
                    "top level must map test names to test cases, found {}",
                    kind_name(&other)
                ),
            }),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: JsonValue = serde_json::from_slice(bytes).map_err(|e| Error::InvalidFixture {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Look up a test case by name.
    pub fn case(&self, name: &str) -> Result<&JsonValue> {
        self.cases.get(name).ok_or_else(|| Error::TestCaseNotFound {
            name: name.to_string(),
        })
    }

    /// Test-case names in document order.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Store `records` under `field` in the named test case, replacing any
    /// previous value.
    pub fn attach_results(&mut self, name: &str, field: &str, records: &[MetricRecord]) -> Result<()> {
        let results = serde_json::to_value(records).map_err(|e| Error::InvalidFixture {
            message: format!("failed to serialize results: {}", e),
        })?;

        let case = self
            .cases
            .get_mut(name)
            .ok_or_else(|| Error::TestCaseNotFound {
                name: name.to_string(),
            })?;

        let JsonValue::Object(fields) = case else {
            return Err(Error::InvalidFixture {
                message: format!("test case '{}' is not an object", name),
            });
        };

        fields.insert(field.to_string(), results);
        Ok(())
    }

    /// Serialize the document, 2-space indented when `pretty`.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(&self.cases)
        } else {
            serde_json::to_string(&self.cases)
        };
        rendered.map_err(|e| Error::InvalidFixture {
            message: format!("failed to serialize fixture: {}", e),
        })
    }

    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.cases)
    }
}

impl FromStr for TestFixture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
