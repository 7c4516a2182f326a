// Structural contracts for fixture, envelope and payload entry shapes
//
// Each contract is a flat list of required fields with a primitive type.
// Rules are checked in order, so a nested field's parent is always
// verified to be an object before the field itself is looked up.
// Unknown fields are ignored.

use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

/// One step in a path through a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Slash-separated path into a JSON document, e.g. `payload/0/counter_volume`.
///
/// Used both for instance paths (where a value lives) and schema paths
/// (which part of a contract rejected it).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(key.into())])
    }

    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.0.push(PathSegment::Key(key.into()));
        path
    }

    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(PathSegment::Index(index));
        path
    }

    /// Returns `prefix` followed by this path.
    pub fn prefixed(&self, prefix: &JsonPath) -> Self {
        let mut segments = prefix.segments().to_vec();
        segments.extend_from_slice(self.segments());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl<const N: usize> From<[&str; N]> for JsonPath {
    fn from(keys: [&str; N]) -> Self {
        Self(
            keys.iter()
                .map(|key| PathSegment::Key((*key).to_string()))
                .collect(),
        )
    }
}

/// Primitive JSON types a contract can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
}

impl JsonKind {
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            JsonKind::Object => value.is_object(),
            JsonKind::Array => value.is_array(),
            JsonKind::String => value.is_string(),
            JsonKind::Number => value.is_number(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Number => "number",
        }
    }
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    path: &'static [&'static str],
    kind: JsonKind,
}

const FIXTURE_RULES: &[FieldRule] = &[
    FieldRule {
        path: &["request"],
        kind: JsonKind::Object,
    },
    FieldRule {
        path: &["request", "oslo.message"],
        kind: JsonKind::String,
    },
];

const ENVELOPE_RULES: &[FieldRule] = &[
    FieldRule {
        path: &["publisher_id"],
        kind: JsonKind::String,
    },
    FieldRule {
        path: &["payload"],
        kind: JsonKind::Array,
    },
];

const PAYLOAD_ENTRY_RULES: &[FieldRule] = &[
    FieldRule {
        path: &["counter_name"],
        kind: JsonKind::String,
    },
    FieldRule {
        path: &["resource_id"],
        kind: JsonKind::String,
    },
    FieldRule {
        path: &["counter_volume"],
        kind: JsonKind::Number,
    },
];

/// The three shapes accepted at the fixture wire boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    /// Test input carrying `request.oslo.message` as a string
    Fixture,
    /// Decoded oslo message with `publisher_id` and `payload`
    Envelope,
    /// One Ceilometer sample inside the envelope payload
    PayloadEntry,
}

impl Contract {
    pub fn name(&self) -> &'static str {
        match self {
            Contract::Fixture => "fixture",
            Contract::Envelope => "envelope",
            Contract::PayloadEntry => "payload_entry",
        }
    }

    fn rules(&self) -> &'static [FieldRule] {
        match self {
            Contract::Fixture => FIXTURE_RULES,
            Contract::Envelope => ENVELOPE_RULES,
            Contract::PayloadEntry => PAYLOAD_ENTRY_RULES,
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structural contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{contract} contract violated at '{path}' (schema path '{schema_path}'): {message}")]
pub struct ValidationError {
    /// Instance path of the offending field
    pub path: JsonPath,
    /// Contract sub-path that rejected the value
    pub schema_path: JsonPath,
    pub contract: Contract,
    pub message: String,
}

impl ValidationError {
    /// Re-root the instance path under `prefix`, e.g. `payload/3`.
    pub fn prefixed(mut self, prefix: &JsonPath) -> Self {
        self.path = self.path.prefixed(prefix);
        self
    }
}

/// Check `value` against `contract`, reporting the first violation.
pub fn validate(value: &JsonValue, contract: Contract) -> Result<(), ValidationError> {
    if !value.is_object() {
        return Err(ValidationError {
            path: JsonPath::root(),
            schema_path: JsonPath::key("type"),
            contract,
            message: format!("expected object but found {}", describe(value)),
        });
    }

    for rule in contract.rules() {
        check_rule(value, rule, contract)?;
    }

    Ok(())
}

fn check_rule(root: &JsonValue, rule: &FieldRule, contract: Contract) -> Result<(), ValidationError> {
    let mut current = root;
    let mut instance_path = JsonPath::root();
    let mut schema_path = JsonPath::root();

    for (depth, key) in rule.path.iter().enumerate() {
        let Some(object) = current.as_object() else {
            // Parent rules run first, so this only triggers on a malformed rule table.
            return Err(ValidationError {
                path: instance_path,
                schema_path: schema_path.child("type"),
                contract,
                message: format!("expected object but found {}", describe(current)),
            });
        };

        let field_path = instance_path.child(*key);
        let field_schema_path = schema_path.child("properties").child(*key);

        let Some(next) = object.get(*key) else {
            return Err(ValidationError {
                path: field_path,
                schema_path: schema_path.child("required"),
                contract,
                message: format!("'{}' is a required property", key),
            });
        };

        if depth + 1 == rule.path.len() && !rule.kind.matches(next) {
            return Err(ValidationError {
                path: field_path,
                schema_path: field_schema_path.child("type"),
                contract,
                message: format!(
                    "'{}' must be of type '{}' but found {}",
                    key,
                    rule.kind.as_str(),
                    describe(next)
                ),
            });
        }

        current = next;
        instance_path = field_path;
        schema_path = field_schema_path;
    }

    Ok(())
}
