use crate::counter_name::CounterName;
use crate::envelope::PayloadEntry;
use crate::error::Result;
use crate::identity;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Number;

/// Insertion-ordered label set; output order follows insertion order.
pub type Labels = IndexMap<String, String>;

/// Monitoring-backend-ready view of one Ceilometer sample.
///
/// Field declaration order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub publisher: String,
    pub plugin: String,
    pub plugin_instance: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub values: Vec<Number>,
    pub name: String,
    pub key: String,
    pub item_key: String,
    pub type_instance: String,
    pub labels: Labels,
    pub description: String,
    pub metric_name: String,
}

impl MetricRecord {
    /// Build the record for `entry` published by `publisher`.
    ///
    /// Fails only when the entry's counter name is empty.
    pub fn from_entry(publisher: &str, entry: &PayloadEntry) -> Result<Self> {
        let CounterName {
            plugin,
            kind,
            type_instance,
        } = CounterName::parse(&entry.counter_name)?;
        let plugin_instance = entry.resource_id.as_str();

        Ok(Self {
            publisher: publisher.to_string(),
            plugin: plugin.to_string(),
            plugin_instance: plugin_instance.to_string(),
            kind: kind.to_string(),
            values: vec![entry.counter_volume.clone()],
            name: plugin.to_string(),
            key: publisher.to_string(),
            item_key: identity::item_key(plugin, plugin_instance, kind, type_instance),
            type_instance: type_instance.to_string(),
            labels: identity::labels(entry, plugin, type_instance, plugin_instance, publisher),
            description: identity::description(entry, plugin, kind),
            metric_name: identity::metric_name(plugin, kind, type_instance),
        })
    }
}
