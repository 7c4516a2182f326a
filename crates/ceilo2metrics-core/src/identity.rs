// Metric identity generation
//
// Pure functions deriving the item key, label set, description and metric
// name of a record from its parsed counter name and raw payload entry.

use crate::envelope::PayloadEntry;
use crate::record::Labels;

/// Prefix shared by every generated metric name.
pub const METRIC_NAME_PREFIX: &str = "ceilometer";

/// `dstype` used in descriptions when the entry has no `counter_type`.
pub const DEFAULT_DSTYPE: &str = "counter";

/// `type` label used when the entry has no `counter_type`.
pub const DEFAULT_TYPE_LABEL: &str = "base";

/// Cache key for one metric series: `plugin[_type][_plugin_instance][_type_instance]`.
///
/// `type` is skipped when it repeats the plugin, the instances when empty.
pub fn item_key(plugin: &str, plugin_instance: &str, kind: &str, type_instance: &str) -> String {
    let mut parts = vec![plugin];
    if kind != plugin {
        parts.push(kind);
    }
    if !plugin_instance.is_empty() {
        parts.push(plugin_instance);
    }
    if !type_instance.is_empty() {
        parts.push(type_instance);
    }
    parts.join("_")
}

/// Label set attached to a record, in insertion order.
pub fn labels(
    entry: &PayloadEntry,
    plugin: &str,
    type_instance: &str,
    plugin_instance: &str,
    publisher: &str,
) -> Labels {
    let mut labels = Labels::new();
    labels.insert("publisher".to_string(), publisher.to_string());

    let plugin_label = if type_instance.is_empty() {
        plugin_instance
    } else {
        type_instance
    };
    labels.insert(plugin.to_string(), plugin_label.to_string());

    labels.insert(
        "type".to_string(),
        entry
            .counter_type
            .clone()
            .unwrap_or_else(|| DEFAULT_TYPE_LABEL.to_string()),
    );

    if let Some(project) = &entry.project_id {
        labels.insert("project".to_string(), project.clone());
    }
    labels.insert("resource".to_string(), entry.resource_id.clone());
    if let Some(unit) = &entry.counter_unit {
        labels.insert("unit".to_string(), unit.clone());
    }
    labels.insert("counter".to_string(), entry.counter_name.clone());

    labels
}

/// Human-readable description of a metric series.
pub fn description(entry: &PayloadEntry, plugin: &str, kind: &str) -> String {
    let dstype = entry.counter_type.as_deref().unwrap_or(DEFAULT_DSTYPE);
    format!(
        "Service Telemetry exporter: '{}' Type: '{}' Dstype: '{}' Dsname: '{}'",
        plugin, kind, dstype, entry.counter_name
    )
}

/// Backend metric name: `ceilometer_plugin[_type][_type_instance]`.
pub fn metric_name(plugin: &str, kind: &str, type_instance: &str) -> String {
    let mut parts = vec![METRIC_NAME_PREFIX, plugin];
    if kind != plugin {
        parts.push(kind);
    }
    if !type_instance.is_empty() {
        parts.push(type_instance);
    }
    parts.join("_")
}
