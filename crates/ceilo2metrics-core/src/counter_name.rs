// Counter name parsing
//
// Ceilometer identifies a sample by a dotted counter name such as
// `disk.device.read.bytes`. The first three segments map onto the
// collectd-style plugin / type / type_instance triple; anything past the
// third segment is dropped.

use crate::error::{Error, Result};
use crate::schema::JsonPath;

/// A counter name split into its collectd-style parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterName<'a> {
    pub plugin: &'a str,
    /// `type` in the emitted record
    pub kind: &'a str,
    /// Empty when the counter name has fewer than three segments
    pub type_instance: &'a str,
}

impl<'a> CounterName<'a> {
    /// Split `counter_name` on `.`.
    ///
    /// - `memory` → (`memory`, `memory`, ``)
    /// - `cpu.percent` → (`cpu`, `percent`, ``)
    /// - `cpu.percent.idle.extra` → (`cpu`, `percent`, `idle`)
    pub fn parse(counter_name: &'a str) -> Result<Self> {
        if counter_name.is_empty() {
            return Err(Error::InvalidCounterName {
                path: JsonPath::key("counter_name"),
            });
        }

        let mut segments = counter_name.split('.');
        // split always yields at least one item
        let plugin = segments.next().unwrap_or(counter_name);
        let kind = segments.next().unwrap_or(plugin);
        let type_instance = segments.next().unwrap_or("");

        Ok(Self {
            plugin,
            kind,
            type_instance,
        })
    }
}
