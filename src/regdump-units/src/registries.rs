//! Live registry dump unit.

use regdump::HostUnit;
use serde_json::{Map, Value};

use crate::host::LiveRegistries;

/// Writes `registries.json`: one object per live registry, mapping entry
/// name to its raw id.
///
/// Registry contents are only final once the host has started, so this is
/// a deferred unit and needs the live host handle.
pub struct Registries;

impl<H: LiveRegistries> HostUnit<H> for Registries {
    fn file_name(&self) -> &str {
        "registries.json"
    }

    fn extract(&self, host: &H) -> anyhow::Result<Value> {
        let mut root = Map::new();
        for registry in host.registry_names() {
            let mut entries = Map::new();
            for entry in host.registry_entries(&registry)? {
                entries.insert(entry.name, Value::from(entry.id));
            }
            root.insert(registry, Value::Object(entries));
        }
        Ok(Value::Object(root))
    }
}
