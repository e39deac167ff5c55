//! Static enumeration tables unit.

use regdump::ExtractionUnit;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::host::StaticTables;

/// Writes `enums.json`: one object per static id table, mapping entry name
/// to its numeric id.
///
/// These tables are compiled into the host library, so this unit can run in
/// the immediate phase before the host has started.
pub struct Enums {
    tables: Arc<dyn StaticTables>,
}

impl Enums {
    pub fn new(tables: Arc<dyn StaticTables>) -> Self {
        Enums { tables }
    }
}

impl ExtractionUnit for Enums {
    fn file_name(&self) -> &str {
        "enums.json"
    }

    fn extract(&self) -> anyhow::Result<Value> {
        let mut root = Map::new();
        for table in self.tables.id_tables() {
            let mut entries = Map::new();
            for entry in table.entries {
                entries.insert(entry.name, Value::from(entry.id));
            }
            root.insert(table.name, Value::Object(entries));
        }
        Ok(Value::Object(root))
    }
}
