//! Read-only host capability interfaces consumed by the units.
//!
//! Each unit depends only on the narrow trait it actually reads, so the
//! instability of reaching into host internals is confined to the host's
//! adapter implementations of these traits instead of being scattered
//! across units.

use serde::{Deserialize, Serialize};

/// Static protocol metadata, readable as soon as the host library is loaded.
pub trait ProtocolInfo {
    fn app_name(&self) -> &str;
    fn app_version(&self) -> &str;
    fn protocol_version(&self) -> u32;
    fn data_version(&self) -> u32;
}

/// One named id row in a table or registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdEntry {
    pub name: String,
    pub id: i64,
}

impl IdEntry {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        IdEntry {
            name: name.into(),
            id,
        }
    }
}

/// A named table of id constants (directions, poses, status codes, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTable {
    pub name: String,
    pub entries: Vec<IdEntry>,
}

/// Compile-time enumeration tables, readable before the host starts.
pub trait StaticTables {
    fn id_tables(&self) -> Vec<IdTable>;
}

/// Live registry access, valid only once the host reports itself started.
pub trait LiveRegistries {
    /// Names of all registries the host exposes, in a stable order.
    fn registry_names(&self) -> Vec<String>;

    /// Entries of one registry, name and raw id each.
    fn registry_entries(&self, registry: &str) -> anyhow::Result<Vec<IdEntry>>;
}
