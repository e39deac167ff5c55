//! Protocol metadata unit.

use regdump::ExtractionUnit;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::host::ProtocolInfo;

/// Writes `version.json`: the host's name, version string and the protocol
/// and data format numbers external tooling keys on.
pub struct VersionInfo {
    info: Arc<dyn ProtocolInfo>,
}

impl VersionInfo {
    pub fn new(info: Arc<dyn ProtocolInfo>) -> Self {
        VersionInfo { info }
    }
}

impl ExtractionUnit for VersionInfo {
    fn file_name(&self) -> &str {
        "version.json"
    }

    fn extract(&self) -> anyhow::Result<Value> {
        Ok(json!({
            "name": self.info.app_name(),
            "version": self.info.app_version(),
            "protocol_version": self.info.protocol_version(),
            "data_version": self.info.data_version(),
        }))
    }
}
