//! Extraction unit contracts.
//!
//! A unit produces exactly one named JSON document per run. The framework
//! treats the document as an opaque tree and passes it straight to the
//! output writer.

use serde_json::Value;

/// A unit that runs in the immediate phase, at framework attach time.
///
/// Nothing beyond the host library's static state may be read here: the
/// host has not finished starting when `extract` is called.
pub trait ExtractionUnit {
    /// Output file name, e.g. `"enums.json"`.
    ///
    /// Must be unique across both phases of a run; duplicates are rejected
    /// at registration time.
    fn file_name(&self) -> &str;

    /// Produce the unit's document, or fail.
    ///
    /// Failures (and panics) are caught by the phase runner and do not
    /// affect sibling units.
    fn extract(&self) -> anyhow::Result<Value>;
}

/// A unit that runs in the deferred phase and needs the live host handle.
///
/// `H` is the host handle type delivered by the host-started signal. Units
/// should bound `H` by the narrowest capability traits they actually read.
pub trait HostUnit<H> {
    /// Output file name, unique across both phases of a run.
    fn file_name(&self) -> &str;

    /// Produce the unit's document from the live host's state.
    fn extract(&self, host: &H) -> anyhow::Result<Value>;
}
