//! # regdump
//!
//! Extraction orchestration framework for dumping structured reference data
//! (identifiers, enumerations, registry tables, protocol metadata) out of a
//! running host application, one JSON file per extraction unit.
//!
//! The framework runs units at two fixed points in the host's lifecycle:
//! - the *immediate* phase, at attach time, before the host is fully up
//! - the *deferred* phase, once the host reports itself started and its
//!   live registries are queryable
//!
//! Units are isolated from each other: one unit failing (or panicking) never
//! prevents its siblings from producing their files.
//!
//! ## Example
//!
//! ```no_run
//! use regdump::{ExtractionUnit, HostControl, LifecycleEvents, Orchestrator};
//! use serde_json::json;
//!
//! struct Protocol;
//!
//! impl ExtractionUnit for Protocol {
//!     fn file_name(&self) -> &str {
//!         "protocol.json"
//!     }
//!
//!     fn extract(&self) -> anyhow::Result<serde_json::Value> {
//!         Ok(json!({ "version": 7 }))
//!     }
//! }
//!
//! struct Host;
//!
//! impl HostControl for Host {
//!     fn request_stop(&self) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut orchestrator = Orchestrator::<Host>::new(regdump::DEFAULT_OUTPUT_DIR);
//! orchestrator.register_immediate(Box::new(Protocol))?;
//!
//! // The host's lifecycle dispatch drives both entry points:
//! orchestrator.attached();
//! orchestrator.host_started(&Host);
//! # Ok::<(), regdump::RegisterError>(())
//! ```

pub mod lifecycle;
pub mod orchestrator;
pub mod runner;
pub mod unit;
pub mod writer;

// Re-export commonly used items
#[doc(inline)]
pub use lifecycle::{HostControl, LifecycleEvents};
#[doc(inline)]
pub use orchestrator::{Orchestrator, RegisterError, RunState, DEFAULT_OUTPUT_DIR};
#[doc(inline)]
pub use runner::{run_phase, Phase, UnitOutcome, UnitStatus};
#[doc(inline)]
pub use unit::{ExtractionUnit, HostUnit};
#[doc(inline)]
pub use writer::{write_document, WriteError};
