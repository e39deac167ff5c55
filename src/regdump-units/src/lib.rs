//! # regdump-units
//!
//! Concrete extraction units for the regdump framework, plus the read-only
//! host capability interfaces they consume.
//!
//! Units never reach into host internals directly: the embedding host
//! implements the traits in [`host`] once, and each unit is bounded by the
//! narrowest capability it reads. Immediate-phase units take their
//! capability at construction time; deferred units receive the live host
//! handle through [`regdump::HostUnit`].

pub mod enums;
pub mod host;
pub mod registries;
pub mod version;

// Re-export commonly used items
#[doc(inline)]
pub use enums::Enums;
#[doc(inline)]
pub use host::{IdEntry, IdTable, LiveRegistries, ProtocolInfo, StaticTables};
#[doc(inline)]
pub use registries::Registries;
#[doc(inline)]
pub use version::VersionInfo;
