//! Host lifecycle integration surface.
//!
//! The framework never polls the host; the host's own lifecycle dispatch
//! drives these entry points. `attached` fires synchronously while the host
//! is still booting, `host_started` fires later, at most once, with the
//! live host handle.

/// The two entry points the host's lifecycle dispatch drives.
///
/// `H` is the live host handle type passed to the started signal. The
/// [`Orchestrator`](crate::Orchestrator) is the framework's implementation;
/// embedders normally wire that into the host's event system rather than
/// implementing this themselves.
pub trait LifecycleEvents<H> {
    /// Invoked once, synchronously, while the framework is being attached.
    ///
    /// No host subsystem is guaranteed ready at this point.
    fn attached(&mut self);

    /// Invoked at most once, after the host reports itself fully started
    /// and its internal registries are queryable.
    fn host_started(&mut self, host: &H);
}

/// Capability to ask the host for a graceful shutdown.
///
/// Issued once, after the deferred phase completes: this framework is built
/// for one-shot offline extraction, not long-running operation.
pub trait HostControl {
    fn request_stop(&self) -> anyhow::Result<()>;
}
