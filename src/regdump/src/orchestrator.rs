//! Composition root: owns the unit lists and drives both phases.
//!
//! The orchestrator performs no extraction itself. It creates the output
//! directory once per run, hands each phase's units to the runner at the
//! right lifecycle moment, and requests a host stop when the deferred phase
//! is done.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::lifecycle::{HostControl, LifecycleEvents};
use crate::runner::{self, Phase, UnitOutcome};
use crate::unit::{ExtractionUnit, HostUnit};

/// Default output directory name, relative to the host's working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "regdump_output";

/// Where a run currently stands.
///
/// `Aborted` is terminal: it is only entered when the output directory
/// cannot be created, and no unit runs afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Aborted,
    DirectoryReady,
    ImmediateDone,
    DeferredDone,
    ShutdownRequested,
}

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("duplicate unit file name: {0}")]
    DuplicateName(String),
}

/// Owns the immediate and deferred unit lists for one run.
///
/// A second run within the same process is not supported; lifecycle signals
/// arriving in an unexpected state are logged and ignored.
pub struct Orchestrator<H> {
    output_dir: PathBuf,
    immediate: Vec<Box<dyn ExtractionUnit>>,
    deferred: Vec<Box<dyn HostUnit<H>>>,
    state: RunState,
    immediate_outcomes: Vec<UnitOutcome>,
    deferred_outcomes: Vec<UnitOutcome>,
}

impl<H> Orchestrator<H> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Orchestrator {
            output_dir: output_dir.into(),
            immediate: Vec::new(),
            deferred: Vec::new(),
            state: RunState::Idle,
            immediate_outcomes: Vec::new(),
            deferred_outcomes: Vec::new(),
        }
    }

    /// Register a unit for the immediate phase.
    ///
    /// Rejects a file name already registered in either phase.
    pub fn register_immediate(
        &mut self,
        unit: Box<dyn ExtractionUnit>,
    ) -> Result<(), RegisterError> {
        self.check_name(unit.file_name())?;
        self.immediate.push(unit);
        Ok(())
    }

    /// Register a unit for the deferred phase.
    ///
    /// Rejects a file name already registered in either phase.
    pub fn register_deferred(&mut self, unit: Box<dyn HostUnit<H>>) -> Result<(), RegisterError> {
        self.check_name(unit.file_name())?;
        self.deferred.push(unit);
        Ok(())
    }

    fn check_name(&self, file_name: &str) -> Result<(), RegisterError> {
        let taken = self
            .immediate
            .iter()
            .map(|u| u.file_name())
            .chain(self.deferred.iter().map(|u| u.file_name()))
            .any(|existing| existing == file_name);

        if taken {
            Err(RegisterError::DuplicateName(file_name.to_string()))
        } else {
            Ok(())
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Per-unit results of the immediate phase, empty until it has run.
    pub fn immediate_outcomes(&self) -> &[UnitOutcome] {
        &self.immediate_outcomes
    }

    /// Per-unit results of the deferred phase, empty until it has run.
    pub fn deferred_outcomes(&self) -> &[UnitOutcome] {
        &self.deferred_outcomes
    }
}

impl<H: HostControl> LifecycleEvents<H> for Orchestrator<H> {
    fn attached(&mut self) {
        if self.state != RunState::Idle {
            warn!(state = ?self.state, "duplicate attach signal, ignoring");
            return;
        }

        info!(dir = %self.output_dir.display(), "starting extractors");

        if let Err(e) = fs::create_dir_all(&self.output_dir) {
            error!(
                dir = %self.output_dir.display(),
                error = %e,
                "failed to create output directory, aborting run"
            );
            self.state = RunState::Aborted;
            return;
        }
        self.state = RunState::DirectoryReady;

        self.immediate_outcomes = runner::run_phase(
            Phase::Immediate,
            &self.output_dir,
            self.immediate.iter().map(|u| u.as_ref()),
        );
        self.state = RunState::ImmediateDone;
    }

    fn host_started(&mut self, host: &H) {
        match self.state {
            RunState::ImmediateDone => {}
            RunState::Aborted => {
                error!("run was aborted before the host started, skipping deferred extractors");
                return;
            }
            _ => {
                warn!(state = ?self.state, "unexpected host-started signal, ignoring");
                return;
            }
        }

        info!("host started, running deferred extractors");

        let bound: Vec<BoundUnit<'_, H>> = self
            .deferred
            .iter()
            .map(|unit| BoundUnit {
                unit: unit.as_ref(),
                host,
            })
            .collect();
        self.deferred_outcomes = runner::run_phase(
            Phase::Deferred,
            &self.output_dir,
            bound.iter().map(|b| b as &dyn ExtractionUnit),
        );
        self.state = RunState::DeferredDone;

        info!("extraction complete, requesting host stop");
        if let Err(e) = host.request_stop() {
            error!(error = %format!("{e:#}"), "host stop request failed");
        }
        self.state = RunState::ShutdownRequested;
    }
}

/// Adapter that pairs a deferred unit with the live host handle so the
/// runner can treat both phases uniformly.
struct BoundUnit<'a, H> {
    unit: &'a dyn HostUnit<H>,
    host: &'a H,
}

impl<H> ExtractionUnit for BoundUnit<'_, H> {
    fn file_name(&self) -> &str {
        self.unit.file_name()
    }

    fn extract(&self) -> anyhow::Result<Value> {
        self.unit.extract(self.host)
    }
}
