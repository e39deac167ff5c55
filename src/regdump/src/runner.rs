//! Sequential phase execution with per-unit failure isolation.
//!
//! A phase runs its units exactly once, in registration order, on the
//! caller's thread. Each unit's `extract` call sits behind a panic boundary:
//! a unit that returns an error or panics is logged and recorded, and the
//! remaining units still run.

use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::unit::ExtractionUnit;
use crate::writer;

/// The two fixed points in the host lifecycle at which units run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At framework attach time, before the host finishes starting.
    Immediate,
    /// After the host reports itself fully started.
    Deferred,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Immediate => write!(f, "immediate"),
            Phase::Deferred => write!(f, "deferred"),
        }
    }
}

/// What happened to a single unit during a phase.
#[derive(Debug)]
pub struct UnitOutcome {
    /// The unit's declared output file name.
    pub file_name: String,
    pub status: UnitStatus,
}

#[derive(Debug)]
pub enum UnitStatus {
    /// Document produced and written to this absolute path.
    Written(PathBuf),
    /// The unit's extract call returned an error or panicked.
    ExtractFailed(String),
    /// Extraction succeeded but the file could not be written.
    WriteFailed(String),
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, UnitStatus::Written(_))
    }
}

/// Run every unit in `units` exactly once, in order, writing each produced
/// document into `dir`.
///
/// Never retries, never runs units concurrently, and never lets one unit's
/// failure stop a sibling: the returned outcomes always have one entry per
/// unit, in input order.
pub fn run_phase<'a, I>(phase: Phase, dir: &Path, units: I) -> Vec<UnitOutcome>
where
    I: IntoIterator<Item = &'a dyn ExtractionUnit>,
{
    info!(%phase, "running extraction phase");

    let mut outcomes = Vec::new();
    for unit in units {
        let file_name = unit.file_name().to_string();

        let document = match extract_guarded(unit) {
            Ok(document) => document,
            Err(detail) => {
                error!(unit = %file_name, error = %detail, "extraction unit failed");
                outcomes.push(UnitOutcome {
                    file_name,
                    status: UnitStatus::ExtractFailed(detail),
                });
                continue;
            }
        };

        // Write failures are already logged by the writer; record and move on.
        let status = match writer::write_document(dir, &file_name, &document) {
            Ok(path) => UnitStatus::Written(path),
            Err(e) => UnitStatus::WriteFailed(e.to_string()),
        };
        outcomes.push(UnitOutcome { file_name, status });
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!(%phase, total = outcomes.len(), failed, "extraction phase complete");

    outcomes
}

/// Invoke `extract` behind a panic boundary so a crashing unit cannot take
/// down the phase.
///
/// AssertUnwindSafe is required because the unit holds `&self` across the
/// boundary; units must not rely on their own state after a panic.
fn extract_guarded(unit: &dyn ExtractionUnit) -> Result<Value, String> {
    match catch_unwind(AssertUnwindSafe(|| unit.extract())) {
        Ok(Ok(document)) => Ok(document),
        Ok(Err(e)) => Err(format!("{e:#}")),
        Err(panic_info) => Err(format!("panicked: {}", panic_message(&panic_info))),
    }
}

fn panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct OkUnit {
        name: &'static str,
        document: Value,
        calls: AtomicUsize,
    }

    impl OkUnit {
        fn new(name: &'static str, document: Value) -> Self {
            OkUnit {
                name,
                document,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl ExtractionUnit for OkUnit {
        fn file_name(&self) -> &str {
            self.name
        }

        fn extract(&self) -> anyhow::Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.document.clone())
        }
    }

    struct FailingUnit;

    impl ExtractionUnit for FailingUnit {
        fn file_name(&self) -> &str {
            "failing.json"
        }

        fn extract(&self) -> anyhow::Result<Value> {
            bail!("registry not reachable")
        }
    }

    struct PanickingUnit;

    impl ExtractionUnit for PanickingUnit {
        fn file_name(&self) -> &str {
            "panicking.json"
        }

        fn extract(&self) -> anyhow::Result<Value> {
            panic!("index out of range")
        }
    }

    #[test]
    fn test_failing_unit_does_not_block_siblings() {
        let temp_dir = tempfile::tempdir().unwrap();

        let ok = OkUnit::new("ok.json", json!({ "a": 1 }));
        let units: Vec<&dyn ExtractionUnit> = vec![&FailingUnit, &ok];

        let outcomes = run_phase(Phase::Immediate, temp_dir.path(), units);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].status, UnitStatus::ExtractFailed(_)));
        assert!(outcomes[1].is_success());
        assert!(temp_dir.path().join("ok.json").exists());
        assert!(!temp_dir.path().join("failing.json").exists());
    }

    #[test]
    fn test_panicking_unit_is_isolated() {
        let temp_dir = tempfile::tempdir().unwrap();

        let ok = OkUnit::new("after_panic.json", json!([1, 2, 3]));
        let units: Vec<&dyn ExtractionUnit> = vec![&PanickingUnit, &ok];

        let outcomes = run_phase(Phase::Deferred, temp_dir.path(), units);

        match &outcomes[0].status {
            UnitStatus::ExtractFailed(detail) => {
                assert!(detail.contains("index out of range"), "detail: {detail}");
            }
            other => panic!("expected ExtractFailed, got {other:?}"),
        }
        assert!(outcomes[1].is_success());
        assert_eq!(ok.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_every_unit_attempted_exactly_once() {
        let temp_dir = tempfile::tempdir().unwrap();

        let a = OkUnit::new("a.json", json!(1));
        let b = OkUnit::new("b.json", json!(2));
        let c = OkUnit::new("c.json", json!(3));
        let units: Vec<&dyn ExtractionUnit> = vec![&a, &b, &c];

        let outcomes = run_phase(Phase::Immediate, temp_dir.path(), units);

        assert_eq!(outcomes.len(), 3);
        for unit in [&a, &b, &c] {
            assert_eq!(unit.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_write_failure_does_not_halt_phase() {
        let temp_dir = tempfile::tempdir().unwrap();
        // Point the phase at a directory that does not exist so every
        // write fails while extraction still succeeds.
        let missing = temp_dir.path().join("missing");

        let a = OkUnit::new("a.json", json!(1));
        let b = OkUnit::new("b.json", json!(2));
        let units: Vec<&dyn ExtractionUnit> = vec![&a, &b];

        let outcomes = run_phase(Phase::Immediate, &missing, units);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0].status, UnitStatus::WriteFailed(_)));
        assert!(matches!(outcomes[1].status, UnitStatus::WriteFailed(_)));
        assert_eq!(a.calls.load(Ordering::SeqCst), 1);
        assert_eq!(b.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_outcomes_preserve_registration_order() {
        let temp_dir = tempfile::tempdir().unwrap();

        let a = OkUnit::new("z_last.json", json!(1));
        let b = OkUnit::new("a_first.json", json!(2));
        let units: Vec<&dyn ExtractionUnit> = vec![&a, &b];

        let outcomes = run_phase(Phase::Immediate, temp_dir.path(), units);

        assert_eq!(outcomes[0].file_name, "z_last.json");
        assert_eq!(outcomes[1].file_name, "a_first.json");
    }
}
