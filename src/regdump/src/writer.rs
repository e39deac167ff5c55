//! Output file materialization.
//!
//! One file per unit, named by the unit, pretty-printed JSON with explicit
//! nulls so downstream tooling gets diffable, schema-free documents.

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `document` to `dir/file_name`, overwriting any existing file.
///
/// The document is serialized fully in memory before the file is touched,
/// so a serialization failure never leaves a truncated file behind. Returns
/// the absolute path of the written file.
///
/// Success and failure are both logged here; callers only need the result
/// to record the outcome.
pub fn write_document(dir: &Path, file_name: &str, document: &Value) -> Result<PathBuf, WriteError> {
    match write_inner(dir, file_name, document) {
        Ok(path) => {
            info!(unit = %file_name, path = %path.display(), "wrote output file");
            Ok(path)
        }
        Err(e) => {
            error!(unit = %file_name, error = %e, "failed to write output file");
            Err(e)
        }
    }
}

fn write_inner(dir: &Path, file_name: &str, document: &Value) -> Result<PathBuf, WriteError> {
    let path = dir.join(file_name);
    let json = serde_json::to_string_pretty(document)?;
    fs::write(&path, json)?;
    Ok(fs::canonicalize(&path).unwrap_or(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_pretty_printed() {
        let temp_dir = tempfile::tempdir().unwrap();

        let document = json!({ "a": 1 });
        let path = write_document(temp_dir.path(), "test.json", &document).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Pretty printing puts each key on its own line
        assert!(content.contains("\"a\": 1"));
        assert!(content.contains('\n'));

        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, document);
    }

    #[test]
    fn test_write_explicit_nulls() {
        let temp_dir = tempfile::tempdir().unwrap();

        let document = json!({ "present": 1, "absent": null });
        let path = write_document(temp_dir.path(), "nulls.json", &document).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"absent\": null"));
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp_dir = tempfile::tempdir().unwrap();

        write_document(temp_dir.path(), "out.json", &json!({ "v": 1 })).unwrap();
        let path = write_document(temp_dir.path(), "out.json", &json!({ "v": 2 })).unwrap();

        let parsed: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, json!({ "v": 2 }));
    }

    #[test]
    fn test_write_missing_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = write_document(&missing, "out.json", &json!({}));
        assert!(matches!(result, Err(WriteError::Io(_))));
        assert!(!missing.join("out.json").exists());
    }

    #[test]
    fn test_returned_path_is_absolute() {
        let temp_dir = tempfile::tempdir().unwrap();

        let path = write_document(temp_dir.path(), "abs.json", &json!(null)).unwrap();
        assert!(path.is_absolute());
    }
}
