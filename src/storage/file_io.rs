//! Store documents on disk
//!
//! Each entity kind lives in one pretty-printed JSON document. A new version
//! is staged in a hidden sibling file and renamed over the old one, so a
//! reader only ever sees a complete document.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BudgetError;

fn storage_error(action: &str, path: &Path, err: impl fmt::Display) -> BudgetError {
    BudgetError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// `data/years.json` is staged as `data/.years.json.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Load a store document
///
/// A missing or blank file is an empty store.
pub fn read_json<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("read", path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::warn!(path = %path.display(), "store file is blank, treating it as empty");
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace a store document
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(data).map_err(|e| storage_error("serialize", path, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let staging = staging_path(path);
    if let Err(e) = stage(&staging, &bytes).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(storage_error("write", path, e));
    }

    tracing::trace!(path = %path.display(), bytes = bytes.len(), "wrote store file");
    Ok(())
}

fn stage(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        years: Vec<i32>,
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Snapshot = read_json(temp_dir.path().join("years.json")).unwrap();
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_blank_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("years.json");
        fs::write(&path, "\n  \n").unwrap();

        let data: Snapshot = read_json(&path).unwrap();
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");
        let path = dir.join("years.json");
        let data = Snapshot {
            years: vec![2024, 2025],
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(path.exists());
        assert!(!dir.join(".years.json.tmp").exists());
        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_rewrite_replaces_whole_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("years.json");
        write_json_atomic(&path, &Snapshot { years: vec![2020, 2021, 2022] }).unwrap();
        write_json_atomic(&path, &Snapshot { years: vec![2023] }).unwrap();

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded.years, vec![2023]);
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let path = Path::new("/tmp/budget/data/months.json");
        assert_eq!(
            staging_path(path),
            PathBuf::from("/tmp/budget/data/.months.json.tmp")
        );
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("months.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Snapshot, _>(&path).unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("Failed to parse"));
    }
}
