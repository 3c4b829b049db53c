//! Snapshot persistence.
//!
//! The engine itself never touches storage; callers load a
//! [`Snapshot`] through a [`SnapshotStore`] and hand plain slices to
//! the analytics functions. The JSON implementation here covers the
//! single-tenant local case; a remote store implements the same trait
//! elsewhere.

use crate::error::Result;
use crate::types::Snapshot;
use std::path::{Path, PathBuf};

/// Storage seam between the engine's callers and wherever the roster
/// and history actually live.
pub trait SnapshotStore {
    /// Load the full roster + history snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Persist a snapshot, replacing any previous state.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// File-backed store keeping the whole snapshot in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    /// Missing file reads as an empty snapshot, so first runs work
    /// without a setup step.
    fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(Snapshot::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write to a sibling temp file first so a crash mid-write
        // cannot truncate the previous snapshot.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(snapshot)?)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            students = snapshot.students.len(),
            records = snapshot.records.len(),
            "snapshot saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttendanceRecord, Student};
    use tempfile::TempDir;

    fn sample() -> Snapshot {
        Snapshot {
            students: vec![Student {
                id: "S01".to_string(),
                name: "Ada".to_string(),
                created_at: None,
            }],
            records: vec![AttendanceRecord {
                date: "2024-01-01".to_string(),
                present_ids: vec!["S01".to_string()],
            }],
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("attendance.json"));
        let snapshot = store.load().unwrap();
        assert!(snapshot.students.is_empty());
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonSnapshotStore::new(dir.path().join("nested/attendance.json"));
        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample());
        // No temp file left behind
        assert!(!dir.path().join("nested/attendance.json.tmp").exists());
    }

    #[test]
    fn test_reads_camel_case_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("attendance.json");
        std::fs::write(
            &path,
            r#"{"students":[{"id":"S01","name":"Ada"}],"records":[{"date":"2024-01-01","presentIds":["S01"]}]}"#,
        )
        .unwrap();
        let store = JsonSnapshotStore::new(path);
        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.records[0].present_ids, vec!["S01".to_string()]);
    }
}
