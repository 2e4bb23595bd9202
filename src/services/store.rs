//! Roster persistence
//!
//! The roster is stored under a single logical key, `students`, as a JSON
//! array. Writes always replace the whole roster.

use crate::error::StoreError;
use crate::model::Student;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the persisted roster inside the data directory
pub const ROSTER_FILE: &str = "students.json";

/// Durable owner of the student roster
pub trait RosterStore {
    /// Read the stored roster, reporting unreadable or corrupt payloads
    fn try_load(&self) -> Result<Vec<Student>, StoreError>;

    /// Replace the stored roster with `students`
    fn save(&self, students: &[Student]) -> Result<(), StoreError>;

    /// Delete the stored roster entirely
    fn reset(&self) -> Result<(), StoreError>;

    /// Read the stored roster, falling back to an empty one on any failure
    fn load(&self) -> Vec<Student> {
        match self.try_load() {
            Ok(students) => students,
            Err(e) => {
                warn!(error = %e, "could not read roster, treating it as empty");
                Vec::new()
            }
        }
    }
}

/// Parse a stored payload. A literal `null` counts as an empty roster.
fn decode(payload: &str) -> Result<Vec<Student>, StoreError> {
    let students: Option<Vec<Student>> = serde_json::from_str(payload)?;
    Ok(students.unwrap_or_default())
}

/// Roster stored as `students.json` in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(ROSTER_FILE),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl RosterStore for JsonFileStore {
    fn try_load(&self) -> Result<Vec<Student>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.unavailable(e)),
        };

        decode(&contents)
    }

    fn save(&self, students: &[Student]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.unavailable(e))?;
        }

        let json = serde_json::to_string_pretty(students)?;

        // Write next to the target and rename so readers never see a partial roster
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| self.unavailable(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.unavailable(e))?;

        debug!(count = students.len(), path = %self.path.display(), "roster saved");
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.unavailable(e)),
        }
    }
}

/// In-memory roster holding the same JSON payload the file store would
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `students`
    pub fn with_students(students: &[Student]) -> Self {
        let store = Self::new();
        store.save(students).unwrap();
        store
    }

    /// Store holding an arbitrary raw payload
    pub fn with_raw(payload: &str) -> Self {
        Self {
            payload: std::cell::RefCell::new(Some(payload.to_string())),
        }
    }

    pub fn is_present(&self) -> bool {
        self.payload.borrow().is_some()
    }
}

#[cfg(test)]
impl RosterStore for MemoryStore {
    fn try_load(&self) -> Result<Vec<Student>, StoreError> {
        match self.payload.borrow().as_deref() {
            Some(payload) => decode(payload),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, students: &[Student]) -> Result<(), StoreError> {
        let json = serde_json::to_string(students)?;
        *self.payload.borrow_mut() = Some(json);
        Ok(())
    }

    fn reset(&self) -> Result<(), StoreError> {
        *self.payload.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn roster() -> Vec<Student> {
        vec![
            Student {
                id: 1,
                name: "Alice".to_string(),
                ag_number: "2022-ag-0001".to_string(),
            },
            Student {
                id: 2,
                name: "Bob".to_string(),
                ag_number: "2022-ag-0002".to_string(),
            },
        ]
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&roster()).unwrap();
        assert_eq!(store.load(), roster());
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_creates_data_dir() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data"));

        store.save(&roster()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_payload_fails_soft() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.try_load(), Err(StoreError::Corrupt(_))));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_file_store_reset_removes_roster() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&roster()).unwrap();
        store.reset().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().is_empty());

        // Resetting an absent roster is fine
        store.reset().unwrap();
    }

    #[test]
    fn test_save_replaces_whole_roster() {
        let store = MemoryStore::with_students(&roster());
        let shorter = vec![roster()[1].clone()];

        store.save(&shorter).unwrap();
        assert_eq!(store.load(), shorter);
    }

    #[test]
    fn test_null_payload_is_empty_roster() {
        let store = MemoryStore::with_raw("null");
        assert!(store.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_wrong_shape_payload_is_corrupt() {
        let store = MemoryStore::with_raw(r#"{"students": []}"#);
        assert!(matches!(store.try_load(), Err(StoreError::Corrupt(_))));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_memory_store_reset_differs_from_empty_save() {
        let store = MemoryStore::with_students(&roster());
        store.save(&[]).unwrap();
        assert!(store.is_present());

        store.reset().unwrap();
        assert!(!store.is_present());
        assert!(store.load().is_empty());
    }
}
