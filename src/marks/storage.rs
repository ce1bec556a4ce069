//! Persistence of bindings.
//!
//! Marks are stored as a JSON array in `~/.config/harpoon/marks.json` unless the
//! configuration points elsewhere. Loading never fails: a missing or unreadable file
//! simply means "no marks yet".

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::binding::{Binding, BindingRecord};

/// Default location of the marks file.
pub fn default_marks_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("harpoon")
        .join("marks.json")
}

#[derive(Debug, Clone)]
pub struct MarkStorage {
    path: PathBuf,
}

impl MarkStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all valid bindings; missing or malformed files yield an empty list.
    pub fn load(&self) -> Vec<Binding> {
        if !self.path.exists() {
            debug!("No marks file at {:?}, starting empty", self.path);
            return Vec::new();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read marks from {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        if contents.trim().is_empty() {
            return Vec::new();
        }

        let records: Vec<BindingRecord> = match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring malformed marks file {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        let total = records.len();
        let bindings: Vec<Binding> = records
            .into_iter()
            .filter_map(BindingRecord::into_binding)
            .collect();

        if bindings.len() != total {
            warn!("Skipped {} invalid mark records in {:?}", total - bindings.len(), self.path);
        }

        info!("Loaded {} marks from {:?}", bindings.len(), self.path);
        bindings
    }

    /// Replaces the whole file. The content goes to a sibling temp file first and is
    /// renamed into place so a reader never sees a half-written file.
    pub fn save<'a>(&self, bindings: impl IntoIterator<Item = &'a Binding>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records: Vec<BindingRecord> = bindings.into_iter().map(Binding::to_record).collect();
        let contents = serde_json::to_string_pretty(&records)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                warn!("Failed to remove {:?}: {}", tmp_path, cleanup);
            }
            return Err(e.into());
        }

        debug!("Saved {} marks to {:?}", records.len(), self.path);
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "marks.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::slot::Slot;
    use tempfile::tempdir;

    fn binding(slot: u8, process: &str, pattern: &str) -> Binding {
        Binding::new(Slot::new(slot).unwrap(), process, pattern)
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let storage = MarkStorage::new(temp.path().join("missing.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("marks.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(MarkStorage::new(path).load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("marks.json");
        let storage = MarkStorage::new(&path);

        storage.save(&[binding(1, "code", "main.rs")]).unwrap();

        assert!(path.exists());
        assert!(!temp.path().join("nested").join("marks.json.tmp").exists());
    }

    #[test]
    fn test_failed_rename_removes_temp_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("marks.json");
        // A non-empty directory in the way makes the rename fail after the write.
        fs::create_dir_all(path.join("occupied")).unwrap();
        let storage = MarkStorage::new(&path);

        assert!(storage.save(&[binding(1, "code", "main.rs")]).is_err());
        assert!(!temp.path().join("marks.json.tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn test_round_trip_drops_handles() {
        let temp = tempdir().unwrap();
        let storage = MarkStorage::new(temp.path().join("marks.json"));
        let saved = vec![
            binding(2, "firefox", "GitHub").with_handle(crate::events::WindowHandle(42)),
            binding(7, "alacritty", "nvim"),
        ];

        storage.save(&saved).unwrap();
        let loaded = storage.load();

        assert_eq!(loaded.len(), 2);
        for (original, restored) in saved.iter().zip(&loaded) {
            assert_eq!(original.slot, restored.slot);
            assert_eq!(original.process_name, restored.process_name);
            assert_eq!(original.title_pattern, restored.title_pattern);
            assert!(restored.window_handle.is_none());
        }
    }

    #[test]
    fn test_invalid_records_skipped_valid_kept() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("marks.json");
        fs::write(
            &path,
            r#"[
                {"slot": 0, "processName": "a", "titlePattern": "b"},
                {"slot": 3, "processName": "code", "titlePattern": "lib.rs"},
                {"slot": 4, "processName": "", "titlePattern": "x"}
            ]"#,
        )
        .unwrap();

        let loaded = MarkStorage::new(path).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].slot.get(), 3);
    }
}
