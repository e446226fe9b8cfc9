use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PersistenceError;
use crate::persistence::document::LearningDocument;

/// Configuration for the persistence manager.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub path: PathBuf,
    /// Start from empty tables instead of failing when the file is corrupt.
    pub reset_on_corrupt: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        PersistenceConfig {
            path: PathBuf::from("rps_learning.json"),
            reset_on_corrupt: true,
        }
    }
}

/// What a load found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet; tables stay empty.
    Missing,
    /// File parsed and merged.
    Loaded,
    /// File was corrupt and ignored.
    ResetCorrupt,
}

/// Reads and writes the learning file.
#[derive(Debug, Clone)]
pub struct PersistenceManager {
    config: PersistenceConfig,
}

impl PersistenceManager {
    pub fn new(config: PersistenceConfig) -> Self {
        PersistenceManager { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn reset_on_corrupt(&self) -> bool {
        self.config.reset_on_corrupt
    }

    /// Write the document, replacing any existing file.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is then renamed over
    /// the target, so a reader never sees a half-written file.
    pub fn write(&self, doc: &LearningDocument) -> Result<(), PersistenceError> {
        let path = &self.config.path;
        let json = serde_json::to_string_pretty(doc)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let tmp = tmp_path(path);
        fs::write(&tmp, json).map_err(|e| PersistenceError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, path).map_err(|e| PersistenceError::Write {
            path: path.clone(),
            source: e,
        })?;

        info!(
            path = %path.display(),
            games = doc.stats.games_played(),
            patterns = doc.tables.patterns.len(),
            "saved learning state"
        );
        Ok(())
    }

    /// Read the document. A missing file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<LearningDocument>, PersistenceError> {
        let path = &self.config.path;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Read {
                    path: path.clone(),
                    source: e,
                })
            }
        };
        let doc = serde_json::from_str(&content).map_err(|e| PersistenceError::Parse {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(doc))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Move;

    fn manager_in(dir: &Path) -> PersistenceManager {
        PersistenceManager::new(PersistenceConfig {
            path: dir.join("rps_learning.json"),
            reset_on_corrupt: true,
        })
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(manager_in(dir.path()).read().unwrap().is_none());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        let mut doc = LearningDocument::default();
        doc.tables.frequencies.add(Move::Paper, 7);
        doc.stats.losses = 4;

        manager.write(&doc).unwrap();
        assert!(manager.path().exists());
        assert!(!tmp_path(manager.path()).exists());

        let back = manager.read().unwrap().unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        let mut doc = LearningDocument::default();
        doc.stats.wins = 1;
        manager.write(&doc).unwrap();
        doc.stats.wins = 2;
        manager.write(&doc).unwrap();
        assert_eq!(manager.read().unwrap().unwrap().stats.wins, 2);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let manager = PersistenceManager::new(PersistenceConfig {
            path: dir.path().join("nested/deeper/state.json"),
            reset_on_corrupt: true,
        });
        manager.write(&LearningDocument::default()).unwrap();
        assert!(manager.path().exists());
    }

    #[test]
    fn test_read_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(dir.path());
        fs::write(manager.path(), "{\"move_frequencies\": [").unwrap();
        let err = manager.read().unwrap_err();
        assert!(
            matches!(err, PersistenceError::Parse { .. }),
            "expected Parse, got: {err}"
        );
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(
            tmp_path(Path::new("a/rps_learning.json")),
            PathBuf::from("a/rps_learning.json.tmp")
        );
    }
}
