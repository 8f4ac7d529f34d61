//! High score persistence
//!
//! The only score is the longest survival time in seconds. Stores are
//! idempotent; the tick reads and writes them at most once each per frame.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HighScoreError;

/// Best survival time storage
pub trait HighScoreStore {
    fn get_high_score(&self) -> f32;
    fn set_high_score(&mut self, seconds: f32);
}

/// Process-lifetime store
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MemoryHighScores {
    pub best: f32,
}

impl HighScoreStore for MemoryHighScores {
    fn get_high_score(&self) -> f32 {
        self.best
    }

    fn set_high_score(&mut self, seconds: f32) {
        self.best = seconds;
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct HighScoreFile {
    best_secs: f32,
}

/// JSON file store
///
/// Writes are buffered in memory; call [`JsonFileHighScores::save`] at a
/// convenient point (the driver does so when a run ends).
#[derive(Debug, Clone)]
pub struct JsonFileHighScores {
    path: PathBuf,
    best: f32,
    dirty: bool,
}

impl JsonFileHighScores {
    /// Empty store that will write to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            best: 0.0,
            dirty: false,
        }
    }

    /// Open a store, starting from zero if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HighScoreError> {
        let path = path.as_ref().to_path_buf();
        let best = match std::fs::read_to_string(&path) {
            Ok(json) => {
                let file: HighScoreFile = serde_json::from_str(&json)?;
                log::info!("Loaded high score {:.1}s from {}", file.best_secs, path.display());
                file.best_secs
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                0.0
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            best,
            dirty: false,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the current value if it changed since the last save
    pub fn save(&mut self) -> Result<(), HighScoreError> {
        if !self.dirty {
            return Ok(());
        }
        let json = serde_json::to_string(&HighScoreFile { best_secs: self.best })?;
        std::fs::write(&self.path, json)?;
        self.dirty = false;
        log::info!("High score saved ({:.1}s)", self.best);
        Ok(())
    }
}

impl HighScoreStore for JsonFileHighScores {
    fn get_high_score(&self) -> f32 {
        self.best
    }

    fn set_high_score(&mut self, seconds: f32) {
        if seconds != self.best {
            self.best = seconds;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rowing-runner-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryHighScores::default();
        assert_eq!(store.get_high_score(), 0.0);
        store.set_high_score(12.5);
        store.set_high_score(12.5);
        assert_eq!(store.get_high_score(), 12.5);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileHighScores::open(&path).unwrap();
        assert_eq!(store.get_high_score(), 0.0);
        assert!(!store.is_dirty());
        store.set_high_score(42.25);
        assert!(store.is_dirty());
        store.save().unwrap();
        assert!(!store.is_dirty());

        let reopened = JsonFileHighScores::open(&path).unwrap();
        assert_eq!(reopened.get_high_score(), 42.25);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_setting_same_value_is_clean() {
        let path = temp_path("clean");
        let _ = std::fs::remove_file(&path);
        let mut store = JsonFileHighScores::open(&path).unwrap();
        store.set_high_score(0.0);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_path("malformed");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = JsonFileHighScores::open(&path).unwrap_err();
        assert!(matches!(err, HighScoreError::Json(_)));
        let _ = std::fs::remove_file(&path);
    }
}
