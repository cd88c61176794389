//! High score storage
//!
//! A single integer, persisted as `{"high_score": N}`. The engine treats
//! storage as best-effort; the stores themselves report every failure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "high_scores.json";

/// Errors from reading or writing the high score
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("high score I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("high score format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    #[serde(default)]
    pub high_score: u64,
}

/// Load/save capability for the single persisted high score
pub trait HighScoreStore {
    /// Stored high score; a missing record reads as 0
    fn load(&self) -> Result<u64, StoreError>;

    /// Overwrite the stored high score
    fn save(&mut self, score: u64) -> Result<(), StoreError>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u64, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        log::info!(
            "Loaded high score {} from {}",
            record.high_score,
            self.path.display()
        );
        Ok(record.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-process store (tests, headless runs without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub high_score: u64,
    /// Number of successful saves
    pub saves: u32,
    /// Make every load and save fail
    pub broken: bool,
}

impl MemoryStore {
    pub fn with_score(high_score: u64) -> Self {
        Self {
            high_score,
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.broken {
            return Err(io::Error::other("store unavailable").into());
        }
        Ok(())
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), StoreError> {
        self.check()?;
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lane_runner_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_missing_file_reads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_round_trip_format() {
        let path = temp_path("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save(1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"high_score":1234}"#);
        assert_eq!(store.load().unwrap(), 1234);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_record_without_field_reads_zero() {
        let record: HighScoreRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.high_score, 0);
    }

    #[test]
    fn test_broken_memory_store() {
        let mut store = MemoryStore::broken();
        assert!(store.load().is_err());
        assert!(store.save(10).is_err());
        assert_eq!(store.saves, 0);
    }
}
