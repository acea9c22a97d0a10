//! Finished-game persistence.
//!
//! A session is `{ session_name, move_history }`, where `move_history` is the
//! rendered move log. The name is opaque to the game; by default it is built
//! from the wall clock.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_name: String,
    pub move_history: String,
}

/// `Session_data_2024-05-01_10:00:00`
pub fn session_name_at(timestamp: NaiveDateTime) -> String {
    format!("Session_data_{}", timestamp.format("%Y-%m-%d_%H:%M:%S"))
}

/// Session name for the current local time.
pub fn session_name_now() -> String {
    session_name_at(Local::now().naive_local())
}

pub trait SessionStore {
    fn save(&self, record: &SessionRecord) -> Result<(), StoreError>;

    /// Every saved record, oldest first.
    fn load_all(&self) -> Result<Vec<SessionRecord>, StoreError>;
}

/// Appends one JSON object per line to a file.
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonLinesStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonLinesStore {
    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record).map_err(StoreError::Encode)?;
        line.push('\n');
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        debug!(path = %self.path.display(), session = %record.session_name, "session saved");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| StoreError::Decode { line: i + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }
}

/// Keeps records in memory. Handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StoreError> {
        Ok(self.records.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, history: &str) -> SessionRecord {
        SessionRecord {
            session_name: name.to_string(),
            move_history: history.to_string(),
        }
    }

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("szachy-{tag}-{}.jsonl", std::process::id()))
    }

    #[test]
    fn name_format_matches_saved_sessions() {
        let ts = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(9, 3, 7))
            .unwrap();
        assert_eq!(session_name_at(ts), "Session_data_2024-05-01_09:03:07");
        assert!(session_name_now().starts_with("Session_data_"));
    }

    #[test]
    fn json_lines_store_appends_and_reads_back() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);
        let store = JsonLinesStore::new(&path);
        assert!(store.load_all().unwrap().is_empty(), "missing file reads as empty");

        let first = record("Session_data_a", "Player white: Moved w_pawn from square e2 to square e4\n");
        let second = record("Session_data_b", "Game Over: Black Wins!\n");
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![first, second]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_line_reports_its_number() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{\"session_name\":\"x\",\"move_history\":\"\"}\nnot json\n").unwrap();
        let err = JsonLinesStore::new(&path).load_all().unwrap_err();
        assert!(matches!(err, StoreError::Decode { line: 2, .. }), "{err:?}");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn memory_store_keeps_order() {
        let store = MemoryStore::new();
        store.save(&record("one", "")).unwrap();
        store.save(&record("two", "")).unwrap();
        let names: Vec<_> = store.load_all().unwrap().into_iter().map(|r| r.session_name).collect();
        assert_eq!(names, ["one", "two"]);
    }
}
