// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local persistence of confirmed RSVPs.
//!
//! The whole ordered list lives as one JSON string under a single key of a
//! key-value string store. Reads never fail: a missing or corrupt entry
//! falls back to an empty list and says so through [`LoadOutcome`].

use crate::config::RECORDS_STORAGE_KEY;
use crate::models::RsvpRecord;
use dashmap::DashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// In-memory key-value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: std::sync::Arc<DashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write to a sibling file first so a crash never leaves half a list.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(tmp, path)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Result of reading the stored list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored list parsed cleanly.
    Loaded(Vec<RsvpRecord>),
    /// Nothing usable was stored; callers see an empty list.
    EmptyFallback { reason: FallbackReason },
}

/// Why [`LoadOutcome::EmptyFallback`] was returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    Absent,
    Corrupt(String),
    ReadFailed(String),
}

impl LoadOutcome {
    /// The records, empty on fallback.
    pub fn into_records(self) -> Vec<RsvpRecord> {
        match self {
            LoadOutcome::Loaded(records) => records,
            LoadOutcome::EmptyFallback { .. } => Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::EmptyFallback { .. })
    }
}

/// Errors writing the local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to write local records: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to encode local records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Ordered RSVP list persisted under [`RECORDS_STORAGE_KEY`].
pub struct RecordStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> RecordStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Read the stored list.
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.kv.get(RECORDS_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                return LoadOutcome::EmptyFallback {
                    reason: FallbackReason::Absent,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read local records, using empty list");
                return LoadOutcome::EmptyFallback {
                    reason: FallbackReason::ReadFailed(e.to_string()),
                };
            }
        };

        // `null` and non-array JSON count as corrupt too.
        match serde_json::from_str::<Vec<RsvpRecord>>(&raw) {
            Ok(records) => LoadOutcome::Loaded(records),
            Err(e) => {
                tracing::warn!(error = %e, "Local records are corrupt, using empty list");
                LoadOutcome::EmptyFallback {
                    reason: FallbackReason::Corrupt(e.to_string()),
                }
            }
        }
    }

    /// Overwrite the stored list.
    pub fn save(&self, records: &[RsvpRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.kv.set(RECORDS_STORAGE_KEY, &json)?;
        Ok(())
    }

    /// Append one record and return the new list.
    pub fn append(&self, record: RsvpRecord) -> Result<Vec<RsvpRecord>, StoreError> {
        let mut records = self.load().into_records();
        records.push(record);
        self.save(&records)?;
        Ok(records)
    }

    /// Drop every stored record.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(RECORDS_STORAGE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<RsvpRecord> {
        vec![
            RsvpRecord::new("Familia A", 2, 0),
            RsvpRecord::new("Familia B", 1, 2),
        ]
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let store = RecordStore::new(MemoryKvStore::new());
        let records = sample();
        store.save(&records).unwrap();
        assert_eq!(store.load(), LoadOutcome::Loaded(records));
    }

    #[test]
    fn test_absent_is_fallback() {
        let store = RecordStore::new(MemoryKvStore::new());
        assert_eq!(
            store.load(),
            LoadOutcome::EmptyFallback {
                reason: FallbackReason::Absent
            }
        );
    }

    #[test]
    fn test_corrupt_json_is_fallback() {
        let kv = MemoryKvStore::new();
        kv.set(RECORDS_STORAGE_KEY, "{not json").unwrap();
        let store = RecordStore::new(kv.clone());
        assert!(matches!(
            store.load(),
            LoadOutcome::EmptyFallback {
                reason: FallbackReason::Corrupt(_)
            }
        ));

        kv.set(RECORDS_STORAGE_KEY, "null").unwrap();
        assert!(store.load().is_fallback());

        kv.set(RECORDS_STORAGE_KEY, r#"{"a":1}"#).unwrap();
        assert!(store.load().into_records().is_empty());
    }

    #[test]
    fn test_append_and_clear() {
        let store = RecordStore::new(MemoryKvStore::new());
        let first = RsvpRecord::new("Evan Fonseca", 1, 0);
        let second = RsvpRecord::new("Familia Pérez", 2, 3);

        assert_eq!(store.append(first.clone()).unwrap(), vec![first.clone()]);
        assert_eq!(
            store.append(second.clone()).unwrap(),
            vec![first, second]
        );

        store.clear().unwrap();
        assert!(store.load().is_fallback());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_append_over_corrupt_starts_fresh() {
        let kv = MemoryKvStore::new();
        kv.set(RECORDS_STORAGE_KEY, "garbage").unwrap();
        let store = RecordStore::new(kv);
        let record = RsvpRecord::new("Evan", 1, 0);
        assert_eq!(store.append(record.clone()).unwrap(), vec![record]);
    }
}
