//! In-memory store mapping download identifiers to generated files.
//!
//! Entries are write-once per key. Unlike a plain map, the store has an
//! explicit eviction policy: entries expire after a TTL and the store is
//! capped, evicting the oldest entry when full.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Default entry lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default entry cap.
const DEFAULT_CAPACITY: usize = 100;

/// Metadata for one generated spreadsheet.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path of the exported file on disk
    pub path: PathBuf,
    /// When the entry was stored
    pub created_at: DateTime<Utc>,
    /// Number of test cases in the batch
    pub case_count: usize,
    /// Truncated feature description that produced the batch
    pub feature: String,
}

/// Thread-safe download registry with TTL and capacity eviction.
pub struct DownloadStore {
    entries: RwLock<HashMap<Uuid, StoredFile>>,
    ttl: chrono::Duration,
    capacity: usize,
}

impl DownloadStore {
    /// Create a store with default TTL (1 hour) and capacity (100 entries).
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_CAPACITY)
    }

    /// Create a store with explicit limits.
    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(1)),
            capacity: capacity.max(1),
        }
    }

    /// Store a generated file and return its download identifier.
    pub fn insert(&self, path: PathBuf, case_count: usize, feature: &str) -> Uuid {
        let id = Uuid::new_v4();
        let feature = if feature.chars().count() > 100 {
            let truncated: String = feature.chars().take(100).collect();
            format!("{truncated}...")
        } else {
            feature.to_string()
        };

        let mut entries = self.entries.write().unwrap();
        let now = Utc::now();
        entries.retain(|_, file| now - file.created_at < self.ttl);

        // At capacity: drop the oldest entry
        if entries.len() >= self.capacity {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, file)| file.created_at)
                .map(|(id, _)| *id)
            {
                entries.remove(&oldest);
            }
        }

        entries.insert(
            id,
            StoredFile {
                path,
                created_at: now,
                case_count,
                feature,
            },
        );
        id
    }

    /// Look up a stored file; expired entries are treated as absent.
    pub fn get(&self, id: &Uuid) -> Option<StoredFile> {
        let entries = self.entries.read().unwrap();
        let file = entries.get(id)?;
        if Utc::now() - file.created_at >= self.ttl {
            return None;
        }
        Some(file.clone())
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap();
        let now = Utc::now();
        entries
            .values()
            .filter(|file| now - file.created_at < self.ttl)
            .count()
    }

    /// Whether the store holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DownloadStore {
    fn default() -> Self {
        Self::new()
    }
}
