//! Durable storage for the record store
//!
//! The whole store is written as one pretty-printed JSON document on every
//! mutation:
//!
//! ```json
//! {
//!   "version": 1,
//!   "links": [
//!     {
//!       "id": "a1b2c3d4e5f6",
//!       "destination_url": "https://example.com/page",
//!       "created_at": "2026-01-17T13:40:00Z",
//!       "access_count": 3,
//!       "last_accessed_at": "2026-01-18T09:12:44Z"
//!     }
//!   ]
//! }
//! ```
//!
//! Loading is best-effort: a missing file yields an empty store, and a file
//! that cannot be read or parsed is moved aside to `<path>.corrupt` before starting
//! empty. The moved file is never read again, so its links are lost to the
//! running service until an operator restores them by hand.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::Record;
use crate::store::RecordStore;

/// Format version written into every data file
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write data file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode data file: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct DataFileRef<'a> {
    version: u32,
    links: Vec<&'a Record>,
}

#[derive(Deserialize)]
struct DataFile {
    version: u32,
    links: Vec<Record>,
}

/// Reads and writes the data file at a single well-known path
#[derive(Debug, Clone)]
pub struct Persistence {
    path: PathBuf,
}

impl Persistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reconstructs the store from disk. Never fails.
    pub fn load(&self) -> RecordStore {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "data file not found, starting with an empty store");
                return RecordStore::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "data file unreadable, starting with an empty store");
                self.quarantine();
                return RecordStore::new();
            }
        };

        match decode(&content) {
            Ok(store) => {
                info!(path = %self.path.display(), links = store.len(), "loaded data file");
                store
            }
            Err(reason) => {
                warn!(path = %self.path.display(), %reason, "data file is corrupt, starting with an empty store");
                self.quarantine();
                RecordStore::new()
            }
        }
    }

    /// Writes the entire store, replacing the data file via write-then-rename.
    pub fn save(&self, store: &RecordStore) -> Result<(), PersistenceError> {
        let mut links: Vec<&Record> = store.snapshot().map(|(_, record)| record).collect();
        links.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let json = serde_json::to_vec_pretty(&DataFileRef {
            version: FORMAT_VERSION,
            links,
        })?;

        let tmp_path = self.tmp_path();
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn quarantine(&self) {
        let target = suffixed(&self.path, "corrupt");
        match fs::rename(&self.path, &target) {
            Ok(()) => warn!(path = %target.display(), "moved corrupt data file aside"),
            Err(e) => warn!(error = %e, "could not move corrupt data file aside"),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        suffixed(&self.path, "tmp")
    }
}

fn decode(content: &[u8]) -> Result<RecordStore, String> {
    let file: DataFile = serde_json::from_slice(content).map_err(|e| e.to_string())?;
    if file.version != FORMAT_VERSION {
        return Err(format!("unsupported format version {}", file.version));
    }
    Ok(file.links.into_iter().collect())
}

/// `links.json` -> `links.json.<suffix>`
fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}
