//! Best-effort local persistence for UI state.
//!
//! One JSON file per key under the storage root:
//!
//! ```text
//! <root>/
//!   ledger.json      # The scheduling ledger
//!   drafts.json      # Draft posts not yet on the calendar
//!   language.json    # Sidebar language preference
//! ```
//!
//! The store is deliberately type-agnostic: many independent pieces of
//! state share the same persistence contract, so `save`/`load` are
//! generic over any serde-serializable shape rather than knowing about
//! ledgers or drafts. Failures are explicit values, and `load_or`
//! always hands the caller something usable — either the stored data or
//! the supplied default. In-memory state stays authoritative for the
//! session whether or not a write lands.

use std::{fs, io, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key '{0}' (use letters, digits, '-', '_')")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Local file-based key/value store for serializable state.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.postdeck/state/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".postdeck").join("state"))
    }

    /// Serializes `value` and writes it under `key`.
    ///
    /// Any failure comes back as an `Err` for the caller to log and
    /// move past; nothing here panics or aborts the flow that
    /// triggered the write.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads the value stored under `key`, or `default` when the key
    /// was never written, can't be read, or no longer deserializes
    /// (schema drift, corruption). Read failures are logged and
    /// swallowed; this never fails.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                log::warn!("discarding stored '{key}': {e}");
                default
            }
        }
    }

    /// Loads the value stored under `key`; `Ok(None)` when the key was
    /// never written.
    pub fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key)?;
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Deletes the value stored under `key`. Idempotent.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Maps a key to its file path. Keys are flat identifiers, never
    /// paths; anything else is rejected before touching the filesystem.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}
