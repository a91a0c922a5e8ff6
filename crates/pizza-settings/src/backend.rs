//! # Key-Value Backends
//!
//! Where the two override keys are persisted.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      KeyValueStore implementations                      │
//! │                                                                         │
//! │  ┌───────────────────────────┐      ┌───────────────────────────────┐  │
//! │  │  InMemoryKeyValueStore    │      │  TomlFileStore                │  │
//! │  │  ───────────────────────  │      │  ───────────────────────────  │  │
//! │  │  Arc<Mutex<..>> handle    │      │  flat TOML table on disk      │  │
//! │  │  clones share entries     │      │  write: tmp file + rename     │  │
//! │  │  counts writes            │      │  missing file = empty         │  │
//! │  └───────────────────────────┘      └───────────────────────────────┘  │
//! │                                                                         │
//! │  Keys:  currency = "EUR"    distanceUnit = "cm"                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::{SettingsError, SettingsResult};

/// Key holding the 3-letter currency override.
pub const CURRENCY_KEY: &str = "currency";

/// Key holding the `cm`/`in` distance unit override.
pub const DISTANCE_UNIT_KEY: &str = "distanceUnit";

/// A string-to-string store that survives restarts.
pub trait KeyValueStore: Send + Sync {
    /// Reads one key. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> SettingsResult<Option<String>>;

    /// Writes one key.
    fn set(&self, key: &str, value: &str) -> SettingsResult<()>;

    /// Writes several keys as one operation.
    fn set_many(&self, entries: &[(&str, &str)]) -> SettingsResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    entries: BTreeMap<String, String>,
    writes: usize,
}

/// Volatile [`KeyValueStore`] for tests and `--ephemeral` runs.
///
/// Clones share the same entries, so a test can hand one clone to a
/// [`crate::SettingsStore`] and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `entries`. Seeding is not counted as a write.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        store.lock().entries.extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    // === Test Helpers ===

    /// Number of `set`/`set_many` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Copy of all entries.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().entries.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SettingsResult<()> {
        let mut state = self.lock();
        for (key, value) in entries {
            state.entries.insert((*key).to_string(), (*value).to_string());
        }
        state.writes += 1;
        Ok(())
    }
}

// =============================================================================
// TOML File Backend
// =============================================================================

/// [`KeyValueStore`] persisted as a flat TOML table.
///
/// ```toml
/// currency = "EUR"
/// distanceUnit = "cm"
/// ```
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written table behind.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TomlFileStore { path: path.into() }
    }

    /// The platform data directory location (`settings.toml`).
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizzacompare", "pizza-compare")
            .map(|dirs| dirs.data_dir().join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> SettingsResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            debug!(path = ?self.path, "Settings file not found, treating as empty");
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        let raw: toml::Table = toml::from_str(&contents).map_err(|e| self.storage_error(e))?;

        let mut table = BTreeMap::new();
        for (key, value) in raw {
            match value {
                toml::Value::String(text) => {
                    table.insert(key, text);
                }
                other => {
                    warn!(
                        path = ?self.path,
                        key = %key,
                        kind = other.type_str(),
                        "Ignoring non-string settings entry"
                    );
                }
            }
        }
        Ok(table)
    }

    fn write_table(&self, table: &BTreeMap<String, String>) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let contents = toml::to_string(table).map_err(|e| self.storage_error(e))?;
        let tmp_path = self.path.with_extension("toml.tmp");
        fs::write(&tmp_path, contents).map_err(|e| self.storage_error(e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.storage_error(e))?;

        debug!(path = ?self.path, keys = table.len(), "Settings file written");
        Ok(())
    }

    fn storage_error(&self, err: impl std::fmt::Display) -> SettingsError {
        SettingsError::Storage(format!("{}: {}", self.path.display(), err))
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> SettingsResult<()> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SettingsResult<()> {
        let mut table = self.read_table()?;
        for (key, value) in entries {
            table.insert((*key).to_string(), (*value).to_string());
        }
        self.write_table(&table)
    }
}
