//! Flat string-keyed key-value store
//!
//! Tracked state is kept under a handful of well-known keys, each holding a
//! string. [`FileStore`] keeps the whole map in one JSON object file and
//! rewrites it atomically on every change; [`MemoryStore`] is used by tests
//! and by callers that do not want anything on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use crate::error::ExpenseResult;

/// Key holding the JSON array of expenses
pub const KEY_EXPENSES: &str = "expenses";
/// Key holding the monthly budget as a decimal string
pub const KEY_BUDGET: &str = "budget";
/// Key holding `"true"` or `"false"`
pub const KEY_DARK_MODE: &str = "darkMode";
/// Key holding the active currency code
pub const KEY_CURRENCY: &str = "currency";
/// Key holding the page the interactive UI opens on
pub const KEY_ACTIVE_PAGE: &str = "activePage";

/// A string-to-string store
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String) -> ExpenseResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&mut self, key: &str) -> ExpenseResult<()>;

    /// All keys currently present
    fn keys(&self) -> Vec<String>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ExpenseResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ExpenseResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Store persisted as a single JSON object file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, reading existing entries
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is a storage error.
    pub fn open(path: impl Into<PathBuf>) -> ExpenseResult<Self> {
        let path = path.into();
        let entries: BTreeMap<String, String> = read_json(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "opened key-value store");
        Ok(Self { path, entries })
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self) -> ExpenseResult<()> {
        write_json_atomic(&self.path, &self.entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> ExpenseResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> ExpenseResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
