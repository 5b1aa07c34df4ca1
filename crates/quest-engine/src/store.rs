//! Persistence for progression records.
//!
//! Records are flat JSON documents keyed by logical name. A missing or
//! unreadable record is never an error for the caller: it loads as the
//! type's default and a warning is logged.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Logical record names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Player,
    Achievements,
    LastReset,
    Subscription,
    Vault,
}

impl StoreKey {
    /// Records holding player progress; a wipe clears these
    pub const PROGRESS: [StoreKey; 4] = [
        StoreKey::Player,
        StoreKey::Achievements,
        StoreKey::LastReset,
        StoreKey::Vault,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StoreKey::Player => "questmaster_player",
            StoreKey::Achievements => "achievements",
            StoreKey::LastReset => "questmaster_last_reset",
            StoreKey::Subscription => "questmaster_subscription",
            StoreKey::Vault => "questmaster_vault",
        }
    }
}

/// Synchronous key/value store for serialized records
pub trait Store {
    fn load(&self, key: StoreKey) -> Result<Option<String>>;
    fn save(&self, key: StoreKey, contents: &str) -> Result<()>;
    /// Delete a record; absent records are not an error
    fn remove(&self, key: StoreKey) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: StoreKey, contents: &str) -> Result<()> {
        (**self).save(key, contents)
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        (**self).remove(key)
    }
}

/// Load and decode a record, falling back to defaults
pub fn load_or_default<T, S>(store: &S, key: StoreKey) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    let raw = match store.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key = key.name(), error = %e, "failed to read record, using defaults");
            return T::default();
        }
    };

    if raw.trim().is_empty() {
        return T::default();
    }

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key = key.name(), error = %e, "malformed record, using defaults");
            T::default()
        }
    }
}

/// Encode and write a record
pub fn save_json<T, S>(store: &S, key: StoreKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    store.save(key, &json)
}

/// One JSON file per record in a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.name()))
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, key: StoreKey, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Readers never observe a partially written record
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record contents, if any
    pub fn get(&self, key: StoreKey) -> Option<String> {
        self.records.borrow().get(&key).cloned()
    }

    pub fn insert(&self, key: StoreKey, contents: impl Into<String>) {
        self.records.borrow_mut().insert(key, contents.into());
    }
}

impl Store for MemoryStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: StoreKey, contents: &str) -> Result<()> {
        self.insert(key, contents);
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<()> {
        self.records.borrow_mut().remove(&key);
        Ok(())
    }
}
