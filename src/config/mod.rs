//! Configuration module
//!
//! Key-value persistence for jokebox. Keys are dotted paths (`joke.saved`)
//! stored as nested TOML tables in a single config file.

mod store;

pub use store::FileStore;

use crate::error::{JokeboxError, Result};
use std::path::PathBuf;

/// Directory name under the platform config dir
const APP_DIR: &str = "jokebox";

/// File name of the config file inside [`APP_DIR`]
const CONFIG_FILE: &str = "config.toml";

/// Key-value configuration backing the joke commands.
///
/// `get` never fails: an absent key reads as the empty string.
pub trait ConfigStore {
    fn get(&self, key: &str) -> String;

    /// Set `key` and persist the store immediately
    fn set_save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Resolve the config file path: explicit flag first, then the platform config dir
pub fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            JokeboxError::Config(
                "Cannot determine the config directory. Pass --config <path>.".to_string(),
            )
        })
}

/// Resolve the config path and load the store found there
pub fn open(explicit: Option<PathBuf>) -> Result<FileStore> {
    let path = resolve_path(explicit)?;
    FileStore::load(&path)
}

/// In-memory store for exercising the joke commands without a file
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl ConfigStore for MemoryStore {
    fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set_save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
