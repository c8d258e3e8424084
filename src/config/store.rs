use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

use super::ConfigStore;
use crate::error::{JokeboxError, Result};

/// TOML-file backed configuration store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    data: Table,
}

impl FileStore {
    /// Load the store from a TOML file. A missing file loads as an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                data: Table::new(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| {
            JokeboxError::Config(format!(
                "Cannot read config from '{}': {}",
                path.display(),
                e
            ))
        })?;

        let data: Table = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Create an empty config file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let store = Self {
            path: path.to_path_buf(),
            data: Table::new(),
        };
        store.save()?;
        Ok(store)
    }

    /// Path this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let toml = toml::to_string_pretty(&self.data)
            .map_err(|e| JokeboxError::Config(format!("Failed to serialize config: {}", e)))?;

        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, toml)?;
        debug!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn get(&self, key: &str) -> String {
        match lookup(&self.data, key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    fn set_save(&mut self, key: &str, value: &str) -> Result<()> {
        insert(&mut self.data, key, value)?;
        self.save()
    }
}

/// Walk a dotted key through nested tables
fn lookup<'t>(table: &'t Table, key: &str) -> Option<&'t Value> {
    let mut segments = key.split('.');
    let last = segments.next_back()?;

    let mut current = table;
    for segment in segments {
        current = current.get(segment)?.as_table()?;
    }
    current.get(last)
}

/// Set a dotted key, creating intermediate tables as needed
fn insert(table: &mut Table, key: &str, value: &str) -> Result<()> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(JokeboxError::Config(format!("Invalid key '{}'", key)));
    }
    let Some((last, parents)) = segments.split_last() else {
        return Err(JokeboxError::Config(format!("Invalid key '{}'", key)));
    };

    let mut current = table;
    for segment in parents {
        current = current
            .entry(segment.to_string())
            .or_insert(Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| {
                JokeboxError::Config(format!(
                    "Cannot set '{}': '{}' already holds a value",
                    key, segment
                ))
            })?;
    }

    if matches!(current.get(*last), Some(Value::Table(_))) {
        return Err(JokeboxError::Config(format!(
            "Cannot set '{}': it holds a table of keys",
            key
        )));
    }

    current.insert(last.to_string(), Value::String(value.to_string()));
    Ok(())
}
