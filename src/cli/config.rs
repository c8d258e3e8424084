use crate::config::{self, ConfigStore, FileStore};
use crate::error::Result;
use std::path::PathBuf;

/// Create an empty config file
pub fn init(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config::resolve_path(config_path)?;

    // Check if file already exists
    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let store = FileStore::create(&config_path)?;

    println!("Configuration file created: {}", store.path().display());
    println!("\nNext steps:");
    println!("1. Run 'jokebox joke' to fetch your first joke");
    println!("2. Run 'jokebox joke save' to keep it");

    Ok(())
}

/// Print the resolved config file path
pub fn path(config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config::resolve_path(config_path)?;
    println!("{}", config_path.display());
    Ok(())
}

/// Print a single value, or nothing if the key is absent
pub fn get(config_path: Option<PathBuf>, key: &str) -> Result<()> {
    let store = config::open(config_path)?;
    let value = store.get(key);
    if !value.is_empty() {
        println!("{}", value);
    }
    Ok(())
}

/// Set and persist a single value
pub fn set(config_path: Option<PathBuf>, key: &str, value: &str) -> Result<()> {
    let mut store = config::open(config_path)?;
    store.set_save(key, value)
}
