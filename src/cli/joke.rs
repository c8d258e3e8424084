use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::config::{self, ConfigStore};
use crate::error::{JokeboxError, Result};
use crate::joke::{fetcher, Fetcher, JokeList, JokeSource, LAST_KEY};

/// Fetch a joke, print it and remember it as the last joke
pub fn fetch(config_path: Option<PathBuf>) -> Result<()> {
    let mut store = config::open(config_path)?;
    let fetcher = Fetcher::new(fetcher::endpoint(&store))?;
    info!(url = fetcher.url(), "Fetching joke");

    fetch_with(&mut store, &fetcher, &mut io::stdout().lock())
}

/// Append the last fetched joke to the saved list
pub fn save(config_path: Option<PathBuf>) -> Result<()> {
    let mut store = config::open(config_path)?;
    save_with(&mut store, &mut io::stdout().lock())
}

/// Print saved jokes as a numbered list
pub fn list(config_path: Option<PathBuf>) -> Result<()> {
    let mut store = config::open(config_path)?;
    list_with(&mut store, &mut io::stdout().lock())
}

/// Delete a saved joke by its listed number
pub fn delete(config_path: Option<PathBuf>, number: &str) -> Result<()> {
    let mut store = config::open(config_path)?;
    delete_with(&mut store, number, &mut io::stdout().lock())
}

fn fetch_with<S, J, W>(store: &mut S, source: &J, out: &mut W) -> Result<()>
where
    S: ConfigStore,
    J: JokeSource,
    W: Write,
{
    let joke = source.fetch()?;
    info!(id = joke.id.as_deref().unwrap_or("-"), "Fetched joke");

    writeln!(out, "{}", joke.joke)?;
    store.set_save(LAST_KEY, &joke.joke)
}

fn save_with<S: ConfigStore, W: Write>(store: &mut S, out: &mut W) -> Result<()> {
    let last = store.get(LAST_KEY);
    if last.is_empty() {
        return Err(JokeboxError::InvalidArgument(
            "no joke to save yet. Run 'jokebox joke' first.".to_string(),
        ));
    }

    let position = JokeList::new(store).save_joke(&last)?;
    writeln!(out, "Saved joke {}", position)?;
    Ok(())
}

fn list_with<S: ConfigStore, W: Write>(store: &mut S, out: &mut W) -> Result<()> {
    let entries = JokeList::new(store).list_jokes();
    if entries.is_empty() {
        writeln!(out, "No saved jokes.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

fn delete_with<S: ConfigStore, W: Write>(store: &mut S, number: &str, out: &mut W) -> Result<()> {
    let number = parse_number(number)?;
    let removed = JokeList::new(store).delete_joke(number)?;
    writeln!(out, "Deleted joke {}: {}", number, removed)?;
    Ok(())
}

fn parse_number(arg: &str) -> Result<i64> {
    arg.trim().parse().map_err(|_| {
        JokeboxError::InvalidArgument(format!("'{}' is not a joke number", arg))
    })
}
