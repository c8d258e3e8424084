use std::fmt;
use tracing::debug;

use crate::config::ConfigStore;
use crate::error::{JokeboxError, Result};

/// Config key holding the saved list as a JSON array of strings
pub const SAVED_KEY: &str = "joke.saved";

/// Config key holding the most recently fetched joke
pub const LAST_KEY: &str = "joke.last";

/// A saved joke with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub text: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) {}", self.index, self.text)
    }
}

/// Saved joke list on top of a config store
pub struct JokeList<'a, S: ConfigStore> {
    store: &'a mut S,
}

impl<'a, S: ConfigStore> JokeList<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Current list, empty if the stored value is absent or corrupt
    pub fn get_jokes(&self) -> Vec<String> {
        decode(&self.store.get(SAVED_KEY))
    }

    /// Append a joke and return its 1-based position
    pub fn save_joke(&mut self, text: &str) -> Result<usize> {
        let mut jokes = self.get_jokes();
        jokes.push(text.to_string());
        self.write(&jokes)?;
        Ok(jokes.len())
    }

    pub fn list_jokes(&self) -> Vec<Entry> {
        self.get_jokes()
            .into_iter()
            .enumerate()
            .map(|(i, text)| Entry { index: i + 1, text })
            .collect()
    }

    /// Remove the joke at 1-based `number` and return its text.
    ///
    /// The stored list is left untouched when `number` is out of range.
    pub fn delete_joke(&mut self, number: i64) -> Result<String> {
        let mut jokes = self.get_jokes();

        let position = number
            .checked_sub(1)
            .and_then(|p| usize::try_from(p).ok())
            .filter(|&p| p < jokes.len());

        let Some(position) = position else {
            return Err(JokeboxError::InvalidArgument(out_of_range(number, jokes.len())));
        };

        let removed = jokes.remove(position);
        self.write(&jokes)?;
        Ok(removed)
    }

    fn write(&mut self, jokes: &[String]) -> Result<()> {
        let encoded = encode(jokes)?;
        self.store.set_save(SAVED_KEY, &encoded)
    }
}

fn out_of_range(number: i64, len: usize) -> String {
    if len == 0 {
        format!("joke number {} is out of range, no jokes are saved", number)
    } else {
        format!(
            "joke number {} is out of range, expected 1 to {}",
            number, len
        )
    }
}

/// Decode a stored list. Anything that is not a JSON array of strings is empty.
pub fn decode(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(raw).unwrap_or_else(|e| {
        debug!(error = %e, "Ignoring unreadable saved joke list");
        Vec::new()
    })
}

pub fn encode(jokes: &[String]) -> Result<String> {
    Ok(serde_json::to_string(jokes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryStore;

    fn store_with(jokes: &[&str]) -> MemoryStore {
        let jokes: Vec<String> = jokes.iter().map(|s| s.to_string()).collect();
        MemoryStore::with(SAVED_KEY, &encode(&jokes).unwrap())
    }

    #[test]
    fn test_get_jokes_absent_is_empty() {
        let mut store = MemoryStore::default();
        assert!(JokeList::new(&mut store).get_jokes().is_empty());
    }

    #[test]
    fn test_get_jokes_corrupt_is_empty() {
        for raw in ["", "   ", "not json", "{\"a\":1}", "[1,2,3]", "[\"unterminated"] {
            let mut store = MemoryStore::with(SAVED_KEY, raw);
            assert!(
                JokeList::new(&mut store).get_jokes().is_empty(),
                "expected empty list for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_encode_decode_preserves_text() {
        let lists: Vec<Vec<String>> = vec![
            vec![],
            vec!["one".to_string()],
            vec![
                "He said \"hi\"".to_string(),
                "Ünïcödé 🎉 jokes".to_string(),
                "back\\slash and\nnewline".to_string(),
            ],
        ];

        for list in lists {
            assert_eq!(decode(&encode(&list).unwrap()), list);
        }
    }

    #[test]
    fn test_save_appends_last() {
        let mut store = store_with(&["a", "b"]);
        let mut list = JokeList::new(&mut store);

        let position = list.save_joke("c").unwrap();
        assert_eq!(position, 3);

        let entries = list.list_jokes();
        assert_eq!(
            entries.last(),
            Some(&Entry {
                index: 3,
                text: "c".to_string()
            })
        );
    }

    #[test]
    fn test_save_onto_corrupt_list_starts_fresh() {
        let mut store = MemoryStore::with(SAVED_KEY, "garbage");
        JokeList::new(&mut store).save_joke("first").unwrap();
        assert_eq!(store.get(SAVED_KEY), r#"["first"]"#);
    }

    #[test]
    fn test_save_allows_duplicates() {
        let mut store = MemoryStore::default();
        let mut list = JokeList::new(&mut store);
        list.save_joke("same").unwrap();
        list.save_joke("same").unwrap();
        assert_eq!(list.get_jokes(), vec!["same", "same"]);
    }

    #[test]
    fn test_list_is_one_based() {
        let mut store = store_with(&["a", "b", "c"]);
        let lines: Vec<String> = JokeList::new(&mut store)
            .list_jokes()
            .iter()
            .map(|e| e.to_string())
            .collect();
        assert_eq!(lines, vec!["1) a", "2) b", "3) c"]);
    }

    #[test]
    fn test_delete_middle() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut list = JokeList::new(&mut store);

        assert_eq!(list.delete_joke(2).unwrap(), "b");

        let lines: Vec<String> = list.list_jokes().iter().map(|e| e.to_string()).collect();
        assert_eq!(lines, vec!["1) a", "2) c"]);
    }

    #[test]
    fn test_delete_every_valid_position() {
        let original = ["a", "b", "c", "d", "e"];
        for n in 1..=original.len() {
            let mut store = store_with(&original);
            let mut list = JokeList::new(&mut store);

            let removed = list.delete_joke(n as i64).unwrap();
            assert_eq!(removed, original[n - 1]);

            let mut expected: Vec<&str> = original.to_vec();
            expected.remove(n - 1);
            assert_eq!(list.get_jokes(), expected);
        }
    }

    #[test]
    fn test_delete_out_of_range_leaves_list() {
        for n in [0, -1, 4, 100, i64::MIN, i64::MAX] {
            let mut store = store_with(&["a", "b", "c"]);
            let before = store.get(SAVED_KEY);

            let err = JokeList::new(&mut store).delete_joke(n).unwrap_err();
            assert!(matches!(err, JokeboxError::InvalidArgument(_)));
            assert!(err.to_string().contains("expected 1 to 3"));
            assert_eq!(store.get(SAVED_KEY), before);
        }
    }

    #[test]
    fn test_delete_from_empty_list() {
        let mut store = MemoryStore::default();
        let err = JokeList::new(&mut store).delete_joke(1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument: joke number 1 is out of range, no jokes are saved"
        );
        assert_eq!(store.get(SAVED_KEY), "");
    }

    #[test]
    fn test_delete_last_remaining() {
        let mut store = store_with(&["only"]);
        JokeList::new(&mut store).delete_joke(1).unwrap();
        assert_eq!(store.get(SAVED_KEY), "[]");
    }
}
