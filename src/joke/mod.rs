//! Joke fetching and the saved joke list
//!
//! - fetcher: single HTTP GET against the joke endpoint
//! - saved: append/list/delete over the list stored in config

pub mod fetcher;
pub mod saved;

pub use fetcher::{Fetcher, JokeSource};
pub use saved::{JokeList, LAST_KEY};
