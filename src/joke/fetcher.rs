use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ConfigStore;
use crate::error::{JokeboxError, Result};

/// Endpoint used when `joke.url` is not configured
pub const DEFAULT_URL: &str = "https://icanhazdadjoke.com/";

/// Config key overriding the endpoint
pub const URL_KEY: &str = "joke.url";

/// Hard limit on a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A joke as returned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Joke {
    pub id: Option<String>,
    pub joke: String,
}

/// Anything that can produce one joke per call
pub trait JokeSource {
    fn fetch(&self) -> Result<Joke>;
}

/// HTTP joke fetcher
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let mut builder = Client::builder().timeout(timeout);
        if is_loopback(&url) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl JokeSource for Fetcher {
    fn fetch(&self) -> Result<Joke> {
        debug!(url = %self.url, "Requesting joke");

        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()?
            .error_for_status()?;

        let body = response.text()?;
        debug!(bytes = body.len(), "Received joke response");

        parse_joke(&body)
    }
}

/// Decode a response body into a [`Joke`]
pub fn parse_joke(body: &str) -> Result<Joke> {
    serde_json::from_str(body).map_err(JokeboxError::Decode)
}

/// Proxies never see requests to this machine
fn is_loopback(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| matches!(h, "localhost" | "127.0.0.1" | "[::1]")))
        .unwrap_or(false)
}

/// Endpoint for this store: `joke.url` when set, otherwise [`DEFAULT_URL`]
pub fn endpoint(store: &impl ConfigStore) -> String {
    let url = store.get(URL_KEY);
    if url.trim().is_empty() {
        DEFAULT_URL.to_string()
    } else {
        url.trim().to_string()
    }
}
