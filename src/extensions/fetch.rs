//! HTTP fetching for remote manifest catalogs.

use anyhow::{bail, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Fetches manifest catalogs over HTTP/HTTPS.
pub struct ManifestFetcher {
    client: Client,
    timeout: Duration,
}

impl ManifestFetcher {
    /// Create a new fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("packmule")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a catalog document from a URL.
    pub fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.text()?)
    }
}

impl Default for ManifestFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetch_returns_body_on_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/list.json");
            then.status(200).body(r#"{"custom_nodes": []}"#);
        });

        let fetcher = ManifestFetcher::new();
        let body = fetcher.fetch(&server.url("/list.json")).unwrap();

        mock.assert();
        assert!(body.contains("custom_nodes"));
    }

    #[test]
    fn fetch_non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.json");
            then.status(404);
        });

        let fetcher = ManifestFetcher::new();
        let err = fetcher.fetch(&server.url("/missing.json")).unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn custom_timeout_is_stored() {
        let fetcher = ManifestFetcher::with_timeout(Duration::from_secs(5));
        assert_eq!(fetcher.timeout(), Duration::from_secs(5));
    }
}
