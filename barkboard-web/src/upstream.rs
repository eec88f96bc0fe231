//! Upstream feed client
//!
//! Fetches the hosted record batches (dogs, short posts, proposed changes)
//! as whole JSON arrays. Each fetch is all-or-nothing: a row that fails to
//! decode rejects the batch, so a partial snapshot never reaches the cache.

use std::time::Duration;

use barkboard_common::config::UpstreamSettings;
use barkboard_common::ingest::{
    change_batch, dog_batch, short_batch, ChangeRow, RawDogRow, ShortPostRow,
};
use barkboard_common::model::{DogRecord, ProposedChange, ShortPost};
use serde::de::DeserializeOwned;
use thiserror::Error;

const USER_AGENT: &str = concat!("barkboard/", env!("CARGO_PKG_VERSION"));
const BACKOFF_BASE_MS: u64 = 1000;
const BACKOFF_CAP_MS: u64 = 30_000;

/// Upstream client errors
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned {0}: {1}")]
    Status(u16, String),

    #[error("Malformed batch: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Decode failures are permanent for a given batch; client errors
    /// other than 429 mean the request itself is wrong.
    fn retryable(&self) -> bool {
        match self {
            UpstreamError::Network(_) => true,
            UpstreamError::Status(code, _) => *code >= 500 || *code == 429,
            UpstreamError::Decode(_) => false,
        }
    }
}

/// Exponential backoff: 1s, 2s, 4s, ... capped at 30s
fn backoff_delay(attempt: u32) -> Duration {
    let ms = BACKOFF_BASE_MS.saturating_mul(1u64 << attempt.min(5));
    Duration::from_millis(ms.min(BACKOFF_CAP_MS))
}

/// Client for the hosted record feed
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl UpstreamClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
        })
    }

    /// Fetch the full dog batch
    pub async fn fetch_dogs(&self) -> Result<Vec<DogRecord>, UpstreamError> {
        let rows: Vec<RawDogRow> = self.get_batch("/dogs").await?;
        Ok(dog_batch(rows))
    }

    /// Fetch the breed short posts
    pub async fn fetch_shorts(&self) -> Result<Vec<ShortPost>, UpstreamError> {
        let rows: Vec<ShortPostRow> = self.get_batch("/shorts").await?;
        Ok(short_batch(rows))
    }

    /// Fetch the proposed record changes
    pub async fn fetch_changes(&self) -> Result<Vec<ProposedChange>, UpstreamError> {
        let rows: Vec<ChangeRow> = self.get_batch("/changes").await?;
        Ok(change_batch(rows))
    }

    /// GET a JSON array, retrying transient failures with exponential
    /// backoff
    async fn get_batch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        let mut attempt = 0u32;

        loop {
            match self.get_once(&url).await {
                Ok(rows) => return Ok(rows),
                Err(err) if attempt < self.max_retries && err.retryable() => {
                    let delay = backoff_delay(attempt);
                    tracing::warn!(
                        url = %url,
                        attempt,
                        error = %err,
                        "Fetch failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, UpstreamError> {
        tracing::debug!(url = %url, "Fetching upstream batch");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status(status.as_u16(), body));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(0), Duration::from_millis(1000));
        assert_eq!(backoff_delay(1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(2), Duration::from_millis(4000));
        assert_eq!(backoff_delay(4), Duration::from_millis(16000));
        assert_eq!(backoff_delay(5), Duration::from_millis(30000));
        assert_eq!(backoff_delay(12), Duration::from_millis(30000));
    }

    #[test]
    fn decode_errors_are_not_retried() {
        assert!(UpstreamError::Network("timed out".into()).retryable());
        assert!(UpstreamError::Status(503, String::new()).retryable());
        assert!(UpstreamError::Status(429, String::new()).retryable());
        assert!(!UpstreamError::Status(404, String::new()).retryable());
        assert!(!UpstreamError::Decode("bad row".into()).retryable());
    }

    #[test]
    fn client_builds_from_default_settings() {
        let client = UpstreamClient::new(&UpstreamSettings::default());
        assert!(client.is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let settings = UpstreamSettings {
            base_url: "http://feed.example/".to_string(),
            ..UpstreamSettings::default()
        };
        let client = UpstreamClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "http://feed.example");
    }
}
