use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::audio::{error::AudioError, traits::AudioSource};

/// Fetches track bytes from `http(s)://` URLs, `file://` URLs or plain paths.
#[derive(Clone)]
pub struct AudioFetcher {
    client: Client,
}

impl AudioFetcher {
    pub fn new() -> Result<Self, AudioError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AudioError::NetworkError(e.to_string()))?;
        Ok(Self { client })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, AudioError> {
        let start = std::time::Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AudioError::NetworkError(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AudioError::NetworkError(e.to_string()))?;

        info!(
            url,
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "audio_fetcher_remote_loaded"
        );
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AudioSource for AudioFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AudioError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return self.fetch_remote(url).await;
        }

        let path = local_path(url);
        tokio::fs::read(&path)
            .await
            .map_err(|e| AudioError::FileError {
                path,
                reason: e.to_string(),
            })
    }
}

fn local_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}
