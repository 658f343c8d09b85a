//! Syllabus PDF retrieval

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SourceConfig;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to read local syllabus: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed with HTTP status {0}")]
    Status(u16),

    #[error("Syllabus source is empty")]
    Empty,
}

/// Produces the raw bytes of the syllabus PDF
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Stable identifier, used as the document cache key
    fn source_id(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}

/// Local file first, HTTP download second
pub struct SyllabusSource {
    config: SourceConfig,
    client: reqwest::Client,
}

impl SyllabusSource {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    async fn read_local(path: &Path) -> Result<Option<Vec<u8>>, FetchError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn download(&self) -> Result<Vec<u8>, FetchError> {
        tracing::info!("Downloading syllabus from {}", self.config.url);

        let response = self.client.get(&self.config.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SourceFetcher for SyllabusSource {
    fn source_id(&self) -> &str {
        &self.config.url
    }

    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let bytes = match Self::read_local(&self.config.local_path).await? {
            Some(bytes) => {
                tracing::info!("Using local syllabus at {}", self.config.local_path.display());
                bytes
            }
            None => self.download().await?,
        };

        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }

        tracing::debug!("Fetched syllabus ({} bytes)", bytes.len());
        Ok(bytes)
    }
}
