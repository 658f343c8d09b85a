//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::document::{DocumentCache, SyllabusDocument};
use crate::error::Result;
use crate::storage::{ArtifactStore, FetchError, SourceFetcher, SyllabusSource};

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to initialize syllabus source: {0}")]
    Source(#[from] FetchError),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    documents: DocumentCache,
    source: Arc<dyn SourceFetcher>,
    artifacts: ArtifactStore,
}

impl AppState {
    /// Create state backed by the configured local file / download URL
    pub fn new(config: Config) -> std::result::Result<Self, StateError> {
        let source = SyllabusSource::new(config.source.clone())?;
        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: Config, source: Arc<dyn SourceFetcher>) -> Self {
        let documents = DocumentCache::new(config.cache.clone());
        let artifacts = ArtifactStore::new(config.artifacts.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                documents,
                source,
                artifacts,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the document cache
    pub fn documents(&self) -> &DocumentCache {
        &self.inner.documents
    }

    pub fn source(&self) -> &dyn SourceFetcher {
        self.inner.source.as_ref()
    }

    /// Get the artifact store
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.inner.artifacts
    }

    /// The parsed syllabus, fetched and parsed on first use
    ///
    /// Concurrent first requests may both load; the later insert wins and
    /// both see identical content.
    pub async fn syllabus_document(&self) -> Result<Arc<SyllabusDocument>> {
        let key = self.source().source_id().to_string();

        if let Some(document) = self.documents().get(&key).await {
            return Ok(document);
        }

        tracing::info!("Loading syllabus {}", key);
        let bytes = self.source().fetch().await?;
        let document = self.documents().load_from_bytes(&key, bytes).await?;

        let (cached, capacity) = self.documents().stats().await;
        tracing::debug!("Document cache holds {}/{} documents", cached, capacity);

        Ok(document)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::document::PageText;
    use crate::error::AppError;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_cached_document_skips_fetch() {
        let document = SyllabusDocument::from_parts(
            "memory://syllabus.pdf",
            Vec::new(),
            vec![PageText::Text("Cover".to_string())],
        );
        let (state, source) = seeded_state(Config::default(), document).await;

        let first = state.syllabus_document().await.unwrap();
        let second = state.syllabus_document().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_surfaces() {
        let source = Arc::new(StaticSource::new(Vec::new()));
        let state = AppState::with_source(Config::default(), source.clone());

        let result = state.syllabus_document().await;
        assert!(matches!(result, Err(AppError::Fetch(FetchError::Empty))));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(state.documents().stats().await.0, 0);
    }
}
