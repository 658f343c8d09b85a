//! Document cache with LRU eviction
//!
//! Loaded syllabus documents keyed by source identifier. Entries are
//! write-once: a document is parsed a single time and then shared through
//! `Arc` by every request that reads it.
//!
//! # Thread Safety
//!
//! The map sits behind a `tokio::sync::RwLock`. Two requests that miss at the
//! same time may both load the source; the second insert overwrites the first
//! with identical content.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::{timeout, Duration};

use super::{DocumentError, DocumentResult, PageSource, SyllabusDocument};

/// Timeout for document parsing operations
const PARSE_TIMEOUT_SECS: u64 = 120;

/// Cache configuration options
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of loaded documents to keep
    pub max_documents: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_documents: 4 }
    }
}

/// Shared cache of loaded documents
#[derive(Clone)]
pub struct DocumentCache {
    documents: Arc<RwLock<LruCache<String, Arc<SyllabusDocument>>>>,
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl DocumentCache {
    /// Create a new document cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        let size = NonZeroUsize::new(config.max_documents).unwrap_or(NonZeroUsize::MIN);

        Self {
            documents: Arc::new(RwLock::new(LruCache::new(size))),
        }
    }

    /// Look up a loaded document
    pub async fn get(&self, key: &str) -> Option<Arc<SyllabusDocument>> {
        // LRU lookups update recency, so this needs the write lock
        let mut documents = self.documents.write().await;
        documents.get(key).cloned()
    }

    /// Store an already-loaded document
    pub async fn insert(&self, key: String, document: SyllabusDocument) -> Arc<SyllabusDocument> {
        let document = Arc::new(document);
        let mut documents = self.documents.write().await;
        documents.put(key, Arc::clone(&document));
        document
    }

    /// Parse PDF bytes off the async runtime and cache the result
    pub async fn load_from_bytes(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> DocumentResult<Arc<SyllabusDocument>> {
        let id = key.to_string();

        let parse_result = timeout(
            Duration::from_secs(PARSE_TIMEOUT_SECS),
            tokio::task::spawn_blocking(move || SyllabusDocument::from_pdf_bytes(id, bytes)),
        )
        .await;

        let document = match parse_result {
            Ok(join_result) => join_result
                .map_err(|e| DocumentError::ThreadPoolError(format!("Task join error: {}", e)))??,
            Err(_) => return Err(DocumentError::Timeout(PARSE_TIMEOUT_SECS)),
        };

        tracing::debug!(
            "Caching document {} ({} pages)",
            key,
            document.page_count()
        );

        Ok(self.insert(key.to_string(), document).await)
    }

    /// Number of cached documents and the capacity
    pub async fn stats(&self) -> (usize, usize) {
        let documents = self.documents.read().await;
        (documents.len(), documents.cap().get())
    }
}
