//! Loaded syllabus document
//!
//! Text for every page is extracted once when the document is loaded. The
//! document is then shared read-only across requests; a page whose extraction
//! failed keeps its error so each search can log and skip it.

use std::sync::Arc;

use super::error::{DocumentError, DocumentResult};
use super::traits::PageSource;
use crate::pdf;

/// Extracted text of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// Plain text as produced by the extractor
    Text(String),
    /// Extraction failed; holds the extractor's message
    Failed(String),
}

/// A loaded, page-addressable syllabus PDF
#[derive(Debug)]
pub struct SyllabusDocument {
    /// Source identifier (cache key)
    id: String,
    /// Original PDF bytes, kept for page copying
    bytes: Arc<Vec<u8>>,
    /// Per-page text, indexed by zero-based page number
    pages: Vec<PageText>,
}

impl SyllabusDocument {
    /// Parse PDF bytes with MuPDF and extract the text of every page
    ///
    /// This is CPU-bound; callers on the async runtime should wrap it in
    /// `spawn_blocking` (see [`DocumentCache::load_from_bytes`](super::DocumentCache::load_from_bytes)).
    pub fn from_pdf_bytes(id: impl Into<String>, bytes: Vec<u8>) -> DocumentResult<Self> {
        let id = id.into();
        let pages = pdf::extract_page_texts(&bytes)?;

        let failed = pages
            .iter()
            .filter(|p| matches!(p, PageText::Failed(_)))
            .count();
        tracing::info!(
            "Loaded document {} ({} pages, {} without text)",
            id,
            pages.len(),
            failed
        );

        Ok(Self::from_parts(id, bytes, pages))
    }

    /// Assemble a document from already-extracted page text
    pub fn from_parts(id: impl Into<String>, bytes: Vec<u8>, pages: Vec<PageText>) -> Self {
        Self {
            id: id.into(),
            bytes: Arc::new(bytes),
            pages,
        }
    }

    /// Get the document ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw PDF bytes
    pub fn bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }
}

impl PageSource for SyllabusDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> DocumentResult<String> {
        match self.pages.get(index) {
            Some(PageText::Text(text)) => Ok(text.clone()),
            Some(PageText::Failed(message)) => Err(DocumentError::TextExtraction {
                page: index,
                message: message.clone(),
            }),
            None => Err(DocumentError::PageNotFound(index, self.pages.len())),
        }
    }
}
