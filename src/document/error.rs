//! Document error types

use thiserror::Error;

/// Errors raised while loading a document or reading its pages
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Page index outside the document
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),

    /// Failed to open or parse the PDF
    #[error("Parse error: {0}")]
    ParseError(String),

    /// MuPDF context error
    #[error("MuPDF context error: {0}")]
    ContextError(String),

    /// Text extraction failed for a single page
    #[error("Text extraction error on page {page}: {message}")]
    TextExtraction { page: usize, message: String },

    /// Blocking task failed to join
    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    /// Timeout error
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by callers outside the module)
pub type DocumentResult<T> = Result<T>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::ContextError(err.to_string())
    }
}
