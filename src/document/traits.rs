//! Document traits
//!
//! The detection heuristics only ever need two things from a document:
//! how many pages it has, and the plain text of one page.

use super::error::Result;

/// Page-addressable plain text
///
/// Implemented by the MuPDF-backed [`SyllabusDocument`](super::SyllabusDocument)
/// and by in-memory page lists in tests.
pub trait PageSource: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Plain text of a zero-indexed page
    fn page_text(&self, index: usize) -> Result<String>;

    /// Index of the last page, or `None` for an empty document
    fn last_page(&self) -> Option<usize> {
        self.page_count().checked_sub(1)
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        (**self).page_text(index)
    }
}

impl<T: PageSource + ?Sized> PageSource for std::sync::Arc<T> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        (**self).page_text(index)
    }
}

impl PageSource for Vec<String> {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.get(index)
            .cloned()
            .ok_or(super::DocumentError::PageNotFound(index, self.len()))
    }
}
