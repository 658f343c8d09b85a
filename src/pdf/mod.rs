//! PDF plumbing
//!
//! Text extraction goes through MuPDF; page selection for the output
//! document goes through lopdf, which can rewrite the page tree in place.

mod extract;
mod writer;

pub use extract::extract_page_texts;
pub use writer::{count_pages, select_pages, PdfWriteError, SelectedPdf};

#[cfg(test)]
pub(crate) use writer::test_support;
