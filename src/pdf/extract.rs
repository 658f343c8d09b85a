//! Plain-text extraction using MuPDF

use mupdf::Document;

use crate::document::{DocumentError, DocumentResult, PageText};

const PDF_MIME: &str = "application/pdf";

/// Open a PDF and extract the text of every page
///
/// Failing to open the document is an error. A page that fails to load or
/// extract is recorded as [`PageText::Failed`] so later scans can skip it.
pub fn extract_page_texts(data: &[u8]) -> DocumentResult<Vec<PageText>> {
    if !data.starts_with(b"%PDF") {
        return Err(DocumentError::ParseError("Missing %PDF header".into()));
    }

    let doc = Document::from_bytes(data, PDF_MIME)?;
    let page_count = doc.page_count()? as usize;

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let text = doc
            .load_page(index as i32)
            .and_then(|page| page.to_text());

        match text {
            Ok(text) => pages.push(PageText::Text(text)),
            Err(e) => {
                tracing::warn!("Error extracting text from page {}: {}", index + 1, e);
                pages.push(PageText::Failed(e.to_string()));
            }
        }
    }

    Ok(pages)
}
