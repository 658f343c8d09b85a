//! Full-text fallback scan
//!
//! Used when the table of contents is missing or has no entry close enough
//! to the query. Every page is scored directly against the query.

use super::fuzzy::partial_ratio;
use super::patterns::{RE_COURSE_CODE, SYLLABUS_KEYWORDS};
use crate::document::PageSource;

const COURSE_CODE_BONUS: f64 = 25.0;
const KEYWORD_BONUS: f64 = 15.0;
/// Floor applied when the query appears verbatim on the page
const VERBATIM_FLOOR: f64 = 90.0;

/// Score one page against a lowercased query
pub fn score_page(query: &str, text: &str) -> f64 {
    let text = text.to_lowercase();
    let mut score = partial_ratio(query, &text);

    if RE_COURSE_CODE.is_match(&text) {
        score += COURSE_CODE_BONUS;
    }
    if SYLLABUS_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        score += KEYWORD_BONUS;
    }
    if text.contains(query) {
        score = score.max(VERBATIM_FLOOR);
    }

    score
}

/// Indices of all pages scoring at least `threshold`, sorted and deduplicated
pub fn scan_pages<S>(doc: &S, subject: &str, threshold: f64) -> Vec<usize>
where
    S: PageSource + ?Sized,
{
    let query = subject.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    tracing::info!("Fallback search for subject: {}", subject);

    let mut pages: Vec<usize> = (0..doc.page_count())
        .filter(|&page| match doc.page_text(page) {
            Ok(text) => score_page(&query, &text) >= threshold,
            Err(e) => {
                tracing::warn!("Error processing page {}: {}", page + 1, e);
                false
            }
        })
        .collect();

    pages.sort_unstable();
    pages.dedup();

    tracing::info!("Fallback search matched {} pages", pages.len());
    pages
}
