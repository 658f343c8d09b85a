//! Subject page search
//!
//! TOC lookup, then start and end boundaries; the full-text scan takes over
//! whenever the TOC path cannot produce a match.

use serde::Serialize;

use super::boundary::{find_subject_end, find_subject_start, EndWindow, StartWindow};
use super::fallback::scan_pages;
use super::matcher::{match_subject, MatchOutcome, MatchResult};
use super::range::PageRange;
use super::toc::{default_manual_entries, parse_table_of_contents, TocEntry};
use crate::document::PageSource;

/// Tunables for the page search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Minimum score for both the TOC match and the fallback scan
    pub threshold: f64,
    /// Number of leading pages scanned for TOC lines
    pub toc_scan_pages: usize,
    pub start_window: StartWindow,
    pub end_window: EndWindow,
    /// Courses to add when the TOC omits them
    pub manual_entries: Vec<TocEntry>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: 70.0,
            toc_scan_pages: 15,
            start_window: StartWindow::default(),
            end_window: EndWindow::default(),
            manual_entries: default_manual_entries(),
        }
    }
}

/// How the pages were found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Matched a TOC entry and followed its template boundaries
    SmartToc,
    /// Scored every page against the query
    FuzzySearch,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::SmartToc => "smart_toc",
            ExtractionMethod::FuzzySearch => "fuzzy_search",
        }
    }
}

/// Pages found for a subject
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub pages: PageRange,
    /// The TOC entry used, for `SmartToc` results
    pub matched: Option<MatchResult>,
    pub method: ExtractionMethod,
}

impl SearchOutcome {
    fn fallback<S: PageSource + ?Sized>(doc: &S, subject: &str, threshold: f64) -> Self {
        let pages = scan_pages(doc, subject, threshold);
        Self {
            pages: PageRange::from_pages(pages, doc.page_count()),
            matched: None,
            method: ExtractionMethod::FuzzySearch,
        }
    }
}

/// Locate the pages of `subject` in `doc`
pub fn find_subject_pages<S>(doc: &S, subject: &str, config: &SearchConfig) -> SearchOutcome
where
    S: PageSource + ?Sized,
{
    tracing::info!("Smart search for subject: {}", subject);

    let entries = parse_table_of_contents(doc, config.toc_scan_pages, &config.manual_entries);
    if entries.is_empty() {
        tracing::warn!("No TOC entries found, falling back to fuzzy search");
        return SearchOutcome::fallback(doc, subject, config.threshold);
    }

    let matched = match match_subject(subject, &entries, config.threshold) {
        MatchOutcome::Found(result) => result,
        MatchOutcome::NotFound => {
            tracing::warn!("No good match in TOC, falling back to fuzzy search");
            return SearchOutcome::fallback(doc, subject, config.threshold);
        }
    };

    let code = &matched.entry.course_code;
    let start = find_subject_start(doc, matched.entry.page_number, code, config.start_window);
    let end = find_subject_end(doc, start, code, config.end_window);
    let pages = PageRange::from_bounds(start, end, doc.page_count());

    tracing::info!(
        "Extracted pages {} to {} ({} pages) for {}",
        start + 1,
        end + 1,
        pages.len(),
        code
    );

    SearchOutcome {
        pages,
        matched: Some(matched),
        method: ExtractionMethod::SmartToc,
    }
}
