//! Start and end boundaries of a subject's template
//!
//! The TOC page number is only a hint: the printed number can point at a
//! divider or at the page before the template. The start is confirmed by
//! looking for the template's structural markers near the hint; the end is
//! the page before the next course code appears.

use super::patterns::{
    contains_course_code, IndicatorSet, RE_COURSE_CODE_STRICT, RE_COVER_PAGE, START_RULES,
};
use crate::document::PageSource;

/// Pages searched around the TOC page for the real start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartWindow {
    /// Pages before the TOC page
    pub before: usize,
    /// Pages after the TOC page
    pub after: usize,
}

impl Default for StartWindow {
    fn default() -> Self {
        Self {
            before: 1,
            after: 3,
        }
    }
}

/// Forward scan limits for the end boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndWindow {
    /// Scan pages `start + 1 .. start + scan`
    pub scan: usize,
    /// Span used when no other course shows up
    pub default_span: usize,
}

impl Default for EndWindow {
    fn default() -> Self {
        Self {
            scan: 5,
            default_span: 2,
        }
    }
}

fn read_page<S: PageSource + ?Sized>(doc: &S, page: usize) -> Option<String> {
    match doc.page_text(page) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!("Error checking page {}: {}", page + 1, e);
            None
        }
    }
}

/// Find the page where `course_code`'s template actually begins
///
/// Falls back to `toc_page` when nothing in the window qualifies.
pub fn find_subject_start<S>(
    doc: &S,
    toc_page: usize,
    course_code: &str,
    window: StartWindow,
) -> usize
where
    S: PageSource + ?Sized,
{
    tracing::info!(
        "Finding actual start for {} from TOC page {}",
        course_code,
        toc_page + 1
    );

    let Some(last_page) = doc.last_page() else {
        return toc_page;
    };
    let first = toc_page.saturating_sub(window.before);
    let last = toc_page.saturating_add(window.after).min(last_page);
    if first > last {
        tracing::info!("TOC page {} is outside the document", toc_page + 1);
        return toc_page;
    }

    let candidates: Vec<(usize, String)> = (first..=last)
        .filter_map(|page| read_page(doc, page).map(|text| (page, text)))
        .filter(|(_, text)| contains_course_code(text, course_code))
        .collect();

    let indicators = IndicatorSet::for_course(course_code);
    for (page, text) in &candidates {
        let hits = indicators.count_matches(text);
        if START_RULES.iter().any(|rule| rule.accepts(hits, text)) {
            tracing::info!(
                "Found subject start at page {} ({} indicators)",
                page + 1,
                hits
            );
            return *page;
        }
    }

    for (page, text) in &candidates {
        if RE_COVER_PAGE.is_match(text) {
            tracing::debug!("Skipping general page at {}", page + 1);
            continue;
        }
        tracing::info!("Using page {} as start (code only)", page + 1);
        return *page;
    }

    tracing::info!("Using TOC page {} as start", toc_page + 1);
    toc_page
}

/// Find the last page of the subject starting at `start`
///
/// Returns the page before the first page (within the scan window) whose
/// leading course code differs from `course_code`. A new template header
/// always carries such a code, so it ends the subject the same way. With no
/// other course in sight, the subject is assumed to span `default_span` more
/// pages.
pub fn find_subject_end<S>(doc: &S, start: usize, course_code: &str, window: EndWindow) -> usize
where
    S: PageSource + ?Sized,
{
    let page_count = doc.page_count();
    let scan_end = start.saturating_add(window.scan).min(page_count);

    for page in start + 1..scan_end {
        let Some(text) = read_page(doc, page) else {
            continue;
        };

        if let Some(found) = RE_COURSE_CODE_STRICT.find(&text) {
            if found.as_str() != course_code {
                tracing::info!("Found different course {} at page {}", found.as_str(), page + 1);
                return page - 1;
            }
        }
    }

    let end = match doc.last_page() {
        Some(last_page) => start.saturating_add(window.default_span).min(last_page),
        None => start,
    };
    tracing::info!("Using conservative boundary: page {}", end + 1);
    end
}
