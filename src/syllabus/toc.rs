//! Table-of-contents parsing
//!
//! The syllabus lists every course in its front matter as
//! `<course code> <subject name> .... <page>`. Those lines are the primary
//! index into the document.

use serde::{Deserialize, Serialize};

use super::patterns::{RE_COURSE_CODE, RE_SEPARATORS, RE_TRAILING_PAGE, RE_WHITESPACE};
use crate::document::PageSource;

/// One course listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Uppercased course code, e.g. `21CSE204J`
    pub course_code: String,
    /// Subject name with dot leaders removed
    pub subject_name: String,
    /// Zero-indexed page the TOC points at
    pub page_number: usize,
}

impl TocEntry {
    pub fn new(
        course_code: impl Into<String>,
        subject_name: impl Into<String>,
        page_number: usize,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            subject_name: subject_name.into(),
            page_number,
        }
    }
}

/// Courses printed in the syllabus but missing from its table of contents
pub fn default_manual_entries() -> Vec<TocEntry> {
    vec![TocEntry::new(
        "21CSE499T",
        "Neural Network Models of Cognition",
        529,
    )]
}

/// Parse a single TOC line
///
/// Returns `None` unless the line has both a course code and a trailing
/// 1-3 digit page number with a non-empty name between them.
pub fn parse_toc_line(line: &str) -> Option<TocEntry> {
    let line = line.trim();

    let course = RE_COURSE_CODE.find(line)?;
    let page = RE_TRAILING_PAGE.captures(line)?;
    let page_match = page.get(1)?;

    if page_match.start() < course.end() {
        return None;
    }

    // Printed page numbers are 1-based
    let printed: usize = page_match.as_str().parse().ok()?;
    let page_number = printed.checked_sub(1)?;

    let between = &line[course.end()..page_match.start()];
    let without_leaders = RE_SEPARATORS.replace_all(between, "");
    let subject_name = RE_WHITESPACE
        .replace_all(&without_leaders, " ")
        .trim()
        .to_string();

    if subject_name.is_empty() {
        return None;
    }

    Some(TocEntry {
        course_code: course.as_str().to_uppercase(),
        subject_name,
        page_number,
    })
}

/// Scan the first `scan_pages` pages for TOC lines, then merge `manual_entries`
pub fn parse_table_of_contents<S>(
    doc: &S,
    scan_pages: usize,
    manual_entries: &[TocEntry],
) -> Vec<TocEntry>
where
    S: PageSource + ?Sized,
{
    let window = scan_pages.min(doc.page_count());
    tracing::info!("Parsing table of contents from the first {} pages", window);

    let mut entries = Vec::new();

    for page in 0..window {
        let text = match doc.page_text(page) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Error parsing TOC page {}: {}", page + 1, e);
                continue;
            }
        };

        for entry in text.lines().filter_map(parse_toc_line) {
            tracing::debug!(
                "Found: {} - {} (Page {})",
                entry.course_code,
                entry.subject_name,
                entry.page_number + 1
            );
            entries.push(entry);
        }
    }

    merge_manual_entries(&mut entries, manual_entries);

    tracing::info!("Table of contents has {} entries", entries.len());
    entries
}

/// Append each manual entry whose course code is not already present
pub fn merge_manual_entries(entries: &mut Vec<TocEntry>, manual_entries: &[TocEntry]) {
    for manual in manual_entries {
        if entries.iter().any(|e| e.course_code == manual.course_code) {
            continue;
        }
        tracing::info!(
            "Manual override: {} - {} (Page {})",
            manual.course_code,
            manual.subject_name,
            manual.page_number + 1
        );
        entries.push(manual.clone());
    }
}
