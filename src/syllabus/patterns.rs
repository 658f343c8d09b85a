//! Pattern tables for the syllabus template
//!
//! Every heuristic in this crate is driven by the regexes and rule tables
//! below, so each marker can be tested on its own.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

lazy_static! {
    /// Course code anywhere in a line, any case: `21` + 3 letters + 3 digits + optional letter
    pub static ref RE_COURSE_CODE: Regex = Regex::new(r"(?i)21[A-Z]{3}\d{3}[A-Z]?").unwrap();

    /// Course code as printed in a template header (uppercase only)
    pub static ref RE_COURSE_CODE_STRICT: Regex = Regex::new(r"21[A-Z]{3}\d{3}[A-Z]?").unwrap();

    /// 1-3 digit page number closing a TOC line
    pub static ref RE_TRAILING_PAGE: Regex = Regex::new(r"\b(\d{1,3})\s*$").unwrap();

    /// Dot leaders and bullet glyphs between a TOC title and its page number
    pub static ref RE_SEPARATORS: Regex = Regex::new(r"[.…·•]+").unwrap();

    pub static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// Full template header row
    pub static ref RE_TEMPLATE_HEADER: Regex =
        Regex::new(r"(?i)Course\s+Code.*Course\s+Name.*Course\s+Category").unwrap();

    static ref RE_PREREQUISITES: Regex = Regex::new(r"(?i)Prerequisites.*Corequisites").unwrap();

    static ref RE_OBJECTIVES: Regex =
        Regex::new(r"(?i)Course\s+Objectives.*Course\s+Outcomes").unwrap();

    static ref RE_UNITS: Regex = Regex::new(r"(?i)Unit\s+I.*Unit\s+II").unwrap();

    /// Generic front matter that mentions course codes without being a syllabus page
    pub static ref RE_FRONT_MATTER: Regex =
        Regex::new(r"(?i)Academic\s+Curricula|Regulations\s+\d{4}|General\s+Information").unwrap();

    /// Front matter plus the institution banner printed on cover pages
    pub static ref RE_COVER_PAGE: Regex = Regex::new(
        r"(?i)Academic\s+Curricula|Regulations\s+\d{4}|SRM\s+Institute|General\s+Information"
    )
    .unwrap();
}

/// Words that mark a page as part of a syllabus
pub const SYLLABUS_KEYWORDS: &[&str] = &["syllabus", "course", "curriculum"];

/// Acceptance rule for a candidate start page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartRule {
    /// Minimum number of template indicators on the page
    pub min_indicators: usize,
    /// Reject the page when it also carries front-matter markers
    pub reject_front_matter: bool,
}

/// Start-page rules in order of confidence; the first rule a page satisfies accepts it
pub const START_RULES: &[StartRule] = &[
    StartRule {
        min_indicators: 2,
        reject_front_matter: false,
    },
    StartRule {
        min_indicators: 1,
        reject_front_matter: true,
    },
];

impl StartRule {
    /// Whether a page with `indicators` hits and the given text passes this rule
    pub fn accepts(&self, indicators: usize, text: &str) -> bool {
        indicators >= self.min_indicators
            && !(self.reject_front_matter && RE_FRONT_MATTER.is_match(text))
    }
}

/// The structural indicators of one course's template
pub struct IndicatorSet {
    patterns: Vec<(&'static str, Regex)>,
}

impl IndicatorSet {
    /// Indicators for `course_code`: the four fixed template markers plus
    /// the code printed next to a "Course Name" label
    pub fn for_course(course_code: &str) -> Self {
        let mut patterns = vec![
            ("template_header", RE_TEMPLATE_HEADER.clone()),
            ("prerequisites", RE_PREREQUISITES.clone()),
            ("objectives_outcomes", RE_OBJECTIVES.clone()),
            ("units", RE_UNITS.clone()),
        ];

        let labelled = format!(r"{}.*Course\s+Name", regex::escape(course_code));
        match RegexBuilder::new(&labelled).case_insensitive(true).build() {
            Ok(re) => patterns.push(("code_with_name", re)),
            Err(e) => tracing::warn!("Skipping code indicator for {}: {}", course_code, e),
        }

        Self { patterns }
    }

    /// Number of indicators present in `text`
    pub fn count_matches(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .count()
    }

    /// Names of the indicators present in `text`
    pub fn matched_names(&self, text: &str) -> Vec<&'static str> {
        self.patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Case-insensitive check for a specific course code
pub fn contains_course_code(text: &str, course_code: &str) -> bool {
    text.to_lowercase().contains(&course_code.to_lowercase())
}
