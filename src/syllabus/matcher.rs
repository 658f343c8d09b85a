//! Subject matching against the table of contents

use serde::Serialize;

use super::fuzzy::{partial_ratio, ratio};
use super::toc::TocEntry;

/// Weight of the whole-word overlap bonus
const WORD_BONUS: f64 = 30.0;

/// A TOC entry chosen for a query, with its score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub entry: TocEntry,
    /// Fuzzy similarity plus word bonus; may exceed 100
    pub score: f64,
}

/// Result of matching a query against the TOC
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Found(MatchResult),
    NotFound,
}

/// Score one entry against an already-lowercased query
pub fn score_entry(query: &str, entry: &TocEntry) -> f64 {
    let name = entry.subject_name.to_lowercase();

    let mut score = ratio(query, &name).max(partial_ratio(query, &name));

    let query_words: Vec<&str> = query.split_whitespace().collect();
    if !query_words.is_empty() {
        let name_words: Vec<&str> = name.split_whitespace().collect();
        let hits = query_words
            .iter()
            .filter(|word| name_words.contains(word))
            .count();
        if hits > 0 {
            score += hits as f64 / query_words.len() as f64 * WORD_BONUS;
        }
    }

    score
}

/// Pick the best-scoring entry, if it reaches `threshold`
///
/// Ties keep the earliest entry.
pub fn match_subject(query: &str, entries: &[TocEntry], threshold: f64) -> MatchOutcome {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return MatchOutcome::NotFound;
    }

    let mut best: Option<(&TocEntry, f64)> = None;
    for entry in entries {
        let score = score_entry(&query, entry);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((entry, score));
        }
    }

    match best {
        Some((entry, score)) if score >= threshold => {
            tracing::info!(
                "Best match: {} - {} (Score: {:.1})",
                entry.course_code,
                entry.subject_name,
                score
            );
            MatchOutcome::Found(MatchResult {
                entry: entry.clone(),
                score,
            })
        }
        Some((entry, score)) => {
            tracing::debug!(
                "Best candidate {} scored {:.1}, below threshold {:.1}",
                entry.course_code,
                score,
                threshold
            );
            MatchOutcome::NotFound
        }
        None => MatchOutcome::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_found(outcome: MatchOutcome) -> MatchResult {
        match outcome {
            MatchOutcome::Found(result) => result,
            MatchOutcome::NotFound => panic!("expected a match"),
        }
    }

    fn entries() -> Vec<TocEntry> {
        vec![
            TocEntry::new("21CSC101T", "Programming for Problem Solving", 19),
            TocEntry::new("21CSE204J", "Data Structures and Algorithms", 142),
            TocEntry::new("21CSE205T", "Operating Systems", 149),
            TocEntry::new("21CSE499T", "Neural Network Models of Cognition", 529),
        ]
    }

    #[test]
    fn test_data_structures_selects_dsa() {
        let result = expect_found(match_subject("Data Structures", &entries(), 70.0));
        assert_eq!(result.entry.course_code, "21CSE204J");
        assert!(result.score >= 70.0);
        // partial ratio 100 plus both words present
        assert_eq!(result.score, 130.0);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let result = expect_found(match_subject("  OPERATING systems ", &entries(), 70.0));
        assert_eq!(result.entry.course_code, "21CSE205T");
    }

    #[test]
    fn test_typo_still_matches() {
        let result = expect_found(match_subject("neural netwrk models", &entries(), 70.0));
        assert_eq!(result.entry.course_code, "21CSE499T");
    }

    #[test]
    fn test_unrelated_query_is_not_found() {
        let outcome = match_subject("quantum chromodynamics", &entries(), 70.0);
        assert_eq!(outcome, MatchOutcome::NotFound);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(match_subject("   ", &entries(), 70.0), MatchOutcome::NotFound);
        assert_eq!(match_subject("Data Structures", &[], 70.0), MatchOutcome::NotFound);
    }

    #[test]
    fn test_threshold_is_respected() {
        let outcome = match_subject("Data Structures", &entries(), 131.0);
        assert_eq!(outcome, MatchOutcome::NotFound);

        for threshold in [0.0, 50.0, 70.0, 130.0] {
            if let MatchOutcome::Found(result) = match_subject("data", &entries(), threshold) {
                assert!(result.score >= threshold);
            }
        }
    }

    #[test]
    fn test_first_of_equal_scores_wins() {
        let twins = vec![
            TocEntry::new("21CSE301T", "Compiler Design", 10),
            TocEntry::new("21CSE302T", "Compiler Design", 20),
        ];
        let result = expect_found(match_subject("compiler design", &twins, 70.0));
        assert_eq!(result.entry.course_code, "21CSE301T");
    }

    #[test]
    fn test_word_bonus_is_fractional() {
        let entry = TocEntry::new("21CSE205T", "Operating Systems", 149);
        let full = score_entry("operating systems", &entry);
        assert_eq!(full, 130.0);

        let half = score_entry("operating kernels", &entry);
        let base = ratio("operating kernels", "operating systems")
            .max(partial_ratio("operating kernels", "operating systems"));
        assert_eq!(half, base + 15.0);
    }
}
