//! Fuzzy string similarity on a 0-100 scale
//!
//! `ratio` compares two whole strings. `partial_ratio` slides a window as wide
//! as the shorter string across the longer one and keeps the best window, so
//! "data structures" scores 100 against a page that mentions it anywhere
//! while scattered letters in a long page earn little.

/// Whole-string similarity, 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    (strsim::normalized_levenshtein(a, b) * 100.0).round()
}

/// Best similarity of the shorter string against any equal-length window of the longer, 0-100
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let width = short.chars().count();
    if width == 0 {
        return 0.0;
    }

    // Byte offset of every char boundary in `long`, including the end
    let bounds: Vec<usize> = long
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(long.len()))
        .collect();
    let windows = bounds.len() - width;

    let mut best = 0.0f64;
    for start in 0..windows {
        let window = &long[bounds[start]..bounds[start + width]];
        best = best.max(strsim::normalized_levenshtein(short, window));
        if best >= 1.0 {
            break;
        }
    }

    (best * 100.0).round()
}
