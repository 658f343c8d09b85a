//! Page-range assembly

use serde::Serialize;

/// Sorted, deduplicated zero-indexed pages, all inside the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageRange(Vec<usize>);

impl PageRange {
    /// Inclusive `start..=end`, clipped to `page_count`
    ///
    /// Empty when `end < start`.
    pub fn from_bounds(start: usize, end: usize, page_count: usize) -> Self {
        if end < start {
            return Self::default();
        }
        Self((start..=end).take_while(|&page| page < page_count).collect())
    }

    /// Arbitrary page list, sorted and deduplicated, pages outside the document dropped
    pub fn from_pages(pages: impl IntoIterator<Item = usize>, page_count: usize) -> Self {
        let mut pages: Vec<usize> = pages
            .into_iter()
            .filter(|&page| page < page_count)
            .collect();
        pages.sort_unstable();
        pages.dedup();
        Self(pages)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Page numbers as printed (1-based)
    pub fn one_based(&self) -> Vec<usize> {
        self.0.iter().map(|page| page + 1).collect()
    }
}
