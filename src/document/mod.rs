//! Document abstraction
//!
//! A syllabus is loaded once, its page text extracted, and the result shared
//! read-only through [`DocumentCache`]. The detection heuristics see it only
//! through the [`PageSource`] trait.
//!
//! ```text
//!   SourceFetcher ──bytes──▶ DocumentCache::load_from_bytes
//!                                   │ (spawn_blocking, MuPDF)
//!                                   ▼
//!                          Arc<SyllabusDocument> ──▶ syllabus::find_subject_pages
//! ```

mod cache;
mod error;
mod syllabus;
mod traits;

pub use cache::{CacheConfig, DocumentCache};
pub use error::{DocumentError, DocumentResult, Result};
pub use syllabus::{PageText, SyllabusDocument};
pub use traits::PageSource;
