//! Subject page detection
//!
//! Finds the pages of one subject in the syllabus:
//!
//! 1. [`toc`] reads `(code, name, page)` entries from the front matter
//! 2. [`matcher`] picks the entry closest to the user's query
//! 3. [`boundary`] confirms where the template starts and where it ends
//! 4. [`range`] turns the bounds into a page list
//!
//! When steps 1 or 2 come up empty, [`fallback`] scores every page instead.
//! [`search::find_subject_pages`] runs the whole sequence.

pub mod boundary;
pub mod fallback;
pub mod fuzzy;
pub mod matcher;
pub mod patterns;
pub mod range;
pub mod search;
pub mod toc;

pub use boundary::{find_subject_end, find_subject_start, EndWindow, StartWindow};
pub use matcher::{match_subject, MatchOutcome, MatchResult};
pub use range::PageRange;
pub use search::{find_subject_pages, ExtractionMethod, SearchConfig, SearchOutcome};
pub use toc::{default_manual_entries, parse_table_of_contents, TocEntry};
