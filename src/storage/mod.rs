//! Source retrieval and output artifact storage
//!
//! The syllabus PDF is read from a local copy when present and downloaded
//! otherwise. Extracted subject PDFs are written to a scratch directory and
//! served back by filename.

mod artifacts;
mod fetcher;

pub use artifacts::{clean_subject, Artifact, ArtifactError, ArtifactStore, ARTIFACT_PREFIX};
pub use fetcher::{FetchError, SourceFetcher, SyllabusSource};
