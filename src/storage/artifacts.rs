//! Extracted subject PDFs on disk
//!
//! Each successful search writes one artifact named
//! `syllabus_<subject>_<uuid>.pdf`. Artifacts are validated after writing and
//! swept once they outlive the configured TTL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::config::ArtifactConfig;
use crate::pdf::{self, PdfWriteError};
use crate::syllabus::patterns::RE_WHITESPACE;

/// Filename prefix shared by every artifact
pub const ARTIFACT_PREFIX: &str = "syllabus_";

/// Characters of the cleaned subject kept in a filename
const SUBJECT_SLUG_LEN: usize = 20;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to build output PDF: {0}")]
    Pdf(#[from] PdfWriteError),

    #[error("Artifact IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generated PDF is too small ({0} bytes)")]
    TooSmall(u64),

    #[error("Generated PDF has {found} pages, expected {expected}")]
    PageMismatch { expected: usize, found: usize },

    #[error("Invalid artifact name: {0}")]
    InvalidName(String),

    #[error("PDF writer task failed: {0}")]
    Join(String),
}

/// A written output PDF
#[derive(Debug, Clone)]
pub struct Artifact {
    pub filename: String,
    pub path: PathBuf,
    pub size: u64,
    pub pages: usize,
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    config: ArtifactConfig,
}

/// Reduce a subject to a filename-safe slug
///
/// Drops everything except word characters, whitespace and hyphens, folds
/// whitespace runs to `_` and keeps the first 20 characters.
pub fn clean_subject(subject: &str) -> String {
    let kept: String = subject
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_' || *c == '-')
        .collect();

    RE_WHITESPACE
        .replace_all(&kept, "_")
        .chars()
        .take(SUBJECT_SLUG_LEN)
        .collect()
}

impl ArtifactStore {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    pub fn filename_for(subject: &str) -> String {
        format!("{}{}_{}.pdf", ARTIFACT_PREFIX, clean_subject(subject), Uuid::new_v4())
    }

    /// Write a PDF holding `pages` (zero-indexed) of `source`
    ///
    /// The file is reopened and checked before it is handed out; a file that
    /// fails the checks is removed.
    pub async fn create(
        &self,
        source: Arc<Vec<u8>>,
        pages: &[usize],
        subject: &str,
    ) -> Result<Artifact, ArtifactError> {
        if let Err(e) = self.sweep_expired().await {
            tracing::warn!("Artifact sweep failed: {}", e);
        }

        tokio::fs::create_dir_all(&self.config.dir).await?;

        let indices = pages.to_vec();
        let selected = tokio::task::spawn_blocking(move || pdf::select_pages(&source, &indices))
            .await
            .map_err(|e| ArtifactError::Join(e.to_string()))??;

        let filename = Self::filename_for(subject);
        let path = self.config.dir.join(&filename);
        tokio::fs::write(&path, &selected.bytes).await?;

        match self.validate(&path, selected.pages_added).await {
            Ok(size) => {
                tracing::info!(
                    "Created {} ({} pages, {} bytes)",
                    filename,
                    selected.pages_added,
                    size
                );
                Ok(Artifact {
                    filename,
                    path,
                    size,
                    pages: selected.pages_added,
                })
            }
            Err(e) => {
                if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Failed to remove invalid artifact {}: {}", filename, remove_err);
                }
                Err(e)
            }
        }
    }

    async fn validate(&self, path: &Path, expected: usize) -> Result<u64, ArtifactError> {
        let size = tokio::fs::metadata(path).await?.len();
        if size < self.config.min_bytes {
            return Err(ArtifactError::TooSmall(size));
        }

        let written = tokio::fs::read(path).await?;
        let found = pdf::count_pages(&written)?;
        if found != expected {
            return Err(ArtifactError::PageMismatch { expected, found });
        }

        Ok(size)
    }

    /// Resolve a client-supplied artifact name to its path
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, ArtifactError> {
        let valid = filename.starts_with(ARTIFACT_PREFIX)
            && filename.ends_with(".pdf")
            && !filename.contains("..")
            && !filename.contains(&['/', '\\'][..]);

        if !valid {
            return Err(ArtifactError::InvalidName(filename.to_string()));
        }

        Ok(self.config.dir.join(filename))
    }

    /// Delete artifacts older than the TTL, returning how many were removed
    pub async fn sweep_expired(&self) -> std::io::Result<usize> {
        if self.config.ttl_secs == 0 {
            return Ok(0);
        }

        let mut entries = match tokio::fs::read_dir(&self.config.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let ttl = chrono::Duration::seconds(self.config.ttl_secs as i64);
        let now = Utc::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(ARTIFACT_PREFIX) || !name.ends_with(".pdf") {
                continue;
            }

            let modified: DateTime<Utc> = entry.metadata().await?.modified()?.into();
            if now - modified > ttl {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::debug!("Swept {} expired artifacts", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::build_pdf;

    fn store(dir: &Path, min_bytes: u64) -> ArtifactStore {
        ArtifactStore::new(ArtifactConfig {
            dir: dir.to_path_buf(),
            min_bytes,
            ttl_secs: 3600,
        })
    }

    fn source_pdf() -> Arc<Vec<u8>> {
        Arc::new(build_pdf(&[
            &["Cover"],
            &["21CSC201J Course Name Data Structures"],
            &["Unit I Arrays"],
            &["21CSC202J Course Name Operating Systems"],
        ]))
    }

    #[test]
    fn test_clean_subject() {
        assert_eq!(clean_subject("Data Structures"), "Data_Structures");
        assert_eq!(clean_subject("  C++ / Algorithms!  "), "C_Algorithms");
        assert_eq!(clean_subject("Neural Network Models of Cognition"), "Neural_Network_Model");
        assert_eq!(clean_subject("multi   space\tgap"), "multi_space_gap");
        assert_eq!(clean_subject("self-study_unit"), "self-study_unit");
    }

    #[test]
    fn test_filename_for() {
        let name = ArtifactStore::filename_for("Data Structures");
        assert!(name.starts_with("syllabus_Data_Structures_"));
        assert!(name.ends_with(".pdf"));
        assert_ne!(name, ArtifactStore::filename_for("Data Structures"));
    }

    #[tokio::test]
    async fn test_create_writes_selected_pages() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 0);

        let artifact = store.create(source_pdf(), &[1, 2], "Data Structures").await.unwrap();
        assert_eq!(artifact.pages, 2);
        assert!(artifact.path.exists());

        let written = std::fs::read(&artifact.path).unwrap();
        assert_eq!(written.len() as u64, artifact.size);
        assert_eq!(pdf::count_pages(&written).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 0);

        let result = store.create(source_pdf(), &[], "Nothing").await;
        assert!(matches!(result, Err(ArtifactError::Pdf(PdfWriteError::NoPages))));
    }

    #[tokio::test]
    async fn test_create_removes_undersized_output() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 10_000_000);

        let result = store.create(source_pdf(), &[1], "Data Structures").await;
        assert!(matches!(result, Err(ArtifactError::TooSmall(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path(), 0);

        assert!(store.resolve("syllabus_Data_abc.pdf").is_ok());
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("syllabus_../../x.pdf").is_err());
        assert!(store.resolve("syllabus_a/b.pdf").is_err());
        assert!(store.resolve("notes.pdf").is_err());
        assert!(store.resolve("syllabus_notes.txt").is_err());
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("syllabus_old_1.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("unrelated.pdf"), b"x").unwrap();

        // Fresh files survive a normal sweep
        let kept = store(dir.path(), 0);
        assert_eq!(kept.sweep_expired().await.unwrap(), 0);

        // With a one second TTL and an aged file, only our artifact goes
        let short = ArtifactStore::new(ArtifactConfig {
            dir: dir.path().to_path_buf(),
            min_bytes: 0,
            ttl_secs: 1,
        });
        tokio::time::sleep(std::time::Duration::from_millis(2100)).await;
        assert_eq!(short.sweep_expired().await.unwrap(), 1);
        assert!(dir.path().join("unrelated.pdf").exists());
        assert!(!dir.path().join("syllabus_old_1.pdf").exists());
    }

    #[tokio::test]
    async fn test_sweep_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir.path().join("absent"), 0);
        assert_eq!(store.sweep_expired().await.unwrap(), 0);
    }
}
