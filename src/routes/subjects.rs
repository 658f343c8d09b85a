//! Subject listing route
//!
//! Exposes the parsed table of contents so clients can offer suggestions.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::syllabus::{parse_table_of_contents, TocEntry};

/// Create the subjects router
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_subjects))
}

#[derive(Debug, Serialize)]
pub struct SubjectSummary {
    pub code: String,
    pub name: String,
    pub display: String,
    /// 1-based start page from the TOC
    pub page: usize,
}

impl From<TocEntry> for SubjectSummary {
    fn from(entry: TocEntry) -> Self {
        Self {
            display: format!("{} - {}", entry.course_code, entry.subject_name),
            page: entry.page_number + 1,
            code: entry.course_code,
            name: entry.subject_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubjectsResponse {
    pub success: bool,
    pub subjects: Vec<SubjectSummary>,
    pub count: usize,
}

async fn list_subjects(State(state): State<AppState>) -> Result<Json<SubjectsResponse>> {
    let document = state.syllabus_document().await?;
    let scan_pages = state.config().search.toc_scan_pages;
    let manual_entries = state.config().search.manual_entries.clone();

    let entries = tokio::task::spawn_blocking(move || {
        parse_table_of_contents(document.as_ref(), scan_pages, &manual_entries)
    })
    .await
    .map_err(|e| AppError::Internal(format!("TOC task failed: {}", e)))?;

    let subjects: Vec<SubjectSummary> = entries.into_iter().map(SubjectSummary::from).collect();

    Ok(Json(SubjectsResponse {
        success: true,
        count: subjects.len(),
        subjects,
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_subjects() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let (status, body) = get_json(app, "/api/subjects").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 2);
        assert_eq!(body["subjects"][0]["code"], "21CSE204J");
        assert_eq!(body["subjects"][0]["name"], "Data Structures and Algorithms");
        assert_eq!(body["subjects"][0]["display"], "21CSE204J - Data Structures and Algorithms");
        assert_eq!(body["subjects"][0]["page"], 5);
        assert_eq!(body["subjects"][1]["page"], 7);
    }
}
