//! Subject search route
//!
//! Runs the page detection pipeline against the cached syllabus, writes the
//! matching pages to a new PDF and returns where to download it.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::syllabus::{find_subject_pages, ExtractionMethod};

/// Create the search router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(search_subject))
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub subject: String,
    /// 1-based page numbers in the source syllabus
    pub pages: Vec<usize>,
    pub page_count: usize,
    pub download_url: String,
    pub filename: String,
    pub extraction_method: ExtractionMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_course_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_subject_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// `success: false` replies that are not errors
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    fn failure(message: impl Into<String>) -> Response {
        Json(MessageResponse {
            success: false,
            message: message.into(),
        })
        .into_response()
    }
}

async fn search_subject(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let subject = request.subject.trim().to_string();
    if subject.is_empty() {
        return Ok(MessageResponse::failure("Please enter a subject name."));
    }

    let document = state.syllabus_document().await?;
    let config = state.config().search.clone();

    let pipeline_doc = document.clone();
    let query = subject.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        find_subject_pages(pipeline_doc.as_ref(), &query, &config)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Search task failed: {}", e)))?;

    if outcome.pages.is_empty() {
        return Ok(MessageResponse::failure(format!(
            "No pages found for '{}'. Try different keywords or check spelling.",
            subject
        )));
    }

    let artifact = state
        .artifacts()
        .create(document.bytes(), outcome.pages.as_slice(), &subject)
        .await?;

    let (matched_course_code, matched_subject_name, match_score) = match outcome.matched {
        Some(matched) => (
            Some(matched.entry.course_code),
            Some(matched.entry.subject_name),
            Some(matched.score),
        ),
        None => (None, None, None),
    };

    tracing::info!(
        "Search '{}' resolved via {} to {} pages",
        subject,
        outcome.method.as_str(),
        outcome.pages.len()
    );

    Ok(Json(SearchResponse {
        success: true,
        pages: outcome.pages.one_based(),
        page_count: outcome.pages.len(),
        download_url: format!("/api/download/{}", urlencoding::encode(&artifact.filename)),
        filename: artifact.filename,
        extraction_method: outcome.method,
        matched_course_code,
        matched_subject_name,
        match_score,
        subject,
    })
    .into_response())
}
