//! Artifact download route

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the download router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename", get(download_artifact))
}

/// Serve a previously generated subject PDF
async fn download_artifact(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let path = state.artifacts().resolve(&filename)?;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("File not found: {}", filename)));
        }
        Err(e) => return Err(e.into()),
    };

    if bytes.is_empty() {
        return Err(AppError::Internal(format!("File is empty: {}", filename)));
    }

    tracing::debug!("Serving {} ({} bytes)", filename, bytes.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{get_json, post_json, send, test_app};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_download_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let (_, body) = post_json(app.clone(), "/api/search", json!({ "subject": "Data Structures" })).await;
        let url = body["download_url"].as_str().unwrap();

        let request = Request::builder().uri(url).body(Body::empty()).unwrap();
        let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment;"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(crate::pdf::count_pages(&bytes).unwrap(), 2);
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let (status, body) = get_json(app, "/api/download/syllabus_missing.pdf").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_download_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("syllabus_empty.pdf"), b"").unwrap();
        let app = test_app(dir.path()).await;

        let (status, _) = get_json(app, "/api/download/syllabus_empty.pdf").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_download_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let request = Request::builder()
            .uri("/api/download/..%2F..%2Fetc%2Fpasswd.pdf")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
