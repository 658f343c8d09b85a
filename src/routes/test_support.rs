//! Shared fixture for router tests

use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use crate::build_router;
use crate::config::Config;
use crate::document::{PageText, SyllabusDocument};
use crate::pdf::test_support::build_pdf;
use crate::state::test_support::seeded_state;

/// Eight-page syllabus: TOC on page 2, Data Structures on pages 5-6,
/// Operating Systems from page 7
pub const SYLLABUS_PAGES: &[&[&str]] = &[
    &["SRM Institute of Science and Technology", "Academic Curricula Regulations 2021"],
    &[
        "Contents",
        "21CSE204J Data Structures and Algorithms ..... 5",
        "21CSE205T Operating Systems ..... 7",
    ],
    &["Programme Outcomes"],
    &["Elective Baskets"],
    &[
        "Course Code 21CSE204J Course Name Data Structures and Algorithms Course Category E",
        "Prerequisites Nil Corequisites Nil",
    ],
    &["Unit III Trees", "Unit IV Hashing"],
    &["Course Code 21CSE205T Course Name Operating Systems Course Category C"],
    &["Unit I Processes"],
];

/// Router over a pre-loaded syllabus, writing artifacts into `artifact_dir`
pub async fn test_app(artifact_dir: &Path) -> Router {
    let mut config = Config::default();
    config.artifacts.dir = artifact_dir.to_path_buf();
    config.artifacts.min_bytes = 0;
    config.search.manual_entries = Vec::new();

    let pages = SYLLABUS_PAGES
        .iter()
        .map(|lines| PageText::Text(lines.join("\n")))
        .collect();
    let document = SyllabusDocument::from_parts("memory://syllabus.pdf", build_pdf(SYLLABUS_PAGES), pages);

    let (state, _source) = seeded_state(config, document).await;
    build_router(state)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn post_json(app: Router, uri: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}
