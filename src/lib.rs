//! Syllabus Extractor Library
//!
//! Finds the pages belonging to one subject inside a university syllabus PDF
//! and serves them back as a smaller PDF. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `syllabus`: Page detection pipeline (TOC parsing, matching, boundaries, fallback)
//! - `document`: Parsed syllabus documents and their cache
//! - `pdf`: MuPDF text extraction and lopdf page selection
//! - `storage`: Source fetching and output artifacts
//! - `routes`: HTTP handlers

pub mod config;
pub mod document;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod storage;
pub mod syllabus;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/health", get(routes::health::health_check))
        .nest("/api/search", routes::search::router())
        .nest("/api/subjects", routes::subjects::router())
        .nest("/api/download", routes::download::router())
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
