//! HTTP routes for the lost and found board.
//!
//! This module combines all routes into a single router.

mod items;
pub mod status;

pub use items::{ReportSubmission, UploadedFile};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Path uploaded photos are served under.
pub const UPLOADS_ROUTE: &str = "/static/uploads";

/// Build the route table.
///
/// Route structure:
/// - /, /lost, /found - Listing and report forms
/// - /static/uploads/* - Uploaded photos
/// - /health - Health check
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(items::routes())
        .merge(status::routes())
        .nest_service(UPLOADS_ROUTE, ServeDir::new(state.uploads.dir()))
}

/// Build the complete application with middleware and state attached.
pub fn app(state: AppState, max_upload_size: usize) -> Router {
    Router::new()
        .merge(routes(&state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
