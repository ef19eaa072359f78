//! HTTP routes for the ReviewAI API

mod report;
mod review;

use axum::routing::post;
use axum::Router;

use crate::state::AppState;

/// Build the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/review", post(review::review))
        .route("/api/report", post(report::report))
}
