//! PDF report endpoint

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use reviewai_core::report::{self, REPORT_FILENAME};
use reviewai_core::review::{ExplainLevel, ReviewResult};
use serde::Deserialize;
use tracing::error;

use crate::error::ApiError;

/// Request body for report generation
///
/// Mirrors the review endpoint's wire shape; the submitted `code` field is
/// accepted but not rendered (only the improved code appears in the report).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Language the reviewed code was written in
    #[serde(default)]
    pub language: String,

    /// The normalized review result to render
    pub results: Option<ReviewResult>,

    /// Explanation level the review was run with
    #[serde(default)]
    pub explain_level: ExplainLevel,
}

/// POST /api/report: render a review result into a downloadable PDF
pub async fn report(Json(request): Json<ReportRequest>) -> Result<Response, ApiError> {
    let Some(results) = request.results else {
        return Err(ApiError::BadRequest("Results are required"));
    };

    let bytes = report::render(
        &request.language,
        &results,
        request.explain_level,
        Utc::now(),
    )
    .map_err(|err| {
        error!(error = %err, "report rendering failed");
        ApiError::Render {
            message: "Failed to generate PDF",
            details: err.to_string(),
        }
    })?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", REPORT_FILENAME),
        ),
    ];

    Ok((StatusCode::OK, headers, bytes).into_response())
}
