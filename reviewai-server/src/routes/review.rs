//! Code review endpoint

use axum::extract::State;
use axum::Json;
use reviewai_core::review::{ReviewRequest, ReviewResult, Reviewer};
use reviewai_db::ReviewRecord;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/review: run a code review against the completion service
///
/// Validates the input, runs the single-shot completion, normalizes the
/// reply, and records a best-effort audit row before responding.
pub async fn review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewResult>, ApiError> {
    if !request.has_required_fields() {
        return Err(ApiError::BadRequest("Code and language are required"));
    }

    let reviewer = Reviewer::new(state.client.clone()).with_sampling(state.sampling);
    let result = reviewer.review(&request).await.map_err(|err| {
        error!(error = %err, "code review failed");
        ApiError::Upstream {
            message: "Failed to review code",
            details: err.to_string(),
        }
    })?;

    persist(&state, &request, &result).await;

    info!(
        language = %request.language,
        health_score = result.health_score,
        issues = result.total_issues(),
        "review completed"
    );

    Ok(Json(result))
}

/// Write the audit row; failures are logged and intentionally ignored
async fn persist(state: &AppState, request: &ReviewRequest, result: &ReviewResult) {
    let Some(ref database) = state.database else {
        return;
    };

    let results_json = match serde_json::to_string(result) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "failed to serialize review result for persistence");
            return;
        }
    };

    let record = ReviewRecord::new(
        request.code.as_str(),
        request.language.as_str(),
        results_json,
        result.health_score,
    );

    if let Err(err) = database.reviews().insert(&record).await {
        warn!(error = %err, "failed to persist review record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{stub_state, StubClient};
    use reviewai_core::completion::SamplingOptions;
    use reviewai_core::review::ANALYSIS_ERROR_TITLE;
    use reviewai_db::Database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_malformed_reply_is_still_200() {
        let stub = StubClient::replying("I am not JSON");
        let state = stub_state(stub);

        let request = ReviewRequest::new("function f(){}", "javascript");
        let Json(result) = review(State(state), Json(request)).await.unwrap();

        assert_eq!(result.bugs.len(), 1);
        assert_eq!(result.bugs[0].title, ANALYSIS_ERROR_TITLE);
        assert_eq!(result.health_score, 50);
        assert_eq!(result.improved_code, "function f(){}");
    }

    #[tokio::test]
    async fn test_missing_language_rejected_without_call() {
        let stub = StubClient::replying("{}");
        let state = stub_state(stub.clone());

        let request = ReviewRequest::new("function f(){}", "");
        let result = review(State(state), Json(request)).await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_review_persists_record() {
        let temp_dir = TempDir::new().unwrap();
        let database = Database::new(temp_dir.path().join("test.db")).await.unwrap();

        let stub = StubClient::replying(r#"{"healthScore": 88}"#);
        let state = crate::state::AppState::new(
            stub,
            Some(database.clone()),
            SamplingOptions::default(),
        );

        let request = ReviewRequest::new("fn main() {}", "rust");
        review(State(state), Json(request)).await.unwrap();

        let records = database.reviews().find_recent(10).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].health_score, 88);
        assert_eq!(records[0].language, "rust");

        let stored: serde_json::Value = records[0].parse_results().unwrap();
        assert_eq!(stored["healthScore"], 88);
    }
}
