//! Response normalization for completion service output
//!
//! The upstream model is instructed to return strict JSON but in practice
//! replies arrive fenced, truncated, or partially off-schema. Everything here
//! recovers locally: a parse failure synthesizes a deterministic fallback
//! result, and schema drift is coerced field by field. No failure in this
//! module ever propagates to the caller.

use serde_json::Value;

use super::result::{DeveloperInsights, Issue, ReviewResult, Severity};

/// Fixed title of the synthetic issue emitted when the response cannot be parsed
pub const ANALYSIS_ERROR_TITLE: &str = "Analysis Error";

/// Health score reported when the response could not be parsed at all
const FALLBACK_HEALTH_SCORE: i64 = 50;

/// Health score substituted when the field is present but not numeric
const COERCED_HEALTH_SCORE: i64 = 75;

/// How much of the submitted code the fallback issue echoes back
const CODE_ECHO_LIMIT: usize = 100;

/// Strip leading/trailing markdown code fences from a raw model response
///
/// Handles both bare fences and fences tagged with `json`.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Normalize a raw completion into a `ReviewResult`
///
/// This function never fails: malformed JSON yields the deterministic
/// fallback result and off-schema fields are coerced to safe defaults.
pub fn normalize_response(raw: &str, original_code: &str) -> ReviewResult {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) => coerce_result(&value, original_code),
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse completion response, using fallback");
            fallback_result(original_code)
        }
    }
}

/// Coerce a parsed payload field by field
///
/// Nothing from the raw payload is trusted without a type check: array fields
/// default to empty when not arrays, the health score defaults when not
/// numeric, and the improved code falls back to the submitted input.
fn coerce_result(value: &Value, original_code: &str) -> ReviewResult {
    ReviewResult {
        bugs: issue_array(value, "bugs"),
        security: issue_array(value, "security"),
        performance: issue_array(value, "performance"),
        clean_code: issue_array(value, "cleanCode"),
        health_score: health_score(value),
        improved_code: value
            .get("improvedCode")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| original_code.to_string()),
        test_cases: string_array(value.get("testCases")),
        developer_insights: insights(value.get("developerInsights")),
    }
}

/// Extract an issue array, dropping elements that fail validation
fn issue_array(value: &Value, key: &str) -> Vec<Issue> {
    match value.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

/// Extract an array of strings, dropping non-string elements
fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Coerce the health score: numeric values are rounded and clamped to 0-100
fn health_score(value: &Value) -> i64 {
    match value.get("healthScore").and_then(Value::as_f64) {
        Some(score) => (score.round() as i64).clamp(0, 100),
        None => COERCED_HEALTH_SCORE,
    }
}

/// Coerce the developer-insights block
fn insights(value: Option<&Value>) -> DeveloperInsights {
    DeveloperInsights {
        summary: value
            .and_then(|v| v.get("summary"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("Code analysis completed")
            .to_string(),
        key_points: string_array(value.and_then(|v| v.get("keyPoints"))),
        recommendations: string_array(value.and_then(|v| v.get("recommendations"))),
    }
}

/// Deterministic result used when the response cannot be parsed as JSON
///
/// Carries exactly one low-severity bug describing the failure, echoes the
/// submitted code back unchanged as the improved code, and never itself
/// fails.
pub fn fallback_result(original_code: &str) -> ReviewResult {
    let mut echo: String = original_code.chars().take(CODE_ECHO_LIMIT).collect();
    echo.push_str("...");

    ReviewResult {
        bugs: vec![Issue {
            title: ANALYSIS_ERROR_TITLE.to_string(),
            description: "Failed to parse AI response. Please try again.".to_string(),
            severity: Severity::Low,
            line: 0,
            code: echo,
            fix: Some("Try reviewing the code again".to_string()),
            explanation: Some(
                "There was an error processing the review. Please check the code and try again."
                    .to_string(),
            ),
        }],
        security: Vec::new(),
        performance: Vec::new(),
        clean_code: Vec::new(),
        health_score: FALLBACK_HEALTH_SCORE,
        improved_code: original_code.to_string(),
        test_cases: Vec::new(),
        developer_insights: DeveloperInsights {
            summary: "Unable to complete full analysis".to_string(),
            key_points: vec!["Please try again".to_string()],
            recommendations: vec![
                "Check code syntax".to_string(),
                "Ensure code is complete".to_string(),
            ],
        },
    }
}
