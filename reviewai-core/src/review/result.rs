//! Normalized review result types
//!
//! These are the typed counterparts of the JSON the completion service is
//! instructed to return. Every field tolerates absence on the wire; wrong
//! types are handled by the coercion pass in [`super::normalize`].

use serde::{Deserialize, Serialize};

/// Severity of a single review finding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed before the code ships
    Critical,
    /// Serious defect with user-visible impact
    High,
    /// Worth fixing, limited blast radius
    Medium,
    /// Minor or stylistic
    #[default]
    Low,
}

impl Severity {
    /// Get the lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Get the uppercase label used in rendered reports
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single review finding within one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Short descriptive title
    #[serde(default)]
    pub title: String,

    /// Detailed explanation of the finding
    #[serde(default)]
    pub description: String,

    /// Severity of the finding
    #[serde(default)]
    pub severity: Severity,

    /// Line number the finding refers to
    #[serde(default)]
    pub line: i64,

    /// Relevant code snippet
    #[serde(default)]
    pub code: String,

    /// Suggested fix, if the model provided one
    #[serde(default)]
    pub fix: Option<String>,

    /// Explanation at the requested explain level
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Summary guidance produced alongside the categorized issues
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInsights {
    /// Overall summary of code quality
    #[serde(default)]
    pub summary: String,

    /// Ordered key observations
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Ordered recommendations
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The canonical output of a completed review
///
/// Invariant: after normalization every array field is present (possibly
/// empty), never absent. A result is created once per request and never
/// mutated afterward.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    /// Bug findings
    #[serde(default)]
    pub bugs: Vec<Issue>,

    /// Security findings
    #[serde(default)]
    pub security: Vec<Issue>,

    /// Performance findings
    #[serde(default)]
    pub performance: Vec<Issue>,

    /// Clean-code findings
    #[serde(default)]
    pub clean_code: Vec<Issue>,

    /// Overall health score, 0-100
    #[serde(default)]
    pub health_score: i64,

    /// Complete improved version of the submitted code
    #[serde(default)]
    pub improved_code: String,

    /// Suggested test cases
    #[serde(default)]
    pub test_cases: Vec<String>,

    /// Summary insights
    #[serde(default)]
    pub developer_insights: DeveloperInsights,
}

impl ReviewResult {
    /// Total number of findings across all four categories
    pub fn total_issues(&self) -> usize {
        self.bugs.len() + self.security.len() + self.performance.len() + self.clean_code.len()
    }
}
