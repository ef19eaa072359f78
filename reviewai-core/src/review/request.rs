//! Review request types and prompt construction
//!
//! A `ReviewRequest` carries the submitted code plus the review configuration
//! flags. `to_prompt()` renders the single instruction string sent to the
//! completion service, including the exact JSON schema the model must return.
//! The explain-level and security-mode branches are pure string selection.

use serde::{Deserialize, Serialize};

/// System prompt sent with every review completion
pub const SYSTEM_PROMPT: &str =
    "You are an expert code reviewer. Always respond with valid JSON only, no markdown.";

/// Explanation depth requested for issue explanations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplainLevel {
    /// Plain-language, analogy-driven explanations
    Junior,
    /// Technical explanations with trade-offs and production considerations
    #[default]
    Senior,
}

impl ExplainLevel {
    /// Get the wire/display name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplainLevel::Junior => "junior",
            ExplainLevel::Senior => "senior",
        }
    }

    /// Get the explanation-style instruction embedded in the prompt
    fn guidance(&self) -> &'static str {
        match self {
            ExplainLevel::Junior => {
                "Keep explanations simple, clear, and avoid jargon. \
                 Use analogies and step-by-step breakdowns."
            }
            ExplainLevel::Senior => {
                "Provide detailed technical explanations with industry best practices, \
                 trade-offs, and production considerations."
            }
        }
    }
}

impl std::fmt::Display for ExplainLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A code review request as submitted by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    /// The source code to review
    #[serde(default)]
    pub code: String,

    /// Language the code is written in
    #[serde(default)]
    pub language: String,

    /// Bias the review toward security vulnerability classes
    #[serde(default)]
    pub security_mode: bool,

    /// Explanation depth for issue explanations
    #[serde(default)]
    pub explain_level: ExplainLevel,
}

impl ReviewRequest {
    /// Create a new review request with default flags
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            security_mode: false,
            explain_level: ExplainLevel::default(),
        }
    }

    /// Enable or disable security mode
    pub fn with_security_mode(mut self, security_mode: bool) -> Self {
        self.security_mode = security_mode;
        self
    }

    /// Set the explanation level
    pub fn with_explain_level(mut self, explain_level: ExplainLevel) -> Self {
        self.explain_level = explain_level;
        self
    }

    /// Check that both required fields are non-empty
    pub fn has_required_fields(&self) -> bool {
        !self.code.is_empty() && !self.language.is_empty()
    }

    /// Get the category-emphasis instruction for the security-mode flag
    fn category_guidance(&self) -> &'static str {
        if self.security_mode {
            "Focus heavily on security vulnerabilities including SQL injection, XSS, CSRF, \
             authentication flaws, authorization issues, etc."
        } else {
            "Provide balanced analysis across all categories."
        }
    }

    /// Generate the review prompt for the completion service
    ///
    /// The prompt enumerates the exact JSON structure the model must return
    /// and ends with a strict no-markdown instruction.
    pub fn to_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "You are a senior software engineer and AI Code Reviewer at a top-tier tech company. \
             Review the provided {} code as if it is going to production.\n\n",
            self.language
        ));

        prompt.push_str("Analyze the code and provide a JSON response with the following structure:\n");
        prompt.push_str("{\n");
        prompt.push_str(&format!(
            "  \"bugs\": [\n{}\n  ],\n",
            self.issue_schema("bug", "suggested fixed code")
        ));
        prompt.push_str(&format!(
            "  \"security\": [\n{}\n  ],\n",
            self.issue_schema("security issue", "suggested fixed code")
        ));
        prompt.push_str(&format!(
            "  \"performance\": [\n{}\n  ],\n",
            self.issue_schema("performance issue", "suggested optimized code")
        ));
        prompt.push_str(&format!(
            "  \"cleanCode\": [\n{}\n  ],\n",
            self.issue_schema("clean code issue", "suggested improved code")
        ));
        prompt.push_str("  \"healthScore\": 0-100,\n");
        prompt.push_str("  \"improvedCode\": \"full improved version of the code\",\n");
        prompt.push_str("  \"testCases\": [\"test case 1\", \"test case 2\"],\n");
        prompt.push_str("  \"developerInsights\": {\n");
        prompt.push_str("    \"summary\": \"Overall summary of code quality\",\n");
        prompt.push_str("    \"keyPoints\": [\"key point 1\", \"key point 2\"],\n");
        prompt.push_str("    \"recommendations\": [\"recommendation 1\", \"recommendation 2\"]\n");
        prompt.push_str("  }\n");
        prompt.push_str("}\n\n");

        prompt.push_str("Important Guidelines:\n");
        prompt.push_str(&format!(
            "1. For {} level explanations: {}\n",
            self.explain_level,
            self.explain_level.guidance()
        ));
        prompt.push_str(&format!("2. {}\n", self.category_guidance()));
        prompt.push_str(
            "3. Calculate healthScore based on: severity of issues found, code complexity, \
             adherence to best practices, and potential bugs\n",
        );
        prompt.push_str(
            "4. improvedCode should be a complete, production-ready version addressing all \
             identified issues\n",
        );
        prompt.push_str("5. testCases should be practical, edge-case covering test suggestions\n");
        prompt.push_str("6. Provide specific line numbers where issues occur\n");
        prompt.push_str("7. Include actual code snippets in quotes\n\n");

        prompt.push_str("Code to review:\n");
        prompt.push_str(&format!("```{}\n", self.language));
        prompt.push_str(&self.code);
        prompt.push_str("\n```\n\n");

        prompt.push_str("Return ONLY valid JSON, no markdown formatting.");

        prompt
    }

    /// Schema fragment for one issue object within a category array
    fn issue_schema(&self, noun: &str, fix_description: &str) -> String {
        format!(
            r#"    {{
      "title": "Short descriptive title",
      "description": "Detailed explanation of the {}",
      "severity": "critical" | "high" | "medium" | "low",
      "line": line_number,
      "code": "relevant code snippet",
      "fix": "{}",
      "explanation": "detailed explanation for {} developers"
    }}"#,
            noun, fix_description, self.explain_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_level_default_is_senior() {
        assert_eq!(ExplainLevel::default(), ExplainLevel::Senior);
    }

    #[test]
    fn test_explain_level_display() {
        assert_eq!(format!("{}", ExplainLevel::Junior), "junior");
        assert_eq!(format!("{}", ExplainLevel::Senior), "senior");
    }

    #[test]
    fn test_explain_level_serde_lowercase() {
        let parsed: ExplainLevel = serde_json::from_str("\"junior\"").unwrap();
        assert_eq!(parsed, ExplainLevel::Junior);
        assert_eq!(
            serde_json::to_string(&ExplainLevel::Senior).unwrap(),
            "\"senior\""
        );
    }

    #[test]
    fn test_request_defaults() {
        let request = ReviewRequest::new("fn main() {}", "rust");
        assert!(!request.security_mode);
        assert_eq!(request.explain_level, ExplainLevel::Senior);
        assert!(request.has_required_fields());
    }

    #[test]
    fn test_request_missing_fields() {
        let request = ReviewRequest::new("", "rust");
        assert!(!request.has_required_fields());

        let request = ReviewRequest::new("fn main() {}", "");
        assert!(!request.has_required_fields());
    }

    #[test]
    fn test_request_wire_names() {
        let json = r#"{"code":"x","language":"go","securityMode":true,"explainLevel":"junior"}"#;
        let request: ReviewRequest = serde_json::from_str(json).unwrap();
        assert!(request.security_mode);
        assert_eq!(request.explain_level, ExplainLevel::Junior);
    }

    #[test]
    fn test_request_missing_flags_default() {
        let json = r#"{"code":"x","language":"go"}"#;
        let request: ReviewRequest = serde_json::from_str(json).unwrap();
        assert!(!request.security_mode);
        assert_eq!(request.explain_level, ExplainLevel::Senior);
    }

    #[test]
    fn test_prompt_contains_language_and_code() {
        let request = ReviewRequest::new("function f() {}", "javascript");
        let prompt = request.to_prompt();
        assert!(prompt.contains("Review the provided javascript code"));
        assert!(prompt.contains("```javascript\nfunction f() {}\n```"));
    }

    #[test]
    fn test_prompt_enumerates_schema() {
        let prompt = ReviewRequest::new("x", "python").to_prompt();
        assert!(prompt.contains("\"bugs\""));
        assert!(prompt.contains("\"security\""));
        assert!(prompt.contains("\"performance\""));
        assert!(prompt.contains("\"cleanCode\""));
        assert!(prompt.contains("\"healthScore\": 0-100"));
        assert!(prompt.contains("\"improvedCode\""));
        assert!(prompt.contains("\"testCases\""));
        assert!(prompt.contains("\"developerInsights\""));
        assert!(prompt.ends_with("Return ONLY valid JSON, no markdown formatting."));
    }

    #[test]
    fn test_prompt_junior_branch() {
        let prompt = ReviewRequest::new("x", "python")
            .with_explain_level(ExplainLevel::Junior)
            .to_prompt();
        assert!(prompt.contains("For junior level explanations"));
        assert!(prompt.contains("analogies"));
        assert!(prompt.contains("for junior developers"));
    }

    #[test]
    fn test_prompt_senior_branch() {
        let prompt = ReviewRequest::new("x", "python").to_prompt();
        assert!(prompt.contains("For senior level explanations"));
        assert!(prompt.contains("trade-offs"));
    }

    #[test]
    fn test_prompt_security_mode_branch() {
        let balanced = ReviewRequest::new("x", "python").to_prompt();
        assert!(balanced.contains("balanced analysis across all categories"));
        assert!(!balanced.contains("SQL injection"));

        let biased = ReviewRequest::new("x", "python")
            .with_security_mode(true)
            .to_prompt();
        assert!(biased.contains("SQL injection"));
        assert!(biased.contains("XSS"));
        assert!(biased.contains("CSRF"));
        assert!(!biased.contains("balanced analysis"));
    }
}
