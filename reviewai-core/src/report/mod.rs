//! Report rendering: deterministic layout plus PDF painting
//!
//! Rendering happens in two passes. The layout pass turns a `ReviewResult`
//! into a [`ReportDocument`] (pages of positioned blocks); the paint pass
//! turns that document into PDF bytes. Keeping the passes separate keeps the
//! layout fully inspectable in tests.

pub mod document;
pub mod layout;
pub mod pdf;

pub use document::{Block, Page, ReportDocument, Rgb};
pub use layout::{build_document, health_color, Cursor};

use chrono::{DateTime, Utc};

use crate::review::{ExplainLevel, ReviewResult};
use crate::Result;

/// Suggested filename for downloaded reports
pub const REPORT_FILENAME: &str = "reviewai-report.pdf";

/// Document title, rendered on the first page and embedded in PDF metadata
pub const REPORT_TITLE: &str = "ReviewAI - Code Review Report";

/// Render a normalized review result into PDF bytes
pub fn render(
    language: &str,
    results: &ReviewResult,
    explain_level: ExplainLevel,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let document = layout::build_document(language, results, explain_level, generated_at);
    pdf::paint(&document, REPORT_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_end_to_end() {
        let results = ReviewResult {
            health_score: 64,
            improved_code: "fn main() {}".to_string(),
            ..ReviewResult::default()
        };
        let generated_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let bytes = render("rust", &results, ExplainLevel::Senior, generated_at).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
