//! Deterministic report layout
//!
//! A single pass over the review result emits positioned blocks into a
//! [`ReportDocument`], threading an immutable [`Cursor`] value through every
//! emission call instead of sharing mutable layout state. Section order is
//! fixed; truncation budgets and color tiers are policy constants.

use chrono::{DateTime, Utc};

use crate::review::{ExplainLevel, Issue, ReviewResult};

use super::document::{Block, ReportDocument, Rgb};

/// Page width in millimetres (A4)
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// Page height in millimetres (A4)
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Margin on all four sides
pub const MARGIN_MM: f64 = 20.0;

/// Character budget for per-issue code excerpts
pub const ISSUE_CODE_LIMIT: usize = 200;
/// Character budget for per-issue fix excerpts
pub const FIX_LIMIT: usize = 300;
/// Character budget for the trailing improved-code listing
pub const IMPROVED_CODE_LIMIT: usize = 3000;

/// Footer attribution stamped on every page
pub const ATTRIBUTION: &str = "Generated by ReviewAI - AI-Powered Code Review";

const PT_TO_MM: f64 = 0.352_778;
/// Approximate average glyph advance for Helvetica, in em
const CHAR_WIDTH_EM: f64 = 0.5;
/// Glyph advance for Courier, in em
const MONO_CHAR_WIDTH_EM: f64 = 0.6;

/// Extra vertical gap appended after every text block
const LINE_GAP_MM: f64 = 1.8;
/// Gap between sections
const SECTION_GAP_MM: f64 = 6.0;
/// Gap after section headings and within the insights block
const SMALL_GAP_MM: f64 = 3.0;
/// Trailing gap after each rendered issue
const ISSUE_GAP_MM: f64 = 5.0;
/// Height of the health-score bar
const SCORE_BAR_HEIGHT_MM: f64 = 8.0;
/// Footer baseline distance from the bottom edge
const FOOTER_OFFSET_MM: f64 = 10.0;

const TEXT_BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
const TITLE_PURPLE: Rgb = Rgb::new(0.345, 0.11, 0.53);
const SUBTITLE_GRAY: Rgb = Rgb::new(0.39, 0.39, 0.39);
const FOOTER_GRAY: Rgb = Rgb::new(0.59, 0.59, 0.59);

const SCORE_GREEN: Rgb = Rgb::new(0.13, 0.55, 0.13);
const SCORE_YELLOW: Rgb = Rgb::new(0.93, 0.76, 0.05);
const SCORE_ORANGE: Rgb = Rgb::new(0.93, 0.49, 0.13);
const SCORE_RED: Rgb = Rgb::new(0.86, 0.15, 0.15);

/// Four-tier fill color for the health-score bar
pub fn health_color(score: i64) -> Rgb {
    if score >= 80 {
        SCORE_GREEN
    } else if score >= 60 {
        SCORE_YELLOW
    } else if score >= 40 {
        SCORE_ORANGE
    } else {
        SCORE_RED
    }
}

/// Layout cursor: current page index and vertical offset from the page top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Index of the page being written
    pub page: usize,
    /// Vertical offset from the top of the page, in millimetres
    pub y: f64,
}

impl Cursor {
    /// Cursor at the top margin of the first page
    pub fn start() -> Self {
        Self {
            page: 0,
            y: MARGIN_MM,
        }
    }

    /// Cursor moved down by `dy` on the same page
    pub fn advanced(self, dy: f64) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }
}

/// Text styling for one emission call
#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: f64,
    bold: bool,
    mono: bool,
    color: Rgb,
}

impl TextStyle {
    fn new(size: f64, bold: bool) -> Self {
        Self {
            size,
            bold,
            mono: false,
            color: TEXT_BLACK,
        }
    }

    fn colored(size: f64, bold: bool, color: Rgb) -> Self {
        Self {
            size,
            bold,
            mono: false,
            color,
        }
    }

    fn mono(size: f64) -> Self {
        Self {
            size,
            bold: false,
            mono: true,
            color: TEXT_BLACK,
        }
    }
}

fn usable_width() -> f64 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Height of one text line, including leading
fn line_height(size: f64) -> f64 {
    size * PT_TO_MM * 1.3
}

/// Truncate to a fixed character budget without splitting a character
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}

/// Greedy word wrap against the usable page width
///
/// Words longer than a full line are broken into line-sized chunks so no
/// input is ever dropped.
fn wrap_text(text: &str, size: f64, mono: bool) -> Vec<String> {
    let em = if mono { MONO_CHAR_WIDTH_EM } else { CHAR_WIDTH_EM };
    let char_width = size * PT_TO_MM * em;
    let max_chars = (usable_width() / char_width).max(1.0) as usize;

    let mut lines = Vec::new();
    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word = word;
            while word.chars().count() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(max_chars).collect();
                word = &word[head.len()..];
                lines.push(head);
            }
            if word.is_empty() {
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Break to a fresh page, returning a cursor at its top margin
fn page_break(doc: &mut ReportDocument) -> Cursor {
    let page = doc.add_page();
    Cursor {
        page,
        y: MARGIN_MM,
    }
}

/// Emit a word-wrapped text block and return the advanced cursor
///
/// A block that would overflow the remaining vertical space emits a page
/// break first. Blocks taller than a full page (the improved-code listing)
/// flow line by line instead, breaking as each line reaches the bottom
/// margin.
fn write_text(doc: &mut ReportDocument, cursor: Cursor, text: &str, style: TextStyle) -> Cursor {
    let lines = wrap_text(text, style.size, style.mono);
    if lines.is_empty() {
        return cursor;
    }

    let lh = line_height(style.size);
    let block_height = lines.len() as f64 * lh;
    let fits_fresh_page = block_height <= PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;

    let mut cursor = cursor;
    if cursor.y + block_height > PAGE_HEIGHT_MM - MARGIN_MM && fits_fresh_page {
        cursor = page_break(doc);
    }

    for line in lines {
        if cursor.y + lh > PAGE_HEIGHT_MM - MARGIN_MM {
            cursor = page_break(doc);
        }
        doc.push_block(
            cursor.page,
            Block::Text {
                x: MARGIN_MM,
                y: cursor.y + lh * 0.75,
                size: style.size,
                bold: style.bold,
                mono: style.mono,
                color: style.color,
                content: line,
            },
        );
        cursor.y += lh;
    }

    cursor.advanced(LINE_GAP_MM)
}

/// Emit the health-score bar with the numeric score overlaid in white
fn score_bar(doc: &mut ReportDocument, cursor: Cursor, score: i64) -> Cursor {
    let mut cursor = cursor;
    if cursor.y + SCORE_BAR_HEIGHT_MM > PAGE_HEIGHT_MM - MARGIN_MM {
        cursor = page_break(doc);
    }

    doc.push_block(
        cursor.page,
        Block::Rect {
            x: MARGIN_MM,
            y: cursor.y,
            width: usable_width(),
            height: SCORE_BAR_HEIGHT_MM,
            color: health_color(score),
        },
    );
    doc.push_block(
        cursor.page,
        Block::Text {
            x: MARGIN_MM + 2.0,
            y: cursor.y + 5.5,
            size: 10.0,
            bold: false,
            mono: false,
            color: WHITE,
            content: format!("{}%", score),
        },
    );

    cursor.advanced(SCORE_BAR_HEIGHT_MM + SECTION_GAP_MM)
}

/// Emit one category section: heading plus every issue in order
fn issue_section(
    doc: &mut ReportDocument,
    cursor: Cursor,
    title: &str,
    issues: &[Issue],
    explain_level: ExplainLevel,
) -> Cursor {
    if issues.is_empty() {
        return cursor;
    }

    let mut cursor = write_text(doc, cursor, title, TextStyle::new(14.0, true));
    cursor = cursor.advanced(SMALL_GAP_MM);

    for (index, issue) in issues.iter().enumerate() {
        cursor = write_text(
            doc,
            cursor,
            &format!("{}. {}", index + 1, issue.title),
            TextStyle::new(11.0, true),
        );
        cursor = write_text(
            doc,
            cursor,
            &format!("Severity: {}", issue.severity.label()),
            TextStyle::new(10.0, false),
        );
        cursor = write_text(
            doc,
            cursor,
            &format!("Description: {}", issue.description),
            TextStyle::new(10.0, false),
        );

        if !issue.code.is_empty() {
            cursor = write_text(doc, cursor, "Issue Location:", TextStyle::new(10.0, true));
            cursor = write_text(
                doc,
                cursor,
                &truncate(&issue.code, ISSUE_CODE_LIMIT),
                TextStyle::new(9.0, false),
            );
        }

        if let Some(explanation) = issue.explanation.as_deref().filter(|s| !s.is_empty()) {
            cursor = write_text(
                doc,
                cursor,
                &format!("Explanation ({}):", explain_level),
                TextStyle::new(10.0, true),
            );
            cursor = write_text(doc, cursor, explanation, TextStyle::new(10.0, false));
        }

        if let Some(fix) = issue.fix.as_deref().filter(|s| !s.is_empty()) {
            cursor = write_text(doc, cursor, "Recommended Fix:", TextStyle::new(10.0, true));
            cursor = write_text(
                doc,
                cursor,
                &truncate(fix, FIX_LIMIT),
                TextStyle::new(9.0, false),
            );
        }

        cursor = cursor.advanced(ISSUE_GAP_MM);
    }

    cursor
}

/// Stamp the attribution and "Page X of N" footer onto every page
fn stamp_footers(doc: &mut ReportDocument) {
    let total = doc.page_count();
    let y = PAGE_HEIGHT_MM - FOOTER_OFFSET_MM;

    for index in 0..total {
        doc.push_block(
            index,
            Block::Text {
                x: MARGIN_MM,
                y,
                size: 8.0,
                bold: false,
                mono: false,
                color: FOOTER_GRAY,
                content: ATTRIBUTION.to_string(),
            },
        );
        doc.push_block(
            index,
            Block::Text {
                x: PAGE_WIDTH_MM - MARGIN_MM - 30.0,
                y,
                size: 8.0,
                bold: false,
                mono: false,
                color: FOOTER_GRAY,
                content: format!("Page {} of {}", index + 1, total),
            },
        );
    }
}

/// Lay out a complete report document from a normalized review result
///
/// The pass is deterministic: the same inputs always produce the same pages,
/// blocks, and footer numbering.
pub fn build_document(
    language: &str,
    results: &ReviewResult,
    explain_level: ExplainLevel,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let mut doc = ReportDocument::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
    let mut cursor = Cursor::start();

    // Title and timestamp
    cursor = write_text(
        &mut doc,
        cursor,
        "ReviewAI - Code Review Report",
        TextStyle::colored(24.0, true, TITLE_PURPLE),
    );
    cursor = cursor.advanced(SMALL_GAP_MM);
    cursor = write_text(
        &mut doc,
        cursor,
        &format!(
            "Generated on {}",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        TextStyle::colored(10.0, false, SUBTITLE_GRAY),
    );
    cursor = cursor.advanced(SECTION_GAP_MM);

    // Health score heading and bar
    cursor = write_text(
        &mut doc,
        cursor,
        &format!("Code Health Score: {}/100", results.health_score),
        TextStyle::new(14.0, true),
    );
    cursor = cursor.advanced(SMALL_GAP_MM);
    cursor = score_bar(&mut doc, cursor, results.health_score);

    // Request context
    cursor = write_text(
        &mut doc,
        cursor,
        &format!("Language: {}", language),
        TextStyle::new(10.0, false),
    );
    cursor = write_text(
        &mut doc,
        cursor,
        &format!("Explanation Level: {}", explain_level),
        TextStyle::new(10.0, false),
    );
    cursor = cursor.advanced(SECTION_GAP_MM);

    // Developer insights
    let insights = &results.developer_insights;
    let has_insights = !insights.summary.is_empty()
        || !insights.key_points.is_empty()
        || !insights.recommendations.is_empty();
    if has_insights {
        cursor = write_text(
            &mut doc,
            cursor,
            "Developer Insights",
            TextStyle::new(14.0, true),
        );
        cursor = cursor.advanced(SMALL_GAP_MM);

        if !insights.summary.is_empty() {
            cursor = write_text(
                &mut doc,
                cursor,
                &format!("Summary: {}", insights.summary),
                TextStyle::new(10.0, false),
            );
            cursor = cursor.advanced(SMALL_GAP_MM);
        }

        if !insights.key_points.is_empty() {
            cursor = write_text(&mut doc, cursor, "Key Points:", TextStyle::new(10.0, true));
            for point in &insights.key_points {
                cursor = write_text(
                    &mut doc,
                    cursor,
                    &format!("- {}", point),
                    TextStyle::new(10.0, false),
                );
            }
            cursor = cursor.advanced(SMALL_GAP_MM);
        }

        if !insights.recommendations.is_empty() {
            cursor = write_text(
                &mut doc,
                cursor,
                "Recommendations:",
                TextStyle::new(10.0, true),
            );
            for recommendation in &insights.recommendations {
                cursor = write_text(
                    &mut doc,
                    cursor,
                    &format!("- {}", recommendation),
                    TextStyle::new(10.0, false),
                );
            }
        }
        cursor = cursor.advanced(SECTION_GAP_MM);
    }

    // Category sections in fixed order
    cursor = issue_section(&mut doc, cursor, "Bugs Found", &results.bugs, explain_level);
    cursor = issue_section(
        &mut doc,
        cursor,
        "Security Issues",
        &results.security,
        explain_level,
    );
    cursor = issue_section(
        &mut doc,
        cursor,
        "Performance Issues",
        &results.performance,
        explain_level,
    );
    cursor = issue_section(
        &mut doc,
        cursor,
        "Clean Code Issues",
        &results.clean_code,
        explain_level,
    );

    // Suggested test cases
    if !results.test_cases.is_empty() {
        cursor = write_text(
            &mut doc,
            cursor,
            "Suggested Test Cases",
            TextStyle::new(14.0, true),
        );
        cursor = cursor.advanced(SMALL_GAP_MM);
        for (index, test_case) in results.test_cases.iter().enumerate() {
            cursor = write_text(
                &mut doc,
                cursor,
                &format!("{}. {}", index + 1, test_case),
                TextStyle::new(10.0, false),
            );
        }
    }

    // Improved code always starts on a fresh page
    if !results.improved_code.is_empty() {
        cursor = page_break(&mut doc);
        cursor = write_text(&mut doc, cursor, "Improved Code", TextStyle::new(14.0, true));
        cursor = cursor.advanced(SECTION_GAP_MM);
        write_text(
            &mut doc,
            cursor,
            &truncate(&results.improved_code, IMPROVED_CODE_LIMIT),
            TextStyle::mono(8.0),
        );
    }

    stamp_footers(&mut doc);
    doc
}

/// All text content of a document in emission order, for assertions
#[cfg(test)]
fn all_text(doc: &ReportDocument) -> Vec<String> {
    doc.pages
        .iter()
        .flat_map(|page| {
            page.blocks.iter().filter_map(|block| match block {
                Block::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
        })
        .collect()
}
