//! Code review orchestration
//!
//! A `ReviewRequest` is turned into a single instruction prompt, sent to the
//! completion service, and the reply is normalized into a `ReviewResult`
//! regardless of how far off-schema it arrives.

pub mod normalize;
pub mod request;
pub mod result;
pub mod reviewer;

pub use normalize::{fallback_result, normalize_response, ANALYSIS_ERROR_TITLE};
pub use request::{ExplainLevel, ReviewRequest, SYSTEM_PROMPT};
pub use result::{DeveloperInsights, Issue, ReviewResult, Severity};
pub use reviewer::Reviewer;
