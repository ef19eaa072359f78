//! Shared application state for request handlers

use std::sync::Arc;

use reviewai_core::completion::{CompletionClient, SamplingOptions};
use reviewai_db::Database;

/// State shared by all handlers; cheap to clone per request
///
/// Everything here is read-only after startup: handlers never mutate shared
/// state, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// Client for the external completion service
    pub client: Arc<dyn CompletionClient>,

    /// Optional persistence; None disables the best-effort insert
    pub database: Option<Database>,

    /// Sampling parameters for every review call
    pub sampling: SamplingOptions,
}

impl AppState {
    /// Create new application state
    pub fn new(
        client: Arc<dyn CompletionClient>,
        database: Option<Database>,
        sampling: SamplingOptions,
    ) -> Self {
        Self {
            client,
            database,
            sampling,
        }
    }
}
