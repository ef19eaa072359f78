//! Review orchestration against the completion service
//!
//! The `Reviewer` owns an injected completion client and runs the single
//! round trip a review consists of: build the prompt, call the service,
//! normalize whatever comes back.

use std::sync::Arc;

use crate::completion::{CompletionClient, SamplingOptions};
use crate::Result;

use super::normalize::normalize_response;
use super::request::{ReviewRequest, SYSTEM_PROMPT};
use super::result::ReviewResult;

/// Orchestrates a single code review round trip
#[derive(Clone)]
pub struct Reviewer {
    /// The injected completion client
    client: Arc<dyn CompletionClient>,
    /// Sampling parameters for every call
    sampling: SamplingOptions,
}

impl Reviewer {
    /// Create a new reviewer with default sampling
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            sampling: SamplingOptions::default(),
        }
    }

    /// Set the sampling options
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// Get the current sampling options
    pub fn sampling(&self) -> &SamplingOptions {
        &self.sampling
    }

    /// Run a review: prompt, complete, normalize
    ///
    /// Transport failures surface as errors; malformed replies never do and
    /// are normalized into the deterministic fallback result instead.
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult> {
        let prompt = request.to_prompt();

        let raw = self
            .client
            .complete(SYSTEM_PROMPT, &prompt, &self.sampling)
            .await?;

        Ok(normalize_response(&raw, &request.code))
    }
}
