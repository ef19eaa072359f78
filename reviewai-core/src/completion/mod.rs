//! Completion client abstraction for the external review model
//!
//! The orchestrator never talks to a provider directly; it goes through the
//! `CompletionClient` trait so tests can substitute a deterministic stub.

pub mod http;

pub use http::{ChatMessage, HttpCompletionClient};

use async_trait::async_trait;

use crate::Result;

/// Sampling parameters sent with every completion call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum number of tokens the model may generate
    pub max_tokens: u32,
}

impl SamplingOptions {
    /// Create new sampling options
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4000,
        }
    }
}

/// Trait for chat-completion backends
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Send a system + user prompt pair, returning the raw text completion
    ///
    /// This is a single-shot call: no retry, no streaming. Transport and
    /// service failures surface as `Error::Completion`.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        sampling: &SamplingOptions,
    ) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_options_default() {
        let sampling = SamplingOptions::default();
        assert_eq!(sampling.temperature, 0.7);
        assert_eq!(sampling.max_tokens, 4000);
    }

    #[test]
    fn test_sampling_options_new() {
        let sampling = SamplingOptions::new(0.1, 256);
        assert_eq!(sampling.temperature, 0.1);
        assert_eq!(sampling.max_tokens, 256);
    }
}
