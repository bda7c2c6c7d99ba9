//! The Provider Abstraction.
//!
//! This trait defines the standard interface for any LLM backend. The
//! synthesizer only depends on this seam, so tests can substitute a mock
//! provider without touching the network.

use super::types::{CompletionResponse, Message};
use anyhow::Result;
use async_trait::async_trait;

/// The core trait for LLM interactions.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Identifier of the underlying model (for logging and diagnostics).
    fn model(&self) -> &str;

    /// Send a chat completion request.
    ///
    /// A blocking, unbounded-latency call from the caller's perspective: no
    /// retry, no timeout. Callers wanting resilience wrap this themselves.
    async fn completion(&self, messages: &[Message]) -> Result<CompletionResponse>;
}
