//! Answer synthesis
//!
//! Formats retrieved chunks and the question into a single prompt and
//! delegates to the configured `LLMProvider`. Failures propagate as `Err`;
//! deciding to stringify them into a pseudo-answer belongs to the
//! orchestration layer, not here.

use crate::llm::{LLMProvider, Message};
use anyhow::Result;
use std::sync::Arc;

/// Separator line between context chunks in the prompt
const CHUNK_SEPARATOR: &str = "\n---\n";

const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant for information in documents. \
    Answer ONLY using the provided document context. \
    If the answer is not found, say honestly you don't know.";

/// Turns question + context chunks into an answer via the LLM provider
pub struct Synthesizer {
    provider: Arc<dyn LLMProvider>,
}

impl Synthesizer {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Model identifier of the underlying provider
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Generate an answer for the question using the given context chunks
    pub async fn synthesize(&self, question: &str, context_chunks: &[String]) -> Result<String> {
        let messages = build_messages(question, context_chunks);
        let response = self.provider.completion(&messages).await?;
        Ok(response.content.trim().to_string())
    }
}

/// Build the chat messages: one system framing instruction embedding the
/// context block and the user's question
fn build_messages(question: &str, context_chunks: &[String]) -> Vec<Message> {
    let context = context_chunks.join(CHUNK_SEPARATOR);
    let prompt = format!(
        "{}\nDocument Context:\n{}\nUser Question: {}\nAnswer:",
        SYSTEM_INSTRUCTION, context, question
    );
    vec![Message::system(prompt)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{CompletionResponse, Usage};
    use async_trait::async_trait;

    struct CannedProvider {
        reply: String,
    }

    #[async_trait]
    impl LLMProvider for CannedProvider {
        fn model(&self) -> &str {
            "canned"
        }

        async fn completion(&self, _messages: &[Message]) -> Result<CompletionResponse> {
            Ok(CompletionResponse {
                content: self.reply.clone(),
                usage: Usage::default(),
            })
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LLMProvider for FailingProvider {
        fn model(&self) -> &str {
            "failing"
        }

        async fn completion(&self, _messages: &[Message]) -> Result<CompletionResponse> {
            Err(anyhow::anyhow!("rate limit"))
        }
    }

    #[test]
    fn test_prompt_embeds_context_and_question() {
        let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];
        let messages = build_messages("What is this?", &chunks);

        assert_eq!(messages.len(), 1);
        let prompt = &messages[0].content;
        assert!(prompt.contains("first chunk\n---\nsecond chunk"));
        assert!(prompt.contains("User Question: What is this?"));
        assert!(prompt.contains("don't know"));
    }

    #[test]
    fn test_prompt_with_no_chunks_has_empty_context() {
        let messages = build_messages("q", &[]);
        assert!(messages[0].content.contains("Document Context:\n\nUser Question: q"));
    }

    #[tokio::test]
    async fn test_synthesize_trims_reply() {
        let synth = Synthesizer::new(Arc::new(CannedProvider {
            reply: "  The answer.  \n".to_string(),
        }));
        let answer = synth.synthesize("q", &["ctx".to_string()]).await.unwrap();
        assert_eq!(answer, "The answer.");
    }

    #[tokio::test]
    async fn test_synthesize_propagates_provider_failure() {
        let synth = Synthesizer::new(Arc::new(FailingProvider));
        let err = synth.synthesize("q", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "rate limit");
    }
}
