//! Question-answering orchestration
//!
//! Owns the per-process chunk sequence and wires rank → synthesize → persist
//! for each question. All degraded states (document not loaded, synthesis
//! failure, missing API key) become ordinary answer text and are persisted
//! like any other answer, so the history is a complete audit trail.

use crate::answer::Synthesizer;
use crate::chunking::ChunkingConfig;
use crate::config::Config;
use crate::history::HistoryStore;
use crate::pdf;
use crate::retrieval;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Answer returned when the document produced no chunks
pub const NOT_LOADED_ANSWER: &str = "PDF is not loaded or missing.";

/// Per-process question answering service.
///
/// The chunk sequence is built once at startup and read-only afterwards;
/// restarting the process is the only way to refresh it.
pub struct QaService {
    chunks: Vec<String>,
    top_k: usize,
    synthesizer: Option<Synthesizer>,
    history: Arc<HistoryStore>,
}

impl QaService {
    pub fn new(
        chunks: Vec<String>,
        top_k: usize,
        synthesizer: Option<Synthesizer>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            chunks,
            top_k,
            synthesizer,
            history,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Answer a question and record the exchange.
    ///
    /// Never fails on synthesis problems; only a broken history store
    /// surfaces as an error.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let answer = self.compute_answer(question).await;
        self.history.append(question, &answer)?;
        Ok(answer)
    }

    async fn compute_answer(&self, question: &str) -> String {
        if self.chunks.is_empty() {
            return NOT_LOADED_ANSWER.to_string();
        }

        let context_chunks = retrieval::rank(question, &self.chunks, self.top_k);

        let Some(synthesizer) = &self.synthesizer else {
            return format!("AI error: {} is not set", crate::config::API_KEY_ENV);
        };

        match synthesizer.synthesize(question, &context_chunks).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("answer synthesis failed: {e:#}");
                format!("AI error: {e}")
            }
        }
    }
}

/// Extract and chunk the configured PDF.
///
/// Any load failure is recovered here: the service starts with an empty
/// chunk sequence and answers with the "not loaded" sentinel instead of
/// crashing.
pub fn load_chunks(config: &Config) -> Vec<String> {
    load_chunks_from(Path::new(&config.pdf_path), &config.chunking)
}

fn load_chunks_from(path: &Path, chunking: &ChunkingConfig) -> Vec<String> {
    match pdf::extract_text(path) {
        Ok(text) => chunking.chunk(&text),
        Err(e) => {
            warn!("Failed to load PDF chunks from {}: {e:#}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{CompletionResponse, Usage};
    use crate::llm::{LLMProvider, Message};
    use async_trait::async_trait;

    struct EchoProvider;

    #[async_trait]
    impl LLMProvider for EchoProvider {
        fn model(&self) -> &str {
            "echo"
        }

        async fn completion(&self, messages: &[Message]) -> Result<CompletionResponse> {
            Ok(CompletionResponse {
                content: messages[0].content.clone(),
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

    fn service_with(chunks: Vec<String>, provider: Option<Arc<dyn LLMProvider>>) -> QaService {
        let history = Arc::new(HistoryStore::open_in_memory().unwrap());
        QaService::new(chunks, 3, provider.map(Synthesizer::new), history)
    }

    #[tokio::test]
    async fn test_empty_chunks_short_circuits_with_sentinel() {
        // FailingProvider would surface as "AI error" if it were ever called
        let service = service_with(Vec::new(), Some(Arc::new(FailingProvider)));

        let answer = service.answer("any question").await.unwrap();
        assert_eq!(answer, NOT_LOADED_ANSWER);

        // The sentinel is persisted like any other answer
        let history = service.history().list().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].answer, NOT_LOADED_ANSWER);
    }

    #[tokio::test]
    async fn test_synthesis_failure_becomes_pseudo_answer() {
        let chunks = vec!["a dog ran fast".to_string()];
        let service = service_with(chunks, Some(Arc::new(FailingProvider)));

        let answer = service.answer("where did the dog go").await.unwrap();
        assert_eq!(answer, "AI error: rate limit");

        let history = service.history().list().unwrap();
        assert_eq!(history[0].answer, "AI error: rate limit");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_a_degraded_answer() {
        let chunks = vec!["some content".to_string()];
        let service = service_with(chunks, None);

        let answer = service.answer("question").await.unwrap();
        assert!(answer.starts_with("AI error:"));
        assert!(answer.contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_relevant_chunks_reach_the_prompt() {
        let chunks = vec!["the cat sat".to_string(), "a dog ran fast".to_string()];
        let service = service_with(chunks, Some(Arc::new(EchoProvider)));

        let answer = service.answer("Where did the dog go?").await.unwrap();
        assert!(answer.contains("a dog ran fast"));
        // Zero-score chunk is filtered out before synthesis
        assert!(!answer.contains("the cat sat"));
    }

    #[tokio::test]
    async fn test_history_orders_newest_first_across_requests() {
        let chunks = vec!["context".to_string()];
        let service = service_with(chunks, Some(Arc::new(EchoProvider)));

        service.answer("Q1").await.unwrap();
        service.answer("Q2").await.unwrap();
        service.answer("Q3").await.unwrap();

        let questions: Vec<String> = service
            .history()
            .list()
            .unwrap()
            .into_iter()
            .map(|p| p.question)
            .collect();
        assert_eq!(questions, vec!["Q3", "Q2", "Q1"]);
    }

    #[test]
    fn test_load_chunks_recovers_from_missing_pdf() {
        let config = Config {
            pdf_path: "/nonexistent/lecture.pdf".to_string(),
            ..Config::default()
        };
        assert!(load_chunks(&config).is_empty());
    }
}
