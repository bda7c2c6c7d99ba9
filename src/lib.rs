//! askdoc — question answering over a single PDF document.
//!
//! Pipeline: PDF text → overlapping chunks (built once at startup) →
//! lexical-overlap ranking per question → LLM answer synthesis → durable
//! question/answer history.

pub mod answer;
pub mod chunking;
pub mod config;
pub mod history;
pub mod llm;
pub mod pdf;
pub mod retrieval;
pub mod server;
pub mod service;

// Re-export key types
pub use answer::Synthesizer;
pub use chunking::{ChunkingConfig, ChunkingError};
pub use config::Config;
pub use history::{HistoryStore, QaPair};
pub use llm::openai::OpenAIProvider;
pub use service::QaService;
