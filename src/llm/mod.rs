//! LLM Layer
//!
//! Everything that talks to a text-generation backend:
//! - Provider abstraction (OpenAI today, mock providers in tests)
//! - Universal message/response types isolated from provider APIs

pub mod openai;
pub mod provider;
pub mod types;

// Re-export key types
pub use provider::LLMProvider;
pub use types::{CompletionResponse, Message, Role};
