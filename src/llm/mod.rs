//! Text completion
//!
//! The assistant only needs one operation from a language model: turn a
//! prompt into text. Failures never propagate; an empty string means
//! "no generated text available" and callers fall back to a template.

use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiClient;

/// Anything that can complete a prompt
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generated text, or an empty string on any failure
    async fn complete(&self, prompt: &str, max_tokens: u32) -> String;
}
