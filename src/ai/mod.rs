//! Remote (LLM) summarization support

pub mod client;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::{GeminiClient, estimate_tokens};
pub use prompt_builder::build_prompt;
