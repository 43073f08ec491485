//! Conversation layer: prompt construction, the language-model client,
//! and the per-turn orchestrator

pub mod prompt;
pub mod client;
pub mod orchestrator;

pub use client::{CompletionParams, GroqClient, LanguageModel};
pub use orchestrator::{fallback_replies, CompanionChat};
pub use prompt::build_system_prompt;
