//! lifebuddy - Memory-aware AI life companion chat engine
//!
//! A library core for companion-chat applications: it keeps a structured,
//! evolving user profile (moods, goals, learned facts, patterns, streaks)
//! in local storage, distills it into a prompt context on every turn, and
//! orchestrates calls to a hosted chat-completion API and (optionally) a
//! talking-head video provider.
//!
//! # Architecture
//!
//! - **types**: the persisted data model (profile aggregate and entities)
//! - **memory**: profile store (read-modify-persist) + context summarizer
//! - **extraction**: lexical fact extraction + keyword pattern detection
//! - **chat**: prompt construction + language-model client + orchestrator
//! - **video**: talking-head provider clients (hosted and self-hosted)

pub mod errors;
pub mod types;
pub mod config;
pub mod memory;
pub mod extraction;
pub mod chat;
pub mod video;

// Re-export commonly used types
pub use errors::{CompanionError, Result};
pub use types::{Companion, Gender, Profile};
pub use memory::ProfileStore;
pub use chat::CompanionChat;
