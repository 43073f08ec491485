//! Local memory: the persisted profile store and the prompt context
//! summarizer
//!
//! All reads and writes of the user record go through `ProfileStore`;
//! `summarize` turns the stored record into the bounded natural-language
//! digest injected into every language-model prompt.

pub mod day;
pub mod store;
pub mod context;

pub use day::DayStamp;
pub use store::{ProfileStore, PROFILE_FILE};
pub use context::summarize;
