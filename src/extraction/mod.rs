//! Lexical extraction from user utterances
//!
//! Zero-latency, zero-cost capture of self-disclosed facts and recurring
//! mood/topic signals. Pure keyword and regex matching; no model calls.
//! Recall is intentionally partial, covering common self-disclosure
//! phrasings only.

pub mod facts;
pub mod patterns;

pub use facts::{extract_facts, scan_facts};
pub use patterns::{detect_patterns, scan_patterns};
