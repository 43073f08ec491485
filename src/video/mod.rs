//! Talking-head provider clients
//!
//! Two interchangeable collaborators turn a reply into a lip-synced video:
//! a hosted job-based provider (create a talk, poll until done) and a
//! self-hosted server that synthesizes and returns the video directly.
//! Callers treat every failure here as degradable - on error they fall
//! back to plain speech or text, never interrupt the session.

pub mod hosted;
pub mod selfhosted;

pub use hosted::{TalkClient, VoiceCatalog};
pub use selfhosted::LocalTalkerClient;
