//! Shared data types for the companion engine
//!
//! The persisted profile aggregate and its entities, plus the wire-facing
//! chat message shape exchanged with the language-model collaborator.

pub mod profile;
pub mod entries;
pub mod messages;

pub use profile::{Companion, Gender, LifeStats, Profile};
pub use entries::{
    FactCategory, Goal, GoalCategory, GoalPatch, GoalStatus, Importance, Insight, InsightKind,
    JournalEntry, LearnedFact, LifePattern, Milestone, Mood, MoodEntry, PatternKind,
};
pub use messages::{ChatMessage, Conversation, ConversationMessage, Role, Sender};
