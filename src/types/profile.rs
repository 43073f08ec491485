//! The profile aggregate: the full persisted per-user record
//!
//! One `Profile` exists per user and is owned exclusively by the
//! `ProfileStore`; every mutation loads the whole aggregate, applies one
//! change, recomputes dependent stats, and writes the whole aggregate back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entries::{Goal, GoalStatus, Insight, JournalEntry, LearnedFact, LifePattern, MoodEntry};
use super::messages::Conversation;

/// Companion gender, used for prompt styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// The external persona descriptor driving prompt construction.
///
/// Not owned by the profile; the host application decides which companion
/// a profile is bound to and passes the descriptor into the chat layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub gender: Gender,
    pub personality: String,
}

/// Rollup statistics derived from the rest of the aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeStats {
    pub days_active: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub goals_completed: u32,
    pub journal_entries: u32,
    /// Mean of the mood score mapping over the last 30 entries, 1-10 scale
    pub average_mood: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_topics: Vec<String>,
    /// 0-100, engagement based
    #[serde(default)]
    pub growth_score: u32,
}

impl Default for LifeStats {
    fn default() -> Self {
        Self {
            days_active: 1,
            current_streak: 1,
            longest_streak: 1,
            goals_completed: 0,
            journal_entries: 0,
            average_mood: 5.0,
            top_topics: Vec::new(),
            growth_score: 0,
        }
    }
}

/// The complete persisted user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,

    // Companion binding (reference only)
    pub companion_id: String,
    pub companion_name: String,
    pub companion_gender: Gender,
    pub voice_enabled: bool,

    // Memory and history
    pub conversations: Vec<Conversation>,
    pub total_conversations: u32,
    pub total_messages: u32,

    // Tracking
    pub moods: Vec<MoodEntry>,
    pub goals: Vec<Goal>,
    pub journal: Vec<JournalEntry>,

    // Analysis
    pub patterns: Vec<LifePattern>,
    pub insights: Vec<Insight>,
    pub learned_facts: Vec<LearnedFact>,

    pub stats: LifeStats,
}

impl Profile {
    /// Create an empty profile with default stats
    pub fn new(
        name: impl Into<String>,
        companion_id: impl Into<String>,
        companion_name: impl Into<String>,
        companion_gender: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            created_at: now,
            last_active_at: now,
            companion_id: companion_id.into(),
            companion_name: companion_name.into(),
            companion_gender,
            voice_enabled: true,
            conversations: Vec::new(),
            total_conversations: 0,
            total_messages: 0,
            moods: Vec::new(),
            goals: Vec::new(),
            journal: Vec::new(),
            patterns: Vec::new(),
            insights: Vec::new(),
            learned_facts: Vec::new(),
            stats: LifeStats::default(),
        }
    }

    /// Goals currently in the active status
    pub fn active_goals(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter().filter(|g| g.status == GoalStatus::Active)
    }

    /// Most recent mood entry, if any
    pub fn last_mood(&self) -> Option<&MoodEntry> {
        self.moods.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_defaults() {
        let profile = Profile::new("Alex", "companion-1", "Sophia", Gender::Female);

        assert_eq!(profile.stats.days_active, 1);
        assert_eq!(profile.stats.current_streak, 1);
        assert_eq!(profile.stats.longest_streak, 1);
        assert_eq!(profile.stats.average_mood, 5.0);
        assert_eq!(profile.total_conversations, 0);
        assert_eq!(profile.total_messages, 0);
        assert!(profile.voice_enabled);
        assert!(profile.conversations.is_empty());
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = Profile::new("Alex", "companion-1", "Sophia", Gender::Female);
        let json = serde_json::to_string(&profile).unwrap();
        let loaded: Profile = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.name, "Alex");
        assert_eq!(loaded.companion_gender, Gender::Female);
        assert_eq!(loaded.created_at, profile.created_at);
    }

    #[test]
    fn test_active_goals_filter() {
        use crate::types::entries::{GoalCategory, GoalPatch};

        let mut profile = Profile::new("Alex", "c1", "Sophia", Gender::Female);
        profile.goals.push(Goal::new("Learn Spanish", GoalCategory::Education));
        let mut done = Goal::new("Get promoted", GoalCategory::Career);
        done.apply_patch(GoalPatch::complete(), Utc::now());
        profile.goals.push(done);

        let active: Vec<_> = profile.active_goals().collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Learn Spanish");
    }
}
