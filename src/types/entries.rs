//! Tracked entry types: moods, goals, journal, learned facts, patterns,
//! insights
//!
//! These are the entities the profile store appends to and merges into the
//! persisted aggregate. `GoalPatch` is the explicit typed partial-update
//! structure applied by `ProfileStore::update_goal`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mood labels a user can log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Amazing,
    Good,
    Okay,
    Low,
    Stressed,
    Anxious,
    Sad,
}

impl Mood {
    /// Numeric value on the 1-10 scale used for the rolling average
    pub fn score(&self) -> f64 {
        match self {
            Mood::Amazing => 10.0,
            Mood::Good => 8.0,
            Mood::Okay => 6.0,
            Mood::Low => 4.0,
            Mood::Stressed => 3.0,
            Mood::Anxious => 2.0,
            Mood::Sad => 1.0,
        }
    }

    /// Lowercase label as shown in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Amazing => "amazing",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Low => "low",
            Mood::Stressed => "stressed",
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
        }
    }
}

/// One mood log entry, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: Mood,
    /// 1-10
    pub intensity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(mood: Mood, intensity: u8) -> Self {
        Self::new_at(mood, intensity, Utc::now())
    }

    pub fn new_at(mood: Mood, intensity: u8, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood,
            intensity,
            note: None,
            timestamp,
        }
    }
}

/// Goal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Career,
    Health,
    Relationships,
    Finance,
    Personal,
    Education,
    Spiritual,
}

/// Goal lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
}

/// A milestone within a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A tracked goal, mutable in place by id through `GoalPatch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: GoalCategory,
    pub status: GoalStatus,
    /// 0-100
    pub progress: u8,
    pub milestones: Vec<Milestone>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ai_notes: Vec<String>,
}

impl Goal {
    pub fn new(title: impl Into<String>, category: GoalCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            category,
            status: GoalStatus::Active,
            progress: 0,
            milestones: Vec::new(),
            created_at: Utc::now(),
            target_date: None,
            completed_at: None,
            ai_notes: Vec::new(),
        }
    }

    /// Merge a typed patch into this goal.
    ///
    /// Returns true when the patch completes the goal (explicit completed
    /// status or progress reaching 100). A completing patch also forces the
    /// completed/progress/completed_at invariant: status == Completed,
    /// progress == 100, completed_at set.
    pub fn apply_patch(&mut self, patch: GoalPatch, now: DateTime<Utc>) -> bool {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(progress) = patch.progress {
            self.progress = progress.min(100);
        }
        if let Some(target_date) = patch.target_date {
            self.target_date = Some(target_date);
        }

        let completing = patch.status == Some(GoalStatus::Completed)
            || patch.progress.map_or(false, |p| p >= 100);
        if completing {
            self.status = GoalStatus::Completed;
            self.progress = 100;
            self.completed_at = Some(now);
        }
        completing
    }
}

/// Explicit partial update for a goal; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<GoalCategory>,
    pub status: Option<GoalStatus>,
    pub progress: Option<u8>,
    pub target_date: Option<DateTime<Utc>>,
}

impl GoalPatch {
    /// Patch that marks a goal completed
    pub fn complete() -> Self {
        Self {
            status: Some(GoalStatus::Completed),
            progress: Some(100),
            ..Default::default()
        }
    }

    /// Patch that only moves the progress slider
    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Default::default()
        }
    }
}

/// A journal entry, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gratitude: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_reflection: Option<String>,
}

impl JournalEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            content: content.into(),
            mood: None,
            gratitude: Vec::new(),
            challenges: Vec::new(),
            wins: Vec::new(),
            ai_reflection: None,
        }
    }
}

/// Category of a learned fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactCategory {
    Personal,
    Work,
    Relationship,
    Goal,
    Preference,
    Challenge,
    Strength,
}

/// Importance of a learned fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// A short statement the companion believes it has learned about the user.
///
/// Facts are unique by case-insensitive text; the store rejects duplicates
/// as a silent no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnedFact {
    pub id: Uuid,
    pub category: FactCategory,
    pub fact: String,
    /// Where the fact came from, e.g. "conversation"
    pub source: String,
    pub learned_at: DateTime<Utc>,
    pub importance: Importance,
}

impl LearnedFact {
    pub fn from_conversation_at(
        category: FactCategory,
        fact: impl Into<String>,
        learned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            fact: fact.into(),
            source: "conversation".to_string(),
            learned_at,
            importance: Importance::Medium,
        }
    }
}

/// Kind of recurring pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Mood,
    Topic,
    Behavior,
    Growth,
    Challenge,
}

/// A recurring mood or topic signal detected across utterances.
///
/// The pattern text acts as the identity key: re-detecting the same text
/// increments `frequency` and refreshes `last_observed` instead of
/// duplicating the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifePattern {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub pattern: String,
    pub frequency: u32,
    pub first_observed: DateTime<Utc>,
    pub last_observed: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

impl LifePattern {
    pub fn observed_at(kind: PatternKind, pattern: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            pattern: pattern.into(),
            frequency: 1,
            first_observed: now,
            last_observed: now,
            insights: Vec::new(),
            recommendations: None,
        }
    }
}

/// Kind of personal insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Strength,
    GrowthArea,
    Pattern,
    Recommendation,
    Celebration,
}

/// A generated personal insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    /// What data led to this insight
    pub based_on: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_scores_within_scale() {
        let moods = [
            Mood::Amazing,
            Mood::Good,
            Mood::Okay,
            Mood::Low,
            Mood::Stressed,
            Mood::Anxious,
            Mood::Sad,
        ];
        for mood in moods {
            assert!(mood.score() >= 1.0 && mood.score() <= 10.0);
        }
    }

    #[test]
    fn test_goal_patch_completion_sets_invariant() {
        let mut goal = Goal::new("Run a marathon", GoalCategory::Health);
        let now = Utc::now();

        let completing = goal.apply_patch(GoalPatch::progress(100), now);

        assert!(completing);
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.completed_at, Some(now));
    }

    #[test]
    fn test_goal_patch_partial_update() {
        let mut goal = Goal::new("Save money", GoalCategory::Finance);
        let now = Utc::now();

        let completing = goal.apply_patch(GoalPatch::progress(40), now);

        assert!(!completing);
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.progress, 40);
        assert!(goal.completed_at.is_none());
    }

    #[test]
    fn test_goal_patch_clamps_progress() {
        let mut goal = Goal::new("Read more", GoalCategory::Personal);
        let completing = goal.apply_patch(GoalPatch::progress(250), Utc::now());
        assert!(completing);
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.status, GoalStatus::Completed);
    }
}
