//! Profile store: sole owner of the persisted user record
//!
//! Every mutating operation applies one change to the aggregate and then
//! writes the whole aggregate back to a single JSON file, synchronously.
//! There is no partial persistence and no concurrent-writer protection:
//! two writers sharing the same storage directory would be last-writer-wins
//! with full overwrite.
//!
//! Persistence failures inside mutators are logged and swallowed so a full
//! disk never interrupts a conversation; `create_profile`, `load` and
//! `save` surface storage errors to the caller.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::errors::{CompanionError, Result};
use crate::types::{
    Conversation, ConversationMessage, Goal, GoalPatch, Insight, JournalEntry, LearnedFact,
    LifePattern, MoodEntry, Profile,
};

use super::day::DayStamp;

/// Well-known file name of the persisted aggregate
pub const PROFILE_FILE: &str = "profile.json";

/// Number of most recent mood entries feeding the rolling average
pub const MOOD_AVERAGE_WINDOW: usize = 30;

/// Persistent profile store rooted at a storage directory
#[derive(Debug, Clone)]
pub struct ProfileStore {
    storage_dir: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub fn new(storage_dir: PathBuf) -> Result<Self> {
        if !storage_dir.exists() {
            fs::create_dir_all(&storage_dir).map_err(|e| {
                CompanionError::Storage(format!(
                    "failed to create storage directory {}: {}",
                    storage_dir.display(),
                    e
                ))
            })?;
        }
        Ok(Self { storage_dir })
    }

    /// Create a store at the default location (`~/.lifebuddy`)
    pub fn default_dir() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CompanionError::Storage("could not determine home directory".into()))?;
        Self::new(home.join(".lifebuddy"))
    }

    /// Path of the persisted profile file
    pub fn profile_path(&self) -> PathBuf {
        self.storage_dir.join(PROFILE_FILE)
    }

    /// Load the persisted profile, if one exists
    pub fn load(&self) -> Result<Option<Profile>> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| CompanionError::Storage(format!("failed to read profile: {}", e)))?;
        let profile: Profile = serde_json::from_str(&json)?;
        Ok(Some(profile))
    }

    /// Write the full aggregate to disk
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.profile_path(), json)
            .map_err(|e| CompanionError::Storage(format!("failed to write profile: {}", e)))?;
        Ok(())
    }

    /// Persist after a mutation; failures are logged, never propagated
    fn checkpoint(&self, profile: &Profile) {
        if let Err(e) = self.save(profile) {
            eprintln!("Warning: failed to persist profile: {}", e);
        }
    }

    /// Create and persist a fresh profile with default stats
    pub fn create_profile(
        &self,
        name: &str,
        companion_id: &str,
        companion_name: &str,
        companion_gender: crate::types::Gender,
    ) -> Result<Profile> {
        let profile = Profile::new(name, companion_id, companion_name, companion_gender);
        self.save(&profile)?;
        Ok(profile)
    }

    /// Rename the user
    pub fn update_user_name(&self, profile: &mut Profile, name: &str) {
        profile.name = name.to_string();
        self.checkpoint(profile);
    }

    /// Append a message to today's conversation, creating it on the first
    /// message of a new day
    pub fn add_message(&self, profile: &mut Profile, message: ConversationMessage) {
        self.add_message_at(profile, message, Utc::now());
    }

    pub fn add_message_at(
        &self,
        profile: &mut Profile,
        message: ConversationMessage,
        now: DateTime<Utc>,
    ) {
        let today = DayStamp::from_timestamp(now);

        let index = profile.conversations.iter().position(|c| c.day == today);
        let index = match index {
            Some(i) => i,
            None => {
                profile.conversations.push(Conversation::new_at(now));
                profile.total_conversations += 1;
                profile.conversations.len() - 1
            }
        };

        profile.conversations[index].messages.push(message);
        profile.total_messages += 1;
        self.checkpoint(profile);
    }

    /// Up to `limit` messages for prompt context.
    ///
    /// Conversations are visited newest-first; within each conversation the
    /// stored chronological order is kept. The result is therefore ordered
    /// by conversation recency, then natural order - not globally sorted by
    /// timestamp. Callers depend on this exact ordering.
    pub fn get_recent_messages(
        &self,
        profile: &Profile,
        limit: usize,
    ) -> Vec<ConversationMessage> {
        let mut conversations: Vec<&Conversation> = profile.conversations.iter().collect();
        conversations.sort_by(|a, b| b.date.cmp(&a.date));

        let mut messages = Vec::new();
        for conversation in conversations {
            messages.extend(conversation.messages.iter().cloned());
            if messages.len() >= limit {
                break;
            }
        }

        messages.truncate(limit);
        messages
    }

    /// Append a mood entry and recompute the rolling average
    pub fn add_mood(&self, profile: &mut Profile, entry: MoodEntry) {
        profile.moods.push(entry);

        let recent = profile
            .moods
            .iter()
            .rev()
            .take(MOOD_AVERAGE_WINDOW)
            .collect::<Vec<_>>();
        let sum: f64 = recent.iter().map(|m| m.mood.score()).sum();
        let avg = sum / recent.len() as f64;
        profile.stats.average_mood = (avg * 10.0).round() / 10.0;

        self.checkpoint(profile);
    }

    /// Append a goal
    pub fn add_goal(&self, profile: &mut Profile, goal: Goal) {
        profile.goals.push(goal);
        self.checkpoint(profile);
    }

    /// Merge a typed patch into the goal with the given id.
    ///
    /// A patch that completes the goal increments `stats.goals_completed`
    /// on every such call, including a re-completion of an already
    /// completed goal. Unknown ids are a silent no-op.
    pub fn update_goal(&self, profile: &mut Profile, goal_id: uuid::Uuid, patch: GoalPatch) {
        self.update_goal_at(profile, goal_id, patch, Utc::now());
    }

    pub fn update_goal_at(
        &self,
        profile: &mut Profile,
        goal_id: uuid::Uuid,
        patch: GoalPatch,
        now: DateTime<Utc>,
    ) {
        if let Some(goal) = profile.goals.iter_mut().find(|g| g.id == goal_id) {
            if goal.apply_patch(patch, now) {
                profile.stats.goals_completed += 1;
            }
        }
        self.checkpoint(profile);
    }

    /// Append a journal entry
    pub fn add_journal_entry(&self, profile: &mut Profile, entry: JournalEntry) {
        profile.journal.push(entry);
        profile.stats.journal_entries += 1;
        self.checkpoint(profile);
    }

    /// Insert a learned fact unless an equal fact (case-insensitive)
    /// already exists.
    ///
    /// Returns true when the fact was inserted; a duplicate is a silent
    /// no-op, not an error.
    pub fn add_learned_fact(&self, profile: &mut Profile, fact: LearnedFact) -> bool {
        let exists = profile
            .learned_facts
            .iter()
            .any(|f| f.fact.eq_ignore_ascii_case(&fact.fact));

        if exists {
            return false;
        }

        profile.learned_facts.push(fact);
        self.checkpoint(profile);
        true
    }

    /// Merge-or-append a pattern observation.
    ///
    /// A pattern with identical text has its frequency incremented and
    /// `last_observed` refreshed in place; otherwise the observation is
    /// appended as new.
    pub fn add_pattern(&self, profile: &mut Profile, pattern: LifePattern) {
        self.add_pattern_at(profile, pattern, Utc::now());
    }

    pub fn add_pattern_at(
        &self,
        profile: &mut Profile,
        pattern: LifePattern,
        now: DateTime<Utc>,
    ) {
        match profile
            .patterns
            .iter_mut()
            .find(|p| p.pattern == pattern.pattern)
        {
            Some(existing) => {
                existing.frequency += 1;
                existing.last_observed = now;
            }
            None => profile.patterns.push(pattern),
        }
        self.checkpoint(profile);
    }

    /// Append an insight
    pub fn add_insight(&self, profile: &mut Profile, insight: Insight) {
        profile.insights.push(insight);
        self.checkpoint(profile);
    }

    /// Update the activity streak against the current calendar day.
    ///
    /// Same day: no change. Exactly one day later: streak extends (and the
    /// longest streak is raised when exceeded). A gap of two or more days
    /// resets the streak to 1. Any day-boundary crossing counts a new
    /// active day. `last_active_at` is always refreshed.
    pub fn update_streak(&self, profile: &mut Profile) {
        self.update_streak_at(profile, Utc::now());
    }

    pub fn update_streak_at(&self, profile: &mut Profile, now: DateTime<Utc>) {
        let today = DayStamp::from_timestamp(now);
        let last_active = DayStamp::from_timestamp(profile.last_active_at);

        let gap = today.days_since(last_active);
        if gap > 0 {
            if gap == 1 {
                profile.stats.current_streak += 1;
                if profile.stats.current_streak > profile.stats.longest_streak {
                    profile.stats.longest_streak = profile.stats.current_streak;
                }
            } else {
                profile.stats.current_streak = 1;
            }
            profile.stats.days_active += 1;
        }

        profile.last_active_at = now;
        self.checkpoint(profile);
    }

    /// Mood entries from the trailing `days` calendar days (duration
    /// arithmetic from now, not day truncation)
    pub fn get_mood_trends(&self, profile: &Profile, days: i64) -> Vec<MoodEntry> {
        self.get_mood_trends_at(profile, days, Utc::now())
    }

    pub fn get_mood_trends_at(
        &self,
        profile: &Profile,
        days: i64,
        now: DateTime<Utc>,
    ) -> Vec<MoodEntry> {
        let cutoff = now - Duration::days(days);
        profile
            .moods
            .iter()
            .filter(|m| m.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// Delete the persisted profile entirely. Irreversible.
    pub fn reset_all_data(&self) -> Result<()> {
        let path = self.profile_path();
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| CompanionError::Storage(format!("failed to delete profile: {}", e)))?;
        }
        Ok(())
    }

    /// Storage directory backing this store
    pub fn storage_dir(&self) -> &PathBuf {
        &self.storage_dir
    }
}
