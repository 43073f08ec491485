//! Context summarizer: the bounded textual digest of a profile
//!
//! The external language model is stateless between calls; this digest is
//! the mechanism by which stored memory becomes visible to it. Bounds:
//! the last 10 facts, active goals only, mood labels from the last 3 days,
//! the 5 most recent patterns. Sections with no data are omitted entirely.

use chrono::{DateTime, Duration, Utc};
use std::fmt::Write;

use crate::types::Profile;

/// Facts included in the digest
const FACT_LIMIT: usize = 10;
/// Patterns included in the digest
const PATTERN_LIMIT: usize = 5;
/// Trailing window of mood entries, in days
const MOOD_WINDOW_DAYS: i64 = 3;

/// Render the natural-language memory digest for prompt injection
pub fn summarize(profile: &Profile) -> String {
    summarize_at(profile, Utc::now())
}

pub fn summarize_at(profile: &Profile, now: DateTime<Utc>) -> String {
    let mut context = format!(
        "WHAT YOU KNOW ABOUT {}:\n\
         - Days together: {}\n\
         - Current streak: {} days\n\
         - Total conversations: {}\n\n",
        profile.name.to_uppercase(),
        profile.stats.days_active,
        profile.stats.current_streak,
        profile.total_conversations,
    );

    let start = profile.learned_facts.len().saturating_sub(FACT_LIMIT);
    let facts = &profile.learned_facts[start..];
    if !facts.is_empty() {
        context.push_str("KEY FACTS YOU'VE LEARNED:\n");
        for fact in facts {
            let _ = writeln!(context, "- {}", fact.fact);
        }
        context.push('\n');
    }

    let active_goals: Vec<_> = profile.active_goals().collect();
    if !active_goals.is_empty() {
        context.push_str("THEIR CURRENT GOALS:\n");
        for goal in active_goals {
            let _ = writeln!(context, "- {} ({}% complete)", goal.title, goal.progress);
        }
        context.push('\n');
    }

    let cutoff = now - Duration::days(MOOD_WINDOW_DAYS);
    let recent_moods: Vec<_> = profile
        .moods
        .iter()
        .filter(|m| m.timestamp >= cutoff)
        .collect();
    if !recent_moods.is_empty() {
        let labels: Vec<&str> = recent_moods.iter().map(|m| m.mood.label()).collect();
        let _ = writeln!(context, "RECENT MOODS: {}\n", labels.join(", "));
    }

    let start = profile.patterns.len().saturating_sub(PATTERN_LIMIT);
    let recent_patterns = &profile.patterns[start..];
    if !recent_patterns.is_empty() {
        context.push_str("PATTERNS YOU'VE NOTICED:\n");
        for pattern in recent_patterns {
            let _ = writeln!(context, "- {}", pattern.pattern);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FactCategory, Gender, Goal, GoalCategory, LearnedFact, LifePattern, Mood, MoodEntry,
        PatternKind,
    };

    fn fresh_profile() -> Profile {
        Profile::new("Alex", "companion-1", "Sophia", Gender::Female)
    }

    #[test]
    fn test_fresh_profile_omits_optional_sections() {
        let summary = summarize(&fresh_profile());

        assert!(summary.contains("WHAT YOU KNOW ABOUT ALEX:"));
        assert!(summary.contains("Days together: 1"));
        assert!(!summary.contains("KEY FACTS YOU'VE LEARNED"));
        assert!(!summary.contains("THEIR CURRENT GOALS"));
        assert!(!summary.contains("RECENT MOODS"));
        assert!(!summary.contains("PATTERNS YOU'VE NOTICED"));
    }

    #[test]
    fn test_facts_section_bounded_to_last_ten() {
        let mut profile = fresh_profile();
        let now = Utc::now();
        for i in 0..15 {
            profile.learned_facts.push(LearnedFact::from_conversation_at(
                FactCategory::Personal,
                format!("fact number {}", i),
                now,
            ));
        }

        let summary = summarize(&profile);
        assert!(!summary.contains("fact number 4"));
        assert!(summary.contains("fact number 5"));
        assert!(summary.contains("fact number 14"));
    }

    #[test]
    fn test_active_goals_with_progress() {
        let mut profile = fresh_profile();
        let mut goal = Goal::new("Learn Spanish", GoalCategory::Education);
        goal.progress = 40;
        profile.goals.push(goal);

        let summary = summarize(&profile);
        assert!(summary.contains("- Learn Spanish (40% complete)"));
    }

    #[test]
    fn test_recent_moods_joined() {
        let mut profile = fresh_profile();
        let now = Utc::now();
        profile.moods.push(MoodEntry::new_at(Mood::Good, 5, now));
        profile.moods.push(MoodEntry::new_at(Mood::Stressed, 7, now));
        // Outside the 3-day window, must not appear
        profile
            .moods
            .push(MoodEntry::new_at(Mood::Sad, 5, now - Duration::days(10)));

        let summary = summarize_at(&profile, now);
        assert!(summary.contains("RECENT MOODS: good, stressed"));
        assert!(!summary.contains("sad"));
    }

    #[test]
    fn test_patterns_bounded_to_last_five() {
        let mut profile = fresh_profile();
        let now = Utc::now();
        for i in 0..8 {
            profile
                .patterns
                .push(LifePattern::observed_at(PatternKind::Topic, format!("pattern {}", i), now));
        }

        let summary = summarize(&profile);
        assert!(!summary.contains("pattern 2"));
        assert!(summary.contains("pattern 3"));
        assert!(summary.contains("pattern 7"));
    }
}
