//! Pattern detector: keyword families over a single utterance
//!
//! Two tables of keyword families - mood indicators and topic indicators -
//! each with a fixed human-readable label. Any keyword hit in a family
//! emits one observation for that family; families are independent, so a
//! single utterance may emit several observations. Merging identical
//! observations into a frequency counter is the store's job.

use chrono::{DateTime, Utc};

use crate::memory::ProfileStore;
use crate::types::{LifePattern, PatternKind, Profile};

/// Mood keyword families and their pattern labels
const MOOD_FAMILIES: &[(&[&str], &str)] = &[
    (
        &["stressed", "overwhelmed", "too much"],
        "Often feels stressed or overwhelmed",
    ),
    (&["anxious", "worried", "nervous"], "Experiences anxiety"),
    (&["sad", "down", "depressed"], "Goes through low mood periods"),
    (
        &["happy", "great", "amazing", "excited"],
        "Has positive energy",
    ),
    (&["tired", "exhausted", "no energy"], "Often feels tired"),
];

/// Topic keyword families and their pattern labels
const TOPIC_FAMILIES: &[(&[&str], &str)] = &[
    (
        &["work", "job", "boss", "career"],
        "Frequently discusses work/career",
    ),
    (
        &["relationship", "partner", "love", "dating"],
        "Thinks about relationships",
    ),
    (
        &["money", "finance", "save", "budget"],
        "Concerned about finances",
    ),
    (
        &["health", "exercise", "gym", "diet"],
        "Working on health/fitness",
    ),
    (
        &["study", "learn", "school", "exam"],
        "Focused on education",
    ),
];

/// Scan an utterance for pattern observations without touching the store
pub fn scan_patterns(utterance: &str, now: DateTime<Utc>) -> Vec<LifePattern> {
    let lowered = utterance.to_lowercase();
    let mut observations = Vec::new();

    for (keywords, label) in MOOD_FAMILIES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            observations.push(LifePattern::observed_at(PatternKind::Mood, *label, now));
        }
    }
    for (keywords, label) in TOPIC_FAMILIES {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            observations.push(LifePattern::observed_at(PatternKind::Topic, *label, now));
        }
    }

    observations
}

/// Detect patterns in an utterance and submit each observation to the
/// store's merge-or-append rule
pub fn detect_patterns(store: &ProfileStore, profile: &mut Profile, utterance: &str) {
    let now = Utc::now();
    for observation in scan_patterns(utterance, now) {
        store.add_pattern_at(profile, observation, now);
    }
}
