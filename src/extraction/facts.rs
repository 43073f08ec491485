//! Fact extractor: fixed regex templates over a single utterance
//!
//! Each template targets one category of personal statement (name, work,
//! age, location, goals, preferences, struggles, strengths, named
//! relationships). The stored fact text is the full matched substring;
//! de-duplication happens in the profile store, not here.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::memory::ProfileStore;
use crate::types::{FactCategory, LearnedFact, Profile};

/// Ordered template list; multiple templates may match one utterance
static FACT_PATTERNS: Lazy<Vec<(Regex, FactCategory)>> = Lazy::new(|| {
    let templates: &[(&str, FactCategory)] = &[
        (r"(?i)my name is (\w+)", FactCategory::Personal),
        (r"(?i)i work (?:at|for|as) (.+?)(?:\.|,|$)", FactCategory::Work),
        (r"(?i)i'm (\d+) years old", FactCategory::Personal),
        (r"(?i)i live in (.+?)(?:\.|,|$)", FactCategory::Personal),
        (r"(?i)i want to (.+?)(?:\.|,|$)", FactCategory::Goal),
        (r"(?i)my goal is to (.+?)(?:\.|,|$)", FactCategory::Goal),
        (r"(?i)i love (.+?)(?:\.|,|$)", FactCategory::Preference),
        (r"(?i)i hate (.+?)(?:\.|,|$)", FactCategory::Preference),
        (
            r"(?i)i'm struggling with (.+?)(?:\.|,|$)",
            FactCategory::Challenge,
        ),
        (r"(?i)i'm good at (.+?)(?:\.|,|$)", FactCategory::Strength),
        (
            r"(?i)i have a (?:boyfriend|girlfriend|partner|husband|wife) (?:named )?(.+?)(?:\.|,|$)",
            FactCategory::Relationship,
        ),
    ];

    templates
        .iter()
        .map(|(pattern, category)| {
            (Regex::new(pattern).expect("valid fact regex"), *category)
        })
        .collect()
});

/// Scan an utterance for fact candidates without touching the store
pub fn scan_facts(utterance: &str, now: DateTime<Utc>) -> Vec<LearnedFact> {
    FACT_PATTERNS
        .iter()
        .filter_map(|(regex, category)| {
            regex.find(utterance).map(|m| {
                LearnedFact::from_conversation_at(*category, m.as_str(), now)
            })
        })
        .collect()
}

/// Extract facts from an utterance and submit each candidate to the store.
///
/// Candidates that duplicate an existing fact (case-insensitively) are
/// dropped by the store; the returned list contains all candidates, kept
/// or not, so callers can inspect what was recognized.
pub fn extract_facts(
    store: &ProfileStore,
    profile: &mut Profile,
    utterance: &str,
) -> Vec<LearnedFact> {
    let facts = scan_facts(utterance, Utc::now());
    for fact in &facts {
        store.add_learned_fact(profile, fact.clone());
    }
    facts
}
