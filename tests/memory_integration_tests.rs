//! Integration tests for the profile store and extraction pipeline
//!
//! Exercises the persisted aggregate end to end: multi-day accounting,
//! streaks, fact de-duplication through the extractor, pattern merging,
//! and reload-from-disk fidelity.

use chrono::{Duration, Utc};
use quickcheck_macros::quickcheck;
use tempfile::TempDir;

use lifebuddy::extraction::{detect_patterns, extract_facts};
use lifebuddy::memory::{summarize, ProfileStore};
use lifebuddy::types::{ConversationMessage, Gender, Mood, MoodEntry, Profile, Sender};

fn setup() -> (ProfileStore, Profile, TempDir) {
    let temp = TempDir::new().unwrap();
    let store = ProfileStore::new(temp.path().to_path_buf()).unwrap();
    let profile = store
        .create_profile("Alex", "companion-1", "Sophia", Gender::Female)
        .unwrap();
    (store, profile, temp)
}

#[test]
fn profile_survives_reload() {
    let (store, mut profile, _temp) = setup();
    let now = Utc::now();

    store.add_message_at(
        &mut profile,
        ConversationMessage::new_at("I work as a teacher", Sender::User, now),
        now,
    );
    extract_facts(&store, &mut profile, "I work as a teacher");
    detect_patterns(&store, &mut profile, "my job is wearing me down");

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.total_messages, 1);
    assert_eq!(loaded.learned_facts.len(), 1);
    assert!(!loaded.patterns.is_empty());
    assert_eq!(loaded.name, "Alex");
}

#[test]
fn repeated_self_disclosure_stores_one_fact_set() {
    let (store, mut profile, _temp) = setup();
    let utterance = "My name is Alex and I work as a teacher";

    let first = extract_facts(&store, &mut profile, utterance);
    let second = extract_facts(&store, &mut profile, utterance);

    // Two candidates each time, but only the first pass persists them
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(profile.learned_facts.len(), 2);
}

#[test]
fn stressed_three_days_merges_into_one_pattern() {
    let (store, mut profile, _temp) = setup();

    for utterance in [
        "I'm so stressed about the deadline",
        "stressed again today",
        "everything is too much, feeling stressed",
    ] {
        detect_patterns(&store, &mut profile, utterance);
    }

    let stressed: Vec<_> = profile
        .patterns
        .iter()
        .filter(|p| p.pattern == "Often feels stressed or overwhelmed")
        .collect();
    assert_eq!(stressed.len(), 1);
    assert_eq!(stressed[0].frequency, 3);
}

#[test]
fn streak_and_days_active_over_a_week() {
    let (store, mut profile, _temp) = setup();
    let start = Utc::now();
    profile.last_active_at = start;

    // Three consecutive days, then a four-day gap, then one more day
    store.update_streak_at(&mut profile, start + Duration::days(1));
    store.update_streak_at(&mut profile, start + Duration::days(2));
    store.update_streak_at(&mut profile, start + Duration::days(3));
    assert_eq!(profile.stats.current_streak, 4);
    assert_eq!(profile.stats.longest_streak, 4);

    store.update_streak_at(&mut profile, start + Duration::days(7));
    assert_eq!(profile.stats.current_streak, 1);
    assert_eq!(profile.stats.longest_streak, 4);
    assert_eq!(profile.stats.days_active, 5);

    store.update_streak_at(&mut profile, start + Duration::days(8));
    assert_eq!(profile.stats.current_streak, 2);
    assert_eq!(profile.stats.days_active, 6);
}

#[test]
fn summary_reflects_accumulated_memory() {
    let (store, mut profile, _temp) = setup();

    extract_facts(&store, &mut profile, "I live in Lisbon");
    detect_patterns(&store, &mut profile, "saving up, on a strict budget");
    store.add_mood(&mut profile, MoodEntry::new(Mood::Good, 6));

    let summary = summarize(&profile);
    assert!(summary.contains("I live in Lisbon"));
    assert!(summary.contains("Concerned about finances"));
    assert!(summary.contains("RECENT MOODS: good"));
}

#[test]
fn reset_wipes_everything() {
    let (store, mut profile, _temp) = setup();
    extract_facts(&store, &mut profile, "I love hiking");
    assert!(store.profile_path().exists());

    store.reset_all_data().unwrap();
    assert!(store.load().unwrap().is_none());
}

fn mood_from_seed(seed: u8) -> Mood {
    match seed % 7 {
        0 => Mood::Amazing,
        1 => Mood::Good,
        2 => Mood::Okay,
        3 => Mood::Low,
        4 => Mood::Stressed,
        5 => Mood::Anxious,
        _ => Mood::Sad,
    }
}

#[quickcheck]
fn prop_average_mood_stays_in_scale(seeds: Vec<u8>) -> bool {
    let (store, mut profile, _temp) = setup();

    for seed in seeds {
        store.add_mood(&mut profile, MoodEntry::new(mood_from_seed(seed), 5));
    }

    profile.stats.average_mood >= 1.0 && profile.stats.average_mood <= 10.0
}

#[quickcheck]
fn prop_longest_streak_dominates_current(gaps: Vec<u8>) -> bool {
    let (store, mut profile, _temp) = setup();
    let mut now = Utc::now();
    profile.last_active_at = now;

    for gap in gaps {
        now = now + Duration::days((gap % 5) as i64);
        store.update_streak_at(&mut profile, now);
        if profile.stats.longest_streak < profile.stats.current_streak {
            return false;
        }
    }
    true
}
