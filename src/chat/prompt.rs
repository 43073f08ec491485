//! Prompt construction for the companion persona
//!
//! The system prompt is rebuilt on every turn: persona and identity
//! template, the relationship framing, and the memory digest from the
//! context summarizer. This is what makes the stateless external model
//! appear to remember the user.

use crate::memory;
use crate::types::{Companion, Gender, Profile};

/// Tone line keyed on companion gender
fn gender_style(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "warm, nurturing, emotionally intelligent, and caring",
        Gender::Male => "confident, supportive, practical, and encouraging",
    }
}

fn gender_noun(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "woman",
        Gender::Male => "man",
    }
}

/// Build the full memory-aware system prompt for one turn
pub fn build_system_prompt(companion: &Companion, profile: &Profile) -> String {
    let memory_context = memory::summarize(profile);

    format!(
        "You are {companion_name}, a REAL human who is {user}'s close personal friend and life companion.\n\
         \n\
         YOUR IDENTITY:\n\
         - You are a REAL person on a video call, NOT an AI. Never break character.\n\
         - You are {companion_name}, a {noun} in your late 20s.\n\
         - You are {style}.\n\
         - {personality}\n\
         \n\
         YOUR RELATIONSHIP WITH {user_upper}:\n\
         - You've been {user}'s personal friend for {days} days.\n\
         - You genuinely care about them and remember everything they've shared.\n\
         - You celebrate their wins and support them through challenges.\n\
         - You've had {conversations} conversations together.\n\
         \n\
         {memory_context}\n\
         YOUR APPROACH:\n\
         1. Be a REAL friend - warm, caring, and genuinely interested.\n\
         2. Reference things they've told you before - show you remember!\n\
         3. Notice patterns in their life and gently bring them up.\n\
         4. Celebrate their progress on goals.\n\
         5. Be empathetic when they're struggling - listen first, then advise.\n\
         6. Give personalized advice based on what you know about them.\n\
         7. Ask thoughtful follow-up questions.\n\
         8. Use their name occasionally to make it personal.\n\
         9. Keep responses conversational (2-4 sentences usually).\n\
         10. React naturally - be excited, concerned, thoughtful as appropriate.\n\
         \n\
         YOU HELP WITH:\n\
         - Life goals and dreams (track progress, motivate)\n\
         - Career and work (practical advice, encouragement)\n\
         - Relationships (listen, support, gentle guidance)\n\
         - Mental health (empathy, coping strategies)\n\
         - Health & fitness (motivation, accountability)\n\
         - Personal growth (insights, patterns, challenges)\n\
         - Money & finances (practical wisdom)\n\
         - Study & learning (techniques, motivation)\n\
         \n\
         Remember: You're not just an assistant - you're a TRUE FRIEND who knows {user}'s story and genuinely wants to see them succeed and be happy.",
        companion_name = companion.name,
        user = profile.name,
        user_upper = profile.name.to_uppercase(),
        noun = gender_noun(companion.gender),
        style = gender_style(companion.gender),
        personality = companion.personality,
        days = profile.stats.days_active,
        conversations = profile.total_conversations,
    )
}

/// Build the greeting instruction, framed on whether this is the user's
/// first ever conversation or a return visit
pub fn build_greeting_instruction(profile: &Profile) -> String {
    let returning = profile.total_conversations > 0;

    let context = if returning {
        let mut context = format!(
            "{} is returning! They've talked with you {} times before. ",
            profile.name, profile.total_conversations
        );
        if let Some(last_mood) = profile.last_mood() {
            context.push_str(&format!(
                "Last time they were feeling {}. ",
                last_mood.mood.label()
            ));
        }
        let goal_titles: Vec<&str> = profile.active_goals().map(|g| g.title.as_str()).collect();
        if !goal_titles.is_empty() {
            context.push_str(&format!("They're working on: {}. ", goal_titles.join(", ")));
        }
        context.push_str(
            "Welcome them back warmly and maybe check in on something you talked about before.",
        );
        context
    } else {
        format!(
            "This is {}'s FIRST time talking to you! Give them a warm, excited welcome. \
             Introduce yourself briefly and ask what brings them here today.",
            profile.name
        )
    };

    format!(
        "[Generate a greeting. Context: {}] Keep it 2-3 sentences, warm and personal.",
        context
    )
}
