//! Conversation orchestrator: one request/response turn
//!
//! Coordinates a turn end to end: persist the user message, run lexical
//! extraction, assemble the prompt (persona + memory digest + bounded
//! history + new utterance), call the model, persist the reply.
//!
//! Failures never reach the user as errors. A failed or malformed model
//! call degrades to one of a small set of in-character fallback lines,
//! and everything persisted before the call stays persisted. There is no
//! module-global history buffer: history always derives from the profile.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::chat::client::{CompletionParams, LanguageModel};
use crate::chat::prompt;
use crate::extraction;
use crate::memory::ProfileStore;
use crate::types::{ChatMessage, Companion, ConversationMessage, Profile, Sender};

/// Bound on the recent-history window included in each prompt
pub const HISTORY_LIMIT: usize = 20;

/// Reply tuning: short, casual answers
const REPLY_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 300,
    temperature: 0.85,
    top_p: Some(0.9),
};

/// Greeting tuning: shorter and a little more playful
const GREETING_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 150,
    temperature: 0.9,
    top_p: None,
};

/// Insight tuning: calmer sampling for coaching observations
const INSIGHT_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 300,
    temperature: 0.7,
    top_p: None,
};

/// In-character apology lines used when the model call fails
pub fn fallback_replies(user_name: &str) -> [String; 3] {
    [
        format!(
            "Sorry {}, I had a small connection issue. What were you saying?",
            user_name
        ),
        "Oh, my connection glitched for a second! Tell me again?".to_string(),
        "Sorry, I missed that. Can you repeat?".to_string(),
    ]
}

/// Per-session conversation orchestrator
pub struct CompanionChat {
    store: ProfileStore,
    model: Arc<dyn LanguageModel>,
    companion: Companion,
}

impl CompanionChat {
    pub fn new(store: ProfileStore, model: Arc<dyn LanguageModel>, companion: Companion) -> Self {
        Self {
            store,
            model,
            companion,
        }
    }

    /// Handle one user turn and return the companion's reply.
    ///
    /// A whitespace-only utterance is a silent no-op (`None`), not an
    /// error. The user message, extracted facts, and detected patterns
    /// are persisted regardless of the model call's outcome.
    pub async fn handle_user_message(
        &self,
        profile: &mut Profile,
        utterance: &str,
    ) -> Option<String> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return None;
        }

        // History window is captured before the new message is persisted
        // so the utterance appears exactly once in the prompt.
        let history = self.store.get_recent_messages(profile, HISTORY_LIMIT);

        self.store
            .add_message(profile, ConversationMessage::new(utterance, Sender::User));

        // Best-effort memory capture; a persistence hiccup here must not
        // block reply generation.
        extraction::extract_facts(&self.store, profile, utterance);
        extraction::detect_patterns(&self.store, profile, utterance);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(prompt::build_system_prompt(
            &self.companion,
            profile,
        )));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(utterance));

        let reply = match self.model.complete(&messages, REPLY_PARAMS).await {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Warning: chat completion failed: {}", e);
                self.pick_fallback(&profile.name)
            }
        };

        self.store
            .add_message(profile, ConversationMessage::new(reply.clone(), Sender::Ai));

        Some(reply)
    }

    /// Open a session with a personalized greeting.
    ///
    /// Framing branches on whether this is the first-ever conversation or
    /// a return visit (referencing last mood and active goals). Failure
    /// degrades to a deterministic canned greeting with the same branch.
    pub async fn greet(&self, profile: &mut Profile) -> String {
        let messages = vec![
            ChatMessage::system(prompt::build_system_prompt(&self.companion, profile)),
            ChatMessage::user(prompt::build_greeting_instruction(profile)),
        ];

        let greeting = match self.model.complete(&messages, GREETING_PARAMS).await {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Warning: greeting generation failed: {}", e);
                if profile.total_conversations > 0 {
                    format!("{}! Great to see you again! How have you been?", profile.name)
                } else {
                    format!(
                        "Hey {}! I'm {}, and I'm so excited to meet you! What brings you here today?",
                        profile.name, self.companion.name
                    )
                }
            }
        };

        self.store.add_message(
            profile,
            ConversationMessage::new(greeting.clone(), Sender::Ai),
        );

        greeting
    }

    /// Ask the model for 2-3 personalized insights from accumulated
    /// patterns, goals, and recent moods.
    ///
    /// Needs at least 3 detected patterns to have something to work with;
    /// below that a fixed still-learning line is returned.
    pub async fn generate_insights(&self, profile: &Profile) -> String {
        if profile.patterns.len() < 3 {
            return "I'm still getting to know you! Keep sharing and I'll start noticing \
                    patterns that can help you grow."
                .to_string();
        }

        let patterns_text = profile
            .patterns
            .iter()
            .map(|p| p.pattern.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let goals_text = profile
            .goals
            .iter()
            .map(|g| format!("{} ({}%)", g.title, g.progress))
            .collect::<Vec<_>>()
            .join(", ");
        let moods_start = profile.moods.len().saturating_sub(10);
        let moods_text = profile.moods[moods_start..]
            .iter()
            .map(|m| m.mood.label())
            .collect::<Vec<_>>()
            .join(", ");

        let messages = vec![
            ChatMessage::system(
                "You are a wise life coach analyzing patterns in someone's life. \
                 Be insightful but gentle.",
            ),
            ChatMessage::user(format!(
                "Analyze these patterns for {}:\n\
                 Patterns noticed: {}\n\
                 Goals: {}\n\
                 Recent moods: {}\n\n\
                 Give 2-3 personalized insights in a warm, friend-like tone. \
                 Be specific and actionable.",
                profile.name,
                patterns_text,
                if goals_text.is_empty() {
                    "None set yet".to_string()
                } else {
                    goals_text
                },
                if moods_text.is_empty() {
                    "Not tracked yet".to_string()
                } else {
                    moods_text
                },
            )),
        ];

        match self.model.complete(&messages, INSIGHT_PARAMS).await {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Warning: insight generation failed: {}", e);
                "I'm noticing some interesting patterns! Let's talk more and I'll share \
                 my observations."
                    .to_string()
            }
        }
    }

    fn pick_fallback(&self, user_name: &str) -> String {
        let replies = fallback_replies(user_name);
        replies
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| replies[0].clone())
    }

    /// The persona this orchestrator speaks as
    pub fn companion(&self) -> &Companion {
        &self.companion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{CompanionError, Result};
    use crate::types::Gender;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Stub model that records prompts and returns a fixed reply
    struct StubModel {
        reply: Result<String>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl StubModel {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(CompanionError::Api("boom".to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _params: CompletionParams,
        ) -> Result<String> {
            self.calls.lock().unwrap().push(messages.to_vec());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(CompanionError::Api("boom".to_string())),
            }
        }
    }

    fn setup(model: Arc<dyn LanguageModel>) -> (CompanionChat, Profile, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = ProfileStore::new(temp.path().to_path_buf()).unwrap();
        let profile = store
            .create_profile("Alex", "c1", "Sophia", Gender::Female)
            .unwrap();
        let companion = Companion {
            name: "Sophia".to_string(),
            gender: Gender::Female,
            personality: "You are a supportive life coach and friend.".to_string(),
        };
        (CompanionChat::new(store, model, companion), profile, temp)
    }

    #[tokio::test]
    async fn test_turn_persists_both_sides() {
        let (chat, mut profile, _temp) = setup(Arc::new(StubModel::replying("That's wonderful!")));

        let reply = chat
            .handle_user_message(&mut profile, "I got the job!")
            .await;

        assert_eq!(reply.as_deref(), Some("That's wonderful!"));
        assert_eq!(profile.total_messages, 2);
        let messages = &profile.conversations[0].messages;
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].sender, Sender::Ai);
    }

    #[tokio::test]
    async fn test_empty_utterance_is_noop() {
        let model = Arc::new(StubModel::replying("hi"));
        let (chat, mut profile, _temp) = setup(model.clone());

        let reply = chat.handle_user_message(&mut profile, "   \n\t ").await;

        assert!(reply.is_none());
        assert_eq!(profile.total_messages, 0);
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_turn_learns_facts_and_patterns() {
        let (chat, mut profile, _temp) = setup(Arc::new(StubModel::replying("Nice to meet you!")));

        chat.handle_user_message(&mut profile, "My name is Alex and I feel stressed")
            .await;

        assert!(profile
            .learned_facts
            .iter()
            .any(|f| f.fact == "My name is Alex"));
        assert!(profile
            .patterns
            .iter()
            .any(|p| p.pattern == "Often feels stressed or overwhelmed"));
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_and_keeps_user_message() {
        let (chat, mut profile, _temp) = setup(Arc::new(StubModel::failing()));

        let reply = chat
            .handle_user_message(&mut profile, "are you there?")
            .await
            .unwrap();

        assert!(fallback_replies("Alex").contains(&reply));
        // User message stays persisted, and the fallback too
        assert_eq!(profile.total_messages, 2);
        assert_eq!(profile.conversations[0].messages[0].text, "are you there?");
    }

    #[tokio::test]
    async fn test_prompt_shape() {
        let model = Arc::new(StubModel::replying("ok"));
        let (chat, mut profile, _temp) = setup(model.clone());

        chat.handle_user_message(&mut profile, "first").await;
        chat.handle_user_message(&mut profile, "second").await;

        let calls = model.calls.lock().unwrap();
        let second_call = &calls[1];
        // system + 2 history messages (first turn) + new utterance
        assert_eq!(second_call.len(), 4);
        assert_eq!(second_call[0].role, crate::types::Role::System);
        assert!(second_call[0].content.contains("WHAT YOU KNOW ABOUT ALEX"));
        assert_eq!(second_call.last().unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_greeting_failure_first_time_canned_line() {
        let (chat, mut profile, _temp) = setup(Arc::new(StubModel::failing()));

        let greeting = chat.greet(&mut profile).await;

        assert!(greeting.contains("I'm Sophia"));
        assert!(greeting.contains("Alex"));
    }

    #[tokio::test]
    async fn test_greeting_failure_returning_canned_line() {
        let (chat, mut profile, _temp) = setup(Arc::new(StubModel::failing()));
        profile.total_conversations = 3;

        let greeting = chat.greet(&mut profile).await;

        assert!(greeting.contains("Great to see you again"));
    }

    #[tokio::test]
    async fn test_insights_require_three_patterns() {
        let model = Arc::new(StubModel::replying("insightful words"));
        let (chat, mut profile, _temp) = setup(model.clone());

        let early = chat.generate_insights(&profile).await;
        assert!(early.contains("still getting to know you"));
        assert!(model.calls.lock().unwrap().is_empty());

        for utterance in ["so stressed", "worried about money", "tired all the time"] {
            chat.handle_user_message(&mut profile, utterance).await;
        }

        let later = chat.generate_insights(&profile).await;
        assert_eq!(later, "insightful words");
    }
}
