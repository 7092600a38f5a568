//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Dialogue mediator
//!
//! Turns a player's message to a character into a reply. The mediator builds
//! a prompt from the character's personality, mood and recent conversation,
//! asks the configured LLM provider under a timeout, and falls back to a
//! scripted line when the provider fails.
//!
//! The mediator never touches session state. It returns a [`DialogueOutcome`]
//! which the caller applies once the provider call has finished, so an
//! abandoned or timed-out exchange leaves the session as it was.

mod mood;
mod prompt;

pub use self::mood::{KeywordMoodPolicy, MoodPolicy};
pub use self::prompt::{ParsedReply, build_messages, parse_reply, system_prompt};

use crate::content::{Character, Location};
use crate::error::EngineError;
use crate::llm::{LlmError, LlmProvider, LlmRequest};
use crate::session::{CharacterSessionState, Speaker};
use metrics::{counter, histogram};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wayfarer_common::Mood;

/// Tuning for dialogue requests
#[derive(Debug, Clone)]
pub struct DialogueSettings {
    /// Model name passed to the provider
    pub model: String,
    /// Number of most recent turns included in the prompt
    pub history_window: usize,
    /// Upper bound on a single provider call
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Longest reply shown to the player, in characters
    pub max_response_length: usize,
    /// Line used when a character has no scripted fallback
    pub generic_fallback: String,
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            model: String::new(),
            history_window: 6,
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            max_tokens: 200,
            max_response_length: 500,
            generic_fallback: "{name} seems lost in thought and does not answer.".to_string(),
        }
    }
}

/// How a reply was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStatus {
    /// The provider answered
    Replied,
    /// The provider failed and a scripted line was used
    Fallback,
}

impl fmt::Display for DialogueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogueStatus::Replied => write!(f, "ai"),
            DialogueStatus::Fallback => write!(f, "fallback"),
        }
    }
}

/// Result of one exchange, not yet applied to the session
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueOutcome {
    pub text: String,
    pub mood: Mood,
    /// Turns to append, in order
    pub turns: Vec<(Speaker, String)>,
    pub status: DialogueStatus,
}

impl DialogueOutcome {
    /// Fold this outcome into the character's conversation state
    pub fn apply(self, state: &mut CharacterSessionState) {
        for (speaker, text) in self.turns {
            state.append(speaker, text);
        }
        state.set_mood(self.mood);
    }
}

/// Mediates conversations between players and characters
pub struct DialogueMediator {
    provider: Arc<dyn LlmProvider>,
    policy: Arc<dyn MoodPolicy>,
    settings: DialogueSettings,
}

impl DialogueMediator {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: DialogueSettings) -> Self {
        Self {
            provider,
            policy: Arc::new(KeywordMoodPolicy::default()),
            settings,
        }
    }

    /// Replace the mood policy
    pub fn with_policy(mut self, policy: Arc<dyn MoodPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn settings(&self) -> &DialogueSettings {
        &self.settings
    }

    /// Produce a reply from `character` to `message`.
    ///
    /// Never fails: provider errors, timeouts and unusable replies produce a
    /// fallback outcome that keeps the mood and records only the player turn.
    #[tracing::instrument(skip_all, fields(character = %character.id))]
    pub async fn converse(
        &self,
        character: &Character,
        state: &CharacterSessionState,
        location: &Location,
        message: &str,
    ) -> DialogueOutcome {
        let started = Instant::now();
        let result = self.ask(character, state, location, message).await;
        histogram!("wayfarer.dialogue.duration").record(started.elapsed().as_secs_f64());

        match result {
            Ok(reply) => {
                let mood = self.policy.next_mood(state.mood(), &reply.text, reply.mood);
                tracing::debug!("{} replied (mood {} -> {})", character.id, state.mood(), mood);
                DialogueOutcome {
                    text: reply.text.clone(),
                    mood,
                    turns: vec![
                        (Speaker::Player, message.to_string()),
                        (Speaker::Character, reply.text),
                    ],
                    status: DialogueStatus::Replied,
                }
            }
            Err(e) => {
                tracing::warn!("Dialogue with {} fell back: {}", character.id, e);
                counter!("wayfarer.dialogue.fallbacks").increment(1);
                DialogueOutcome {
                    text: self.fallback_line(character, state, message),
                    mood: state.mood(),
                    turns: vec![(Speaker::Player, message.to_string())],
                    status: DialogueStatus::Fallback,
                }
            }
        }
    }

    async fn ask(
        &self,
        character: &Character,
        state: &CharacterSessionState,
        location: &Location,
        message: &str,
    ) -> Result<ParsedReply, EngineError> {
        let system = system_prompt(
            character,
            state.mood(),
            location,
            self.settings.max_response_length,
        );
        let messages = build_messages(system, state.recent(self.settings.history_window), message);
        let request = LlmRequest::new(self.settings.model.clone())
            .with_messages(messages)
            .with_temperature(self.settings.temperature)
            .with_max_tokens(self.settings.max_tokens);

        let response = tokio::time::timeout(self.settings.timeout, self.provider.complete(request))
            .await
            .map_err(|_| {
                LlmError::Timeout(format!(
                    "No reply within {}s",
                    self.settings.timeout.as_secs_f64()
                ))
            })??;

        Ok(parse_reply(&response.content, self.settings.max_response_length)?)
    }

    /// Pick a scripted line, rotating through the character's lines
    fn fallback_line(
        &self,
        character: &Character,
        state: &CharacterSessionState,
        message: &str,
    ) -> String {
        let template = if character.fallback_lines.is_empty() {
            &self.settings.generic_fallback
        } else {
            let index = (state.next_ordinal() % character.fallback_lines.len() as u64) as usize;
            &character.fallback_lines[index]
        };
        template
            .replace("{name}", &character.name)
            .replace("{message}", message)
    }
}
