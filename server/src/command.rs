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

//! Command resolver for processing player input

mod help;
mod intent;
mod look;
mod movement;
mod status;
mod talk;
mod vocabulary;

pub use self::intent::Intent;
pub use self::look::describe_location;
pub use self::vocabulary::{IntentKind, LanguagePack, Vocabulary};

use crate::content::{ContentStore, Location};
use crate::dialogue::DialogueMediator;
use crate::error::{EngineError, EngineResult};
use crate::session::Session;
use metrics::counter;
use std::sync::Arc;

/// Outcome of a resolved command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Success(String),
    Failure(String),
    Invalid(String),
    /// The transport should clear the screen, then show the text
    ClearScreen(String),
}

impl CommandResult {
    pub fn text(&self) -> &str {
        match self {
            CommandResult::Success(text)
            | CommandResult::Failure(text)
            | CommandResult::Invalid(text)
            | CommandResult::ClearScreen(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CommandResult::Success(text)
            | CommandResult::Failure(text)
            | CommandResult::Invalid(text)
            | CommandResult::ClearScreen(text) => text,
        }
    }

    pub fn clears_screen(&self) -> bool {
        matches!(self, CommandResult::ClearScreen(_))
    }
}

/// Game-level settings the resolver needs
#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub title: String,
    pub version: String,
    /// Append dialogue diagnostics to talk replies
    pub debug: bool,
    /// Message sent by `talk <character>` with nothing else
    pub default_greeting: String,
    /// Turns kept per character conversation
    pub history_cap: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            title: "Wayfarer".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
            default_greeting: "hello".to_string(),
            history_cap: 20,
        }
    }
}

/// Maps raw command lines onto intents and runs them against a session
pub struct CommandResolver {
    content: Arc<ContentStore>,
    mediator: Arc<DialogueMediator>,
    vocabulary: Vocabulary,
    settings: ResolverSettings,
}

impl CommandResolver {
    /// Create a resolver with the English and Chinese vocabulary
    pub fn new(
        content: Arc<ContentStore>,
        mediator: Arc<DialogueMediator>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            content,
            mediator,
            vocabulary: Vocabulary::standard(),
            settings,
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve and execute one command line.
    ///
    /// Every intent produces a [`CommandResult`]; only a broken engine
    /// invariant is returned as an error.
    #[tracing::instrument(skip(self, session), fields(session = session.id()))]
    pub async fn resolve(&self, session: &mut Session, raw: &str) -> EngineResult<CommandResult> {
        let intent = Intent::parse(raw, &self.vocabulary);
        counter!("wayfarer.commands.total", "intent" => intent.kind.as_str()).increment(1);
        tracing::debug!("Resolved '{}' as {} {:?}", intent.verb, intent.kind, intent.args);

        let content = self.content.as_ref();
        match intent.kind {
            IntentKind::Look => look::look(content, session),
            IntentKind::Where => look::where_am_i(content, session),
            IntentKind::Characters => look::characters(content, session),
            IntentKind::Go => movement::go(content, &self.vocabulary, session, &intent.args),
            IntentKind::Talk => {
                talk::talk(content, &self.mediator, &self.settings, session, &intent.args).await
            }
            IntentKind::Help => Ok(help::help()),
            IntentKind::Status => status::status(content, &self.settings, session),
            IntentKind::Clear => Ok(status::clear()),
            IntentKind::Unknown => Ok(help::unknown(&intent.verb)),
        }
    }
}

/// The session's current location, which must always resolve
pub(crate) fn current_location<'a>(
    content: &'a ContentStore,
    session: &Session,
) -> EngineResult<&'a Location> {
    content.location(session.current_location()).map_err(|_| {
        EngineError::StateCorruption(format!(
            "Session {} is at unknown location {}",
            session.id(),
            session.current_location()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::DialogueSettings;
    use crate::llm::{LlmResponse, MockLlmProvider};
    use wayfarer_common::{CharacterRecord, LocationId, LocationRecord, Mood};

    fn world() -> Arc<ContentStore> {
        Arc::new(
            ContentStore::new(
                vec![
                    LocationRecord::new("square", "Square", "A quiet square.")
                        .with_exit("north", "gate")
                        .with_character("villager")
                        .with_character("elder")
                        .with_character("guard"),
                    LocationRecord::new("gate", "Gate", "A wooden gate.")
                        .with_exit("south", "square"),
                ],
                vec![
                    CharacterRecord::new("villager", "Villager", "Plain-spoken")
                        .with_base_mood(Mood::Neutral)
                        .with_fallback("Hm? '{message}'?"),
                    CharacterRecord::new("elder", "Village Elder", "Wise")
                        .with_base_mood(Mood::Friendly),
                    CharacterRecord::new("guard", "Village Guard", "Stern"),
                ],
                LocationId::from("square"),
            )
            .unwrap(),
        )
    }

    fn resolver(provider: MockLlmProvider, settings: ResolverSettings) -> CommandResolver {
        let mediator = DialogueMediator::new(Arc::new(provider), DialogueSettings::default());
        CommandResolver::new(world(), Arc::new(mediator), settings)
    }

    fn quiet() -> MockLlmProvider {
        let mut provider = MockLlmProvider::new();
        provider.expect_complete().never();
        provider
    }

    fn session() -> Session {
        Session::new("test", LocationId::from("square"))
    }

    #[tokio::test]
    async fn test_look_and_where() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "look").await.unwrap();
        assert!(matches!(result, CommandResult::Success(_)));
        assert!(result.text().contains("A quiet square."));
        assert!(result.text().contains("north"));
        assert!(result.text().contains("Villager"));

        let result = resolver.resolve(&mut session, "where").await.unwrap();
        assert_eq!(result.text(), "Current location: Square");
    }

    #[tokio::test]
    async fn test_go_moves_and_invalid_go_does_not() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "go north").await.unwrap();
        assert!(matches!(result, CommandResult::Success(_)));
        assert!(result.text().contains("A wooden gate."));
        assert_eq!(session.current_location().as_str(), "gate");
        assert_eq!(session.visited_count(), 2);

        let first = resolver.resolve(&mut session, "go north").await.unwrap();
        let second = resolver.resolve(&mut session, "go north").await.unwrap();
        assert!(matches!(first, CommandResult::Failure(_)));
        assert_eq!(first, second);
        assert_eq!(session.current_location().as_str(), "gate");
    }

    #[tokio::test]
    async fn test_direction_synonyms() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        resolver.resolve(&mut session, "北").await.unwrap();
        assert_eq!(session.current_location().as_str(), "gate");
        resolver.resolve(&mut session, "go s").await.unwrap();
        assert_eq!(session.current_location().as_str(), "square");
    }

    #[tokio::test]
    async fn test_go_without_direction_lists_exits() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "go").await.unwrap();
        assert!(result.text().contains("north"));
        assert_eq!(session.current_location().as_str(), "square");
    }

    #[tokio::test]
    async fn test_talk_to_absent_character_skips_ai() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "talk ghost boo").await.unwrap();
        assert!(matches!(result, CommandResult::Failure(_)));
        assert_eq!(session.addressed_count(), 0);

        let result = resolver.resolve(&mut session, "talk").await.unwrap();
        assert!(matches!(result, CommandResult::Invalid(_)));
    }

    #[tokio::test]
    async fn test_talk_records_exchange() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(LlmResponse::new("Greetings, traveler.", "mock")));
        let resolver = resolver(provider, ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "talk villager").await.unwrap();
        assert!(result.text().contains("\"hello\""));
        assert!(result.text().contains("Greetings, traveler."));

        let state = session.character_state(&"villager".into()).unwrap();
        assert_eq!(state.len(), 2);
    }

    #[tokio::test]
    async fn test_talk_to_multi_word_name() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .withf(|request| {
                request
                    .messages
                    .last()
                    .is_some_and(|m| m.content == "good morning")
            })
            .times(1)
            .returning(|_| Ok(LlmResponse::new("Morning, child.", "mock")));
        let resolver = resolver(provider, ResolverSettings::default());
        let mut session = session();

        let result = resolver
            .resolve(&mut session, "talk Village Elder good morning")
            .await
            .unwrap();
        assert!(result.text().contains("You say to Village Elder: \"good morning\""));

        let state = session.character_state(&"elder".into()).unwrap();
        let turns: Vec<_> = state.turns().map(|t| t.text.as_str()).collect();
        assert_eq!(turns, vec!["good morning", "Morning, child."]);
        assert!(session.character_state(&"villager".into()).is_none());
    }

    #[tokio::test]
    async fn test_talk_to_ambiguous_name_skips_ai() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "talk village hi").await.unwrap();
        assert!(matches!(result, CommandResult::Invalid(_)));
        assert!(result.text().contains("Village Elder or Village Guard"));
        assert_eq!(session.addressed_count(), 0);
    }

    #[tokio::test]
    async fn test_talk_debug_suffix() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok(LlmResponse::new("Welcome, friend!", "mock")));
        let settings = ResolverSettings {
            debug: true,
            ..ResolverSettings::default()
        };
        let resolver = resolver(provider, settings);
        let mut session = session();

        let result = resolver.resolve(&mut session, "talk villager hi").await.unwrap();
        assert!(result.text().ends_with("[debug: ai, mood: friendly]"));
    }

    #[tokio::test]
    async fn test_fixed_commands() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let help = resolver.resolve(&mut session, "help").await.unwrap();
        assert!(help.text().contains("talk"));

        let clear = resolver.resolve(&mut session, "清屏").await.unwrap();
        assert!(clear.clears_screen());

        let status = resolver.resolve(&mut session, "status").await.unwrap();
        assert!(status.text().contains("Square"));
        assert!(status.text().contains("Locations visited: 1"));

        let unknown = resolver.resolve(&mut session, "dance").await.unwrap();
        assert!(matches!(unknown, CommandResult::Invalid(_)));
        assert!(unknown.text().contains("dance"));

        let empty = resolver.resolve(&mut session, "").await.unwrap();
        assert!(matches!(empty, CommandResult::Invalid(_)));
    }

    #[tokio::test]
    async fn test_characters_lists_session_mood() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = session();

        let result = resolver.resolve(&mut session, "characters").await.unwrap();
        assert!(result.text().contains("Villager (villager)"));
        assert!(result.text().contains(Mood::Neutral.describe()));

        session.move_to(LocationId::from("gate"));
        let result = resolver.resolve(&mut session, "chars").await.unwrap();
        assert_eq!(result.text(), "There is nobody else here.");
    }

    #[tokio::test]
    async fn test_unknown_location_is_corruption() {
        let resolver = resolver(quiet(), ResolverSettings::default());
        let mut session = Session::new("broken", LocationId::from("atlantis"));

        let result = resolver.resolve(&mut session, "look").await;
        assert!(matches!(result, Err(EngineError::StateCorruption(_))));
    }
}
