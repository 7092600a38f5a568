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

//! Game engine
//!
//! The transport-facing entry point. A transport hands the engine a session
//! id and a raw line of text; the engine finds or creates the session,
//! serializes on it, resolves the command and reports where the player ended
//! up.

use crate::command::{
    CommandResolver, ResolverSettings, Vocabulary, current_location, describe_location,
};
use crate::content::ContentStore;
use crate::dialogue::{DialogueMediator, DialogueSettings};
use crate::error::EngineResult;
use crate::llm::LlmProvider;
use crate::registry::SessionRegistry;
use crate::session::Session;
use std::sync::Arc;
use wayfarer_common::CommandResponse;

/// Everything the engine needs besides content and a provider
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub resolver: ResolverSettings,
    pub dialogue: DialogueSettings,
    /// Cap on live sessions; 0 means unlimited
    pub max_sessions: usize,
}

/// Session-scoped game engine
pub struct GameEngine {
    content: Arc<ContentStore>,
    registry: Arc<SessionRegistry>,
    resolver: CommandResolver,
}

impl GameEngine {
    pub fn new(
        content: Arc<ContentStore>,
        provider: Arc<dyn LlmProvider>,
        settings: EngineSettings,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::new(
            content.entry().clone(),
            settings.max_sessions,
        ));
        let mediator = Arc::new(DialogueMediator::new(provider, settings.dialogue));
        let resolver = CommandResolver::new(content.clone(), mediator, settings.resolver);

        Self {
            content,
            registry,
            resolver,
        }
    }

    /// Replace the command vocabulary
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.resolver = self.resolver.with_vocabulary(vocabulary);
        self
    }

    pub fn content(&self) -> &Arc<ContentStore> {
        &self.content
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Handle one line of player input for `session_id`.
    ///
    /// Unknown session ids get a fresh session at the entry location. Only
    /// [`crate::EngineError::StateCorruption`] is returned as an error; every other
    /// problem is reported to the player in the response text.
    #[tracing::instrument(skip(self, raw))]
    pub async fn handle_command(
        &self,
        session_id: &str,
        raw: &str,
    ) -> EngineResult<CommandResponse> {
        let handle = self.registry.get_or_create(session_id);
        let mut session = handle.lock().await;
        session.touch();

        let result = match self.resolver.resolve(&mut session, raw).await {
            Ok(result) => result,
            Err(e) if e.is_recoverable() => {
                tracing::warn!("Recoverable error reached the engine: {}", e);
                return Ok(respond(&session, e.user_message().to_string(), false));
            }
            Err(e) => {
                tracing::error!("Aborting command for session {}: {}", session_id, e);
                return Err(e);
            }
        };

        let clear_screen = result.clears_screen();
        Ok(respond(&session, result.into_text(), clear_screen))
    }

    /// Greet a session with the game banner and a description of where it is
    #[tracing::instrument(skip(self))]
    pub async fn welcome(&self, session_id: &str) -> EngineResult<CommandResponse> {
        let handle = self.registry.get_or_create(session_id);
        let mut session = handle.lock().await;
        session.touch();

        let location = current_location(&self.content, &session)
            .inspect_err(|e| tracing::error!("{}", e))?;

        let settings = self.resolver.settings();
        let text = format!(
            "Welcome to {}!\n\n\
             You are a young adventurer newly arrived in a mysterious land.\n\
             Explore the world and talk with the people you meet.\n\n\
             Tip: type 'help' to see available commands\n\
             Tip: type 'clear' to clear the screen\n\n\
             ---\n\n{}",
            settings.title,
            describe_location(&self.content, location)
        );
        Ok(respond(&session, text, false))
    }
}

fn respond(session: &Session, text: String, clear_screen: bool) -> CommandResponse {
    CommandResponse {
        text,
        location_id: session.current_location().clone(),
        visited_count: session.visited_count(),
        clear_screen,
    }
}
