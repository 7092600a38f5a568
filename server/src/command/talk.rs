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

//! Talk command implementation

use super::{CommandResult, ResolverSettings, current_location};
use crate::content::{Character, ContentStore};
use crate::dialogue::DialogueMediator;
use crate::error::{EngineError, EngineResult};
use crate::session::Session;
use wayfarer_common::LocationId;

/// Speak to a character at the current location
#[tracing::instrument(skip(content, mediator, settings, session), fields(session = session.id()))]
pub async fn talk(
    content: &ContentStore,
    mediator: &DialogueMediator,
    settings: &ResolverSettings,
    session: &mut Session,
    args: &[String],
) -> EngineResult<CommandResult> {
    if args.is_empty() {
        return Ok(CommandResult::Invalid(
            "Talk to whom? Usage: talk <character> [message]".to_string(),
        ));
    }

    let location = current_location(content, session)?;
    let (character, words) = match addressee(content, &location.id, args) {
        Ok(found) => found,
        Err(EngineError::NotFound { .. }) => {
            return Ok(CommandResult::Failure(format!(
                "There is no '{}' here. Type 'characters' to see who is around.",
                args[0]
            )));
        }
        Err(EngineError::InvalidIntent(reason)) => {
            return Ok(CommandResult::Invalid(format!(
                "{}. Use their full name.",
                reason
            )));
        }
        Err(e) => return Err(e),
    };

    let message = if words.is_empty() {
        settings.default_greeting.clone()
    } else {
        words.join(" ")
    };

    let state = session.character_state_mut(character, settings.history_cap);
    let outcome = mediator.converse(character, state, location, &message).await;
    let status = outcome.status;
    let reply = outcome.text.clone();
    outcome.apply(state);

    let mut output = format!(
        "You say to {name}: \"{message}\"\n\n{name}: \"{reply}\"",
        name = character.name,
    );
    if settings.debug {
        output.push_str(&format!("\n[debug: {}, mood: {}]", status, state.mood()));
    }
    Ok(CommandResult::Success(output))
}

/// Split `args` into the addressed character and the message.
///
/// The longest run of leading words naming a present character by id or full
/// display name wins, so multi-word names work. Otherwise the first word is
/// matched against single words of the present characters' names.
fn addressee<'a, 'w>(
    content: &'a ContentStore,
    location: &LocationId,
    args: &'w [String],
) -> EngineResult<(&'a Character, &'w [String])> {
    for split in (1..=args.len()).rev() {
        let name = args[..split].join(" ");
        if let Some(character) = content.character_named_at(location, &name)? {
            return Ok((character, &args[split..]));
        }
    }
    let character = content.find_character_at(location, &args[0])?;
    Ok((character, &args[1..]))
}
