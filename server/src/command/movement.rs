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

//! Go command implementation

use super::look::describe_location;
use super::vocabulary::Vocabulary;
use super::{CommandResult, current_location};
use crate::content::ContentStore;
use crate::error::{EngineError, EngineResult};
use crate::session::Session;

/// Move through an exit of the current location
#[tracing::instrument(skip(content, vocabulary, session), fields(session = session.id()))]
pub fn go(
    content: &ContentStore,
    vocabulary: &Vocabulary,
    session: &mut Session,
    args: &[String],
) -> EngineResult<CommandResult> {
    let location = current_location(content, session)?;

    let Some(word) = args.first() else {
        if location.exits.is_empty() {
            return Ok(CommandResult::Failure(
                "There is no way out of here.".to_string(),
            ));
        }
        let exits: Vec<_> = location.exits.keys().map(String::as_str).collect();
        return Ok(CommandResult::Invalid(format!(
            "Go where? Available exits: {}",
            exits.join(", ")
        )));
    };

    let lowered = word.to_lowercase();
    let direction = vocabulary.direction(&lowered).unwrap_or(lowered.as_str());

    let Some(destination_id) = location.exits.get(direction) else {
        tracing::debug!("No exit {} from {}", direction, location.id);
        return Ok(CommandResult::Failure(format!(
            "You cannot go {} from here.",
            word
        )));
    };

    let destination = content.location(destination_id).map_err(|_| {
        EngineError::StateCorruption(format!(
            "Exit {} of {} leads to unknown location {}",
            direction, location.id, destination_id
        ))
    })?;

    session.move_to(destination.id.clone());
    tracing::debug!("Moved {} from {} to {}", direction, location.id, destination.id);

    Ok(CommandResult::Success(format!(
        "You head {}.\n\n{}",
        direction,
        describe_location(content, destination)
    )))
}
