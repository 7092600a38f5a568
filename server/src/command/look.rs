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

//! Look, where and characters command implementations

use super::{CommandResult, current_location};
use crate::content::{ContentStore, Location};
use crate::error::EngineResult;
use crate::session::Session;

/// Full description of a location: name, description, exits and who is here
pub fn describe_location(content: &ContentStore, location: &Location) -> String {
    let mut output = format!("{}\n", location.name);
    output.push_str(&format!("{}\n", "=".repeat(location.name.chars().count())));
    output.push_str(&location.description);
    output.push('\n');

    if location.exits.is_empty() {
        output.push_str("\nThere are no obvious exits.\n");
    } else {
        let exits: Vec<_> = location.exits.keys().map(String::as_str).collect();
        output.push_str(&format!("\nExits: {}\n", exits.join(", ")));
    }

    let here: Vec<_> = location
        .characters
        .iter()
        .filter_map(|id| content.character(id).ok())
        .map(|c| c.name.as_str())
        .collect();
    if !here.is_empty() {
        output.push_str(&format!("\nAlso here: {}\n", here.join(", ")));
    }

    output.trim_end().to_string()
}

#[tracing::instrument(skip_all, fields(session = session.id()))]
pub fn look(content: &ContentStore, session: &Session) -> EngineResult<CommandResult> {
    let location = current_location(content, session)?;
    tracing::debug!("Look at {}", location.id);
    Ok(CommandResult::Success(describe_location(content, location)))
}

#[tracing::instrument(skip_all, fields(session = session.id()))]
pub fn where_am_i(content: &ContentStore, session: &Session) -> EngineResult<CommandResult> {
    let location = current_location(content, session)?;
    Ok(CommandResult::Success(format!(
        "Current location: {}",
        location.name
    )))
}

/// List the characters present, with the mood each shows this player
#[tracing::instrument(skip_all, fields(session = session.id()))]
pub fn characters(content: &ContentStore, session: &Session) -> EngineResult<CommandResult> {
    let location = current_location(content, session)?;
    let present = content.characters_at(&location.id)?;
    if present.is_empty() {
        return Ok(CommandResult::Success(
            "There is nobody else here.".to_string(),
        ));
    }

    let mut output = String::from("Characters here:\n");
    for character in present {
        output.push_str(&format!(
            "  - {} ({}) - {}\n",
            character.name,
            character.id,
            session.mood_of(character).describe()
        ));
    }
    output.push_str("\nUse 'talk <character> <message>' to speak with them.");
    Ok(CommandResult::Success(output))
}
