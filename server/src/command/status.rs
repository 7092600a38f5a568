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

//! Status and clear command implementations

use super::{CommandResult, ResolverSettings, current_location};
use crate::content::ContentStore;
use crate::error::EngineResult;
use crate::session::Session;

#[tracing::instrument(skip_all, fields(session = session.id()))]
pub fn status(
    content: &ContentStore,
    settings: &ResolverSettings,
    session: &Session,
) -> EngineResult<CommandResult> {
    let location = current_location(content, session)?;
    let present = content.characters_at(&location.id)?.len();

    Ok(CommandResult::Success(format!(
        "{} v{}\n\
         Current location: {}\n\
         Locations visited: {}\n\
         Characters here: {}\n\
         Characters spoken to: {}",
        settings.title,
        settings.version,
        location.name,
        session.visited_count(),
        present,
        session.addressed_count(),
    )))
}

pub fn clear() -> CommandResult {
    CommandResult::ClearScreen("The screen has been cleared.".to_string())
}
