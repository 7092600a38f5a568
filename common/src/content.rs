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

//! Content records
//!
//! These are the already-parsed world records a content loader hands to the
//! engine. They are plain data; all validation happens when the engine builds
//! its content store from them.

use crate::mood::Mood;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Unique key of a location
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique key of a character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(String);

impl CharacterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A place in the world graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub description: String,
    /// Direction label (canonical, e.g. `north`) to destination
    #[serde(default)]
    pub exits: BTreeMap<String, LocationId>,
    /// Characters standing here
    #[serde(default)]
    pub characters: BTreeSet<CharacterId>,
}

impl LocationRecord {
    /// Create a location with no exits and nobody present
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
            description: description.into(),
            exits: BTreeMap::new(),
            characters: BTreeSet::new(),
        }
    }

    /// Add an exit
    pub fn with_exit(mut self, direction: impl Into<String>, destination: impl Into<String>) -> Self {
        self.exits
            .insert(direction.into(), LocationId::new(destination));
        self
    }

    /// Place a character here
    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.characters.insert(CharacterId::new(character));
        self
    }
}

/// A non-player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    /// Free-text persona used to prime dialogue prompts
    pub personality: String,
    #[serde(default)]
    pub base_mood: Mood,
    /// Scripted lines used when no generated reply is available.
    ///
    /// `{message}` and `{name}` are replaced with the player's message and
    /// the character's display name.
    #[serde(default)]
    pub fallback_lines: Vec<String>,
}

impl CharacterRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        personality: impl Into<String>,
    ) -> Self {
        Self {
            id: CharacterId::new(id),
            name: name.into(),
            personality: personality.into(),
            base_mood: Mood::default(),
            fallback_lines: Vec::new(),
        }
    }

    pub fn with_base_mood(mut self, mood: Mood) -> Self {
        self.base_mood = mood;
        self
    }

    pub fn with_fallback(mut self, line: impl Into<String>) -> Self {
        self.fallback_lines.push(line.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_builder() {
        let location = LocationRecord::new("square", "Square", "A quiet square.")
            .with_exit("north", "forest")
            .with_character("elder");

        assert_eq!(location.id.as_str(), "square");
        assert_eq!(location.exits.get("north"), Some(&LocationId::from("forest")));
        assert!(location.characters.contains(&CharacterId::from("elder")));
    }

    #[test]
    fn test_records_deserialize_with_defaults() {
        let location: LocationRecord = serde_json::from_str(
            r#"{"id": "cave", "name": "Cave", "description": "Dark and damp."}"#,
        )
        .unwrap();
        assert!(location.exits.is_empty());
        assert!(location.characters.is_empty());

        let character: CharacterRecord = serde_json::from_str(
            r#"{"id": "hermit", "name": "Hermit", "personality": "Gruff", "base_mood": "hostile"}"#,
        )
        .unwrap();
        assert_eq!(character.base_mood, Mood::Hostile);
        assert!(character.fallback_lines.is_empty());
    }
}
