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

//! Content store
//!
//! Immutable index of the world's locations and characters. The store is built
//! once from loader records, validated, and then shared read-only between all
//! sessions behind an `Arc`.

mod village;

use crate::error::{EngineError, EngineResult};
use std::collections::HashMap;
use thiserror::Error;
use wayfarer_common::{CharacterId, CharacterRecord, LocationId, LocationRecord};

/// A location as stored in the content store
pub type Location = LocationRecord;

/// A character as stored in the content store
pub type Character = CharacterRecord;

/// Problems found while building a content store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Duplicate location id: {0}")]
    DuplicateLocation(LocationId),

    #[error("Duplicate character id: {0}")]
    DuplicateCharacter(CharacterId),

    #[error("Entry location {0} does not exist")]
    UnknownEntry(LocationId),

    #[error("Exit {direction} of {from} leads to unknown location {to}")]
    DanglingExit {
        from: LocationId,
        direction: String,
        to: LocationId,
    },

    #[error("Location {location} lists unknown character {character}")]
    UnknownCharacter {
        location: LocationId,
        character: CharacterId,
    },
}

/// Read-only world index
#[derive(Debug)]
pub struct ContentStore {
    locations: HashMap<LocationId, Location>,
    characters: HashMap<CharacterId, Character>,
    entry: LocationId,
}

impl ContentStore {
    /// Build a store from loader records.
    ///
    /// Every exit must lead to a loaded location and every character listed
    /// at a location must be loaded.
    pub fn new(
        locations: impl IntoIterator<Item = LocationRecord>,
        characters: impl IntoIterator<Item = CharacterRecord>,
        entry: LocationId,
    ) -> Result<Self, ContentError> {
        let mut location_index = HashMap::new();
        for location in locations {
            if location_index.contains_key(&location.id) {
                return Err(ContentError::DuplicateLocation(location.id));
            }
            location_index.insert(location.id.clone(), location);
        }

        let mut character_index = HashMap::new();
        for character in characters {
            if character_index.contains_key(&character.id) {
                return Err(ContentError::DuplicateCharacter(character.id));
            }
            character_index.insert(character.id.clone(), character);
        }

        if !location_index.contains_key(&entry) {
            return Err(ContentError::UnknownEntry(entry));
        }

        for location in location_index.values() {
            for (direction, destination) in &location.exits {
                if !location_index.contains_key(destination) {
                    return Err(ContentError::DanglingExit {
                        from: location.id.clone(),
                        direction: direction.clone(),
                        to: destination.clone(),
                    });
                }
            }
            for character in &location.characters {
                if !character_index.contains_key(character) {
                    return Err(ContentError::UnknownCharacter {
                        location: location.id.clone(),
                        character: character.clone(),
                    });
                }
            }
        }

        tracing::info!(
            "Content store loaded: {} locations, {} characters, entry {}",
            location_index.len(),
            character_index.len(),
            entry
        );

        Ok(Self {
            locations: location_index,
            characters: character_index,
            entry,
        })
    }

    /// The village world shipped with the game
    pub fn village() -> Result<Self, ContentError> {
        let (locations, characters, entry) = village::records();
        Self::new(locations, characters, entry)
    }

    /// Location new sessions start in
    pub fn entry(&self) -> &LocationId {
        &self.entry
    }

    pub fn location(&self, id: &LocationId) -> EngineResult<&Location> {
        self.locations
            .get(id)
            .ok_or_else(|| EngineError::location_not_found(id.as_str()))
    }

    pub fn character(&self, id: &CharacterId) -> EngineResult<&Character> {
        self.characters
            .get(id)
            .ok_or_else(|| EngineError::character_not_found(id.as_str()))
    }

    /// Characters present at a location, ordered by id
    pub fn characters_at(&self, location: &LocationId) -> EngineResult<Vec<&Character>> {
        let location = self.location(location)?;
        // BTreeSet iteration keeps this ordered
        Ok(location
            .characters
            .iter()
            .filter_map(|id| self.characters.get(id))
            .collect())
    }

    /// Character present at `location` whose id or full display name is
    /// `name`, ignoring case.
    pub fn character_named_at(
        &self,
        location: &LocationId,
        name: &str,
    ) -> EngineResult<Option<&Character>> {
        let name = name.trim().to_lowercase();
        Ok(self.characters_at(location)?.into_iter().find(|c| {
            c.id.as_str().to_lowercase() == name || c.name.to_lowercase() == name
        }))
    }

    /// Find a character present at `location` by id, display name or a single
    /// word of the display name.
    ///
    /// Matching ignores case. An exact id or name match wins over a name word.
    /// A word shared by several present characters is an
    /// [`EngineError::InvalidIntent`] naming the candidates. A character that
    /// exists elsewhere in the world is reported as not found here.
    pub fn find_character_at(
        &self,
        location: &LocationId,
        needle: &str,
    ) -> EngineResult<&Character> {
        if let Some(character) = self.character_named_at(location, needle)? {
            return Ok(character);
        }

        let needle = needle.trim().to_lowercase();
        let mut matches = self.characters_at(location)?.into_iter().filter(|c| {
            c.name
                .split_whitespace()
                .any(|word| word.to_lowercase() == needle)
        });
        match (matches.next(), matches.next()) {
            (Some(character), None) => Ok(character),
            (None, _) => Err(EngineError::character_not_found(needle)),
            (Some(first), Some(second)) => {
                let mut names = vec![first.name.as_str(), second.name.as_str()];
                names.extend(matches.map(|c| c.name.as_str()));
                Err(EngineError::InvalidIntent(format!(
                    "'{}' could mean {}",
                    needle,
                    names.join(" or ")
                )))
            }
        }
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_common::Mood;

    fn small_world() -> ContentStore {
        ContentStore::new(
            vec![
                LocationRecord::new("square", "Square", "A quiet square.")
                    .with_exit("north", "gate")
                    .with_character("guard")
                    .with_character("baker"),
                LocationRecord::new("gate", "Gate", "A wooden gate.").with_exit("south", "square"),
            ],
            vec![
                CharacterRecord::new("guard", "Town Guard", "Stern")
                    .with_base_mood(Mood::Hostile),
                CharacterRecord::new("baker", "Baker", "Cheerful"),
            ],
            LocationId::from("square"),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let store = small_world();
        assert_eq!(store.location(&"gate".into()).unwrap().name, "Gate");
        assert_eq!(store.character(&"guard".into()).unwrap().base_mood, Mood::Hostile);
        assert!(matches!(
            store.location(&"moon".into()),
            Err(EngineError::NotFound { kind: "Location", .. })
        ));
        assert!(store.character(&"dragon".into()).is_err());
        assert_eq!(store.entry().as_str(), "square");
    }

    #[test]
    fn test_characters_at_is_ordered() {
        let store = small_world();
        let here: Vec<_> = store
            .characters_at(&"square".into())
            .unwrap()
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(here, vec!["baker", "guard"]);
        assert!(store.characters_at(&"gate".into()).unwrap().is_empty());
    }

    #[test]
    fn test_find_character_by_id_or_name() {
        let store = small_world();
        let square = LocationId::from("square");
        assert_eq!(store.find_character_at(&square, "GUARD").unwrap().id.as_str(), "guard");
        assert_eq!(store.find_character_at(&square, "town guard").unwrap().id.as_str(), "guard");
        assert_eq!(store.find_character_at(&square, "baker").unwrap().id.as_str(), "baker");
        assert!(store.find_character_at(&"gate".into(), "guard").is_err());
    }

    #[test]
    fn test_shared_name_word_is_ambiguous() {
        let store = ContentStore::new(
            vec![LocationRecord::new("square", "Square", "")
                .with_character("crier")
                .with_character("guard")
                .with_character("town")],
            vec![
                CharacterRecord::new("crier", "Town Crier", "Loud"),
                CharacterRecord::new("guard", "Town Guard", "Stern"),
                CharacterRecord::new("town", "Mayor", "Proud"),
            ],
            LocationId::from("square"),
        )
        .unwrap();
        let square = LocationId::from("square");

        // exact id beats the shared word
        assert_eq!(store.find_character_at(&square, "town").unwrap().id.as_str(), "town");
        assert_eq!(store.find_character_at(&square, "crier").unwrap().id.as_str(), "crier");

        let store = ContentStore::new(
            vec![LocationRecord::new("square", "Square", "")
                .with_character("crier")
                .with_character("guard")],
            vec![
                CharacterRecord::new("crier", "Town Crier", "Loud"),
                CharacterRecord::new("guard", "Town Guard", "Stern"),
            ],
            LocationId::from("square"),
        )
        .unwrap();
        match store.find_character_at(&square, "Town") {
            Err(EngineError::InvalidIntent(message)) => {
                assert_eq!(message, "'town' could mean Town Crier or Town Guard");
            }
            other => panic!("expected ambiguity, got {:?}", other.map(|c| c.id.clone())),
        }
        assert_eq!(
            store.find_character_at(&square, "town guard").unwrap().id.as_str(),
            "guard"
        );
        assert!(store.character_named_at(&square, "town").unwrap().is_none());
    }

    #[test]
    fn test_rejects_dangling_exit() {
        let result = ContentStore::new(
            vec![LocationRecord::new("a", "A", "").with_exit("up", "nowhere")],
            vec![],
            LocationId::from("a"),
        );
        assert!(matches!(result, Err(ContentError::DanglingExit { .. })));
    }

    #[test]
    fn test_rejects_unknown_entry_and_duplicates() {
        let result = ContentStore::new(
            vec![LocationRecord::new("a", "A", "")],
            vec![],
            LocationId::from("b"),
        );
        assert_eq!(result.unwrap_err(), ContentError::UnknownEntry("b".into()));

        let result = ContentStore::new(
            vec![LocationRecord::new("a", "A", ""), LocationRecord::new("a", "A2", "")],
            vec![],
            LocationId::from("a"),
        );
        assert!(matches!(result, Err(ContentError::DuplicateLocation(_))));
    }

    #[test]
    fn test_rejects_unknown_character() {
        let result = ContentStore::new(
            vec![LocationRecord::new("a", "A", "").with_character("ghost")],
            vec![],
            LocationId::from("a"),
        );
        assert!(matches!(result, Err(ContentError::UnknownCharacter { .. })));
    }

    #[test]
    fn test_village_world_is_valid() {
        let store = ContentStore::village().unwrap();
        assert_eq!(store.location_count(), 6);
        assert_eq!(store.character_count(), 5);
        assert_eq!(store.entry().as_str(), "village_center");
    }
}
