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

//! Player session state
//!
//! This module provides the per-player state tracked by the engine.
//! Sessions are stored in-memory only and are discarded when they expire.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use wayfarer_common::{CharacterId, LocationId, Mood};

use crate::content::Character;

/// Who spoke a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Player,
    Character,
}

/// One line of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    /// Position in the conversation; strictly increasing, never reused
    pub ordinal: u64,
}

/// Conversation memory and mood of one character toward this player
#[derive(Debug, Clone)]
pub struct CharacterSessionState {
    character_id: CharacterId,
    mood: Mood,
    turns: VecDeque<ConversationTurn>,
    next_ordinal: u64,
    cap: usize,
}

impl CharacterSessionState {
    /// Start tracking a character at its base mood, keeping at most `cap` turns
    pub fn new(character: &Character, cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            character_id: character.id.clone(),
            mood: character.base_mood,
            turns: VecDeque::with_capacity(cap),
            next_ordinal: 0,
            cap,
        }
    }

    pub fn character_id(&self) -> &CharacterId {
        &self.character_id
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    /// All retained turns, oldest first
    pub fn turns(&self) -> impl ExactSizeIterator<Item = &ConversationTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Ordinal the next appended turn will receive
    pub fn next_ordinal(&self) -> u64 {
        self.next_ordinal
    }

    /// The most recent `limit` turns, oldest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &ConversationTurn> {
        let start = self.turns.len().saturating_sub(limit);
        self.turns.iter().skip(start)
    }

    /// Append a turn, dropping the oldest turn first when the cap is reached
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> &ConversationTurn {
        if self.turns.len() >= self.cap {
            self.turns.pop_front();
        }
        self.turns.push_back(ConversationTurn {
            speaker,
            text: text.into(),
            ordinal: self.next_ordinal,
        });
        self.next_ordinal += 1;
        // Just pushed
        &self.turns[self.turns.len() - 1]
    }
}

/// Session state tracked by the engine
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    current_location: LocationId,
    visited: BTreeSet<LocationId>,
    characters: HashMap<CharacterId, CharacterSessionState>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a session rooted at `entry`
    pub fn new(id: impl Into<String>, entry: LocationId) -> Self {
        Self::new_at(id, entry, Utc::now())
    }

    /// Create a session rooted at `entry` with an explicit creation time
    pub fn new_at(id: impl Into<String>, entry: LocationId, now: DateTime<Utc>) -> Self {
        let mut visited = BTreeSet::new();
        visited.insert(entry.clone());
        Self {
            id: id.into(),
            current_location: entry,
            visited,
            characters: HashMap::new(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current_location(&self) -> &LocationId {
        &self.current_location
    }

    /// Move to `destination` and mark it visited.
    ///
    /// Callers must have resolved `destination` in the content store.
    pub fn move_to(&mut self, destination: LocationId) {
        self.visited.insert(destination.clone());
        self.current_location = destination;
    }

    pub fn has_visited(&self, location: &LocationId) -> bool {
        self.visited.contains(location)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Conversation state for a character, if the player has addressed them
    pub fn character_state(&self, id: &CharacterId) -> Option<&CharacterSessionState> {
        self.characters.get(id)
    }

    /// Conversation state for a character, created on first address
    pub fn character_state_mut(
        &mut self,
        character: &Character,
        cap: usize,
    ) -> &mut CharacterSessionState {
        self.characters
            .entry(character.id.clone())
            .or_insert_with(|| CharacterSessionState::new(character, cap))
    }

    /// Mood a character currently shows this player
    pub fn mood_of(&self, character: &Character) -> Mood {
        self.characters
            .get(&character.id)
            .map(CharacterSessionState::mood)
            .unwrap_or(character.base_mood)
    }

    /// Number of characters the player has spoken to
    pub fn addressed_count(&self) -> usize {
        self.characters.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        self.last_activity
    }

    /// Update last activity to now
    pub fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        if now > self.last_activity {
            self.last_activity = now;
        }
    }

    /// Whether the session has been idle for longer than `ttl` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_activity > ttl
    }
}
