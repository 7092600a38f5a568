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

//! Wayfarer Common Types
//!
//! This crate defines the types shared between the game engine and whatever
//! transport drives it:
//! - Content records (locations and characters) as produced by a content loader
//! - Identifier newtypes and the character mood enumeration
//! - The response returned for every handled command

pub mod content;
pub mod mood;
pub mod response;

pub use self::content::{CharacterId, CharacterRecord, LocationId, LocationRecord};
pub use self::mood::{Mood, MoodParseError};
pub use self::response::CommandResponse;
