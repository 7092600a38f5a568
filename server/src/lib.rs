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

//! Wayfarer game engine
//!
//! A session-scoped text exploration engine. Players move between locations
//! and talk to characters whose replies come from an LLM provider; each
//! session keeps its own position, visited set and per-character memory.

pub mod command;
pub mod config;
pub mod content;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod llm;
pub mod registry;
pub mod session;

pub use self::engine::{EngineSettings, GameEngine};
pub use self::error::{EngineError, EngineResult};
