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

//! Engine error taxonomy
//!
//! Only [`EngineError::StateCorruption`] ever crosses the engine boundary.
//! Every other variant is turned into a player-facing response by the command
//! resolver or the dialogue mediator.

use crate::llm::LlmError;
use thiserror::Error;

/// Errors raised while handling a command.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A location, character or session reference does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The command line could not be mapped onto an intent.
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    /// The dialogue backend failed, timed out or produced an unusable reply.
    #[error("AI unavailable: {0}")]
    AiUnavailable(#[from] LlmError),

    /// An engine invariant no longer holds. Not recoverable.
    #[error("State corruption: {0}")]
    StateCorruption(String),
}

impl EngineError {
    pub fn location_not_found(id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind: "Location",
            id: id.into(),
        }
    }

    pub fn character_not_found(id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind: "Character",
            id: id.into(),
        }
    }

    /// Whether this error may be recovered locally by rendering a response
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EngineError::StateCorruption(_))
    }

    /// Safe text to show a player when request handling was aborted
    pub fn user_message(&self) -> &'static str {
        match self {
            EngineError::StateCorruption(_) => "Something went wrong. Please try again.",
            EngineError::NotFound { .. } => "There is nothing like that here.",
            EngineError::InvalidIntent(_) => "That command is not recognized.",
            EngineError::AiUnavailable(_) => "Nobody seems able to answer right now.",
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
