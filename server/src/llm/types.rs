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

//! Request, response and configuration types shared by every provider

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who a chat message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    System,
    User,
    Assistant,
}

/// One chat message; serializes to the `{"role", "content"}` shape both
/// OpenAI-style and Ollama endpoints accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn new(role: LlmRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(LlmRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(LlmRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(LlmRole::Assistant, content)
    }
}

/// A chat completion request, independent of provider wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmRequest {
    /// System prompt first, then the conversation, newest last
    pub messages: Vec<LlmMessage>,
    pub model: String,
    /// Sampling temperature in `[0, 2]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_messages(mut self, messages: impl IntoIterator<Item = LlmMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the temperature, clamped to `[0, 2]`
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A completed reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    /// Model that answered, as reported by the provider
    pub model: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub finish_reason: Option<String>,
}

impl LlmResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            prompt_tokens: None,
            completion_tokens: None,
            finish_reason: None,
        }
    }
}

/// Ways a completion can fail. Every variant is a dialogue failure to the
/// game; the distinction only matters for logs and retries.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Non-success status other than an auth failure
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    /// The provider answered but the content is empty or unusable
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Provider kind selected at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    /// OpenAI chat completions and compatible endpoints (Moonshot, DeepSeek, ...)
    OpenAi,
    Ollama,
    LmStudio,
    /// No backend; every request fails and characters use fallback lines
    #[default]
    Disabled,
}

impl std::str::FromStr for LlmProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "kimi" | "moonshot" => Ok(LlmProviderKind::OpenAi),
            "ollama" => Ok(LlmProviderKind::Ollama),
            "lmstudio" => Ok(LlmProviderKind::LmStudio),
            "disabled" | "none" | "" => Ok(LlmProviderKind::Disabled),
            other => Err(LlmError::ConfigError(format!(
                "Unknown provider type: {}",
                other
            ))),
        }
    }
}

/// Everything needed to build a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub endpoint: String,
    /// Bearer token; only OpenAI-style endpoints use it
    pub api_key: Option<String>,
    pub default_model: String,
    /// Transport-level request timeout in seconds; 0 leaves it unset
    pub timeout_seconds: u64,
    /// Extra attempts after a transient failure
    pub max_retries: u32,
}

impl LlmConfig {
    /// Create OpenAI configuration
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::openai_compatible(
            "https://api.openai.com/v1/chat/completions",
            api_key,
            model,
        )
    }

    /// Create configuration for any OpenAI-compatible chat completions endpoint
    pub fn openai_compatible(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider: LlmProviderKind::OpenAi,
            endpoint: endpoint.into(),
            api_key: Some(api_key.into()),
            default_model: model.into(),
            timeout_seconds: 30,
            max_retries: 3,
        }
    }

    /// Create Ollama configuration
    pub fn ollama(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProviderKind::Ollama,
            endpoint: endpoint.into(),
            api_key: None,
            default_model: model.into(),
            timeout_seconds: 60,
            max_retries: 3,
        }
    }

    /// Create LM Studio configuration
    pub fn lmstudio(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: LlmProviderKind::LmStudio,
            endpoint: endpoint.into(),
            api_key: None,
            default_model: model.into(),
            timeout_seconds: 60,
            max_retries: 3,
        }
    }

    /// Configuration with no backend
    pub fn disabled() -> Self {
        Self {
            provider: LlmProviderKind::Disabled,
            endpoint: String::new(),
            api_key: None,
            default_model: String::from("none"),
            timeout_seconds: 0,
            max_retries: 0,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_lowercase_role() {
        let value = serde_json::to_value(LlmMessage::assistant("Welcome, traveler.")).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["content"], "Welcome, traveler.");
    }

    #[test]
    fn test_request_builder() {
        let request = LlmRequest::new("gpt-4")
            .with_messages([LlmMessage::system("Stay in character"), LlmMessage::user("Hello")])
            .with_temperature(9.0)
            .with_max_tokens(100);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, LlmRole::System);
        assert_eq!(request.temperature, Some(2.0));
        assert_eq!(request.max_tokens, Some(100));
    }

    #[test]
    fn test_llm_config() {
        let openai = LlmConfig::openai("sk-test", "gpt-4");
        assert_eq!(openai.provider, LlmProviderKind::OpenAi);
        assert!(openai.api_key.is_some());

        let ollama = LlmConfig::ollama("http://localhost:11434", "llama2");
        assert_eq!(ollama.provider, LlmProviderKind::Ollama);
        assert!(ollama.api_key.is_none());

        assert_eq!(LlmConfig::default().provider, LlmProviderKind::Disabled);
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("OpenAI".parse::<LlmProviderKind>().unwrap(), LlmProviderKind::OpenAi);
        assert_eq!("kimi".parse::<LlmProviderKind>().unwrap(), LlmProviderKind::OpenAi);
        assert_eq!("none".parse::<LlmProviderKind>().unwrap(), LlmProviderKind::Disabled);
        assert!("carrier-pigeon".parse::<LlmProviderKind>().is_err());
    }
}
