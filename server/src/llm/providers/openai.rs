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

use super::{LlmProvider, http_client, post_json};
use crate::llm::{LlmConfig, LlmError, LlmMessage, LlmRequest, LlmResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(super) struct ChatCompletionRequest {
    model: String,
    messages: Vec<LlmMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl From<LlmRequest> for ChatCompletionRequest {
    fn from(request: LlmRequest) -> Self {
        Self {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    usage: Option<ChatCompletionUsage>,
    #[serde(default)]
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Take the first choice, rejecting responses without usable content
    pub(super) fn into_response(self, requested_model: &str) -> Result<LlmResponse, LlmError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse("No choices in response".to_string()))?;
        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::MalformedResponse("Empty message content".to_string()))?;

        Ok(LlmResponse {
            content,
            model: if self.model.is_empty() {
                requested_model.to_string()
            } else {
                self.model
            },
            prompt_tokens: self.usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens: self.usage.as_ref().map(|u| u.completion_tokens),
            finish_reason: choice.finish_reason,
        })
    }
}

/// OpenAI provider, also used for OpenAI-compatible endpoints
pub struct OpenAiProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.as_deref().is_none_or(str::is_empty) {
            return Err(LlmError::ConfigError(
                "OpenAI requires an API key".to_string(),
            ));
        }

        let client = http_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::AuthError("No API key configured".to_string()))?;

        let model = request.model.clone();
        let body = ChatCompletionRequest::from(request);
        let response: ChatCompletionResponse = post_json(
            &self.client,
            &self.config.endpoint,
            Some(api_key),
            &body,
            self.config.max_retries,
        )
        .await?;

        response.into_response(&model)
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(&self.config.endpoint)
            .send()
            .await
            .is_ok()
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
