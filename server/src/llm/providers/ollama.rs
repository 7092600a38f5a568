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
struct OllamaRequest {
    model: String,
    messages: Vec<LlmMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: LlmMessage,
    #[serde(default)]
    model: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

impl From<LlmRequest> for OllamaRequest {
    fn from(request: LlmRequest) -> Self {
        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
                })
        } else {
            None
        };

        Self {
            model: request.model,
            messages: request.messages,
            stream: false,
            options,
        }
    }
}

/// Ollama provider
pub struct OllamaProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = http_client(&config)?;
        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        let base = self.config.endpoint.trim_end_matches('/');
        if base.ends_with("/api/chat") {
            base.to_string()
        } else {
            format!("{}/api/chat", base)
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let model = request.model.clone();
        let body = OllamaRequest::from(request);
        let response: OllamaResponse = post_json(
            &self.client,
            &self.chat_url(),
            None,
            &body,
            self.config.max_retries,
        )
        .await?;

        if response.message.content.trim().is_empty() {
            return Err(LlmError::MalformedResponse(
                "Empty message content".to_string(),
            ));
        }

        Ok(LlmResponse {
            content: response.message.content,
            model: if response.model.is_empty() {
                model
            } else {
                response.model
            },
            prompt_tokens: response.prompt_eval_count,
            completion_tokens: response.eval_count,
            finish_reason: if response.done {
                Some("stop".to_string())
            } else {
                None
            },
        })
    }

    async fn is_available(&self) -> bool {
        // Check if Ollama is running
        self.client
            .get(format!(
                "{}/api/tags",
                self.config.endpoint.trim_end_matches('/').trim_end_matches("/api/chat")
            ))
            .send()
            .await
            .is_ok()
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
