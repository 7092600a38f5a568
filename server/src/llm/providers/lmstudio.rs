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

use super::openai::{ChatCompletionRequest, ChatCompletionResponse};
use super::{LlmProvider, http_client, post_json};
use crate::llm::{LlmConfig, LlmError, LlmRequest, LlmResponse};
use async_trait::async_trait;

/// LM Studio provider (compatible with OpenAI API)
pub struct LmStudioProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LmStudioProvider {
    /// Create a new LM Studio provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = http_client(&config)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl LlmProvider for LmStudioProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let model = request.model.clone();
        let body = ChatCompletionRequest::from(request);
        let response: ChatCompletionResponse = post_json(
            &self.client,
            &self.config.endpoint,
            self.config.api_key.as_deref(),
            &body,
            self.config.max_retries,
        )
        .await?;

        response.into_response(&model)
    }

    async fn is_available(&self) -> bool {
        // Check if LM Studio is running
        self.client.get(&self.config.endpoint).send().await.is_ok()
    }

    fn name(&self) -> &str {
        "LM Studio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lmstudio_provider_creation() {
        let config = LlmConfig::lmstudio("http://localhost:1234/v1/chat/completions", "local-model");
        let provider = LmStudioProvider::new(config);
        assert!(provider.is_ok());
    }
}
