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

//! LLM provider implementations

mod disabled;
mod lmstudio;
mod ollama;
mod openai;

pub use self::disabled::DisabledProvider;
pub use self::lmstudio::LmStudioProvider;
pub use self::ollama::OllamaProvider;
pub use self::openai::OpenAiProvider;

use super::types::{LlmConfig, LlmError, LlmProviderKind, LlmRequest, LlmResponse};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Trait for LLM providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a request to the LLM
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Get provider name
    fn name(&self) -> &str;
}

/// Build the provider named by the configuration.
///
/// This is the only place a provider kind is branched on; game logic holds
/// the result as `Arc<dyn LlmProvider>`.
pub fn build_provider(config: LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    tracing::info!(
        "Building {:?} LLM provider (model: {}, endpoint: {})",
        config.provider,
        config.default_model,
        config.endpoint
    );
    let provider: Arc<dyn LlmProvider> = match config.provider {
        LlmProviderKind::OpenAi => Arc::new(OpenAiProvider::new(config)?),
        LlmProviderKind::Ollama => Arc::new(OllamaProvider::new(config)?),
        LlmProviderKind::LmStudio => Arc::new(LmStudioProvider::new(config)?),
        LlmProviderKind::Disabled => Arc::new(DisabledProvider::new()),
    };
    Ok(provider)
}

/// Build the HTTP client shared by the network providers
fn http_client(config: &LlmConfig) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if config.timeout_seconds > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_seconds));
    }
    builder
        .build()
        .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// POST a JSON body and decode a JSON reply, retrying transient failures.
///
/// Network errors, `429` and `5xx` responses are retried up to
/// `max_retries` times with a linear backoff. Authentication failures and
/// other client errors are returned immediately.
async fn post_json<B, R>(
    client: &reqwest::Client,
    endpoint: &str,
    bearer: Option<&str>,
    body: &B,
    max_retries: u32,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let mut attempt = 0;
    loop {
        let mut builder = client
            .post(endpoint)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = bearer {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let outcome = match builder.send().await {
            Ok(response) if response.status().is_success() => {
                return response
                    .json::<R>()
                    .await
                    .map_err(|e| LlmError::MalformedResponse(format!("Failed to parse response: {}", e)));
            }
            Ok(response) => {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let error = status_error(status, error_text);
                if status.as_u16() == 429 || status.is_server_error() {
                    Err(error)
                } else {
                    return Err(error);
                }
            }
            Err(e) if e.is_timeout() => Err(LlmError::Timeout(format!("Request timed out: {}", e))),
            Err(e) => Err(LlmError::NetworkError(format!("Request failed: {}", e))),
        };

        if attempt >= max_retries {
            return outcome;
        }
        attempt += 1;
        if let Err(ref e) = outcome {
            tracing::debug!("Retrying LLM request ({}/{}): {}", attempt, max_retries, e);
        }
        tokio::time::sleep(Duration::from_millis(250 * attempt as u64)).await;
    }
}

fn status_error(status: reqwest::StatusCode, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthError(format!("API returned {}: {}", status, body)),
        404 => LlmError::ProviderUnavailable(format!("Model or endpoint not found: {}", body)),
        _ => LlmError::ApiError(format!("API returned {}: {}", status, body)),
    }
}
