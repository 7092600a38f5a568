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

use super::LlmProvider;
use crate::llm::{LlmError, LlmRequest, LlmResponse};
use async_trait::async_trait;

/// Provider used when no backend is configured.
///
/// Every request fails, so characters answer with their fallback lines.
#[derive(Debug, Default)]
pub struct DisabledProvider;

impl DisabledProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmProvider for DisabledProvider {
    async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::ProviderUnavailable(
            "No LLM provider configured".to_string(),
        ))
    }

    async fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "Disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_provider_always_fails() {
        let provider = DisabledProvider::new();
        assert!(!provider.is_available().await);
        let result = provider.complete(LlmRequest::new("none")).await;
        assert!(matches!(result, Err(LlmError::ProviderUnavailable(_))));
    }
}
