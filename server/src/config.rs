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

use crate::command::ResolverSettings;
use crate::dialogue::DialogueSettings;
use crate::engine::EngineSettings;
use crate::llm::{LlmConfig, LlmProviderKind};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_env_field::EnvField;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Arguments {
    #[arg(
        short = 'c',
        long = "config",
        help = "Path to configuration file",
        default_value = "config.yaml"
    )]
    pub config_file: String,

    #[arg(
        short = 'e',
        long = "env",
        help = "Path to environment file",
        default_value = ".env"
    )]
    pub env_file: Option<String>,

    #[arg(
        short = 's',
        long = "session",
        help = "Session id to play as; a random one is generated when omitted"
    )]
    pub session: Option<String>,
}

impl Default for Arguments {
    fn default() -> Self {
        Self {
            config_file: "config.yaml".to_string(),
            env_file: Some(".env".to_string()),
            session: None,
        }
    }
}

/// Problems loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
    #[serde(default)]
    pub llm: LlmSection,
}

impl Configuration {
    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// an error.
    pub fn load(path: &str) -> Result<Configuration, ConfigError> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("Config file {} not found, using defaults", path);
                return Ok(Configuration::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_string(),
                    source,
                });
            }
        };

        let conf = serde_yaml::from_reader(file)?;
        Ok(conf)
    }

    /// Provider configuration with per-provider defaults filled in
    pub fn llm_config(&self) -> Result<LlmConfig, ConfigError> {
        let llm = &self.llm;
        let model = non_empty(&llm.model);
        let endpoint = non_empty(&llm.endpoint);

        let mut config = match *llm.provider {
            LlmProviderKind::OpenAi => {
                let api_key = non_empty(&llm.api_key).ok_or_else(|| {
                    ConfigError::Invalid("llm.api_key is required for the openai provider".into())
                })?;
                match endpoint {
                    Some(endpoint) => LlmConfig::openai_compatible(
                        endpoint,
                        api_key,
                        model.unwrap_or("gpt-4o-mini"),
                    ),
                    None => LlmConfig::openai(api_key, model.unwrap_or("gpt-4o-mini")),
                }
            }
            LlmProviderKind::Ollama => LlmConfig::ollama(
                endpoint.unwrap_or("http://localhost:11434"),
                model.unwrap_or("llama3"),
            ),
            LlmProviderKind::LmStudio => LlmConfig::lmstudio(
                endpoint.unwrap_or("http://localhost:1234/v1/chat/completions"),
                model.unwrap_or("local-model"),
            ),
            LlmProviderKind::Disabled => return Ok(LlmConfig::disabled()),
        };

        config.timeout_seconds = llm.timeout_seconds;
        config.max_retries = llm.max_retries;
        Ok(config)
    }

    /// Settings for the engine, using `model` for dialogue requests
    pub fn engine_settings(&self, model: &str) -> EngineSettings {
        let game = &self.game;
        let dialogue = &self.dialogue;
        EngineSettings {
            resolver: ResolverSettings {
                title: non_empty(&game.title).unwrap_or("Wayfarer").to_string(),
                version: game
                    .version
                    .clone()
                    .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
                debug: game.debug,
                default_greeting: game.default_greeting.clone(),
                history_cap: dialogue.history_cap,
            },
            dialogue: DialogueSettings {
                model: model.to_string(),
                history_window: dialogue.history_window,
                timeout: Duration::from_secs(dialogue.timeout_seconds),
                temperature: dialogue.temperature,
                max_tokens: dialogue.max_tokens,
                max_response_length: dialogue.max_response_length,
                generic_fallback: dialogue.generic_fallback.clone(),
            },
            max_sessions: self.session.max_sessions,
        }
    }

    /// Idle time after which a session is evicted
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session.ttl_seconds as i64)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session.sweep_interval_seconds.max(1))
    }
}

fn non_empty(field: &EnvField<String>) -> Option<&str> {
    let value = field.trim();
    (!value.is_empty()).then_some(value)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: EnvField<String>,
    /// Defaults to the crate version
    pub version: Option<String>,
    pub debug: bool,
    pub default_greeting: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: Default::default(),
            version: None,
            debug: false,
            default_greeting: "hello".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// 0 disables the cap
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_ttl_seconds() -> u64 {
    3600
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    1024
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            ttl_seconds: default_ttl_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            max_sessions: default_max_sessions(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Turns kept per character
    pub history_cap: usize,
    /// Turns sent with each request
    pub history_window: usize,
    pub timeout_seconds: u64,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_response_length: usize,
    pub generic_fallback: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        let dialogue = DialogueSettings::default();
        Self {
            history_cap: 20,
            history_window: dialogue.history_window,
            timeout_seconds: dialogue.timeout.as_secs(),
            temperature: dialogue.temperature,
            max_tokens: dialogue.max_tokens,
            max_response_length: dialogue.max_response_length,
            generic_fallback: dialogue.generic_fallback,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub provider: EnvField<LlmProviderKind>,
    /// Empty selects the provider's usual local or public endpoint
    pub endpoint: EnvField<String>,
    pub api_key: EnvField<String>,
    pub model: EnvField<String>,
    /// Transport-level timeout; the dialogue timeout still applies on top
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: Default::default(),
            endpoint: Default::default(),
            api_key: Default::default(),
            model: Default::default(),
            timeout_seconds: 30,
            max_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_arguments_default() {
        let args = Arguments::default();
        assert_eq!(args.config_file, "config.yaml");
        assert_eq!(args.env_file, Some(".env".to_string()));
        assert_eq!(args.session, None);
    }

    #[test]
    fn test_arguments_parse() {
        let args = Arguments::parse_from(["wayfarer", "--config", "game.yaml", "-s", "alice"]);
        assert_eq!(args.config_file, "game.yaml");
        assert_eq!(args.session.as_deref(), Some("alice"));
    }

    #[test]
    fn test_configuration_default() {
        let config = Configuration::default();
        assert_eq!(config.session.ttl_seconds, 3600);
        assert_eq!(config.session.sweep_interval_seconds, 60);
        assert_eq!(config.session.max_sessions, 1024);
        assert_eq!(config.dialogue.history_cap, 20);
        assert_eq!(config.dialogue.history_window, 6);
        assert_eq!(config.dialogue.timeout_seconds, 30);
        assert_eq!(*config.llm.provider, LlmProviderKind::Disabled);

        let settings = config.engine_settings("none");
        assert_eq!(settings.resolver.title, "Wayfarer");
        assert_eq!(settings.resolver.default_greeting, "hello");
        assert_eq!(settings.dialogue.timeout, Duration::from_secs(30));
        assert_eq!(config.session_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_configuration_load_missing_file_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let config = Configuration::load("non_existent.yaml").unwrap();
        assert_eq!(config.session.ttl_seconds, 3600);
    }

    #[test]
    fn test_configuration_load_malformed_file() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.yaml");
        std::fs::write(&file_path, "session: [not, a, map").unwrap();

        let result = Configuration::load(file_path.to_str().unwrap());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_configuration_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &file_path,
            "game:\n  title: \"River Town\"\n  debug: true\nsession:\n  ttl_seconds: 120\ndialogue:\n  history_cap: 4\nllm:\n  provider: ollama\n  model: \"qwen2\"\n",
        )
        .unwrap();

        let config = Configuration::load(file_path.to_str().unwrap()).unwrap();
        assert_eq!(config.session.ttl_seconds, 120);
        assert_eq!(config.session.max_sessions, 1024);
        assert_eq!(config.dialogue.history_cap, 4);
        assert_eq!(config.dialogue.history_window, 6);

        let llm = config.llm_config().unwrap();
        assert_eq!(llm.provider, LlmProviderKind::Ollama);
        assert_eq!(llm.endpoint, "http://localhost:11434");
        assert_eq!(llm.default_model, "qwen2");

        let settings = config.engine_settings(&llm.default_model);
        assert_eq!(settings.resolver.title, "River Town");
        assert!(settings.resolver.debug);
        assert_eq!(settings.resolver.history_cap, 4);
        assert_eq!(settings.dialogue.model, "qwen2");
    }

    #[test]
    fn test_configuration_env_substitution() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        unsafe {
            std::env::set_var("WAYFARER_TEST_API_KEY", "sk-from-env");
        }

        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &file_path,
            "llm:\n  provider: kimi\n  endpoint: \"https://api.moonshot.cn/v1/chat/completions\"\n  api_key: \"${WAYFARER_TEST_API_KEY}\"\n  model: \"kimi-k2\"\n",
        )
        .unwrap();

        let config = Configuration::load(file_path.to_str().unwrap()).unwrap();
        unsafe {
            std::env::remove_var("WAYFARER_TEST_API_KEY");
        }

        let llm = config.llm_config().unwrap();
        assert_eq!(llm.provider, LlmProviderKind::OpenAi);
        assert_eq!(llm.api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(llm.endpoint, "https://api.moonshot.cn/v1/chat/completions");
    }

    #[test]
    fn test_openai_requires_api_key() {
        let config: Configuration = serde_yaml::from_str("llm:\n  provider: openai\n").unwrap();
        assert!(matches!(config.llm_config(), Err(ConfigError::Invalid(_))));
    }
}
