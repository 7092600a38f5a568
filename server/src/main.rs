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

use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wayfarer_common::CommandResponse;
use wayfarer_server::config::{Arguments, Configuration};
use wayfarer_server::content::ContentStore;
use wayfarer_server::llm::{DisabledProvider, LlmProvider, build_provider};
use wayfarer_server::GameEngine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load arguments from the command line
    let arguments: Arguments = Parser::parse();

    // Logs go to stderr so they do not interleave with the game on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(true)
        .init();

    // Load environment variables from .env file if specified
    if let Some(ref env_file) = arguments.env_file {
        if std::path::Path::new(env_file).exists() {
            tracing::debug!("Loading environment variables from file: {}", env_file);
            dotenv::from_filename(env_file).ok();
        }
    } else {
        tracing::debug!("Loading environment variables from default file");
        dotenv::dotenv().ok();
    }

    // Load configuration from a file with environment variable substitution
    let config = Configuration::load(&arguments.config_file)?;
    tracing::debug!("Configuration loaded: {:?}", config.session);
    tracing::info!("Starting Wayfarer...");

    // Build the dialogue backend; a broken LLM setup still leaves a playable game
    let llm_config = config.llm_config()?;
    let model = llm_config.default_model.clone();
    let provider: Arc<dyn LlmProvider> = match build_provider(llm_config) {
        Ok(provider) => provider,
        Err(e) => {
            tracing::warn!("LLM provider unavailable, characters will use scripted lines: {}", e);
            Arc::new(DisabledProvider::new())
        }
    };
    if !provider.is_available().await {
        tracing::warn!("LLM provider {} is not reachable", provider.name());
    }

    let content = Arc::new(ContentStore::village()?);
    let engine = GameEngine::new(content, provider, config.engine_settings(&model));

    engine
        .registry()
        .clone()
        .start_eviction_task(config.session_ttl(), config.sweep_interval());

    let session_id = arguments
        .session
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::info!("Playing as session {}", session_id);

    let mut stdout = tokio::io::stdout();
    let welcome = engine.welcome(&session_id).await?;
    render(&mut stdout, &welcome).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "quit" | "exit" | "退出") {
            break;
        }

        match engine.handle_command(&session_id, line).await {
            Ok(response) => render(&mut stdout, &response).await?,
            Err(e) => {
                stdout.write_all(e.user_message().as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
        }
    }

    stdout.write_all(b"\nFarewell, traveler.\n").await?;
    tracing::info!("Wayfarer shutting down");
    Ok(())
}

async fn render(stdout: &mut tokio::io::Stdout, response: &CommandResponse) -> std::io::Result<()> {
    if response.clear_screen {
        // ANSI clear screen and home cursor
        stdout.write_all(b"\x1b[2J\x1b[H").await?;
    }
    stdout.write_all(response.text.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
