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

//! Prompt construction and reply parsing

use crate::content::{Character, Location};
use crate::llm::{LlmError, LlmMessage};
use crate::session::{ConversationTurn, Speaker};
use serde::Deserialize;
use wayfarer_common::Mood;

/// Build the system prompt that puts the model in character
pub fn system_prompt(
    character: &Character,
    mood: Mood,
    location: &Location,
    max_response_length: usize,
) -> String {
    format!(
        "You are playing the game character {name}. Your current mood is {mood}.\n\
         \n\
         Personality: {personality}\n\
         \n\
         Current location: {location}\n\
         \n\
         You must:\n\
         - Always stay in character and answer as {name}\n\
         - Let your mood set your tone: hostile is curt, friendly is warm\n\
         - Keep the conversation interesting\n\
         - Help the player when it makes sense\n\
         - Keep replies under {max} characters\n\
         - Only discuss the current scene and story\n\
         - Politely steer questions unrelated to the game back to it\n\
         \n\
         Reply strictly as JSON:\n\
         {{\"msg\": \"what you say\", \"mood\": \"one of hostile, neutral, curious, friendly\"}}\n\
         \n\
         Never reveal that you are an AI or mention technical details.",
        name = character.name,
        mood = mood,
        personality = character.personality,
        location = location.name,
        max = max_response_length,
    )
}

/// Build the full message list for one exchange.
///
/// `history` is the windowed conversation so far, oldest first; the player's
/// new message is not yet part of it.
pub fn build_messages<'a>(
    system: String,
    history: impl IntoIterator<Item = &'a ConversationTurn>,
    player_message: &str,
) -> Vec<LlmMessage> {
    let mut messages = vec![LlmMessage::system(system)];
    messages.extend(history.into_iter().map(|turn| match turn.speaker {
        Speaker::Player => LlmMessage::user(turn.text.clone()),
        Speaker::Character => LlmMessage::assistant(turn.text.clone()),
    }));
    messages.push(LlmMessage::user(player_message));
    messages
}

/// A reply extracted from provider output
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub text: String,
    /// Mood the reply explicitly asked for
    pub mood: Option<Mood>,
}

#[derive(Deserialize)]
struct ReplyEnvelope {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    mood: Option<serde_json::Value>,
}

/// Parse provider output into reply text and an optional mood tag.
///
/// Accepts a JSON `{"msg", "mood"}` object, optionally wrapped in a Markdown
/// code fence, or plain text. Empty replies and JSON objects without a
/// usable `msg` are rejected. Text longer than `max_length` characters is
/// cut short.
pub fn parse_reply(content: &str, max_length: usize) -> Result<ParsedReply, LlmError> {
    let body = strip_fence(content.trim());
    if body.is_empty() {
        return Err(LlmError::MalformedResponse("Empty reply".to_string()));
    }

    let (text, mood) = if body.starts_with('{') {
        match serde_json::from_str::<ReplyEnvelope>(body) {
            Ok(envelope) => {
                let text = envelope
                    .msg
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .ok_or_else(|| {
                        LlmError::MalformedResponse("Reply has no msg field".to_string())
                    })?;
                (text, envelope.mood.as_ref().and_then(mood_tag))
            }
            // Not JSON after all
            Err(_) => (body.to_string(), None),
        }
    } else {
        (body.to_string(), None)
    };

    Ok(ParsedReply {
        text: truncate(text, max_length),
        mood,
    })
}

fn strip_fence(body: &str) -> &str {
    let Some(rest) = body.strip_prefix("```") else {
        return body;
    };
    // Skip the info string (```json)
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches("json"),
    };
    rest.trim_end().trim_end_matches("```").trim()
}

fn mood_tag(value: &serde_json::Value) -> Option<Mood> {
    match value {
        serde_json::Value::String(name) => name.parse().ok(),
        serde_json::Value::Number(score) => score.as_f64().map(Mood::from_score),
        _ => None,
    }
}

fn truncate(text: String, max_length: usize) -> String {
    if max_length == 0 || text.chars().count() <= max_length {
        return text;
    }
    text.chars().take(max_length).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmRole;
    use wayfarer_common::{CharacterRecord, LocationRecord};

    #[test]
    fn test_system_prompt_mentions_character() {
        let elder = CharacterRecord::new("elder", "Village Elder", "Wise and kind");
        let square = LocationRecord::new("square", "Village Square", "");
        let prompt = system_prompt(&elder, Mood::Friendly, &square, 120);
        assert!(prompt.contains("Village Elder"));
        assert!(prompt.contains("friendly"));
        assert!(prompt.contains("Wise and kind"));
        assert!(prompt.contains("Village Square"));
        assert!(prompt.contains("120 characters"));
    }

    #[test]
    fn test_build_messages_maps_speakers() {
        let history = vec![
            ConversationTurn {
                speaker: Speaker::Player,
                text: "hello".into(),
                ordinal: 0,
            },
            ConversationTurn {
                speaker: Speaker::Character,
                text: "hi".into(),
                ordinal: 1,
            },
        ];
        let messages = build_messages("sys".into(), &history, "bye");
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![LlmRole::System, LlmRole::User, LlmRole::Assistant, LlmRole::User]
        );
        assert_eq!(messages[3].content, "bye");
    }

    #[test]
    fn test_parse_json_reply() {
        let reply = parse_reply(r#"{"msg": "Welcome!", "mood": "friendly"}"#, 0).unwrap();
        assert_eq!(reply.text, "Welcome!");
        assert_eq!(reply.mood, Some(Mood::Friendly));

        let reply = parse_reply(r#"{"msg": "Hmph.", "mood": 0.1}"#, 0).unwrap();
        assert_eq!(reply.mood, Some(Mood::Hostile));

        let reply = parse_reply(r#"{"msg": "Hmm.", "mood": "elated"}"#, 0).unwrap();
        assert_eq!(reply.mood, None);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let raw = "```json\n{\"msg\": \"Greetings.\", \"mood\": \"neutral\"}\n```";
        let reply = parse_reply(raw, 0).unwrap();
        assert_eq!(reply.text, "Greetings.");
        assert_eq!(reply.mood, Some(Mood::Neutral));
    }

    #[test]
    fn test_parse_plain_text_reply() {
        let reply = parse_reply("  Greetings, traveler.  ", 0).unwrap();
        assert_eq!(reply.text, "Greetings, traveler.");
        assert_eq!(reply.mood, None);

        let reply = parse_reply("{not json at all", 0).unwrap();
        assert_eq!(reply.text, "{not json at all");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_reply("   ", 0).is_err());
        assert!(parse_reply("```json\n```", 0).is_err());
        assert!(parse_reply(r#"{"msg": "  ", "mood": "friendly"}"#, 0).is_err());
        assert!(parse_reply(r#"{"mood": "friendly"}"#, 0).is_err());
    }

    #[test]
    fn test_parse_truncates_long_replies() {
        let reply = parse_reply("你好你好你好", 4).unwrap();
        assert_eq!(reply.text, "你好你好");
    }
}
