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

//! Command vocabulary
//!
//! Maps command words and direction words onto intents and canonical
//! directions. Words come from language packs, which are plain data and can
//! be loaded from YAML or JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// What a command asks the engine to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Look,
    Where,
    Go,
    Characters,
    Talk,
    Help,
    Status,
    Clear,
    Unknown,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Look => "look",
            IntentKind::Where => "where",
            IntentKind::Go => "go",
            IntentKind::Characters => "characters",
            IntentKind::Talk => "talk",
            IntentKind::Help => "help",
            IntentKind::Status => "status",
            IntentKind::Clear => "clear",
            IntentKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command and direction words for one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePack {
    pub language: String,
    /// Words that select each intent
    #[serde(default)]
    pub commands: HashMap<IntentKind, Vec<String>>,
    /// Canonical direction to the words that mean it
    #[serde(default)]
    pub directions: HashMap<String, Vec<String>>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl LanguagePack {
    pub fn english() -> Self {
        Self {
            language: "en".to_string(),
            commands: HashMap::from([
                (IntentKind::Look, words(&["look", "l"])),
                (IntentKind::Where, words(&["where"])),
                (IntentKind::Go, words(&["go", "move", "walk"])),
                (IntentKind::Characters, words(&["characters", "chars", "npc", "who"])),
                (IntentKind::Talk, words(&["talk", "say", "ask"])),
                (IntentKind::Help, words(&["help", "h", "?"])),
                (IntentKind::Status, words(&["status", "stat"])),
                (IntentKind::Clear, words(&["clear", "cls"])),
            ]),
            directions: HashMap::from([
                ("north".to_string(), words(&["north", "n"])),
                ("south".to_string(), words(&["south", "s"])),
                ("east".to_string(), words(&["east", "e"])),
                ("west".to_string(), words(&["west", "w"])),
                ("up".to_string(), words(&["up", "u"])),
                ("down".to_string(), words(&["down", "d"])),
            ]),
        }
    }

    pub fn chinese() -> Self {
        Self {
            language: "zh".to_string(),
            commands: HashMap::from([
                (IntentKind::Look, words(&["看", "查看", "观察"])),
                (IntentKind::Where, words(&["位置", "我在哪"])),
                (IntentKind::Go, words(&["走", "去", "移动"])),
                (IntentKind::Characters, words(&["角色", "人物"])),
                (IntentKind::Talk, words(&["说", "聊", "对话", "交谈"])),
                (IntentKind::Help, words(&["帮助", "命令"])),
                (IntentKind::Status, words(&["状态"])),
                (IntentKind::Clear, words(&["清空", "清屏"])),
            ]),
            directions: HashMap::from([
                ("north".to_string(), words(&["北", "北方"])),
                ("south".to_string(), words(&["南", "南方"])),
                ("east".to_string(), words(&["东", "东方"])),
                ("west".to_string(), words(&["西", "西方"])),
                ("up".to_string(), words(&["上", "上方"])),
                ("down".to_string(), words(&["下", "下方"])),
            ]),
        }
    }
}

/// Merged lookup tables built from one or more language packs
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    commands: HashMap<String, IntentKind>,
    directions: HashMap<String, String>,
    languages: Vec<String>,
}

impl Vocabulary {
    /// A vocabulary that knows no words
    pub fn empty() -> Self {
        Self::default()
    }

    /// English and Chinese
    pub fn standard() -> Self {
        Self::empty()
            .with_language(LanguagePack::english())
            .with_language(LanguagePack::chinese())
    }

    /// Add a language pack. Later packs override earlier ones on conflicts.
    pub fn with_language(mut self, pack: LanguagePack) -> Self {
        for (kind, list) in pack.commands {
            for word in list {
                self.commands.insert(word.to_lowercase(), kind);
            }
        }
        for (canonical, list) in pack.directions {
            let canonical = canonical.to_lowercase();
            self.directions.insert(canonical.clone(), canonical.clone());
            for word in list {
                self.directions.insert(word.to_lowercase(), canonical.clone());
            }
        }
        self.languages.push(pack.language);
        self
    }

    /// Intent selected by a command word
    pub fn intent(&self, word: &str) -> Option<IntentKind> {
        self.commands.get(&word.to_lowercase()).copied()
    }

    /// Canonical direction for a direction word
    pub fn direction(&self, word: &str) -> Option<&str> {
        self.directions.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}
