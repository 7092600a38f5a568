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

//! Mood transitions
//!
//! A character's mood after a successful exchange is a pure function of its
//! mood before the exchange and the reply it gave.

use std::collections::HashSet;
use wayfarer_common::Mood;

/// Decides a character's next mood from its reply
pub trait MoodPolicy: Send + Sync {
    /// Mood after replying `reply` while in `current`.
    ///
    /// `tag` is an explicit mood the reply carried, if any.
    fn next_mood(&self, current: Mood, reply: &str, tag: Option<Mood>) -> Mood;
}

const HOSTILE_CUES: &[&str] = &[
    "go away",
    "leave me",
    "get out",
    "how dare",
    "that's enough",
    "annoying",
    "angry",
    "stupid",
    "hate",
    "滚",
    "走开",
    "烦",
    "生气",
    "讨厌",
    "别来",
];

const FRIENDLY_CUES: &[&str] = &[
    "welcome",
    "thank",
    "thanks",
    "glad",
    "happy",
    "friend",
    "friends",
    "pleasure",
    "of course",
    "欢迎",
    "谢谢",
    "高兴",
    "朋友",
    "乐意",
    "当然",
];

const CURIOUS_CUES: &[&str] = &[
    "interesting",
    "curious",
    "tell me more",
    "really?",
    "what is",
    "why",
    "有趣",
    "好奇",
    "真的吗",
    "为什么",
    "说说",
];

/// Keyword-counting mood rules.
///
/// An explicit tag always wins. Otherwise cue phrases are counted in the
/// lowercased reply. Single ASCII words only match whole words of the reply;
/// phrases and CJK cues match anywhere. More hostile than friendly cues sours the mood one step,
/// more friendly than hostile cues warms it one step, and a tie with curious
/// cues present turns a neutral character curious.
#[derive(Debug, Clone)]
pub struct KeywordMoodPolicy {
    hostile: Vec<String>,
    friendly: Vec<String>,
    curious: Vec<String>,
}

impl Default for KeywordMoodPolicy {
    fn default() -> Self {
        Self::new(HOSTILE_CUES, FRIENDLY_CUES, CURIOUS_CUES)
    }
}

impl KeywordMoodPolicy {
    pub fn new<S: AsRef<str>>(hostile: &[S], friendly: &[S], curious: &[S]) -> Self {
        let lower = |cues: &[S]| cues.iter().map(|c| c.as_ref().to_lowercase()).collect();
        Self {
            hostile: lower(hostile),
            friendly: lower(friendly),
            curious: lower(curious),
        }
    }

    fn count(cues: &[String], text: &str, words: &HashSet<&str>) -> usize {
        cues.iter()
            .filter(|cue| {
                if cue.chars().all(|c| c.is_ascii_alphanumeric()) {
                    words.contains(cue.as_str())
                } else {
                    text.contains(cue.as_str())
                }
            })
            .count()
    }
}

impl MoodPolicy for KeywordMoodPolicy {
    fn next_mood(&self, current: Mood, reply: &str, tag: Option<Mood>) -> Mood {
        if let Some(tagged) = tag {
            return tagged;
        }

        let text = reply.to_lowercase();
        let words: HashSet<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        let hostile = Self::count(&self.hostile, &text, &words);
        let friendly = Self::count(&self.friendly, &text, &words);

        if hostile > friendly {
            match current {
                Mood::Friendly => Mood::Neutral,
                Mood::Neutral | Mood::Curious | Mood::Hostile => Mood::Hostile,
            }
        } else if friendly > hostile {
            match current {
                Mood::Hostile => Mood::Neutral,
                Mood::Neutral | Mood::Curious | Mood::Friendly => Mood::Friendly,
            }
        } else if current == Mood::Neutral && Self::count(&self.curious, &text, &words) > 0 {
            Mood::Curious
        } else {
            current
        }
    }
}
