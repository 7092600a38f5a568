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

//! Character mood

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conversational disposition of a character toward the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Hostile,
    #[default]
    Neutral,
    Curious,
    Friendly,
}

impl Mood {
    /// All moods, ordered from least to most agreeable
    pub const ALL: [Mood; 4] = [Mood::Hostile, Mood::Neutral, Mood::Curious, Mood::Friendly];

    /// Stable lowercase name used in prompts, content records and mood tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Hostile => "hostile",
            Mood::Neutral => "neutral",
            Mood::Curious => "curious",
            Mood::Friendly => "friendly",
        }
    }

    /// Short human description for character listings
    pub fn describe(&self) -> &'static str {
        match self {
            Mood::Hostile => "glaring at you",
            Mood::Neutral => "minding their own business",
            Mood::Curious => "watching you with interest",
            Mood::Friendly => "smiling warmly",
        }
    }

    /// Map a legacy numeric mood value in `[0, 1]` onto the enumeration.
    ///
    /// Values outside the range are clamped; NaN is treated as neutral.
    pub fn from_score(score: f64) -> Mood {
        if score.is_nan() {
            return Mood::Neutral;
        }
        let score = score.clamp(0.0, 1.0);
        if score < 0.3 {
            Mood::Hostile
        } else if score < 0.6 {
            Mood::Neutral
        } else {
            Mood::Friendly
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a mood
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodParseError(pub String);

impl fmt::Display for MoodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown mood: {}", self.0)
    }
}

impl std::error::Error for MoodParseError {}

impl FromStr for Mood {
    type Err = MoodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "hostile" | "angry" | "敌对" => Ok(Mood::Hostile),
            "neutral" | "普通" => Ok(Mood::Neutral),
            "curious" | "好奇" => Ok(Mood::Curious),
            "friendly" | "友好" => Ok(Mood::Friendly),
            other => match other.parse::<f64>() {
                Ok(score) => Ok(Mood::from_score(score)),
                Err(_) => Err(MoodParseError(trimmed.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_names_round_trip() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>(), Ok(mood));
        }
    }

    #[test]
    fn test_mood_from_score_bands() {
        assert_eq!(Mood::from_score(0.0), Mood::Hostile);
        assert_eq!(Mood::from_score(0.29), Mood::Hostile);
        assert_eq!(Mood::from_score(0.5), Mood::Neutral);
        assert_eq!(Mood::from_score(0.7), Mood::Friendly);
        assert_eq!(Mood::from_score(4.0), Mood::Friendly);
        assert_eq!(Mood::from_score(f64::NAN), Mood::Neutral);
    }

    #[test]
    fn test_mood_parse_numeric_and_localized() {
        assert_eq!("0.8".parse::<Mood>(), Ok(Mood::Friendly));
        assert_eq!(" Hostile ".parse::<Mood>(), Ok(Mood::Hostile));
        assert_eq!("好奇".parse::<Mood>(), Ok(Mood::Curious));
        assert!("elated".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_serde_lowercase() {
        let json = serde_json::to_string(&Mood::Curious).unwrap();
        assert_eq!(json, "\"curious\"");
        let mood: Mood = serde_json::from_str("\"friendly\"").unwrap();
        assert_eq!(mood, Mood::Friendly);
    }
}
