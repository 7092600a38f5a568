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

//! Command line tokenizing into intents

use super::vocabulary::{IntentKind, Vocabulary};

/// A tokenized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    /// First token, lowercased
    pub verb: String,
    /// Remaining tokens, case preserved
    pub args: Vec<String>,
}

impl Intent {
    /// Split a raw line on whitespace and classify its first token.
    ///
    /// A bare direction word becomes a `go` with that word as its argument.
    /// Empty input and unrecognized words are `Unknown`.
    pub fn parse(raw: &str, vocabulary: &Vocabulary) -> Self {
        let mut tokens = raw.split_whitespace();
        let Some(first) = tokens.next() else {
            return Self {
                kind: IntentKind::Unknown,
                verb: String::new(),
                args: Vec::new(),
            };
        };
        let verb = first.to_lowercase();
        let mut args: Vec<String> = tokens.map(str::to_string).collect();

        let kind = match vocabulary.intent(&verb) {
            Some(kind) => kind,
            None if vocabulary.direction(&verb).is_some() => {
                args.insert(0, verb.clone());
                IntentKind::Go
            }
            None => IntentKind::Unknown,
        };

        Self { kind, verb, args }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_and_args() {
        let vocab = Vocabulary::standard();
        let intent = Intent::parse("  TALK Elder Good Morning ", &vocab);
        assert_eq!(intent.kind, IntentKind::Talk);
        assert_eq!(intent.verb, "talk");
        assert_eq!(intent.args, vec!["Elder", "Good", "Morning"]);
    }

    #[test]
    fn test_bare_direction_is_go() {
        let vocab = Vocabulary::standard();
        let intent = Intent::parse("N", &vocab);
        assert_eq!(intent.kind, IntentKind::Go);
        assert_eq!(intent.args, vec!["n"]);

        let intent = Intent::parse("北", &vocab);
        assert_eq!(intent.kind, IntentKind::Go);
        assert_eq!(intent.args, vec!["北"]);
    }

    #[test]
    fn test_empty_and_unknown() {
        let vocab = Vocabulary::standard();
        let intent = Intent::parse("   ", &vocab);
        assert_eq!(intent.kind, IntentKind::Unknown);
        assert!(intent.verb.is_empty());

        let intent = Intent::parse("dance wildly", &vocab);
        assert_eq!(intent.kind, IntentKind::Unknown);
        assert_eq!(intent.verb, "dance");
    }
}
