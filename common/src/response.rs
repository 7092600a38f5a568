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

use crate::content::LocationId;
use serde::{Deserialize, Serialize};

/// Result of handling one command line, ready for a transport to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    /// Text to show the player
    pub text: String,
    /// Location the player is in after the command
    pub location_id: LocationId,
    /// Number of distinct locations visited this session
    pub visited_count: usize,
    /// Transport should clear its scrollback before rendering `text`
    #[serde(default)]
    pub clear_screen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_serializes_camel_case() {
        let response = CommandResponse {
            text: "You look around.".to_string(),
            location_id: LocationId::from("square"),
            visited_count: 1,
            clear_screen: false,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["locationId"], "square");
        assert_eq!(value["visitedCount"], 1);
        assert_eq!(value["clearScreen"], false);
    }
}
