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

//! Help command implementation

use super::CommandResult;

const HELP_TEXT: &str = "\
Available Commands:

Exploration:
  look / 看                      - Describe the current location
  where / 位置                   - Show the current location name
  go <direction> / 走 <方向>     - Move (north/south/east/west or 北/南/东/西)
  north, n, 北 ...               - Move in that direction

Characters:
  characters / 角色              - List the characters here
  talk <character> [message]     - Speak with a character
  说 <角色> [消息]

System:
  status / 状态                  - Show game status
  help / 帮助                    - Show this help
  clear / 清空                   - Clear the screen

Examples:
  看                             - Look around
  北 or go north                 - Move north
  talk elder 你好                - Greet the elder";

pub fn help() -> CommandResult {
    CommandResult::Success(HELP_TEXT.to_string())
}

pub fn unknown(verb: &str) -> CommandResult {
    if verb.is_empty() {
        return CommandResult::Invalid("Please enter a command.".to_string());
    }
    CommandResult::Invalid(format!(
        "Unknown command: {}\nType 'help' to see available commands.",
        verb
    ))
}
