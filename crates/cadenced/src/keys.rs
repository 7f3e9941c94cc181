//! Keystroke mapping for the terminal runner

use cadence_api::Command;

/// What a line typed on stdin asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
}

/// Map one line of input to an action. Only the first non-blank character
/// counts; anything unrecognized is ignored.
pub fn parse_key(line: &str) -> Option<KeyAction> {
    let key = line.trim().chars().next()?.to_ascii_lowercase();
    let action = match key {
        'p' => KeyAction::Command(Command::Pause),
        'r' => KeyAction::Command(Command::Resume),
        's' => KeyAction::Command(Command::Skip),
        'x' => KeyAction::Command(Command::Stop),
        'g' => KeyAction::Command(Command::Start),
        'q' => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

pub const KEY_HELP: &str = "[p]ause  [r]esume  [s]kip  [x] stop  [g]o again  [q]uit";
