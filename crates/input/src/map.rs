//! Key mapping from terminal events to engine commands.

use crate::types::{Command, Direction, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a command. Releases map to nothing.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::Move(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::Move(Direction::Right)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::Move(Direction::Down)),

        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Command::Rotate),

        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),

        KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::StartGame),

        _ => None,
    }
}

/// Like [`map_key`], but drops commands the current phase would ignore.
///
/// Piece controls only pass while a session is on screen and not over;
/// starting a game always passes.
pub fn map_key_in(key: KeyEvent, phase: Phase) -> Option<Command> {
    let command = map_key(key)?;
    match command {
        Command::StartGame => Some(command),
        Command::TogglePause if phase.is_playing() => Some(command),
        _ if phase == Phase::Running => Some(command),
        _ => None,
    }
}

/// Check if key should quit the host.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
