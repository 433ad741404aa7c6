//! Key mapping from terminal events to game commands.

use crate::types::GameCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<GameCommand> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameCommand::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameCommand::MoveRight),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameCommand::MoveDown),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameCommand::Rotate),
        KeyCode::Char(' ') => Some(GameCommand::Fall),

        // Lifecycle
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameCommand::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameCommand::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
