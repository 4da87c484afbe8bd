//! Keyboard input mapped to game commands.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strictly_2048::{Direction, InputEvent};
use tracing::{debug, warn};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a command to the game.
    Input(InputEvent),
    /// Leave the program.
    Quit,
    /// Key has no binding.
    Ignore,
}

/// Maps a key press to an action.
///
/// Arrows, WASD and HJKL slide the tiles. `r` restarts, `c` or Enter keeps
/// playing after a win, `q`, Esc and Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    let slide = |direction| KeyAction::Input(InputEvent::Move(direction));
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => slide(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => slide(Direction::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => slide(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => slide(Direction::Left),
        KeyCode::Char('r') => KeyAction::Input(InputEvent::Restart),
        KeyCode::Char('c') | KeyCode::Enter => KeyAction::Input(InputEvent::KeepPlaying),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

/// Blocking stream of game commands read from the terminal.
///
/// Ends when the player quits or the terminal can no longer be read.
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    /// Creates the stream.
    pub fn new() -> Self {
        Self
    }
}

impl Iterator for KeyboardInput {
    type Item = InputEvent;

    fn next(&mut self) -> Option<InputEvent> {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match map_key(key) {
                    KeyAction::Input(input) => {
                        debug!(?input, "Key mapped");
                        return Some(input);
                    }
                    KeyAction::Quit => {
                        debug!("Quit requested");
                        return None;
                    }
                    KeyAction::Ignore => {}
                },
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal event");
                    return None;
                }
            }
        }
    }
}
