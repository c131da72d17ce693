use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A console button was pressed
    Button(Button),
    /// Leave the program immediately
    Quit,
    None,
}

/// Maps terminal keys onto the console's buttons
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Button(Button::Up),
            KeyCode::Down => KeyAction::Button(Button::Down),
            KeyCode::Left => KeyAction::Button(Button::Left),
            KeyCode::Right => KeyAction::Button(Button::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Button(Button::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Button(Button::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Button(Button::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Button(Button::Right),

            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Button(Button::Select),
            KeyCode::Esc | KeyCode::Backspace => KeyAction::Button(Button::Back),

            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
