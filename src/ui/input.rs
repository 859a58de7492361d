/// Terminal event translator.
///
/// Drains every pending crossterm event once per frame and turns the ones
/// the wizard cares about into `UserInput`:
///   - printable keys, editing keys, Tab/BackTab for desktop selection
///   - backtick toggles the console, Ctrl+C quits from anywhere
///   - left-button mouse down / drag / up, already converted to
///     desktop-local cells
///
/// Only key presses and repeats count; release events are dropped.

use std::time::Duration;

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::domain::geometry::Point;
use crate::sim::wizard::UserInput;

/// Key that opens and closes the console.
pub const CONSOLE_KEY: char = '`';

pub struct InputState {
    /// Inputs collected during the most recent `drain_events()`.
    pending: Vec<UserInput>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            pending: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. `to_desktop` maps a screen cell to
    /// desktop-local coordinates (the desktop is centred, so the mapping
    /// changes with the terminal size).
    pub fn drain_events(&mut self, to_desktop: impl Fn(u16, u16) -> Point) -> &[UserInput] {
        self.pending.clear();

        // Read all available events without blocking
        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(input) = translate_key(key) {
                        self.pending.push(input);
                    }
                }
                Ok(Event::Mouse(mouse)) => {
                    if let Some(input) = translate_mouse(mouse, &to_desktop) {
                        self.pending.push(input);
                    }
                }
                _ => {}
            }
        }

        &self.pending
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn translate_key(key: KeyEvent) -> Option<UserInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(UserInput::Quit),
            _ => None,
        };
    }

    let input = match key.code {
        KeyCode::Char(CONSOLE_KEY) => UserInput::ToggleConsole,
        KeyCode::Char(c) => UserInput::Char(c),
        KeyCode::Backspace => UserInput::Backspace,
        KeyCode::Delete => UserInput::Delete,
        KeyCode::Enter => UserInput::Enter,
        KeyCode::Esc => UserInput::Esc,
        KeyCode::BackTab => UserInput::BackTab,
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => UserInput::BackTab,
        KeyCode::Tab => UserInput::Tab,
        _ => return None,
    };
    Some(input)
}

fn translate_mouse(mouse: MouseEvent, to_desktop: impl Fn(u16, u16) -> Point) -> Option<UserInput> {
    let p = to_desktop(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(UserInput::PointerDown(p)),
        MouseEventKind::Drag(MouseButton::Left) => Some(UserInput::PointerDrag(p)),
        MouseEventKind::Up(MouseButton::Left) => Some(UserInput::PointerUp(p)),
        _ => None,
    }
}
