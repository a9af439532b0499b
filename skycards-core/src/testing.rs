//! Test utilities for the dashboard and its components
//!
//! - [`key`]: build a `KeyEvent` from a short string (`"enter"`, `"ctrl+u"`, `"q"`)
//! - [`RenderHarness`]: render into an in-memory terminal and read it back as text
//! - [`ActionAssertions`]: assertions over the actions a component emitted
//!
//! # Example
//!
//! ```ignore
//! use skycards_core::testing::*;
//!
//! let mut render = RenderHarness::new(80, 24);
//! let output = render.render_to_string_plain(|frame| {
//!     let area = frame.area();
//!     card.render(frame, area, props);
//! });
//! assert!(output.contains("Testville"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};

use crate::event::EventKind;

/// Parse a key description such as `"q"`, `"enter"`, `"ctrl+u"`, `"left"`.
///
/// Returns `None` for names it does not know.
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = s.split('+').collect();
    let name = parts.pop()?;
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match name.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        "f5" => KeyCode::F(5),
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Like [`parse_key`], panicking on unknown names.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Key press wrapped as an [`EventKind`].
pub fn key_press(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// Key presses for each character of `text`, for typing into inputs.
pub fn typed(text: &str) -> Vec<EventKind> {
    text.chars()
        .map(|c| {
            EventKind::Key(KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::empty(),
                kind: KeyEventKind::Press,
                state: KeyEventState::empty(),
            })
        })
        .collect()
}

/// Renders into a `TestBackend` of fixed size.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = match Terminal::new(TestBackend::new(width, height)) {
            Ok(terminal) => terminal,
            Err(e) => panic!("test terminal: {e}"),
        };
        Self { terminal }
    }

    /// Render once and return the buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> &Buffer {
        if let Err(e) = self.terminal.draw(draw) {
            panic!("test draw failed: {e}");
        }
        self.terminal.backend().buffer()
    }

    /// Render once and return the screen as plain text, one line per row.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        let buffer = self.render(draw).clone();
        buffer_to_string_plain(&buffer)
    }
}

/// Buffer contents without styling, rows joined with `\n`.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// Assertions over emitted actions.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
}

impl<A: PartialEq + Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "expected no actions, got {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "unexpected actions: {:?}", self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(self.first(), Some(&expected), "actions: {:?}", self);
    }
}
