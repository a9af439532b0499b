//! Location bar: single-line editor for a ZIP code or city name

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skycards_core::{Component, EventKind};

pub struct LocationInputProps<'a, A> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub title: &'a str,
    pub is_focused: bool,
    /// Characters beyond this are not inserted
    pub max_len: Option<usize>,
    /// Why the last submission was refused
    pub error: Option<&'a str>,
    /// A submission is being checked
    pub checking: bool,
    pub on_change: fn(String) -> A,
    pub on_submit: fn(String) -> A,
}

/// Edits the location bar contents. The value lives in app state; only the
/// cursor (byte index) is kept here.
#[derive(Default)]
pub struct LocationInput {
    cursor: usize,
}

impl LocationInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().last() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char, max_len: Option<usize>) -> Option<String> {
        if max_len.is_some_and(|max| value.chars().count() >= max) {
            return None;
        }
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        Some(new_value)
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().last()?;
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl<A> Component<A> for LocationInput {
    type Props<'a> = LocationInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => self
                .insert(props.value, c, props.max_len)
                .map(props.on_change),
            KeyCode::Backspace => self.backspace(props.value).map(props.on_change),
            KeyCode::Delete => self.delete(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            // Cleared by the reducer only if the location is accepted
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (props.value, Style::default())
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", props.title))
            .border_style(if props.is_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        if let Some(error) = props.error {
            block = block.title_bottom(Line::from(format!(" ⚠ {} ", error)).fg(Color::Red));
        } else if props.checking {
            block = block.title_bottom(Line::from(" Checking... ").fg(Color::DarkGray));
        }

        frame.render_widget(Paragraph::new(text).style(style).block(block), area);

        if props.is_focused {
            let width = props.value[..self.cursor].chars().count() as u16;
            let cursor_x = area.x + 1 + width;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}
