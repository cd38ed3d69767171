//! Connection form
//!
//! Name and URL inputs plus a Submit button, shown inside the sidebar.

use crate::keymap::{KeyAction, KeyContext, KeyMap};
use crate::message::Message;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const NAME_LABEL: &str = "Name: ";
const URL_LABEL: &str = "URL:  ";
const SUBMIT_LABEL: &str = "[ Submit ]";
const URL_REQUIRED: &str = "URL is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Url,
    Submit,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Name => Self::Url,
            Self::Url => Self::Submit,
            Self::Submit => Self::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Name => Self::Submit,
            Self::Url => Self::Name,
            Self::Submit => Self::Url,
        }
    }
}

/// Single-line text input with a byte-offset cursor on a char boundary
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.value.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            let next = self.next_boundary();
            self.value.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.cursor
            + self.value[self.cursor..]
                .chars()
                .next()
                .map(|c| c.len_utf8())
                .unwrap_or(0)
    }

    /// Apply an editing key. Returns whether the value changed.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Home => {
                self.home();
                false
            }
            KeyCode::End => {
                self.end();
                false
            }
            _ => false,
        }
    }
}

/// Visible portion of an input plus the cursor column inside it
#[derive(Debug, PartialEq, Eq)]
struct VisibleSlice {
    text: String,
    cursor_offset: usize,
}

/// Window of `width` chars that keeps the cursor visible
fn visible_slice(input: &str, cursor: usize, width: usize) -> VisibleSlice {
    if width == 0 {
        return VisibleSlice {
            text: String::new(),
            cursor_offset: 0,
        };
    }
    let chars: Vec<char> = input.chars().collect();
    let cursor = input[..cursor].chars().count();
    if chars.len() < width {
        return VisibleSlice {
            text: input.to_string(),
            cursor_offset: cursor,
        };
    }

    let start = if cursor > width.saturating_sub(1) {
        cursor + 1 - width
    } else {
        0
    };
    let end = (start + width).min(chars.len());
    VisibleSlice {
        text: chars[start..end].iter().collect(),
        cursor_offset: cursor - start,
    }
}

#[derive(Debug, Default)]
pub struct ConnectionForm {
    name: TextInput,
    url: TextInput,
    focus: FormField,
    error: Option<String>,
}

impl ConnectionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn url(&self) -> &str {
        self.url.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Insert pasted text into the focused input. Line breaks are dropped.
    pub fn paste(&mut self, text: &str) {
        let input = match self.focus {
            FormField::Name => &mut self.name,
            FormField::Url => &mut self.url,
            FormField::Submit => return,
        };
        for c in text.chars().filter(|c| !c.is_control()) {
            input.insert(c);
        }
        self.error = None;
    }

    /// Handle a key. Returns the message to emit when the form is submitted
    /// or cancelled.
    pub fn handle_key(&mut self, key: KeyEvent, keymap: &KeyMap) -> Option<Message> {
        match keymap.resolve(KeyContext::ConnectionForm, key) {
            Some(KeyAction::NextField) => self.focus = self.focus.next(),
            Some(KeyAction::PrevField) => self.focus = self.focus.prev(),
            Some(KeyAction::Submit) => return self.handle_enter(),
            Some(KeyAction::Cancel) => return Some(Message::FormCancel),
            _ => {
                let input = match self.focus {
                    FormField::Name => &mut self.name,
                    FormField::Url => &mut self.url,
                    FormField::Submit => return None,
                };
                if input.handle_key(key) {
                    self.error = None;
                }
            }
        }
        None
    }

    fn handle_enter(&mut self) -> Option<Message> {
        if self.focus == FormField::Name {
            self.focus = FormField::Url;
            return None;
        }

        let url = self.url.value().trim().to_string();
        if url.is_empty() {
            self.error = Some(URL_REQUIRED.to_string());
            self.focus = FormField::Url;
            return None;
        }

        let name = match self.name.value().trim() {
            "" => url.clone(),
            name => name.to_string(),
        };
        tracing::debug!(%name, "Connection form submitted");
        Some(Message::FormSubmit { name, url })
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let mut y = area.y;
        let bottom = area.y + area.height;

        for (field, label, input) in [
            (FormField::Name, NAME_LABEL, &self.name),
            (FormField::Url, URL_LABEL, &self.url),
        ] {
            if y >= bottom {
                return;
            }
            let focused = self.focus == field;
            let input_width = area.width.saturating_sub(label.len() as u16) as usize;
            let visible = visible_slice(input.value(), input.cursor(), input_width);
            let style = if focused {
                theme.form_input_focused
            } else {
                theme.form_input
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(label, theme.form_label),
                    Span::styled(visible.text, style),
                ])),
                Rect::new(area.x, y, area.width, 1),
            );
            if focused {
                let cursor_x = area.x + (label.len() + visible.cursor_offset) as u16;
                frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), y));
            }
            y += 1;
        }

        y += 1;
        if y < bottom {
            let style = if self.focus == FormField::Submit {
                theme.form_button_focused
            } else {
                theme.form_button
            };
            frame.render_widget(
                Paragraph::new(Span::styled(SUBMIT_LABEL, style)),
                Rect::new(area.x, y, area.width, 1),
            );
        }

        y += 2;
        if let Some(err) = &self.error
            && y < bottom
        {
            frame.render_widget(
                Paragraph::new(Span::styled(err.as_str(), theme.form_error)),
                Rect::new(area.x, y, area.width, 1),
            );
        }
    }
}
