//! Query editor pane
//!
//! Vim-flavoured SQL editor over a `TextBuffer`. Normal mode moves, Insert
//! mode types, `ctrl+e` runs the whole buffer in either mode. Each editor is
//! bound to the connection it was created for.

use crate::db::DbHandle;
use crate::keymap::{KeyAction, KeyContext, KeyMap};
use crate::message::{Command, Message};
use crate::ui::buffer::{Mode, TextBuffer};
use crate::ui::highlight::highlight_line;
use crate::ui::theme::Theme;
use crate::ui::{Component, inner_area};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub const NO_CONNECTION: &str = "No database connection. Pick one from the sidebar first.";

const NORMAL_CURSOR: &str = "█";
const INSERT_CURSOR: &str = "│";

pub struct QueryEditor {
    buffer: TextBuffer,
    connection: Option<DbHandle>,
    active: bool,
    /// Visible text rows
    viewport_height: usize,
    /// First visible line
    scroll_offset: usize,
}

impl QueryEditor {
    pub fn new(connection: Option<DbHandle>) -> Self {
        Self {
            buffer: TextBuffer::new(),
            connection,
            active: false,
            viewport_height: 0,
            scroll_offset: 0,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> Mode {
        self.buffer.mode()
    }

    pub fn has_connection(&self) -> bool {
        self.connection.is_some()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn handle_key(&mut self, key: KeyEvent, keymap: &KeyMap) -> Vec<Command> {
        if let Some(action) = keymap.resolve(self.key_context(), key) {
            return self.execute_key_action(action, keymap);
        }

        // Unbound keys are text in Insert mode
        if self.buffer.mode() == Mode::Insert
            && let KeyCode::Char(c) = key.code
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            self.buffer.insert_char(c);
            self.ensure_cursor_visible();
        }
        Vec::new()
    }

    fn execute_key_action(&mut self, action: KeyAction, keymap: &KeyMap) -> Vec<Command> {
        match action {
            KeyAction::MoveUp => self.buffer.move_up(),
            KeyAction::MoveDown => self.buffer.move_down(),
            KeyAction::MoveLeft => self.buffer.move_left(),
            KeyAction::MoveRight => self.buffer.move_right(),
            KeyAction::WordForward => self.buffer.word_forward(),
            KeyAction::WordBackward => self.buffer.word_backward(),
            KeyAction::SplitLine => self.buffer.split_line(),
            KeyAction::DeleteBackward => self.buffer.backspace(),
            KeyAction::EnterInsert => return self.switch_mode(Mode::Insert, keymap),
            KeyAction::EnterNormal => return self.switch_mode(Mode::Normal, keymap),
            KeyAction::ExecuteQuery => return self.execute_query(),
            _ => {}
        }
        self.ensure_cursor_visible();
        Vec::new()
    }

    fn switch_mode(&mut self, mode: Mode, keymap: &KeyMap) -> Vec<Command> {
        if self.buffer.mode() == mode {
            return Vec::new();
        }
        self.buffer.set_mode(mode);
        vec![Command::Emit(Message::KeyBindings(
            keymap.hints(self.key_context()),
        ))]
    }

    fn execute_query(&self) -> Vec<Command> {
        if self.buffer.is_empty() {
            return Vec::new();
        }
        match &self.connection {
            Some(handle) => vec![Command::ExecuteQuery {
                handle: handle.clone(),
                sql: self.buffer.text(),
            }],
            None => vec![Command::Emit(Message::Error(NO_CONNECTION.to_string()))],
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let (row, _) = self.buffer.cursor();
        if self.viewport_height == 0 {
            self.scroll_offset = row;
        } else if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = row + 1 - self.viewport_height;
        }
    }

    fn cursor_line(&self, theme: &Theme) -> Line<'static> {
        let (before, after) = self.buffer.split_at_cursor();
        let glyph = match self.buffer.mode() {
            Mode::Normal => NORMAL_CURSOR,
            Mode::Insert => INSERT_CURSOR,
        };
        let mut spans = highlight_line(before, theme);
        spans.push(Span::styled(glyph, theme.editor_cursor));
        spans.extend(highlight_line(after, theme));
        Line::from(spans)
    }
}

impl Component for QueryEditor {
    fn update(&mut self, message: Message, keymap: &KeyMap) -> Vec<Command> {
        match message {
            Message::Key(key) => self.handle_key(key, keymap),
            Message::Paste(text) => {
                self.buffer.insert_str(&text);
                self.ensure_cursor_visible();
                Vec::new()
            }
            Message::InsertQuery(sql) => {
                self.buffer.set_text(&sql);
                self.scroll_offset = 0;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = format!(" Editor [{}] ", self.buffer.mode().label());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style(self.active));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (cursor_row, _) = self.buffer.cursor();
        let lines: Vec<Line> = self
            .buffer
            .lines()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(inner.height as usize)
            .map(|(row, text)| {
                if self.active && row == cursor_row {
                    self.cursor_line(theme)
                } else {
                    Line::from(highlight_line(text, theme))
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_capturing(&self) -> bool {
        self.buffer.mode() == Mode::Insert
    }

    fn key_context(&self) -> KeyContext {
        match self.buffer.mode() {
            Mode::Normal => KeyContext::EditorNormal,
            Mode::Insert => KeyContext::EditorInsert,
        }
    }

    fn resize(&mut self, area: Rect) {
        self.viewport_height = inner_area(area).height as usize;
        self.ensure_cursor_visible();
    }
}
