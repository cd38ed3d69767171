//! Query results pane
//!
//! Displays the last successful query as a scrollable table. Errors and
//! notifications are shown in its place without discarding the table: an
//! error wins over a notification, which wins over the table.

use crate::keymap::{KeyAction, KeyContext, KeyMap};
use crate::message::{Command, Message};
use crate::ui::theme::Theme;
use crate::ui::{Component, inner_area};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

/// Rows moved by PageUp/PageDown when the viewport is unknown
const DEFAULT_PAGE: usize = 20;

/// What the pane body currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    Error,
    Notification,
    Table,
    Empty,
}

pub struct ResultsViewer {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Whether any query has completed yet
    has_results: bool,
    selected_row: usize,
    scroll_offset: usize,
    /// First visible column
    h_scroll_offset: usize,
    /// Computed column widths
    col_widths: Vec<u16>,
    error: Option<String>,
    notification: Option<String>,
    min_column_width: u16,
    area: Rect,
    active: bool,
}

impl ResultsViewer {
    pub fn new(min_column_width: u16) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            has_results: false,
            selected_row: 0,
            scroll_offset: 0,
            h_scroll_offset: 0,
            col_widths: Vec::new(),
            error: None,
            notification: None,
            min_column_width: min_column_width.max(1),
            area: Rect::default(),
            active: false,
        }
    }

    pub fn set_results(&mut self, columns: Vec<String>, rows: Vec<Vec<String>>) {
        self.columns = columns;
        self.rows = rows;
        self.has_results = true;
        self.error = None;
        self.notification = None;
        self.selected_row = 0;
        self.scroll_offset = 0;
        self.h_scroll_offset = 0;
        self.recompute_widths();
    }

    /// Show an error. The table underneath is kept.
    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
        self.notification = None;
    }

    pub fn set_notification(&mut self, text: String) {
        self.notification = Some(text);
        self.error = None;
    }

    /// Clear an error or notification. Returns whether anything was cleared.
    pub fn dismiss(&mut self) -> bool {
        let had_message = self.error.is_some() || self.notification.is_some();
        self.error = None;
        self.notification = None;
        had_message
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_widths(&self) -> &[u16] {
        &self.col_widths
    }

    pub fn selected_row(&self) -> usize {
        self.selected_row
    }

    pub fn view(&self) -> ResultsView {
        if self.error.is_some() {
            ResultsView::Error
        } else if self.notification.is_some() {
            ResultsView::Notification
        } else if self.columns.is_empty() {
            ResultsView::Empty
        } else {
            ResultsView::Table
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
        self.ensure_visible();
    }

    pub fn move_down(&mut self) {
        let count = self.row_count();
        if count > 0 && self.selected_row < count - 1 {
            self.selected_row += 1;
        }
        self.ensure_visible();
    }

    pub fn scroll_left(&mut self) {
        self.h_scroll_offset = self.h_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_right(&mut self) {
        if self.h_scroll_offset + 1 < self.col_count() {
            self.h_scroll_offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(self.page_size());
        self.ensure_visible();
    }

    pub fn page_down(&mut self) {
        let count = self.row_count();
        self.selected_row = (self.selected_row + self.page_size()).min(count.saturating_sub(1));
        self.ensure_visible();
    }

    pub fn go_to_top(&mut self) {
        self.selected_row = 0;
        self.ensure_visible();
    }

    pub fn go_to_bottom(&mut self) {
        self.selected_row = self.row_count().saturating_sub(1);
        self.ensure_visible();
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// Data rows that fit: inner height minus header and footer
    fn visible_height(&self) -> usize {
        (inner_area(self.area).height as usize).saturating_sub(2)
    }

    fn page_size(&self) -> usize {
        match self.visible_height() {
            0 => DEFAULT_PAGE,
            h => h,
        }
    }

    fn ensure_visible(&mut self) {
        let visible_height = self.visible_height();
        if visible_height == 0 {
            return;
        }
        if self.selected_row < self.scroll_offset {
            self.scroll_offset = self.selected_row;
        } else if self.selected_row >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_row - visible_height + 1;
        }
    }

    fn recompute_widths(&mut self) {
        self.col_widths = compute_column_widths(
            self.columns.len(),
            inner_area(self.area).width,
            self.min_column_width,
        );
    }

    fn execute_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.move_up(),
            KeyAction::MoveDown => self.move_down(),
            KeyAction::MoveLeft => self.scroll_left(),
            KeyAction::MoveRight => self.scroll_right(),
            KeyAction::PageUp => self.page_up(),
            KeyAction::PageDown => self.page_down(),
            KeyAction::GoToTop => self.go_to_top(),
            KeyAction::GoToBottom => self.go_to_bottom(),
            KeyAction::Dismiss => {
                self.dismiss();
            }
            _ => {}
        }
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, title: &str, text: &str, theme: &Theme) {
        let style = if self.error.is_some() {
            theme.results_error_text
        } else {
            theme.results_notification
        };
        let mut lines = Vec::new();
        if !title.is_empty() {
            lines.push(Line::from(Span::styled(
                title.to_string(),
                theme.results_error_title,
            )));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(text.to_string(), style)));
        let p = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(p, area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height < 2 || area.width < 2 {
            return;
        }

        let visible_height = (area.height as usize).saturating_sub(2);
        let right = area.x + area.width;

        // Header row
        let mut x = area.x;
        for (col_idx, name) in self.columns.iter().enumerate().skip(self.h_scroll_offset) {
            if x >= right {
                break;
            }
            let w = self.width_of(col_idx).min(right - x);
            frame.render_widget(
                Paragraph::new(fit(name, w as usize)).style(theme.results_header),
                Rect::new(x, area.y, w, 1),
            );
            x = x.saturating_add(w + 1);
        }

        // Data rows
        let rows = self
            .rows
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_height);
        for (vis_row, (row_idx, row)) in rows.enumerate() {
            let y = area.y + 1 + vis_row as u16;
            let base_style = if row_idx == self.selected_row && self.active {
                theme.results_selected
            } else if vis_row % 2 == 0 {
                theme.results_row_even
            } else {
                theme.results_row_odd
            };

            let mut x = area.x;
            for (col_idx, cell) in row.iter().enumerate().skip(self.h_scroll_offset) {
                if x >= right {
                    break;
                }
                let w = self.width_of(col_idx).min(right - x);
                let style = if cell == crate::db::types::NULL_DISPLAY
                    && base_style != theme.results_selected
                {
                    theme.results_null
                } else {
                    base_style
                };
                frame.render_widget(
                    Paragraph::new(fit(cell, w as usize)).style(style),
                    Rect::new(x, y, w, 1),
                );
                x = x.saturating_add(w + 1);
            }
        }

        // Footer with position
        let footer = format!(
            "Row {}/{} | Col {}/{}",
            (self.selected_row + 1).min(self.row_count()),
            self.row_count(),
            self.h_scroll_offset + 1,
            self.col_count(),
        );
        frame.render_widget(
            Paragraph::new(footer).style(theme.results_footer),
            Rect::new(area.x, area.y + area.height - 1, area.width, 1),
        );
    }

    fn width_of(&self, col_idx: usize) -> u16 {
        self.col_widths
            .get(col_idx)
            .copied()
            .unwrap_or(self.min_column_width)
    }
}

impl Component for ResultsViewer {
    fn update(&mut self, message: Message, keymap: &KeyMap) -> Vec<Command> {
        match message {
            Message::Key(key) => {
                if let Some(action) = keymap.resolve(KeyContext::Results, key) {
                    self.execute_key_action(action);
                }
            }
            Message::QueryResult {
                columns,
                rows,
                error,
                ..
            } => match error {
                Some(error) => self.set_error(error),
                None => self.set_results(columns, rows),
            },
            Message::Notification(text) => self.set_notification(text),
            Message::Error(text) => self.set_error(text),
            _ => {}
        }
        Vec::new()
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(theme.border_style(self.active));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.view() {
            ResultsView::Error => {
                let error = self.error.as_deref().unwrap_or_default();
                self.render_message(frame, inner, "Error", error, theme);
            }
            ResultsView::Notification => {
                let text = self.notification.as_deref().unwrap_or_default();
                self.render_message(frame, inner, "", text, theme);
            }
            ResultsView::Table => self.render_table(frame, inner, theme),
            ResultsView::Empty => {
                let msg = if self.has_results {
                    "Statement executed. No rows returned."
                } else {
                    "No results yet. Write a query and press ctrl+e to run it."
                };
                frame.render_widget(Paragraph::new(msg).style(theme.results_empty), inner);
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn key_context(&self) -> KeyContext {
        KeyContext::Results
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
        self.recompute_widths();
        self.ensure_visible();
    }
}

/// Split the available width evenly, never below `min_width`
pub fn compute_column_widths(count: usize, available: u16, min_width: u16) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let share = (available as usize / count).min(u16::MAX as usize) as u16;
    vec![share.max(min_width); count]
}

/// Truncate to a display width and pad with spaces
fn fit(text: &str, width: usize) -> String {
    let (shown, used) = text.unicode_truncate(width);
    debug_assert_eq!(used, shown.width());
    format!("{}{}", shown, " ".repeat(width.saturating_sub(used)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn sample() -> (Vec<String>, Vec<Vec<String>>) {
        (
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec!["1".to_string(), "Alice".to_string()],
                vec!["2".to_string(), "Bob".to_string()],
            ],
        )
    }

    fn loaded() -> ResultsViewer {
        let mut viewer = ResultsViewer::new(10);
        let (columns, rows) = sample();
        viewer.set_results(columns, rows);
        viewer
    }

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_results_viewer_new() {
        let viewer = ResultsViewer::new(10);
        assert_eq!(viewer.view(), ResultsView::Empty);
        assert_eq!(viewer.selected_row, 0);
    }

    #[test]
    fn test_set_results_clears_error_and_notification() {
        let mut viewer = ResultsViewer::new(10);
        viewer.set_error("boom".to_string());
        let (columns, rows) = sample();
        viewer.set_results(columns, rows);
        assert_eq!(viewer.view(), ResultsView::Table);

        viewer.set_notification("Connected".to_string());
        let (columns, rows) = sample();
        viewer.set_results(columns, rows);
        assert!(viewer.notification().is_none());
    }

    #[test]
    fn test_error_keeps_table_data() {
        let mut viewer = loaded();
        viewer.update(
            Message::QueryResult {
                request: Default::default(),
                columns: Vec::new(),
                rows: Vec::new(),
                error: Some("no such table: nope".to_string()),
            },
            &KeyMap::default(),
        );
        assert_eq!(viewer.view(), ResultsView::Error);
        assert_eq!(viewer.rows().len(), 2);
        assert_eq!(viewer.columns().len(), 2);
    }

    #[test]
    fn test_notification_and_error_replace_each_other() {
        let mut viewer = loaded();
        let km = KeyMap::default();
        viewer.update(Message::Error("bad".to_string()), &km);
        viewer.update(Message::Notification("ok".to_string()), &km);
        assert_eq!(viewer.view(), ResultsView::Notification);
        assert!(viewer.error().is_none());
        viewer.update(Message::Error("bad again".to_string()), &km);
        assert_eq!(viewer.view(), ResultsView::Error);
        assert!(viewer.notification().is_none());
    }

    #[test]
    fn test_esc_dismisses_back_to_table() {
        let mut viewer = loaded();
        let km = KeyMap::default();
        viewer.update(Message::Error("bad".to_string()), &km);
        viewer.update(key(KeyCode::Esc), &km);
        assert_eq!(viewer.view(), ResultsView::Table);
        assert!(!viewer.dismiss());
    }

    #[test]
    fn test_navigation_on_empty_results() {
        let mut viewer = ResultsViewer::new(10);
        viewer.move_up();
        viewer.move_down();
        viewer.scroll_left();
        viewer.scroll_right();
        viewer.page_up();
        viewer.page_down();
        viewer.go_to_top();
        viewer.go_to_bottom();
        assert_eq!(viewer.selected_row, 0);
        assert_eq!(viewer.h_scroll_offset, 0);
    }

    #[test]
    fn test_navigation_boundary_clamping() {
        let mut viewer = loaded();
        let km = KeyMap::default();
        viewer.update(key(KeyCode::Char('j')), &km);
        viewer.update(key(KeyCode::Char('j')), &km);
        assert_eq!(viewer.selected_row(), 1);
        viewer.update(key(KeyCode::Char('l')), &km);
        viewer.update(key(KeyCode::Char('l')), &km);
        assert_eq!(viewer.h_scroll_offset, 1);
        viewer.update(key(KeyCode::Char('g')), &km);
        assert_eq!(viewer.selected_row(), 0);
        viewer.update(key(KeyCode::Char('G')), &km);
        assert_eq!(viewer.selected_row(), 1);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut viewer = ResultsViewer::new(10);
        // 6 inner rows: header + 4 data rows + footer
        viewer.resize(Rect::new(0, 0, 40, 8));
        let rows = (0..10).map(|i| vec![i.to_string()]).collect();
        viewer.set_results(vec!["n".to_string()], rows);
        for _ in 0..6 {
            viewer.move_down();
        }
        assert_eq!(viewer.selected_row, 6);
        assert_eq!(viewer.scroll_offset, 3);
        viewer.go_to_top();
        assert_eq!(viewer.scroll_offset, 0);
    }

    #[test]
    fn test_column_widths_split_evenly_with_floor() {
        assert_eq!(compute_column_widths(2, 60, 10), vec![30, 30]);
        assert_eq!(compute_column_widths(3, 20, 10), vec![10, 10, 10]);
        assert!(compute_column_widths(0, 80, 10).is_empty());
    }

    #[test]
    fn test_resize_recomputes_widths() {
        let mut viewer = loaded();
        viewer.resize(Rect::new(0, 0, 62, 10));
        assert_eq!(viewer.column_widths(), &[30, 30]);
        viewer.resize(Rect::new(0, 0, 12, 10));
        assert_eq!(viewer.column_widths(), &[10, 10]);
    }

    #[test]
    fn test_fit_truncates_and_pads_by_display_width() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("日本語", 4), "日本");
    }
}
