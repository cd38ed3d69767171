//! UI theme and styling
//!
//! Defines colors, styles, and visual appearance for all UI components.
//! Built once at startup and handed to every render call by reference.

use crate::ui::highlight::TokenKind;
use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub border_focused: Style,
    pub border_unfocused: Style,

    // Sidebar
    pub list_item: Style,
    pub list_button: Style,
    pub list_selected: Style,
    pub tree_node: Style,
    pub tree_leaf: Style,
    pub tree_empty: Style,

    // Connection form
    pub form_label: Style,
    pub form_input: Style,
    pub form_input_focused: Style,
    pub form_button: Style,
    pub form_button_focused: Style,
    pub form_error: Style,

    // Query editor
    pub editor_text: Style,
    pub editor_keyword: Style,
    pub editor_string: Style,
    pub editor_number: Style,
    pub editor_comment: Style,
    pub editor_symbol: Style,
    pub editor_cursor: Style,

    // Results table
    pub results_header: Style,
    pub results_row_even: Style,
    pub results_row_odd: Style,
    pub results_selected: Style,
    pub results_null: Style,
    pub results_error_title: Style,
    pub results_error_text: Style,
    pub results_notification: Style,
    pub results_empty: Style,
    pub results_footer: Style,

    // Footer
    pub footer_key: Style,
    pub footer_desc: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            // Borders
            border_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border_unfocused: Style::default().fg(Color::DarkGray),

            // Sidebar
            list_item: Style::default().fg(Color::White),
            list_button: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tree_node: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tree_leaf: Style::default().fg(Color::Green),
            tree_empty: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            // Connection form
            form_label: Style::default().fg(Color::Gray),
            form_input: Style::default().fg(Color::White),
            form_input_focused: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
            form_button: Style::default().fg(Color::Gray),
            form_button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
            form_error: Style::default().fg(Color::Red),

            // Query editor
            editor_text: Style::default().fg(Color::White),
            editor_keyword: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            editor_string: Style::default().fg(Color::Green),
            editor_number: Style::default().fg(Color::Magenta),
            editor_comment: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            editor_symbol: Style::default().fg(Color::Gray),
            editor_cursor: Style::default().fg(Color::Cyan),

            // Results table
            results_header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            results_row_even: Style::default().fg(Color::White),
            results_row_odd: Style::default().fg(Color::Gray),
            results_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
            results_null: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            results_error_title: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            results_error_text: Style::default().fg(Color::Red),
            results_notification: Style::default().fg(Color::Green),
            results_empty: Style::default().fg(Color::DarkGray),
            results_footer: Style::default().fg(Color::DarkGray),

            // Footer
            footer_key: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            footer_desc: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Create a new theme with default colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Get border style based on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Style for a highlighted SQL token
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Keyword => self.editor_keyword,
            TokenKind::Identifier => self.editor_text,
            TokenKind::Number => self.editor_number,
            TokenKind::String => self.editor_string,
            TokenKind::Comment => self.editor_comment,
            TokenKind::Symbol => self.editor_symbol,
        }
    }
}
