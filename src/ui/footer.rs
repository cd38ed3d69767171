//! Footer line with key hints

use crate::keymap::{KeyContext, KeyHint, KeyMap};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

#[derive(Debug, Default)]
pub struct Footer {
    hints: Vec<KeyHint>,
    show_help: bool,
    layout_hints: Vec<KeyHint>,
}

impl Footer {
    pub fn new(keymap: &KeyMap) -> Self {
        Self {
            hints: Vec::new(),
            show_help: false,
            layout_hints: keymap.hints(KeyContext::Layout),
        }
    }

    pub fn set_hints(&mut self, hints: Vec<KeyHint>) {
        self.hints = hints;
    }

    pub fn hints(&self) -> &[KeyHint] {
        &self.hints
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn is_help_shown(&self) -> bool {
        self.show_help
    }

    /// Hints in display order: pane hints, then layout keys when help is on
    pub fn visible_hints(&self) -> Vec<KeyHint> {
        let mut all = self.hints.clone();
        if self.show_help {
            all.extend(self.layout_hints.iter().copied());
        }
        all
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::new();
        for (i, hint) in self.visible_hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", theme.footer_desc));
            }
            spans.push(Span::styled(hint.key, theme.footer_key));
            spans.push(Span::styled(format!(" {}", hint.description), theme.footer_desc));
        }
        if !self.show_help {
            if !spans.is_empty() {
                spans.push(Span::styled("  ", theme.footer_desc));
            }
            spans.push(Span::styled("?", theme.footer_key));
            spans.push(Span::styled(" help", theme.footer_desc));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_adds_layout_hints() {
        let km = KeyMap::default();
        let mut footer = Footer::new(&km);
        footer.set_hints(km.hints(KeyContext::Results));
        let base = footer.visible_hints().len();
        footer.toggle_help();
        assert!(footer.is_help_shown());
        assert_eq!(
            footer.visible_hints().len(),
            base + km.hints(KeyContext::Layout).len()
        );
        footer.toggle_help();
        assert_eq!(footer.visible_hints().len(), base);
    }

    #[test]
    fn test_set_hints_replaces() {
        let km = KeyMap::default();
        let mut footer = Footer::new(&km);
        footer.set_hints(km.hints(KeyContext::EditorNormal));
        footer.set_hints(km.hints(KeyContext::EditorInsert));
        assert_eq!(footer.hints(), km.hints(KeyContext::EditorInsert).as_slice());
    }
}
