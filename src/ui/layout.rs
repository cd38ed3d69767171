//! Panel layout management
//!
//! Handles the arrangement of panes on the terminal screen:
//! sidebar on the left, editor on the right, results across the bottom and
//! a one-line footer.

use crate::ui::PaneId;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar share of the top row, in percent
const SIDEBAR_PERCENT: u16 = 30;

/// Screen areas for every pane plus the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub sidebar: Rect,
    pub editor: Rect,
    pub results: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn pane(&self, id: PaneId) -> Rect {
        match id {
            PaneId::Sidebar => self.sidebar,
            PaneId::Editor => self.editor,
            PaneId::Result => self.results,
        }
    }
}

/// Calculate panel layout for the main screen
pub fn calculate_layout(area: Rect) -> AppLayout {
    let results_height = area.height.saturating_sub(1) / 3;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(results_height),
            Constraint::Length(1),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(SIDEBAR_PERCENT),
            Constraint::Min(0),
        ])
        .split(rows[0]);

    AppLayout {
        sidebar: top[0],
        editor: top[1],
        results: rows[1],
        footer: rows[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_layout() {
        let area = Rect::new(0, 0, 100, 31);
        let layout = calculate_layout(area);

        assert_eq!(layout.footer, Rect::new(0, 30, 100, 1));
        assert_eq!(layout.results, Rect::new(0, 20, 100, 10));
        assert_eq!(layout.sidebar, Rect::new(0, 0, 30, 20));
        assert_eq!(layout.editor, Rect::new(30, 0, 70, 20));
    }

    #[test]
    fn test_panes_do_not_overlap() {
        let layout = calculate_layout(Rect::new(0, 0, 80, 24));
        for a in PaneId::ALL {
            for b in PaneId::ALL {
                if a != b {
                    assert!(!layout.pane(a).intersects(layout.pane(b)));
                }
            }
        }
        assert!(!layout.footer.intersects(layout.results));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let layout = calculate_layout(Rect::new(0, 0, 3, 1));
        assert_eq!(layout.footer.height, 1);
        assert_eq!(layout.results.height, 0);
    }
}
