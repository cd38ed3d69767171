//! Top-level render function
//!
//! Draws every pane into the rectangles the app computed on the last resize.

use crate::app::App;
use crate::ui::PaneId;
use ratatui::Frame;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &App) {
    let layout = app.layout();
    let screen = frame.area();
    let theme = app.theme();

    for id in PaneId::ALL {
        let area = layout.pane(id).intersection(screen);
        app.panes().get(id).render(frame, area, theme);
    }
    app.footer()
        .render(frame, layout.footer.intersection(screen), theme);
}
