//! Rendering checks on ratatui's `TestBackend`

use crate::common::{connected_app, key};
use crossterm::event::KeyCode;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use sqlpane::keymap::KeyMap;
use sqlpane::message::{Message, RequestId};
use sqlpane::ui::Component;
use sqlpane::ui::render::render;
use sqlpane::ui::results::ResultsViewer;
use sqlpane::ui::theme::Theme;

fn screen_lines(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect()
}

fn draw_results(terminal: &mut Terminal<TestBackend>, viewer: &ResultsViewer, theme: &Theme) {
    terminal
        .draw(|frame| viewer.render(frame, frame.area(), theme))
        .unwrap();
}

#[test]
fn test_result_table_then_error_keeps_rows() {
    let theme = Theme::new();
    let keymap = KeyMap::default();
    let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
    let mut viewer = ResultsViewer::new(10);
    viewer.resize(Rect::new(0, 0, 60, 10));

    viewer.update(
        Message::QueryResult {
            request: RequestId(1),
            columns: vec!["id".to_string(), "name".to_string()],
            rows: vec![vec!["1".to_string(), "test".to_string()]],
            error: None,
        },
        &keymap,
    );
    draw_results(&mut terminal, &viewer, &theme);
    let lines = screen_lines(&terminal);

    // Header on the first inner row, one data row below it
    assert!(lines[1].contains("id"));
    assert!(lines[1].contains("name"));
    assert_eq!(lines.iter().filter(|l| l.contains("test")).count(), 1);
    assert_eq!(viewer.column_widths().len(), 2);
    assert!(lines.iter().any(|l| l.contains("Row 1/1 | Col 1/2")));

    viewer.update(Message::Error("no such table: nope".to_string()), &keymap);
    draw_results(&mut terminal, &viewer, &theme);
    let lines = screen_lines(&terminal);

    assert!(lines.iter().any(|l| l.contains("no such table: nope")));
    assert!(!lines.iter().any(|l| l.contains("test")));
    assert_eq!(viewer.rows(), &[vec!["1".to_string(), "test".to_string()]]);
}

#[test]
fn test_wide_cells_are_truncated_to_column_width() {
    let theme = Theme::new();
    let keymap = KeyMap::default();
    let mut terminal = Terminal::new(TestBackend::new(22, 8)).unwrap();
    let mut viewer = ResultsViewer::new(10);
    viewer.resize(Rect::new(0, 0, 22, 8));
    viewer.update(
        Message::QueryResult {
            request: RequestId(1),
            columns: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec!["x".repeat(40), "tail".to_string()]],
            error: None,
        },
        &keymap,
    );
    draw_results(&mut terminal, &viewer, &theme);
    let lines = screen_lines(&terminal);
    assert!(lines[2].contains(&"x".repeat(10)));
    assert!(!lines[2].contains(&"x".repeat(11)));
    assert!(lines[2].contains("tail"));
}

#[test]
fn test_full_screen_render() {
    let mut app = connected_app();
    app.update(Message::Resize {
        width: 100,
        height: 31,
    });
    let mut terminal = Terminal::new(TestBackend::new(100, 31)).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();
    let screen = screen_lines(&terminal).join("\n");

    assert!(screen.contains("Schema"));
    assert!(screen.contains("Editor [NORMAL]"));
    assert!(screen.contains("Results"));
    assert!(screen.contains("test_db"));
    assert!(screen.contains("█"));
    assert!(screen.contains("ctrl+e"));
}

#[test]
fn test_editor_renders_highlighted_text_and_insert_cursor() {
    let mut app = connected_app();
    app.update(Message::Resize {
        width: 80,
        height: 24,
    });
    app.update(Message::InsertQuery("SELECT * FROM users;".to_string()));
    app.update(key(KeyCode::Char('i')));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();
    let screen = screen_lines(&terminal).join("\n");
    assert!(screen.contains("Editor [INSERT]"));
    // Pane border followed by the insert cursor
    assert!(screen.contains("││SELECT * FROM users;"));
}

#[test]
fn test_help_toggle_shows_layout_keys() {
    let mut app = connected_app();
    app.update(Message::Resize {
        width: 120,
        height: 20,
    });
    let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();
    let before = screen_lines(&terminal);
    assert!(!before[19].contains("next pane"));

    app.update(key(KeyCode::Char('?')));
    terminal.draw(|frame| render(frame, &app)).unwrap();
    let after = screen_lines(&terminal);
    assert!(after[19].contains("next pane"));
    assert!(after[19].contains("quit"));
}

#[test]
fn test_panes_drawn_where_last_resize_put_them() {
    let mut app = connected_app();
    app.update(Message::Resize {
        width: 80,
        height: 24,
    });
    // Larger frame than the app was told about: nothing moves until the
    // next resize message arrives
    let mut terminal = Terminal::new(TestBackend::new(100, 31)).unwrap();
    terminal.draw(|frame| render(frame, &app)).unwrap();
    let lines = screen_lines(&terminal);

    let footer = app.layout().footer;
    assert_eq!(footer.y, 23);
    assert!(lines[23].contains("ctrl+e"));
    assert!(lines[30].trim().is_empty());
    assert!(lines[0].chars().skip(80).all(|c| c == ' '));
}
