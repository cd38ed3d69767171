//! End-to-end message flow through the application
//!
//! Keys go in, tasks come out, and the tasks are executed inline so the whole
//! round trip runs without a terminal.

use crate::common::{connected_app, ctrl, drain, key, settle, type_text};
use crossterm::event::KeyCode;
use sqlpane::app::App;
use sqlpane::config::Settings;
use sqlpane::keymap::KeyContext;
use sqlpane::message::{Command, Message};
use sqlpane::ui::PaneId;
use sqlpane::ui::buffer::Mode;
use sqlpane::ui::results::ResultsView;
use sqlpane::ui::sidebar::SidebarView;

fn focus_sidebar(app: &mut App) {
    while app.current_pane() != PaneId::Sidebar {
        let tasks = app.update(key(KeyCode::Tab));
        drain(app, tasks);
    }
}

#[test]
fn test_tab_suppressed_while_form_open() {
    let mut app = App::new(&Settings::default());
    focus_sidebar(&mut app);

    // Enter on "Add Connection" opens the form
    let tasks = app.update(key(KeyCode::Enter));
    drain(&mut app, tasks);
    assert!(app.sidebar().is_form_open());
    assert_eq!(
        app.footer().hints(),
        app.keymap().hints(KeyContext::ConnectionForm).as_slice()
    );

    // Tab moves between form fields, not panes
    app.update(key(KeyCode::Tab));
    assert_eq!(app.current_pane(), PaneId::Sidebar);

    let tasks = app.update(key(KeyCode::Esc));
    drain(&mut app, tasks);
    assert!(!app.sidebar().is_form_open());

    app.update(key(KeyCode::Tab));
    assert_eq!(app.current_pane(), PaneId::Editor);
}

#[test]
fn test_execute_typed_query_exactly() {
    let mut app = connected_app();
    app.update(key(KeyCode::Char('i')));
    type_text(&mut app, "SELECT 1;");
    let tasks = app.update(ctrl('e'));
    let pending = drain(&mut app, tasks);
    assert_eq!(pending.len(), 1);
    assert!(matches!(
        &pending[0].command,
        Command::ExecuteQuery { sql, .. } if sql == "SELECT 1;"
    ));
}

#[test]
fn test_multiline_query_joined_with_newlines() {
    let mut app = connected_app();
    app.update(key(KeyCode::Char('i')));
    type_text(&mut app, "SELECT *");
    app.update(key(KeyCode::Enter));
    type_text(&mut app, "FROM users;");
    let tasks = app.update(ctrl('e'));
    let pending = drain(&mut app, tasks);
    assert!(matches!(
        &pending[0].command,
        Command::ExecuteQuery { sql, .. } if sql == "SELECT *\nFROM users;"
    ));
}

#[test]
fn test_query_round_trip_lands_in_results() {
    let mut app = connected_app();
    app.update(key(KeyCode::Char('i')));
    type_text(&mut app, "SELECT * FROM users;");
    let tasks = app.update(ctrl('e'));
    settle(&mut app, tasks);

    assert_eq!(app.current_pane(), PaneId::Result);
    assert_eq!(app.results().view(), ResultsView::Table);
    assert_eq!(app.results().columns(), &["id".to_string(), "name".to_string()]);
    assert_eq!(app.results().rows().len(), 1);
    assert_eq!(
        app.footer().hints(),
        app.keymap().hints(KeyContext::Results).as_slice()
    );
}

#[test]
fn test_execute_without_connection_shows_error() {
    let mut app = App::new(&Settings::default());
    app.update(key(KeyCode::Char('i')));
    type_text(&mut app, "SELECT 1");
    let tasks = app.update(ctrl('e'));
    assert!(drain(&mut app, tasks).is_empty());
    assert_eq!(app.results().view(), ResultsView::Error);
}

#[test]
fn test_mode_switch_updates_footer() {
    let mut app = App::new(&Settings::default());
    let tasks = app.update(key(KeyCode::Char('i')));
    drain(&mut app, tasks);
    assert_eq!(app.editor().mode(), Mode::Insert);
    assert_eq!(
        app.footer().hints(),
        app.keymap().hints(KeyContext::EditorInsert).as_slice()
    );

    let tasks = app.update(key(KeyCode::Esc));
    drain(&mut app, tasks);
    assert_eq!(app.editor().mode(), Mode::Normal);
    assert_eq!(
        app.footer().hints(),
        app.keymap().hints(KeyContext::EditorNormal).as_slice()
    );
}

#[test]
fn test_schema_leaf_inserts_query_into_editor() {
    let mut app = connected_app();
    focus_sidebar(&mut app);
    assert_eq!(app.sidebar().view(), SidebarView::SchemaTree);

    // test_db, Tables, users
    app.update(key(KeyCode::Char('j')));
    app.update(key(KeyCode::Char('j')));
    app.update(key(KeyCode::Enter));
    app.update(key(KeyCode::Char('j')));
    let tasks = app.update(key(KeyCode::Enter));
    drain(&mut app, tasks);

    assert_eq!(app.current_pane(), PaneId::Editor);
    assert_eq!(app.editor().buffer().text(), "SELECT * FROM \"users\";");
    assert_eq!(app.editor().buffer().cursor(), (0, 0));
}

#[test]
fn test_form_submit_then_connect_to_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = crate::common::create_sqlite_fixture(dir.path());
    let url = sqlpane::config::DatabaseUrl::sqlite_url(&path);

    let mut app = App::new(&Settings::default());
    focus_sidebar(&mut app);
    app.update(key(KeyCode::Enter));
    type_text(&mut app, "shop");
    app.update(key(KeyCode::Enter));
    type_text(&mut app, &url);
    let tasks = app.update(key(KeyCode::Enter));
    drain(&mut app, tasks);

    assert!(!app.sidebar().is_form_open());
    assert_eq!(app.sidebar().connections().len(), 1);
    assert_eq!(app.sidebar().connections()[0].url, url);

    // The new entry is selected after submit
    let tasks = app.update(key(KeyCode::Enter));
    settle(&mut app, tasks);

    assert!(app.editor().has_connection());
    assert_eq!(app.sidebar().view(), SidebarView::SchemaTree);
    assert_eq!(app.results().notification(), Some("Connected to shop.db"));
    assert_eq!(
        app.sidebar().tree().visible_labels(),
        vec!["shop.db", "Tables", "users", "orders"]
    );
}

#[test]
fn test_connect_to_missing_file_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let url = sqlpane::config::DatabaseUrl::sqlite_url(&dir.path().join("nope.db"));
    let mut app = App::new(&Settings::default());
    let tasks = app.connect(url);
    settle(&mut app, tasks);
    assert_eq!(app.results().view(), ResultsView::Error);
    assert!(app.results().error().unwrap_or_default().contains("does not exist"));
    assert!(!app.editor().has_connection());
}

#[test]
fn test_unimplemented_driver_reports_failure() {
    let mut app = App::new(&Settings::default());
    let tasks = app.connect("mysql://root@localhost/app");
    settle(&mut app, tasks);
    assert!(
        app.results()
            .error()
            .unwrap_or_default()
            .contains("MySQL connections are not implemented")
    );
}

#[test]
fn test_error_then_notification_then_dismiss() {
    let mut app = connected_app();
    app.update(Message::Error("boom".to_string()));
    assert_eq!(app.results().view(), ResultsView::Error);
    app.update(Message::Notification("fine".to_string()));
    assert_eq!(app.results().view(), ResultsView::Notification);

    while app.current_pane() != PaneId::Result {
        app.update(key(KeyCode::Tab));
    }
    app.update(key(KeyCode::Esc));
    assert_eq!(app.results().view(), ResultsView::Empty);
}
