//! SQLite gateway against a real database file

use crate::common::create_sqlite_fixture;
use sqlpane::config::DatabaseUrl;
use sqlpane::db::{DatabaseSchema, connect};
use sqlpane::error::DbError;
use sqlpane::ui::tree::SchemaBrowser;

#[test]
fn test_connect_and_load_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_sqlite_fixture(dir.path());
    let db = connect(&DatabaseUrl::sqlite_url(&path)).unwrap();

    let schema = DatabaseSchema::load(db.as_ref()).unwrap();
    assert_eq!(schema.name, "shop.db");
    assert_eq!(schema.tables, vec!["users".to_string(), "orders".to_string()]);
}

#[test]
fn test_select_renders_null_and_blob() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_sqlite_fixture(dir.path());
    let db = connect(&DatabaseUrl::sqlite_url(&path)).unwrap();

    let results = db
        .execute_query("SELECT id, name, avatar FROM users ORDER BY id")
        .unwrap();
    assert_eq!(results.column_count(), 3);
    assert_eq!(results.row_count(), 2);
    assert_eq!(results.rows[0], vec!["1", "Alice", "<blob 3 bytes>"]);
    assert_eq!(results.rows[1], vec!["2", "NULL", "NULL"]);
}

#[test]
fn test_tree_queries_run_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_sqlite_fixture(dir.path());
    let db = connect(&DatabaseUrl::sqlite_url(&path)).unwrap();
    let schema = DatabaseSchema::load(db.as_ref()).unwrap();

    // Expand "orders" and run each of its leaf queries
    let mut tree = SchemaBrowser::new(Some(&schema));
    for _ in 0..3 {
        tree.move_down();
    }
    assert_eq!(tree.select(), None);

    let mut queries = Vec::new();
    for _ in 0..3 {
        tree.move_down();
        queries.extend(tree.select());
    }
    assert_eq!(queries.len(), 3);

    let listed = db.execute_query(&queries[0]).unwrap();
    assert_eq!(listed.rows, vec![vec!["10", "1", "9.5"]]);

    let columns = db.execute_query(&queries[1]).unwrap();
    assert_eq!(columns.row_count(), 3);
    assert!(columns.columns.contains(&"name".to_string()));

    let foreign_keys = db.execute_query(&queries[2]).unwrap();
    assert_eq!(foreign_keys.row_count(), 1);
    let table_col = foreign_keys
        .columns
        .iter()
        .position(|c| c == "table")
        .unwrap();
    assert_eq!(foreign_keys.rows[0][table_col], "users");
}

#[test]
fn test_write_statements_return_no_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_sqlite_fixture(dir.path());
    let db = connect(&DatabaseUrl::sqlite_url(&path)).unwrap();

    let results = db
        .execute_query("UPDATE users SET name = 'Bob' WHERE id = 2")
        .unwrap();
    assert_eq!(results.column_count(), 0);

    let check = db
        .execute_query("SELECT name FROM users WHERE id = 2")
        .unwrap();
    assert_eq!(check.rows, vec![vec!["Bob"]]);
}

#[test]
fn test_percent_encoded_path() {
    let dir = tempfile::tempdir().unwrap();
    let spaced = dir.path().join("with space");
    std::fs::create_dir(&spaced).unwrap();
    let path = create_sqlite_fixture(&spaced);

    let url = format!(
        "sqlite:///{}",
        path.display().to_string().replace(' ', "%20")
    );
    assert!(connect(&url).is_ok());
}

#[test]
fn test_bad_urls() {
    assert!(matches!(connect("shop.db"), Err(DbError::InvalidUrl(_))));
    assert!(matches!(
        connect("redis://localhost"),
        Err(DbError::UnsupportedScheme(_))
    ));
    assert!(matches!(
        connect("sqlite:///definitely/not/here.db"),
        Err(DbError::ConnectionFailed(_))
    ));
}
