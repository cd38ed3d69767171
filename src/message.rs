//! Messages and commands
//!
//! Everything that reaches the application is a `Message`: terminal input,
//! resizes, and the results of background work. Panes answer a message with
//! zero or more `Command`s, deferred work that eventually produces exactly one
//! new message. The application stamps each command with a `RequestId`
//! before it leaves the dispatch step, turning it into a `Task`.

use crate::db::{DatabaseSchema, DbHandle, connect};
use crate::error::DbError;
use crate::keymap::KeyHint;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::fmt;

/// Monotonic id for background requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Key press from the terminal
    Key(KeyEvent),
    /// Terminal resized
    Resize { width: u16, height: u16 },
    /// A query finished. `error` is set when it failed.
    QueryResult {
        request: RequestId,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        error: Option<String>,
    },
    /// Informational text for the result pane
    Notification(String),
    /// Error text for the result pane
    Error(String),
    /// A connect request succeeded
    ConnectionReady {
        request: RequestId,
        handle: DbHandle,
        schema: DatabaseSchema,
    },
    /// A connect request failed
    ConnectionFailed { request: RequestId, error: String },
    /// Bracketed paste from the terminal
    Paste(String),
    /// Replace the editor contents with this SQL
    InsertQuery(String),
    /// Connection form submitted
    FormSubmit { name: String, url: String },
    /// Connection form dismissed
    FormCancel,
    /// Key hints for the footer, published when focus or mode changes
    KeyBindings(Vec<KeyHint>),
    /// Stop the event loop
    Quit,
}

impl Message {
    /// Translate a terminal event. Only key presses, pastes and resizes matter.
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            Event::Paste(text) => Some(Self::Paste(text)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// Deferred work requested by a pane
#[derive(Debug, Clone)]
pub enum Command {
    /// Open a connection and load its schema
    Connect { url: String },
    /// Run SQL on an open connection
    ExecuteQuery { handle: DbHandle, sql: String },
    /// Deliver a message on the next loop iteration
    Emit(Message),
}

/// A command stamped with its request id
#[derive(Debug)]
pub struct Task {
    pub request: RequestId,
    pub command: Command,
}

impl Task {
    pub fn new(request: RequestId, command: Command) -> Self {
        Self { request, command }
    }

    /// `Emit` tasks need no worker
    pub fn is_immediate(&self) -> bool {
        matches!(self.command, Command::Emit(_))
    }

    /// Execute the task. Blocks on database I/O.
    pub fn run(self) -> Message {
        let request = self.request;
        match self.command {
            Command::Connect { url } => {
                let opened = connect(&url).and_then(|handle| {
                    let schema = DatabaseSchema::load(handle.as_ref())?;
                    Ok((handle, schema))
                });
                match opened {
                    Ok((handle, schema)) => Message::ConnectionReady {
                        request,
                        handle,
                        schema,
                    },
                    Err(e) => Message::ConnectionFailed {
                        request,
                        error: e.to_string(),
                    },
                }
            }
            Command::ExecuteQuery { handle, sql } => match handle.execute_query(&sql) {
                Ok(results) => Message::QueryResult {
                    request,
                    columns: results.columns,
                    rows: results.rows,
                    error: None,
                },
                Err(e) => Message::QueryResult {
                    request,
                    columns: Vec::new(),
                    rows: Vec::new(),
                    error: Some(e.to_string()),
                },
            },
            Command::Emit(message) => message,
        }
    }

    /// The message to deliver when the task never reports back
    pub fn failure(&self, error: &DbError) -> Message {
        let request = self.request;
        match &self.command {
            Command::Connect { .. } => Message::ConnectionFailed {
                request,
                error: error.to_string(),
            },
            Command::ExecuteQuery { .. } => Message::QueryResult {
                request,
                columns: Vec::new(),
                rows: Vec::new(),
                error: Some(error.to_string()),
            },
            Command::Emit(_) => Message::Error(error.to_string()),
        }
    }
}
