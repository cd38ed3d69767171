//! Event loop
//!
//! Owns the terminal and the `App`. Terminal input and the results of
//! background tasks arrive as `Message`s on one path; every message is
//! dispatched to `App::update` and the returned tasks are either posted
//! straight back (`Emit`) or run on blocking workers under a timeout.

use crate::app::App;
use crate::error::DbError;
use crate::message::{Message, Task};
use crate::ui::render::render;
use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

pub struct EventLoop {
    app: App,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl EventLoop {
    pub fn new(app: App, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app,
            timeout,
            tx,
            rx,
        }
    }

    /// Hand tasks to their executors
    pub fn submit(&self, tasks: Vec<Task>) {
        for task in tasks {
            if task.is_immediate() {
                let message = task.run();
                if self.tx.send(message).is_err() {
                    tracing::warn!("Event loop closed, dropping message");
                }
            } else {
                spawn_task(task, self.timeout, self.tx.clone());
            }
        }
    }

    /// Run until the app stops. The frame is redrawn before every wait.
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventStream::new();

        let size = terminal.size()?;
        let tasks = self.app.update(Message::Resize {
            width: size.width,
            height: size.height,
        });
        self.submit(tasks);

        while self.app.is_running() {
            terminal.draw(|frame| render(frame, &self.app))?;

            let message = tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => match Message::from_event(event) {
                        Some(message) => message,
                        None => continue,
                    },
                    Some(Err(e)) => return Err(e).context("terminal input failed"),
                    None => break,
                },
                Some(message) = self.rx.recv() => message,
            };

            let tasks = self.app.update(message);
            self.submit(tasks);
        }

        tracing::info!("Event loop finished");
        Ok(())
    }
}

/// Run a blocking task on a worker and report its message back. Expiry and
/// worker panics become the task's failure message.
fn spawn_task(task: Task, timeout: Duration, tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        let request = task.request;
        let on_timeout = task.failure(&DbError::Timeout);

        let worker = tokio::task::spawn_blocking(move || task.run());
        let message = match tokio::time::timeout(timeout, worker).await {
            Ok(Ok(message)) => message,
            Ok(Err(join_error)) => {
                tracing::error!(%request, error = %join_error, "Worker failed");
                task_failure_message(&on_timeout, join_error.to_string())
            }
            Err(_) => {
                tracing::warn!(%request, ?timeout, "Task timed out");
                on_timeout
            }
        };
        if tx.send(message).is_err() {
            tracing::debug!(%request, "Event loop closed before task finished");
        }
    });
}

/// Reuse the shape of a failure message with a different reason
fn task_failure_message(template: &Message, reason: String) -> Message {
    let error = DbError::WorkerFailed(reason).to_string();
    match template {
        Message::ConnectionFailed { request, .. } => Message::ConnectionFailed {
            request: *request,
            error,
        },
        Message::QueryResult { request, .. } => Message::QueryResult {
            request: *request,
            columns: Vec::new(),
            rows: Vec::new(),
            error: Some(error),
        },
        _ => Message::Error(error),
    }
}

pub fn init_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn restore_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    Ok(())
}
