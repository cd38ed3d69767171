//! Application state and message routing
//!
//! Central state machine: one message comes in, state updates, tasks go out.
//! Owns the three panes, decides which one has focus and where the results
//! of background work are delivered.

use crate::config::{DatabaseUrl, Settings};
use crate::db::{DatabaseSchema, DbHandle};
use crate::keymap::{KeyAction, KeyContext, KeyMap};
use crate::message::{Command, Message, RequestId, Task};
use crate::ui::editor::QueryEditor;
use crate::ui::footer::Footer;
use crate::ui::layout::{AppLayout, calculate_layout};
use crate::ui::results::ResultsViewer;
use crate::ui::sidebar::Sidebar;
use crate::ui::theme::Theme;
use crate::ui::{Component, PaneId};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// The pane arena, addressed by `PaneId`
pub struct Panes {
    pub sidebar: Sidebar,
    pub editor: QueryEditor,
    pub results: ResultsViewer,
}

impl Panes {
    pub fn get(&self, id: PaneId) -> &dyn Component {
        match id {
            PaneId::Sidebar => &self.sidebar,
            PaneId::Editor => &self.editor,
            PaneId::Result => &self.results,
        }
    }

    pub fn get_mut(&mut self, id: PaneId) -> &mut dyn Component {
        match id {
            PaneId::Sidebar => &mut self.sidebar,
            PaneId::Editor => &mut self.editor,
            PaneId::Result => &mut self.results,
        }
    }
}

/// Main application state
pub struct App {
    panes: Panes,
    /// Index of the focused pane in tab order
    current: usize,
    footer: Footer,

    /// Data-driven keybinding configuration
    keymap: KeyMap,

    /// UI theme (created once, reused every frame)
    theme: Theme,

    layout: AppLayout,

    /// Last id handed out
    last_request: RequestId,
    /// Only this connect may apply its result
    latest_connect: Option<RequestId>,
    /// Only this query may deliver a result
    pending_query: Option<RequestId>,

    running: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self::build(None, None, settings)
    }

    /// Start already connected (tests and embedding)
    pub fn with_connection(handle: DbHandle, schema: DatabaseSchema, settings: &Settings) -> Self {
        Self::build(Some(handle), Some(schema), settings)
    }

    fn build(handle: Option<DbHandle>, schema: Option<DatabaseSchema>, settings: &Settings) -> Self {
        let keymap = KeyMap::default();
        let mut panes = Panes {
            sidebar: Sidebar::new(schema.as_ref()),
            editor: QueryEditor::new(handle),
            results: ResultsViewer::new(settings.min_column_width),
        };
        panes.editor.set_active(true);

        let mut footer = Footer::new(&keymap);
        footer.set_hints(keymap.hints(panes.editor.key_context()));

        Self {
            panes,
            current: PaneId::Editor.index(),
            footer,
            keymap,
            theme: Theme::new(),
            layout: calculate_layout(Rect::default()),
            last_request: RequestId::default(),
            latest_connect: None,
            pending_query: None,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_pane(&self) -> PaneId {
        PaneId::from_index(self.current)
    }

    pub fn panes(&self) -> &Panes {
        &self.panes
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.panes.sidebar
    }

    pub fn editor(&self) -> &QueryEditor {
        &self.panes.editor
    }

    pub fn results(&self) -> &ResultsViewer {
        &self.panes.results
    }

    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn layout(&self) -> &AppLayout {
        &self.layout
    }

    /// Queue a connection, as if picked from the sidebar
    pub fn connect(&mut self, url: impl Into<String>) -> Vec<Task> {
        self.schedule(vec![Command::Connect { url: url.into() }])
    }

    /// Dispatch one message
    pub fn update(&mut self, message: Message) -> Vec<Task> {
        match message {
            Message::Key(key) => self.handle_key(key),
            msg @ Message::Paste(_) => self.route(self.current_pane(), msg),
            Message::Resize { width, height } => {
                self.resize(Rect::new(0, 0, width, height));
                Vec::new()
            }
            Message::QueryResult { request, .. } if self.pending_query != Some(request) => {
                tracing::debug!(%request, "Dropping stale query result");
                Vec::new()
            }
            msg @ Message::QueryResult { .. } => {
                self.pending_query = None;
                let mut tasks = self.route(PaneId::Result, msg);
                tasks.extend(self.focus(PaneId::Result));
                tasks
            }
            msg @ (Message::Notification(_) | Message::Error(_)) => self.route(PaneId::Result, msg),
            Message::ConnectionReady {
                request,
                handle,
                schema,
            } => self.connection_ready(request, handle, schema),
            Message::ConnectionFailed { request, error } => {
                if self.latest_connect != Some(request) {
                    tracing::debug!(%request, "Dropping stale connection failure");
                    return Vec::new();
                }
                tracing::warn!(%request, %error, "Connection failed");
                self.latest_connect = None;
                self.route(PaneId::Result, Message::Error(error))
            }
            msg @ Message::InsertQuery(_) => {
                let mut tasks = self.route(PaneId::Editor, msg);
                tasks.extend(self.focus(PaneId::Editor));
                tasks
            }
            msg @ (Message::FormSubmit { .. } | Message::FormCancel) => {
                self.route(PaneId::Sidebar, msg)
            }
            Message::KeyBindings(hints) => {
                self.footer.set_hints(hints);
                Vec::new()
            }
            Message::Quit => {
                self.running = false;
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Task> {
        if self.keymap.resolve(KeyContext::Global, key) == Some(KeyAction::Quit) {
            self.running = false;
            return Vec::new();
        }

        let current = self.current_pane();
        if !self.panes.get(current).is_capturing()
            && let Some(action) = self.keymap.resolve(KeyContext::Layout, key)
        {
            return match action {
                KeyAction::NextPane => self.cycle(1),
                KeyAction::PrevPane => self.cycle(PaneId::ALL.len() - 1),
                KeyAction::ToggleHelp => {
                    self.footer.toggle_help();
                    Vec::new()
                }
                KeyAction::Quit => {
                    self.running = false;
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }

        self.route(current, Message::Key(key))
    }

    /// Hand a message to one pane and stamp whatever it asks for
    fn route(&mut self, id: PaneId, message: Message) -> Vec<Task> {
        let commands = self.panes.get_mut(id).update(message, &self.keymap);
        self.schedule(commands)
    }

    fn cycle(&mut self, step: usize) -> Vec<Task> {
        self.focus(PaneId::from_index(self.current + step))
    }

    /// Move focus and publish the new pane's hints
    fn focus(&mut self, id: PaneId) -> Vec<Task> {
        if id == self.current_pane() {
            return Vec::new();
        }
        let previous = self.current_pane();
        self.panes.get_mut(previous).set_active(false);
        self.current = id.index();
        self.panes.get_mut(id).set_active(true);
        tracing::debug!(pane = ?id, "Focus changed");
        self.publish_hints()
    }

    fn publish_hints(&mut self) -> Vec<Task> {
        let context = self.panes.get(self.current_pane()).key_context();
        let hints = self.keymap.hints(context);
        self.schedule(vec![Command::Emit(Message::KeyBindings(hints))])
    }

    fn resize(&mut self, area: Rect) {
        self.layout = calculate_layout(area);
        for id in PaneId::ALL {
            self.panes.get_mut(id).resize(self.layout.pane(id));
        }
    }

    fn connection_ready(
        &mut self,
        request: RequestId,
        handle: DbHandle,
        schema: DatabaseSchema,
    ) -> Vec<Task> {
        if self.latest_connect != Some(request) {
            tracing::debug!(%request, "Dropping stale connection");
            return Vec::new();
        }
        tracing::info!(%request, database = %schema.name, tables = schema.tables.len(), "Connected");
        self.latest_connect = None;
        // Queries in flight belong to the old connection
        self.pending_query = None;

        let mut editor = QueryEditor::new(Some(handle));
        editor.set_active(self.panes.editor.is_active());
        editor.resize(self.layout.editor);
        self.panes.editor = editor;
        self.panes.sidebar.replace_tree(&schema);

        let mut tasks = self.route(
            PaneId::Result,
            Message::Notification(format!("Connected to {}", schema.name)),
        );
        tasks.extend(self.publish_hints());
        tasks
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request = self.last_request.next();
        self.last_request
    }

    /// Stamp commands with request ids. Connect URLs are validated here so
    /// a typo is reported without touching a worker.
    fn schedule(&mut self, commands: Vec<Command>) -> Vec<Task> {
        let mut tasks = Vec::with_capacity(commands.len());
        for command in commands {
            match command {
                Command::Connect { url } => match DatabaseUrl::parse(&url) {
                    Ok(parsed) => {
                        let notice = format!("Connecting to {} database...", parsed.kind_name());
                        let request = self.next_request();
                        tasks.push(Task::new(request, Command::Emit(Message::Notification(notice))));
                        let request = self.next_request();
                        tracing::info!(%request, %parsed, "Scheduling connect");
                        self.latest_connect = Some(request);
                        tasks.push(Task::new(request, Command::Connect { url }));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Rejected connection URL");
                        let request = self.next_request();
                        tasks.push(Task::new(request, Command::Emit(Message::Error(e.to_string()))));
                    }
                },
                command @ Command::ExecuteQuery { .. } => {
                    let request = self.next_request();
                    tracing::debug!(%request, "Scheduling query");
                    self.pending_query = Some(request);
                    tasks.push(Task::new(request, command));
                }
                command @ Command::Emit(_) => {
                    let request = self.next_request();
                    tasks.push(Task::new(request, command));
                }
            }
        }
        tasks
    }
}
