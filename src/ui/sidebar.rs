//! Sidebar pane
//!
//! Two views sharing one pane: the connection list and the schema tree of
//! the current connection. The connection form opens on top of the list.

use crate::config::ConnectionConfig;
use crate::db::DatabaseSchema;
use crate::keymap::{KeyAction, KeyContext, KeyMap};
use crate::message::{Command, Message};
use crate::ui::connection_form::ConnectionForm;
use crate::ui::theme::Theme;
use crate::ui::tree::SchemaBrowser;
use crate::ui::Component;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub const ADD_CONNECTION: &str = "+ Add Connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarView {
    Connections,
    SchemaTree,
}

pub struct Sidebar {
    view: SidebarView,
    connections: Vec<ConnectionConfig>,
    /// Index into the list; 0 is the add button
    selected: usize,
    tree: SchemaBrowser,
    form: ConnectionForm,
    show_form: bool,
    active: bool,
}

impl Sidebar {
    pub fn new(schema: Option<&DatabaseSchema>) -> Self {
        let view = if schema.is_some() {
            SidebarView::SchemaTree
        } else {
            SidebarView::Connections
        };
        Self {
            view,
            connections: Vec::new(),
            selected: 0,
            tree: SchemaBrowser::new(schema),
            form: ConnectionForm::new(),
            show_form: false,
            active: false,
        }
    }

    pub fn view(&self) -> SidebarView {
        self.view
    }

    pub fn connections(&self) -> &[ConnectionConfig] {
        &self.connections
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_form_open(&self) -> bool {
        self.show_form
    }

    pub fn form(&self) -> &ConnectionForm {
        &self.form
    }

    pub fn tree(&self) -> &SchemaBrowser {
        &self.tree
    }

    pub fn add_connection(&mut self, connection: ConnectionConfig) {
        tracing::info!(name = %connection.name, "Connection added");
        self.connections.push(connection);
    }

    /// Swap in the schema of a new connection and show it
    pub fn replace_tree(&mut self, schema: &DatabaseSchema) {
        self.tree.set_schema(schema);
        self.view = SidebarView::SchemaTree;
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            SidebarView::Connections => SidebarView::SchemaTree,
            SidebarView::SchemaTree => SidebarView::Connections,
        };
    }

    fn close_form(&mut self) {
        self.form.reset();
        self.show_form = false;
        self.view = SidebarView::Connections;
    }

    fn hints(&self, keymap: &KeyMap) -> Command {
        Command::Emit(Message::KeyBindings(keymap.hints(self.key_context())))
    }

    fn handle_list_action(&mut self, action: KeyAction) -> Vec<Command> {
        match action {
            KeyAction::MoveUp => self.selected = self.selected.saturating_sub(1),
            KeyAction::MoveDown => {
                if self.selected < self.connections.len() {
                    self.selected += 1;
                }
            }
            KeyAction::Select => {
                if self.selected == 0 {
                    self.show_form = true;
                } else if let Some(connection) = self.connections.get(self.selected - 1) {
                    tracing::info!(name = %connection.name, "Connecting");
                    return vec![Command::Connect {
                        url: connection.url.clone(),
                    }];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_tree_action(&mut self, action: KeyAction) -> Vec<Command> {
        match action {
            KeyAction::MoveUp => self.tree.move_up(),
            KeyAction::MoveDown => self.tree.move_down(),
            KeyAction::Select => {
                if let Some(sql) = self.tree.select() {
                    return vec![Command::Emit(Message::InsertQuery(sql))];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render_connections(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let height = area.height as usize;
        if height == 0 {
            return;
        }
        let offset = self.selected.saturating_sub(height - 1);

        let items = std::iter::once((ADD_CONNECTION, theme.list_button))
            .chain(
                self.connections
                    .iter()
                    .map(|c| (c.name.as_str(), theme.list_item)),
            );
        let lines: Vec<Line> = items
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, (label, style))| {
                let style = if i == self.selected && self.active {
                    theme.list_selected
                } else {
                    style
                };
                Line::from(Span::styled(label.to_string(), style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for Sidebar {
    fn update(&mut self, message: Message, keymap: &KeyMap) -> Vec<Command> {
        match message {
            Message::Key(key) => {
                if self.show_form {
                    return self
                        .form
                        .handle_key(key, keymap)
                        .map(Command::Emit)
                        .into_iter()
                        .collect();
                }
                let Some(action) = keymap.resolve(self.key_context(), key) else {
                    return Vec::new();
                };
                if action == KeyAction::ToggleView {
                    self.toggle_view();
                    return vec![self.hints(keymap)];
                }
                let was_open = self.show_form;
                let mut commands = match self.view {
                    SidebarView::Connections => self.handle_list_action(action),
                    SidebarView::SchemaTree => self.handle_tree_action(action),
                };
                if self.show_form && !was_open {
                    commands.push(self.hints(keymap));
                }
                commands
            }
            Message::Paste(text) => {
                if self.show_form {
                    self.form.paste(&text);
                }
                Vec::new()
            }
            Message::FormSubmit { name, url } => {
                self.add_connection(ConnectionConfig::new(name, url));
                self.close_form();
                self.selected = self.connections.len();
                vec![self.hints(keymap)]
            }
            Message::FormCancel => {
                self.close_form();
                vec![self.hints(keymap)]
            }
            _ => Vec::new(),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let title = match (self.show_form, self.view) {
            (true, _) => " New Connection ",
            (false, SidebarView::Connections) => " Connections ",
            (false, SidebarView::SchemaTree) => " Schema ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style(self.active));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.show_form {
            self.form.render(frame, inner, theme);
            return;
        }
        match self.view {
            SidebarView::Connections => self.render_connections(frame, inner, theme),
            SidebarView::SchemaTree => self.tree.render(frame, inner, theme, self.active),
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_capturing(&self) -> bool {
        self.show_form
    }

    fn key_context(&self) -> KeyContext {
        if self.show_form {
            return KeyContext::ConnectionForm;
        }
        match self.view {
            SidebarView::Connections => KeyContext::Connections,
            SidebarView::SchemaTree => KeyContext::SchemaTree,
        }
    }

    fn resize(&mut self, _area: Rect) {}
}
