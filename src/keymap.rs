//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match arms
//! scattered across components. To add a new binding, add an entry to the
//! appropriate context in `KeyMap::default()`, describe it in `hints()` and
//! handle the `KeyAction` in the pane that owns the context.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
///
/// Shift is dropped for characters and back-tab: the code already says it,
/// and terminals disagree on whether to report the modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let mut modifiers = modifiers;
        if matches!(code, KeyCode::Char(_) | KeyCode::BackTab) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self { code, modifiers }
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }
}

/// Where a key is being interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Always live, even while a pane captures input
    Global,
    /// Pane cycling, help and quit; suppressed while capturing
    Layout,
    EditorNormal,
    EditorInsert,
    Connections,
    SchemaTree,
    ConnectionForm,
    Results,
}

/// Semantic key actions: what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global / layout
    Quit,
    NextPane,
    PrevPane,
    ToggleHelp,

    // Navigation (shared by editor, sidebar, results)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Editor-specific
    WordForward,
    WordBackward,
    EnterInsert,
    EnterNormal,
    ExecuteQuery,
    SplitLine,
    DeleteBackward,

    // Sidebar-specific
    Select,
    ToggleView,

    // Connection form
    NextField,
    PrevField,
    Submit,
    Cancel,

    // Results-specific
    Dismiss,
}

/// One footer entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub description: &'static str,
}

const fn hint(key: &'static str, description: &'static str) -> KeyHint {
    KeyHint { key, description }
}

const LAYOUT_HINTS: &[KeyHint] = &[
    hint("tab", "next pane"),
    hint("shift+tab", "prev pane"),
    hint("?", "help"),
    hint("Q", "quit"),
];

const EDITOR_NORMAL_HINTS: &[KeyHint] = &[
    hint("i", "insert"),
    hint("hjkl", "move"),
    hint("w/b", "word"),
    hint("ctrl+e", "run"),
];

const EDITOR_INSERT_HINTS: &[KeyHint] = &[
    hint("esc", "normal"),
    hint("enter", "new line"),
    hint("ctrl+e", "run"),
];

const CONNECTIONS_HINTS: &[KeyHint] = &[
    hint("j/k", "move"),
    hint("enter", "select"),
    hint("v", "schema"),
];

const SCHEMA_TREE_HINTS: &[KeyHint] = &[
    hint("j/k", "move"),
    hint("enter", "open"),
    hint("v", "connections"),
];

const CONNECTION_FORM_HINTS: &[KeyHint] = &[
    hint("tab", "next field"),
    hint("shift+tab", "prev field"),
    hint("enter", "submit"),
    hint("esc", "cancel"),
];

const RESULTS_HINTS: &[KeyHint] = &[
    hint("j/k", "rows"),
    hint("h/l", "scroll"),
    hint("g/G", "top/bottom"),
    hint("esc", "dismiss"),
];

/// Keybinding configuration: maps key combos to semantic actions per context.
pub struct KeyMap {
    contexts: HashMap<KeyContext, HashMap<KeyBind, KeyAction>>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action within one context.
    pub fn resolve(&self, context: KeyContext, key: KeyEvent) -> Option<KeyAction> {
        self.contexts
            .get(&context)
            .and_then(|m| m.get(&KeyBind::from(key)))
            .copied()
    }

    /// Footer hints for a context
    pub fn hints(&self, context: KeyContext) -> Vec<KeyHint> {
        match context {
            KeyContext::Global => Vec::new(),
            KeyContext::Layout => LAYOUT_HINTS.to_vec(),
            KeyContext::EditorNormal => EDITOR_NORMAL_HINTS.to_vec(),
            KeyContext::EditorInsert => EDITOR_INSERT_HINTS.to_vec(),
            KeyContext::Connections => CONNECTIONS_HINTS.to_vec(),
            KeyContext::SchemaTree => SCHEMA_TREE_HINTS.to_vec(),
            KeyContext::ConnectionForm => CONNECTION_FORM_HINTS.to_vec(),
            KeyContext::Results => RESULTS_HINTS.to_vec(),
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut contexts = HashMap::new();

        // ── Global ───────────────────────────────────────────────
        let mut global = HashMap::new();
        bind(&mut global, KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);
        contexts.insert(KeyContext::Global, global);

        // ── Layout ───────────────────────────────────────────────
        let mut layout = HashMap::new();
        bind(&mut layout, KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextPane);
        bind(&mut layout, KeyCode::BackTab, KeyModifiers::NONE, KeyAction::PrevPane);
        bind(&mut layout, KeyCode::Char('?'), KeyModifiers::NONE, KeyAction::ToggleHelp);
        bind(&mut layout, KeyCode::Char('Q'), KeyModifiers::NONE, KeyAction::Quit);
        contexts.insert(KeyContext::Layout, layout);

        // ── Editor ───────────────────────────────────────────────
        let mut normal = HashMap::new();
        insert_vim_nav(&mut normal);
        bind(&mut normal, KeyCode::Char('w'), KeyModifiers::NONE, KeyAction::WordForward);
        bind(&mut normal, KeyCode::Char('b'), KeyModifiers::NONE, KeyAction::WordBackward);
        bind(&mut normal, KeyCode::Char('i'), KeyModifiers::NONE, KeyAction::EnterInsert);
        bind(&mut normal, KeyCode::Char('e'), KeyModifiers::CONTROL, KeyAction::ExecuteQuery);
        contexts.insert(KeyContext::EditorNormal, normal);

        let mut insert = HashMap::new();
        insert_arrows(&mut insert);
        bind(&mut insert, KeyCode::Esc, KeyModifiers::NONE, KeyAction::EnterNormal);
        bind(&mut insert, KeyCode::Enter, KeyModifiers::NONE, KeyAction::SplitLine);
        bind(&mut insert, KeyCode::Backspace, KeyModifiers::NONE, KeyAction::DeleteBackward);
        bind(&mut insert, KeyCode::Char('e'), KeyModifiers::CONTROL, KeyAction::ExecuteQuery);
        contexts.insert(KeyContext::EditorInsert, insert);

        // ── Sidebar ──────────────────────────────────────────────
        let mut connections = HashMap::new();
        insert_list_nav(&mut connections);
        bind(&mut connections, KeyCode::Enter, KeyModifiers::NONE, KeyAction::Select);
        bind(&mut connections, KeyCode::Char('v'), KeyModifiers::NONE, KeyAction::ToggleView);
        contexts.insert(KeyContext::Connections, connections);

        let mut tree = HashMap::new();
        insert_list_nav(&mut tree);
        bind(&mut tree, KeyCode::Enter, KeyModifiers::NONE, KeyAction::Select);
        bind(&mut tree, KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::Select);
        bind(&mut tree, KeyCode::Char('v'), KeyModifiers::NONE, KeyAction::ToggleView);
        contexts.insert(KeyContext::SchemaTree, tree);

        let mut form = HashMap::new();
        bind(&mut form, KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextField);
        bind(&mut form, KeyCode::Down, KeyModifiers::NONE, KeyAction::NextField);
        bind(&mut form, KeyCode::BackTab, KeyModifiers::NONE, KeyAction::PrevField);
        bind(&mut form, KeyCode::Up, KeyModifiers::NONE, KeyAction::PrevField);
        bind(&mut form, KeyCode::Enter, KeyModifiers::NONE, KeyAction::Submit);
        bind(&mut form, KeyCode::Esc, KeyModifiers::NONE, KeyAction::Cancel);
        contexts.insert(KeyContext::ConnectionForm, form);

        // ── Results ──────────────────────────────────────────────
        let mut results = HashMap::new();
        insert_vim_nav(&mut results);
        insert_scroll_nav(&mut results);
        bind(&mut results, KeyCode::Esc, KeyModifiers::NONE, KeyAction::Dismiss);
        contexts.insert(KeyContext::Results, results);

        Self { contexts }
    }
}

fn bind(
    map: &mut HashMap<KeyBind, KeyAction>,
    code: KeyCode,
    modifiers: KeyModifiers,
    action: KeyAction,
) {
    map.insert(KeyBind::new(code, modifiers), action);
}

/// Arrow keys only, for contexts where letters are text
fn insert_arrows(map: &mut HashMap<KeyBind, KeyAction>) {
    bind(map, KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
    bind(map, KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
    bind(map, KeyCode::Left, KeyModifiers::NONE, KeyAction::MoveLeft);
    bind(map, KeyCode::Right, KeyModifiers::NONE, KeyAction::MoveRight);
}

/// Insert vim-style navigation bindings (arrows + hjkl)
fn insert_vim_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    insert_arrows(map);
    bind(map, KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
    bind(map, KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
    bind(map, KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::MoveLeft);
    bind(map, KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::MoveRight);
}

/// Vertical-only navigation (arrows + jk)
fn insert_list_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    bind(map, KeyCode::Up, KeyModifiers::NONE, KeyAction::MoveUp);
    bind(map, KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::MoveUp);
    bind(map, KeyCode::Down, KeyModifiers::NONE, KeyAction::MoveDown);
    bind(map, KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::MoveDown);
}

/// Page and jump bindings (PageUp/PageDown + g/G + Home/End)
fn insert_scroll_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    bind(map, KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
    bind(map, KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);
    bind(map, KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::GoToTop);
    bind(map, KeyCode::Char('G'), KeyModifiers::NONE, KeyAction::GoToBottom);
    bind(map, KeyCode::Home, KeyModifiers::NONE, KeyAction::GoToTop);
    bind(map, KeyCode::End, KeyModifiers::NONE, KeyAction::GoToBottom);
}
