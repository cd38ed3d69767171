//! Terminal UI components
//!
//! All panes, widgets and rendering logic using ratatui.

pub mod buffer;
pub mod connection_form;
pub mod editor;
pub mod footer;
pub mod highlight;
pub mod layout;
pub mod render;
pub mod results;
pub mod sidebar;
pub mod theme;
pub mod tree;

use crate::keymap::{KeyContext, KeyMap};
use crate::message::{Command, Message};
use crate::ui::theme::Theme;
use ratatui::{Frame, layout::Rect};

/// Identifies one of the focusable panes. The order here is the tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneId {
    Sidebar,
    Editor,
    Result,
}

impl PaneId {
    pub const ALL: [PaneId; 3] = [PaneId::Sidebar, PaneId::Editor, PaneId::Result];

    pub fn index(self) -> usize {
        match self {
            Self::Sidebar => 0,
            Self::Editor => 1,
            Self::Result => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Trait for panes
///
/// Panes never touch their siblings: they answer a message with commands,
/// and the application decides where the follow-up messages go.
pub trait Component {
    /// Consume a message and return follow-up work
    fn update(&mut self, message: Message, keymap: &KeyMap) -> Vec<Command>;

    /// Render the pane, border included
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// True while the pane wants raw keys, e.g. in a text field. Layout keys
    /// are not interpreted then.
    fn is_capturing(&self) -> bool {
        false
    }

    /// Which bindings apply right now
    fn key_context(&self) -> KeyContext;

    /// Record the screen area assigned to the pane
    fn resize(&mut self, area: Rect);
}

/// Area inside a one-cell border
pub fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
