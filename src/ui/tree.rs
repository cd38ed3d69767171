//! Schema tree browser
//!
//! Displays the connected database as a collapsible tree:
//! database → "Tables" → table → ready-made queries.

use crate::db::DatabaseSchema;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Shown when no database is connected
pub const NO_CONNECTION: &str = "No connection";

/// One node of the schema tree. Leaves carry the SQL they insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub query: Option<String>,
    pub children: Vec<TreeNode>,
    pub expanded: bool,
}

impl TreeNode {
    fn branch(label: impl Into<String>, children: Vec<TreeNode>, expanded: bool) -> Self {
        Self {
            label: label.into(),
            query: None,
            children,
            expanded,
        }
    }

    fn leaf(label: impl Into<String>, query: String) -> Self {
        Self {
            label: label.into(),
            query: Some(query),
            children: Vec::new(),
            expanded: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A row as currently shown: depth plus the child-index path to its node
#[derive(Debug, Clone, PartialEq, Eq)]
struct VisibleRow {
    depth: usize,
    path: Vec<usize>,
}

/// Double-quote an identifier for SQL
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build the tree for a schema snapshot
pub fn build_tree(schema: &DatabaseSchema) -> TreeNode {
    let tables = schema
        .tables
        .iter()
        .map(|table| {
            let ident = quote_ident(table);
            TreeNode::branch(
                table.clone(),
                vec![
                    TreeNode::leaf("list", format!("SELECT * FROM {ident};")),
                    TreeNode::leaf("columns", format!("PRAGMA table_info({ident});")),
                    TreeNode::leaf("foreign keys", format!("PRAGMA foreign_key_list({ident});")),
                ],
                false,
            )
        })
        .collect();
    TreeNode::branch(
        schema.name.clone(),
        vec![TreeNode::branch("Tables", tables, true)],
        true,
    )
}

/// Tree browser state
#[derive(Debug, Default)]
pub struct SchemaBrowser {
    root: Option<TreeNode>,
    visible: Vec<VisibleRow>,
    selected: usize,
}

impl SchemaBrowser {
    pub fn new(schema: Option<&DatabaseSchema>) -> Self {
        let mut browser = Self::default();
        if let Some(schema) = schema {
            browser.set_schema(schema);
        }
        browser
    }

    /// Replace the whole tree
    pub fn set_schema(&mut self, schema: &DatabaseSchema) {
        self.root = Some(build_tree(schema));
        self.selected = 0;
        self.refresh();
    }

    pub fn has_schema(&self) -> bool {
        self.root.is_some()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Labels of the visible rows, top to bottom
    pub fn visible_labels(&self) -> Vec<&str> {
        self.visible
            .iter()
            .filter_map(|row| self.node(&row.path))
            .map(|node| node.label.as_str())
            .collect()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    /// Activate the selected row: a leaf yields its query, a branch
    /// expands or collapses.
    pub fn select(&mut self) -> Option<String> {
        let path = self.visible.get(self.selected)?.path.clone();
        let node = self.node_mut(&path)?;
        if node.is_leaf() {
            return node.query.clone();
        }
        node.expanded = !node.expanded;
        self.refresh();
        None
    }

    fn node(&self, path: &[usize]) -> Option<&TreeNode> {
        let mut node = self.root.as_ref()?;
        for &i in path {
            node = node.children.get(i)?;
        }
        Some(node)
    }

    fn node_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let mut node = self.root.as_mut()?;
        for &i in path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    fn refresh(&mut self) {
        self.visible.clear();
        if let Some(root) = &self.root {
            collect_visible(root, 0, &mut Vec::new(), &mut self.visible);
        }
        self.selected = self.selected.min(self.visible.len().saturating_sub(1));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        if self.root.is_none() {
            frame.render_widget(Paragraph::new(NO_CONNECTION).style(theme.tree_empty), area);
            return;
        }

        let height = area.height as usize;
        if height == 0 {
            return;
        }
        let offset = self.selected.saturating_sub(height - 1);

        let lines: Vec<Line> = self
            .visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .filter_map(|(i, row)| {
                let node = self.node(&row.path)?;
                let marker = if node.is_leaf() {
                    "  "
                } else if node.expanded {
                    "▼ "
                } else {
                    "▶ "
                };
                let style = if i == self.selected && focused {
                    theme.list_selected
                } else if node.is_leaf() {
                    theme.tree_leaf
                } else {
                    theme.tree_node
                };
                let text = format!("{}{}{}", "  ".repeat(row.depth), marker, node.label);
                Some(Line::from(Span::styled(text, style)))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn collect_visible(node: &TreeNode, depth: usize, path: &mut Vec<usize>, out: &mut Vec<VisibleRow>) {
    out.push(VisibleRow {
        depth,
        path: path.clone(),
    });
    if !node.expanded {
        return;
    }
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        collect_visible(child, depth + 1, path, out);
        path.pop();
    }
}
