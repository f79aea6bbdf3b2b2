//! Render-ready rows and the tree model that holds them.

use std::fmt;

use super::status::{ColorKey, StatusIcon};
use crate::registry::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Group,
    Account,
    Peer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    /// Bare address for peers, collapse identity for groups and accounts.
    pub id: String,
    pub label: String,
    pub account_id: Option<AccountId>,
    pub foreground: Option<ColorKey>,
    pub background: ColorKey,
    pub weight: Option<u16>,
    pub tooltip: Option<String>,
    pub icon: Option<StatusIcon>,
}

/// Child indices from the top level down to a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowPath(Vec<usize>);

impl RowPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for RowPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for RowPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        f.write_str(&parts.join(":"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNode {
    pub row: Row,
    pub children: Vec<RowNode>,
    pub expanded: bool,
}

impl RowNode {
    pub fn new(row: Row) -> Self {
        Self {
            row,
            children: Vec::new(),
            expanded: false,
        }
    }
}

/// The widget side of a rebuild.
///
/// A rebuild always runs `clear`, `populate`, `expand_all`, then
/// `collapse_row` for each recorded path. `release` is called once when the
/// owning synchronizer is dropped.
pub trait RenderTarget {
    fn clear(&mut self);
    fn populate(&mut self, rows: Vec<RowNode>);
    fn expand_all(&mut self);
    fn collapse_row(&mut self, path: &RowPath);
    fn release(&mut self) {}

    fn node(&self, path: &RowPath) -> Option<&RowNode>;
}

/// A row as the list widget sees it after flattening.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub depth: usize,
    pub node: &'a RowNode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTree {
    roots: Vec<RowNode>,
    released: bool,
}

impl RowTree {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn roots(&self) -> &[RowNode] {
        &self.roots
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Number of rows, collapsed or not.
    pub fn len(&self) -> usize {
        fn count(nodes: &[RowNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Paths of every row in display order, paired with the row.
    #[cfg(test)]
    pub fn walk(&self) -> Vec<(RowPath, &RowNode)> {
        fn visit<'a>(nodes: &'a [RowNode], parent: &RowPath, out: &mut Vec<(RowPath, &'a RowNode)>) {
            for (i, node) in nodes.iter().enumerate() {
                let path = parent.child(i);
                out.push((path.clone(), node));
                visit(&node.children, &path, out);
            }
        }
        let mut out = Vec::new();
        visit(&self.roots, &RowPath::root(), &mut out);
        out
    }

    /// Rows not hidden under a collapsed parent, with their paths.
    pub fn visible_rows(&self) -> Vec<(RowPath, VisibleRow<'_>)> {
        fn visit<'a>(
            nodes: &'a [RowNode],
            parent: &RowPath,
            out: &mut Vec<(RowPath, VisibleRow<'a>)>,
        ) {
            for (i, node) in nodes.iter().enumerate() {
                let path = parent.child(i);
                out.push((
                    path.clone(),
                    VisibleRow {
                        depth: parent.depth(),
                        node,
                    },
                ));
                if node.expanded {
                    visit(&node.children, &path, out);
                }
            }
        }
        let mut out = Vec::new();
        visit(&self.roots, &RowPath::root(), &mut out);
        out
    }

    fn node_mut(&mut self, path: &RowPath) -> Option<&mut RowNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for i in rest {
            node = node.children.get_mut(*i)?;
        }
        Some(node)
    }
}

impl RenderTarget for RowTree {
    fn clear(&mut self) {
        self.roots.clear();
    }

    fn populate(&mut self, rows: Vec<RowNode>) {
        if self.released {
            return;
        }
        self.roots.extend(rows);
    }

    fn expand_all(&mut self) {
        fn expand(nodes: &mut [RowNode]) {
            for node in nodes {
                node.expanded = true;
                expand(&mut node.children);
            }
        }
        expand(&mut self.roots);
    }

    fn collapse_row(&mut self, path: &RowPath) {
        if let Some(node) = self.node_mut(path) {
            node.expanded = false;
        }
    }

    fn release(&mut self) {
        self.roots.clear();
        self.released = true;
    }

    fn node(&self, path: &RowPath) -> Option<&RowNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.roots.get(*first)?;
        for i in rest {
            node = node.children.get(*i)?;
        }
        Some(node)
    }
}
