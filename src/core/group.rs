//! Scoped attribute context with nested groups
//!
//! An `AttrTree` holds the attributes bound to a handler. Attributes bound
//! before any group is opened live in a flat root list. Opening a group
//! starts a chain: every later group nests inside the innermost open one,
//! and every later attribute lands in the innermost open group.
//!
//! Derivation never mutates the receiver, so a tree can be shared between
//! threads and derived from concurrently.

use super::attribute::Attr;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrTree {
    root: Vec<Attr>,
    /// Open group chain, outermost first. Each entry is a group attribute
    /// holding the members appended to it so far; its open child is attached
    /// when the chain is closed for rendering.
    open: Vec<Attr>,
}

impl AttrTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a tree with `attrs` appended to the innermost open group, or to
    /// the root list when no group is open
    #[must_use]
    pub fn with_attrs(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let mut tree = self.clone();
        tree.append(attrs);
        tree
    }

    /// Derive a tree with a new group named `name` opened inside the
    /// innermost open group.
    ///
    /// Names are not deduplicated: opening `"g"` twice yields two groups.
    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Self {
        let mut tree = self.clone();
        tree.open.push(Attr::group(name, Vec::new()));
        tree
    }

    /// Number of currently open groups
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Names of the open groups, outermost first
    pub fn group_path(&self) -> Vec<&str> {
        self.open.iter().map(Attr::key).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.open.is_empty()
    }

    /// The bound attributes in render order: the root list followed by the
    /// root group carrying the whole open chain
    pub fn render(&self) -> Vec<Attr> {
        self.render_with(Vec::new())
    }

    /// Like `render`, with a record's call-time attributes placed where a
    /// `with_attrs` call would have placed them
    pub fn render_with(&self, record_attrs: impl IntoIterator<Item = Attr>) -> Vec<Attr> {
        let mut tree = self.clone();
        tree.append(record_attrs);

        let mut rendered = tree.root;
        if let Some(group) = close_chain(tree.open) {
            rendered.push(group);
        }
        rendered
    }

    fn append(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        let target = match self.open.last_mut().and_then(Attr::members_mut) {
            Some(members) => members,
            None => &mut self.root,
        };
        target.extend(attrs);
    }
}

/// Fold the open chain into one group attribute, innermost last
fn close_chain(mut open: Vec<Attr>) -> Option<Attr> {
    let mut child = open.pop()?;
    while let Some(mut parent) = open.pop() {
        if let Some(members) = parent.members_mut() {
            members.push(child);
        }
        child = parent;
    }
    Some(child)
}
