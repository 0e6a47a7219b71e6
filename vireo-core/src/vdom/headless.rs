//! Headless Live Tree
//!
//! An in-memory [`LiveTree`] implementation. It keeps the full node
//! structure (tags, attributes, text, child order) and records every
//! mutation in a journal, which is what lets the test suite assert not
//! just on the final shape but on exactly which writes the renderer
//! performed — the reconciler's write-minimization guarantee is a claim
//! about the journal, not the shape.
//!
//! It is also a usable render target in its own right for environments
//! with no real output tree (server-side snapshots, golden tests).
//!
//! Like any [`LiveTree`], it is lenient: operations on handles it does not
//! know are ignored.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::tree::{LiveId, LiveTree};

/// One node of the headless tree.
#[derive(Debug, Clone, Default)]
pub struct HeadlessNode {
    /// Tag the node was created with.
    pub tag: String,
    /// Current attributes, in insertion order.
    pub attrs: IndexMap<String, String>,
    /// Current text content, if any.
    pub text: Option<String>,
    /// Child handles, in document order.
    pub children: Vec<LiveId>,
    /// Parent handle, `None` while detached.
    pub parent: Option<LiveId>,
}

/// A recorded mutation, in the order the renderer performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateNode { node: LiveId, tag: String },
    SetAttribute { node: LiveId, name: String, value: String },
    RemoveAttribute { node: LiveId, name: String },
    SetText { node: LiveId, text: String },
    AppendChild { parent: LiveId, child: LiveId },
    RemoveChild { parent: LiveId, child: LiveId },
    Replace { old: LiveId, new: LiveId },
}

/// In-memory live tree with a mutation journal.
#[derive(Debug, Default)]
pub struct HeadlessTree {
    nodes: HashMap<LiveId, HeadlessNode>,
    journal: Vec<Mutation>,
}

impl HeadlessTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node by handle.
    pub fn node(&self, id: LiveId) -> Option<&HeadlessNode> {
        self.nodes.get(&id)
    }

    /// Number of nodes the tree knows about (including detached ones).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The mutations recorded so far, oldest first.
    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    /// Forget all recorded mutations (the nodes stay).
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Detach every current child of `id`, clearing their parent links.
    fn orphan_children(&mut self, id: LiveId) {
        let children = match self.nodes.get_mut(&id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.parent = None;
            }
        }
    }
}

impl LiveTree for HeadlessTree {
    fn create_node(&mut self, tag: &str) -> LiveId {
        let id = LiveId::new();
        self.nodes.insert(
            id,
            HeadlessNode {
                tag: tag.to_owned(),
                ..HeadlessNode::default()
            },
        );
        self.journal.push(Mutation::CreateNode {
            node: id,
            tag: tag.to_owned(),
        });
        id
    }

    fn set_attribute(&mut self, node: LiveId, name: &str, value: &str) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        entry.attrs.insert(name.to_owned(), value.to_owned());
        self.journal.push(Mutation::SetAttribute {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
    }

    fn remove_attribute(&mut self, node: LiveId, name: &str) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        entry.attrs.shift_remove(name);
        self.journal.push(Mutation::RemoveAttribute {
            node,
            name: name.to_owned(),
        });
    }

    fn set_text(&mut self, node: LiveId, text: &str) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        // textContent semantics: assigning text drops any element children.
        self.orphan_children(node);
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.text = if text.is_empty() {
                None
            } else {
                Some(text.to_owned())
            };
        }
        self.journal.push(Mutation::SetText {
            node,
            text: text.to_owned(),
        });
    }

    fn append_child(&mut self, parent: LiveId, child: LiveId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        if let Some(entry) = self.nodes.get_mut(&parent) {
            entry.children.push(child);
        }
        if let Some(entry) = self.nodes.get_mut(&child) {
            entry.parent = Some(parent);
        }
        self.journal.push(Mutation::AppendChild { parent, child });
    }

    fn remove_child(&mut self, parent: LiveId, child: LiveId) {
        let Some(entry) = self.nodes.get_mut(&parent) else {
            return;
        };
        let Some(index) = entry.children.iter().position(|c| *c == child) else {
            return;
        };
        entry.children.remove(index);
        if let Some(entry) = self.nodes.get_mut(&child) {
            entry.parent = None;
        }
        self.journal.push(Mutation::RemoveChild { parent, child });
    }

    fn replace(&mut self, old: LiveId, new: LiveId) {
        let Some(parent) = self.nodes.get(&old).and_then(|n| n.parent) else {
            return;
        };
        let Some(index) = self
            .nodes
            .get(&parent)
            .and_then(|p| p.children.iter().position(|c| *c == old))
        else {
            return;
        };
        if let Some(entry) = self.nodes.get_mut(&parent) {
            entry.children[index] = new;
        }
        if let Some(entry) = self.nodes.get_mut(&old) {
            entry.parent = None;
        }
        if let Some(entry) = self.nodes.get_mut(&new) {
            entry.parent = Some(parent);
        }
        self.journal.push(Mutation::Replace { old, new });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_append() {
        let mut tree = HeadlessTree::new();
        let root = tree.create_node("root");
        let child = tree.create_node("div");

        tree.append_child(root, child);

        assert_eq!(tree.node(root).unwrap().children, vec![child]);
        assert_eq!(tree.node(child).unwrap().parent, Some(root));
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn set_text_orphans_children() {
        let mut tree = HeadlessTree::new();
        let parent = tree.create_node("div");
        let child = tree.create_node("span");
        tree.append_child(parent, child);

        tree.set_text(parent, "hello");

        assert!(tree.node(parent).unwrap().children.is_empty());
        assert_eq!(tree.node(parent).unwrap().text.as_deref(), Some("hello"));
        assert_eq!(tree.node(child).unwrap().parent, None);
    }

    #[test]
    fn replace_preserves_sibling_order() {
        let mut tree = HeadlessTree::new();
        let root = tree.create_node("root");
        let a = tree.create_node("a");
        let b = tree.create_node("b");
        let c = tree.create_node("c");
        tree.append_child(root, a);
        tree.append_child(root, b);
        tree.append_child(root, c);

        let d = tree.create_node("d");
        tree.replace(b, d);

        assert_eq!(tree.node(root).unwrap().children, vec![a, d, c]);
        assert_eq!(tree.node(b).unwrap().parent, None);
        assert_eq!(tree.node(d).unwrap().parent, Some(root));
    }

    #[test]
    fn journal_records_mutations_in_order() {
        let mut tree = HeadlessTree::new();
        let node = tree.create_node("div");
        tree.set_attribute(node, "class", "red");
        tree.remove_attribute(node, "class");

        assert_eq!(
            tree.journal(),
            &[
                Mutation::CreateNode {
                    node,
                    tag: "div".to_owned()
                },
                Mutation::SetAttribute {
                    node,
                    name: "class".to_owned(),
                    value: "red".to_owned()
                },
                Mutation::RemoveAttribute {
                    node,
                    name: "class".to_owned()
                },
            ]
        );

        tree.clear_journal();
        assert!(tree.journal().is_empty());
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let mut tree = HeadlessTree::new();
        let ghost = LiveId::new();

        tree.set_attribute(ghost, "class", "red");
        tree.set_text(ghost, "hello");
        tree.remove_child(ghost, ghost);
        tree.replace(ghost, ghost);

        assert_eq!(tree.node_count(), 0);
        assert!(tree.journal().is_empty());
    }
}
