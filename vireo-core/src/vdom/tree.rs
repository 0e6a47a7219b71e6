//! Live Tree Boundary
//!
//! The live output tree (a browser DOM, a terminal scene graph, a test
//! double) is an external collaborator. The core only needs the handful of
//! mutations defined by [`LiveTree`]; everything else about the output
//! tree, including node lifecycle and ownership, belongs to the
//! implementor.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle to one node in the live output tree.
///
/// Handles are minted by [`LiveId::new`] so every live node ever created
/// has a distinct identity, regardless of which tree implementation owns
/// it. A virtual node holds at most one of these as a non-owning
/// back-reference; the live tree owns the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiveId(u64);

impl LiveId {
    /// Generate a new unique live-node handle.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for LiveId {
    fn default() -> Self {
        Self::new()
    }
}

/// The mutation surface the renderer requires of a live output tree.
///
/// Implementations are expected to be lenient: a handle the tree does not
/// know should be ignored, not escalated, so a partially torn-down tree
/// cannot poison rendering of the rest.
pub trait LiveTree {
    /// Create a live node for the given tag name and return its handle.
    ///
    /// The node starts detached; it enters the tree when appended.
    fn create_node(&mut self, tag: &str) -> LiveId;

    /// Set a named string attribute on a node, overwriting any prior value.
    fn set_attribute(&mut self, node: LiveId, name: &str, value: &str);

    /// Remove a named attribute from a node.
    fn remove_attribute(&mut self, node: LiveId, name: &str);

    /// Set a node's text content.
    ///
    /// Follows DOM `textContent` assignment semantics: any existing child
    /// nodes are dropped from the tree and replaced by the text. Setting
    /// the empty string clears the node's content.
    fn set_text(&mut self, node: LiveId, text: &str);

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: LiveId, child: LiveId);

    /// Remove `child` from `parent`'s children.
    fn remove_child(&mut self, parent: LiveId, child: LiveId);

    /// Replace `old` with `new` at `old`'s position under its parent.
    ///
    /// Equivalent to DOM `replaceWith`: sibling order around the replaced
    /// node is preserved. Used only for whole-subtree replacement when the
    /// reconciler meets two different tags at one tree position.
    fn replace(&mut self, old: LiveId, new: LiveId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_ids_are_unique() {
        let id1 = LiveId::new();
        let id2 = LiveId::new();
        let id3 = LiveId::new();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);
    }
}
