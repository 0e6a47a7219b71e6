//! Materializer
//!
//! Mounting turns a virtual tree into live nodes for the first time. Each
//! virtual node gets exactly one live node, its attributes and content are
//! applied, and the live node's handle is bound back onto the virtual node
//! so later reconciliation can address it.
//!
//! Mounting is not idempotent: mounting the same virtual node twice
//! creates two live nodes and appends both. Callers mount a node exactly
//! once; every later tree version goes through [`patch`](super::patch).

use tracing::debug;

use super::node::{Children, VNode};
use super::tree::{LiveId, LiveTree};

/// Materialize a virtual tree and append it to `parent`.
///
/// After this returns, `vnode.el` (and the `el` of every descendant) is
/// populated and the live tree under `parent` reflects exactly the shape
/// the virtual tree declares: attributes set per entry, text content for
/// text children, recursively mounted nodes in order for element children.
pub fn mount<T: LiveTree + ?Sized>(tree: &mut T, vnode: &mut VNode, parent: LiveId) {
    debug!(tag = %vnode.tag, ?parent, "mounting");
    let el = materialize(tree, vnode);
    tree.append_child(parent, el);
}

/// Build the live subtree for `vnode` without attaching it anywhere.
///
/// The reconciler uses this directly when it needs a replacement subtree
/// to swap in at an existing position.
pub(crate) fn materialize<T: LiveTree + ?Sized>(tree: &mut T, vnode: &mut VNode) -> LiveId {
    let el = tree.create_node(&vnode.tag);
    vnode.el = Some(el);

    if let Some(attrs) = &vnode.attrs {
        for (name, value) in attrs {
            tree.set_attribute(el, name, value);
        }
    }

    match &mut vnode.children {
        Some(Children::Text(text)) => tree.set_text(el, text),
        Some(Children::Nodes(children)) => {
            for child in children.iter_mut() {
                mount(tree, child, el);
            }
        }
        None => {}
    }

    el
}
