//! Reconciler
//!
//! Patching compares an already-mounted virtual tree against its
//! replacement and applies the minimal set of mutations to the live tree.
//! The new virtual tree takes over the live bindings as it goes, so it
//! becomes the baseline for the next reconciliation and the old tree can
//! be discarded.
//!
//! Comparison is strictly positional: children are paired by index, never
//! by key or identity. Reordering a child list therefore shows up as
//! content mutations on every shifted position rather than moves. That is
//! a deliberate simplicity trade-off of this reconciler, not an oversight.
//!
//! When the two nodes at a position carry different tags, the old live
//! subtree is replaced in place by a freshly materialized one (the
//! reference behavior for this case — silently doing nothing — is
//! observably wrong and is not reproduced).

use thiserror::Error;
use tracing::{debug, trace};

use super::mount::{materialize, mount};
use super::node::{Attrs, Children, VNode};
use super::tree::LiveTree;

/// Reconciliation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// Patching reached a virtual node on the old side that was never
    /// materialized. The old tree must have been mounted (or produced by a
    /// previous patch) before it can serve as a comparison baseline.
    #[error("virtual node <{tag}> has no live binding (was it mounted?)")]
    NotMounted {
        /// Tag of the unbound node.
        tag: String,
    },
}

/// Reconcile `new` against `old`, mutating the live tree in place.
///
/// `old` must carry a live binding; `new` occupies the same logical tree
/// position. On success `new` (and every descendant that survived
/// comparison) carries the live binding for its position, and the live
/// tree is fully updated before this returns.
///
/// Unchanged attributes and text are never rewritten, and `patch(t, t)`
/// with an identical tree performs no live mutations at all.
pub fn patch<T: LiveTree + ?Sized>(
    tree: &mut T,
    old: &VNode,
    new: &mut VNode,
) -> Result<(), PatchError> {
    let el = old.el.ok_or_else(|| PatchError::NotMounted {
        tag: old.tag.clone(),
    })?;

    if old.tag != new.tag {
        debug!(old = %old.tag, new = %new.tag, "tag changed, replacing subtree");
        let new_el = materialize(tree, new);
        tree.replace(el, new_el);
        return Ok(());
    }

    // Same tag: the new node takes over the live binding.
    new.el = Some(el);
    trace!(tag = %new.tag, "patching in place");

    patch_attrs(tree, el, old.attrs.as_ref(), new.attrs.as_ref());

    match (&old.children, &mut new.children) {
        // Text to text: rewrite only on an actual change.
        (Some(Children::Text(old_text)), Some(Children::Text(new_text))) => {
            if new_text != old_text {
                tree.set_text(el, new_text);
            }
        }

        // Anything else to text: one content assignment covers it. Element
        // children the live node had become detached; there is no explicit
        // per-node teardown.
        (_, Some(Children::Text(new_text))) => {
            tree.set_text(el, new_text);
        }

        // Element children on both sides: positional pairwise reconcile,
        // then mount the surplus new children or remove the surplus old.
        (Some(Children::Nodes(old_children)), Some(Children::Nodes(new_children))) => {
            let common = old_children.len().min(new_children.len());
            for i in 0..common {
                patch(tree, &old_children[i], &mut new_children[i])?;
            }

            for child in new_children.iter_mut().skip(common) {
                mount(tree, child, el);
            }

            for child in old_children.iter().skip(common) {
                let child_el = child.el.ok_or_else(|| PatchError::NotMounted {
                    tag: child.tag.clone(),
                })?;
                tree.remove_child(el, child_el);
            }
        }

        // Text to element children: clear the materialized text, then
        // mount each new child in order.
        (Some(Children::Text(_)), Some(Children::Nodes(new_children))) => {
            tree.set_text(el, "");
            for child in new_children.iter_mut() {
                mount(tree, child, el);
            }
        }

        // No prior content, new element children: just mount them.
        (None, Some(Children::Nodes(new_children))) => {
            for child in new_children.iter_mut() {
                mount(tree, child, el);
            }
        }

        // Content removed entirely: clear text, remove element children.
        (Some(Children::Text(_)), None) => {
            tree.set_text(el, "");
        }
        (Some(Children::Nodes(old_children)), None) => {
            for child in old_children {
                let child_el = child.el.ok_or_else(|| PatchError::NotMounted {
                    tag: child.tag.clone(),
                })?;
                tree.remove_child(el, child_el);
            }
        }

        (None, None) => {}
    }

    Ok(())
}

/// Diff two attribute maps onto the live node.
///
/// Writes only keys whose value is new or changed; removes only keys that
/// disappeared. Unchanged keys produce no mutation.
fn patch_attrs<T: LiveTree + ?Sized>(
    tree: &mut T,
    el: super::tree::LiveId,
    old: Option<&Attrs>,
    new: Option<&Attrs>,
) {
    let empty = Attrs::new();
    let old = old.unwrap_or(&empty);
    let new = new.unwrap_or(&empty);

    for (name, value) in new {
        if old.get(name) != Some(value) {
            tree.set_attribute(el, name, value);
        }
    }
    for name in old.keys() {
        if !new.contains_key(name) {
            tree.remove_attribute(el, name);
        }
    }
}
