//! Virtual Node Model
//!
//! A virtual node is an immutable-shaped description of one node of the
//! desired output tree: a tag, optional attributes, and optional children
//! (either a text payload or an ordered sequence of further nodes).
//!
//! Identity between trees is strictly positional. Two trees are compared
//! node-by-node at matching positions; no key attribute or node identity
//! participates in reconciliation.
//!
//! The model is serde-serializable so trees can be shipped across a
//! transport or loaded from fixtures; the live binding (`el`) never
//! travels, it is re-established by mounting.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::tree::LiveId;

/// Attribute map of a virtual node. Insertion-ordered so attribute
/// mutation sequences are deterministic.
pub type Attrs = IndexMap<String, String>;

/// The content of a virtual node: either a text payload or an ordered
/// sequence of child nodes.
///
/// Serialized untagged, so `"hello"` and `[{"tag": …}]` both read
/// naturally from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    /// Text content; the live node gets this as its text.
    Text(String),
    /// Element children, materialized in order.
    Nodes(Vec<VNode>),
}

/// One node of a virtual tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VNode {
    /// Tag name of the live node this describes.
    pub tag: String,

    /// Attributes to carry on the live node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,

    /// Content of the node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,

    /// Back-reference to the materialized live node.
    ///
    /// `None` until the node is mounted or takes over a prior node's
    /// binding during reconciliation. Non-owning: the live tree owns the
    /// node, this is purely for lookup.
    #[serde(skip)]
    pub el: Option<LiveId>,
}

impl VNode {
    /// Create a virtual node. Pure: no side effects, no live binding.
    pub fn new(tag: impl Into<String>, attrs: Option<Attrs>, children: Option<Children>) -> Self {
        Self {
            tag: tag.into(),
            attrs,
            children,
            el: None,
        }
    }

    /// Whether this node has been materialized.
    pub fn is_mounted(&self) -> bool {
        self.el.is_some()
    }
}

/// Conversion into an optional attribute map, so [`h`] call sites can pass
/// `()` for "no attributes" or an array of pairs inline.
pub trait IntoAttrs {
    fn into_attrs(self) -> Option<Attrs>;
}

impl IntoAttrs for () {
    fn into_attrs(self) -> Option<Attrs> {
        None
    }
}

impl IntoAttrs for Attrs {
    fn into_attrs(self) -> Option<Attrs> {
        Some(self)
    }
}

impl IntoAttrs for Option<Attrs> {
    fn into_attrs(self) -> Option<Attrs> {
        self
    }
}

impl<K, V, const N: usize> IntoAttrs for [(K, V); N]
where
    K: Into<String>,
    V: Into<String>,
{
    fn into_attrs(self) -> Option<Attrs> {
        Some(
            self.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Conversion into optional children, so [`h`] call sites can pass `()`,
/// a string, or a `Vec<VNode>` directly.
pub trait IntoChildren {
    fn into_children(self) -> Option<Children>;
}

impl IntoChildren for () {
    fn into_children(self) -> Option<Children> {
        None
    }
}

impl IntoChildren for &str {
    fn into_children(self) -> Option<Children> {
        Some(Children::Text(self.to_owned()))
    }
}

impl IntoChildren for String {
    fn into_children(self) -> Option<Children> {
        Some(Children::Text(self))
    }
}

impl IntoChildren for Vec<VNode> {
    fn into_children(self) -> Option<Children> {
        Some(Children::Nodes(self))
    }
}

impl IntoChildren for Children {
    fn into_children(self) -> Option<Children> {
        Some(self)
    }
}

impl IntoChildren for Option<Children> {
    fn into_children(self) -> Option<Children> {
        self
    }
}

/// Build a virtual node.
///
/// # Example
///
/// ```rust,ignore
/// let tree = h("div", [("class", "red")], vec![h("span", (), "hello")]);
/// ```
pub fn h(tag: impl Into<String>, attrs: impl IntoAttrs, children: impl IntoChildren) -> VNode {
    VNode::new(tag, attrs.into_attrs(), children.into_children())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn h_builds_unmounted_nodes() {
        let node = h("div", [("class", "red")], vec![h("span", (), "hello")]);

        assert_eq!(node.tag, "div");
        assert_eq!(
            node.attrs.as_ref().and_then(|a| a.get("class")).map(String::as_str),
            Some("red")
        );
        assert!(!node.is_mounted());

        match &node.children {
            Some(Children::Nodes(children)) => {
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].tag, "span");
                assert_eq!(
                    children[0].children,
                    Some(Children::Text("hello".to_owned()))
                );
            }
            other => panic!("expected element children, got {other:?}"),
        }
    }

    #[test]
    fn h_accepts_absent_attrs_and_children() {
        let node = h("hr", (), ());
        assert_eq!(node.attrs, None);
        assert_eq!(node.children, None);
    }

    #[test]
    fn vnode_round_trips_through_json() {
        let node = h(
            "ul",
            [("id", "list")],
            vec![h("li", (), "one"), h("li", (), "two")],
        );

        let json = serde_json::to_string(&node).unwrap();
        let back: VNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn text_children_deserialize_from_bare_strings() {
        let node: VNode =
            serde_json::from_str(r#"{"tag":"span","children":"hello"}"#).unwrap();
        assert_eq!(node.children, Some(Children::Text("hello".to_owned())));
        assert!(node.el.is_none());
    }
}
