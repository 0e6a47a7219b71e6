//! Virtual Tree Rendering
//!
//! This module implements the rendering half of the runtime: a virtual
//! node model, a materializer that turns a virtual tree into live output
//! once, and a reconciler that diffs two virtual trees and applies the
//! minimal mutations to the live output.
//!
//! # Concepts
//!
//! ## Virtual nodes
//!
//! [`h`] builds plain data describing the desired output: tag, attributes,
//! and text or child nodes. Building a virtual tree touches nothing.
//!
//! ## Mounting
//!
//! [`mount`] materializes a virtual tree into live nodes exactly once,
//! binding each live handle back onto its virtual node.
//!
//! ## Patching
//!
//! [`patch`] compares the previously rendered tree against a new one and
//! mutates the live tree in place: attribute writes only where values
//! changed, text writes only where text changed, children paired by
//! position with surplus nodes mounted or removed. The new tree inherits
//! the live bindings and becomes the next baseline.
//!
//! # The live tree is a collaborator
//!
//! All output goes through the [`LiveTree`] trait; the core never assumes
//! a browser DOM. [`HeadlessTree`] is the built-in in-memory
//! implementation, used by the test suite and usable for headless
//! rendering.

mod headless;
mod mount;
mod node;
mod patch;
mod tree;

pub use headless::{HeadlessNode, HeadlessTree, Mutation};
pub use mount::mount;
pub use node::{h, Attrs, Children, IntoAttrs, IntoChildren, VNode};
pub use patch::{patch, PatchError};
pub use tree::{LiveId, LiveTree};
