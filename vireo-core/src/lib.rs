//! Vireo Core
//!
//! This crate provides the core runtime for the Vireo reactive UI
//! framework. It implements:
//!
//! - Reactive primitives (stores, effects, automatic dependency tracking)
//! - Virtual tree materialization and reconciliation
//!
//! The live output tree (a browser DOM, a scene graph, a test double) is
//! an external collaborator reached through the [`vdom::LiveTree`] trait;
//! the core itself is output-agnostic.
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `reactive`: dependency registry, active-computation tracking, and the
//!   store/effect primitives built on them
//! - `vdom`: virtual node model, materializer (mount), and reconciler
//!   (patch)
//!
//! # Example
//!
//! ```rust,ignore
//! use vireo_core::reactive::{Runtime, Store};
//! use vireo_core::vdom::{h, mount, patch, HeadlessTree};
//!
//! // Reactive state: an effect re-runs whenever a field it read changes.
//! let runtime = Runtime::new();
//! let state: Store<i64> = Store::new(&runtime);
//! state.set("count", 0);
//!
//! let state_reader = state.clone();
//! let _effect = runtime.watch(move || {
//!     println!("count: {:?}", state_reader.get("count"));
//! });
//! state.set("count", 1); // effect re-runs synchronously
//!
//! // Rendering: mount once, then reconcile new trees against the old.
//! let mut tree = HeadlessTree::new();
//! let root = tree.create_node("root");
//!
//! let mut current = h("div", [("class", "red")], vec![h("span", (), "hello")]);
//! mount(&mut tree, &mut current, root);
//!
//! let mut next = h("div", [("class", "green")], vec![h("span", (), "Changed!")]);
//! patch(&mut tree, &current, &mut next)?;
//! // `next` now carries the live bindings and replaces `current`.
//! ```

pub mod reactive;
pub mod vdom;
