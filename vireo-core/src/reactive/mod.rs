//! Reactive Primitives
//!
//! This module implements the core reactive system: stores, effects, and
//! the runtime that connects them through automatic dependency tracking.
//!
//! # Concepts
//!
//! ## Stores
//!
//! A Store is a reactive record. When a field is read within a tracking
//! context (an effect's initial run), the store registers that computation
//! as a subscriber of the field. When the field is written, all of the
//! field's subscribers are invoked synchronously.
//!
//! ## Effects
//!
//! An Effect is a side-effecting computation that re-runs whenever a field
//! it read is written. Effects are how reactive state is synchronized with
//! external systems, such as re-rendering a tree or logging.
//!
//! ## Runtime
//!
//! The Runtime owns the dependency registry and the single-slot
//! active-computation tracker. It is an explicit context object rather
//! than a hidden global: stores and effects belong to the runtime they
//! were created with, and independent runtimes never interact.
//!
//! # Implementation Notes
//!
//! Dependencies are detected automatically: running a computation through
//! the runtime marks it active, and any store read that happens during
//! that synchronous run subscribes the computation to the field it read.
//! This approach ("transparent reactivity") is the one used by Vue 3,
//! SolidJS, and Leptos.

mod computation;
mod effect;
mod runtime;
mod store;

pub use computation::{Computation, ComputationId};
pub use effect::Effect;
pub use runtime::Runtime;
pub use store::{Store, StoreId};
