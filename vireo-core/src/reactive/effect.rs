//! Effect Implementation
//!
//! An Effect is a side-effecting computation that runs whenever a reactive
//! field it read is written.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its function once under tracking
//!    ([`Runtime::run_tracked`]) to establish its subscriptions.
//!
//! 2. When any subscribed field is written, the runtime invokes the
//!    callback again, synchronously, before the write call returns.
//!
//! 3. Re-runs are plain invocations: they do not re-enter tracking, so the
//!    subscriptions established by the initial tracked run persist for the
//!    effect's lifetime.
//!
//! # Lifetime
//!
//! The effect handle owns the computation. The runtime only holds a weak
//! reference, so dropping the handle (or calling [`Effect::dispose`])
//! stops future re-runs and lets the runtime prune the subscriptions.

use std::sync::Arc;

use super::computation::{Computation, ComputationId};
use super::runtime::Runtime;

/// An owning handle for a registered reactive computation.
///
/// # Example
///
/// ```rust,ignore
/// let runtime = Runtime::new();
/// let state = Store::new(&runtime);
/// state.set("count", 0);
///
/// let effect = runtime.watch(move || {
///     println!("count is {:?}", state.get("count"));
/// });
///
/// state.set("count", 1); // prints: count is Some(1)
/// drop(effect);
/// state.set("count", 2); // prints nothing
/// ```
pub struct Effect {
    computation: Arc<Computation>,
    runtime: Runtime,
    disposed: bool,
}

impl Effect {
    /// Create an effect and run it immediately under tracking.
    pub fn new<F>(runtime: &Runtime, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let computation = Arc::new(Computation::new(f));
        runtime.register(&computation);
        runtime.run_tracked(&computation);

        Self {
            computation,
            runtime: runtime.clone(),
            disposed: false,
        }
    }

    /// Get the underlying computation's ID.
    pub fn id(&self) -> ComputationId {
        self.computation.id()
    }

    /// Re-run the effect once under tracking, picking up any new
    /// subscriptions its reads establish.
    pub fn retrack(&self) {
        if !self.disposed {
            self.runtime.run_tracked(&self.computation);
        }
    }

    /// Unregister the effect. After disposal it is never invoked again.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.runtime.unregister(self.computation.id());
        }
    }

    /// Whether the effect has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.id())
            .field("disposed", &self.disposed)
            .finish()
    }
}
