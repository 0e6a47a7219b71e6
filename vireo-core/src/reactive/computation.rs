//! Computation handles for the reactive system.
//!
//! A Computation is any unit of work that depends on reactive fields.
//! The dependency registry stores computations by ID; the callback is the
//! opaque zero-argument callable that gets re-invoked on change.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for a computation.
///
/// Each computation gets a unique ID when created. The ID is what the
/// dependency registry stores, so re-subscribing the same computation to
/// the same field is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputationId(u64);

impl ComputationId {
    /// Generate a new unique computation ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ComputationId {
    fn default() -> Self {
        Self::new()
    }
}

/// A computation that can be re-invoked when a reactive field changes.
///
/// The callback is stored as a shared trait object so the runtime can hold
/// a weak reference to it while an [`Effect`](super::Effect) handle owns
/// the strong one.
pub struct Computation {
    id: ComputationId,
    run: Arc<dyn Fn() + Send + Sync>,
}

impl Computation {
    /// Create a new computation with the given callback.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: ComputationId::new(),
            run: Arc::new(run),
        }
    }

    /// Get the computation's unique ID.
    pub fn id(&self) -> ComputationId {
        self.id
    }

    /// Invoke the computation once.
    ///
    /// This is a plain call: no tracking context is involved. Subscriptions
    /// are only created by [`Runtime::run_tracked`](super::Runtime::run_tracked).
    pub fn invoke(&self) {
        (self.run)();
    }
}

impl std::fmt::Debug for Computation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computation").field("id", &self.id).finish()
    }
}
