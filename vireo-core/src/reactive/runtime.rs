//! Reactive Runtime
//!
//! The runtime is the central coordinator of the reactive system. It owns
//! the dependency registry (which computation read which field) and the
//! active-computation tracker (which computation is currently running).
//!
//! # How It Works
//!
//! 1. [`Runtime::run_tracked`] sets the active-computation slot, invokes
//!    the computation once, then clears the slot. This is the only way
//!    subscriptions are created.
//!
//! 2. While the slot is occupied, every [`Store`](super::Store) field read
//!    calls [`Runtime::depend`], which subscribes the active computation to
//!    that `(store, field)` pair.
//!
//! 3. Every field write calls [`Runtime::notify`], which synchronously
//!    invokes all current subscribers of that pair before the write call
//!    returns.
//!
//! # Context, not global
//!
//! The runtime is an explicit context object: stores and effects hold a
//! clone of it, and independent runtimes are fully isolated. There is no
//! process-wide singleton, which keeps tracking regions independently
//! testable.
//!
//! # Hazard
//!
//! A computation that writes a field it subscribed to re-triggers itself
//! synchronously and recurses without bound. The runtime does not detect
//! this cycle; avoiding it is a caller responsibility.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, Weak};

use tracing::trace;

use super::computation::{Computation, ComputationId};
use super::effect::Effect;
use super::store::StoreId;

/// The reactive runtime.
///
/// Cloning is cheap and clones share all state, so a runtime can be handed
/// to every store and effect that participates in it.
#[derive(Clone, Default)]
pub struct Runtime {
    inner: Arc<RuntimeInner>,
}

#[derive(Default)]
struct RuntimeInner {
    /// The dependency registry: store identity -> field key -> subscribers.
    ///
    /// Entries are created lazily on first tracked read and removed
    /// wholesale when the owning store is dropped.
    registry: RwLock<HashMap<StoreId, HashMap<String, HashSet<ComputationId>>>>,

    /// Live computations, held weakly so a dropped effect never stays
    /// reachable through its subscriptions.
    computations: RwLock<HashMap<ComputationId, Weak<Computation>>>,

    /// The active-computation slot. At most one computation is tracked at
    /// a time; nested tracking is not supported.
    active: RwLock<Option<ComputationId>>,
}

/// Guard that clears the active-computation slot when dropped.
///
/// This ensures the slot is cleared on every exit path, including a panic
/// inside the tracked computation.
struct TrackingGuard {
    inner: Arc<RuntimeInner>,
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        *self.inner.active.write().expect("active slot lock poisoned") = None;
    }
}

impl Runtime {
    /// Create a new, empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a computation so notifications can reach it.
    ///
    /// The runtime keeps only a weak reference; the caller (normally an
    /// [`Effect`]) owns the strong one.
    pub fn register(&self, computation: &Arc<Computation>) {
        self.inner
            .computations
            .write()
            .expect("computations lock poisoned")
            .insert(computation.id(), Arc::downgrade(computation));
    }

    /// Unregister a computation and scrub it from every subscriber set.
    pub fn unregister(&self, id: ComputationId) {
        self.inner
            .computations
            .write()
            .expect("computations lock poisoned")
            .remove(&id);

        let mut registry = self.inner.registry.write().expect("registry lock poisoned");
        for fields in registry.values_mut() {
            for subscribers in fields.values_mut() {
                subscribers.remove(&id);
            }
        }
    }

    /// Subscribe the active computation, if any, to `(store, key)`.
    ///
    /// No-op when no computation is being tracked. Re-subscription is
    /// idempotent: the subscriber set deduplicates by computation ID.
    pub fn depend(&self, store: StoreId, key: &str) {
        let active = *self.inner.active.read().expect("active slot lock poisoned");
        let Some(id) = active else {
            return;
        };

        trace!(?store, key, computation = ?id, "subscribing");
        self.inner
            .registry
            .write()
            .expect("registry lock poisoned")
            .entry(store)
            .or_default()
            .entry(key.to_owned())
            .or_default()
            .insert(id);
    }

    /// Synchronously invoke every current subscriber of `(store, key)`.
    ///
    /// Subscribers run on the calling thread, in unspecified order, with
    /// no lock held, so a subscriber is free to read or write reactive
    /// fields (including ones that fan out to further subscribers).
    pub fn notify(&self, store: StoreId, key: &str) {
        let subscriber_ids: Vec<ComputationId> = {
            let registry = self.inner.registry.read().expect("registry lock poisoned");
            registry
                .get(&store)
                .and_then(|fields| fields.get(key))
                .map(|subscribers| subscribers.iter().copied().collect())
                .unwrap_or_default()
        };

        if subscriber_ids.is_empty() {
            return;
        }
        trace!(?store, key, count = subscriber_ids.len(), "notifying subscribers");

        let mut to_invoke = Vec::new();
        let mut stale = Vec::new();
        {
            let computations = self
                .inner
                .computations
                .read()
                .expect("computations lock poisoned");
            for id in subscriber_ids {
                match computations.get(&id).and_then(Weak::upgrade) {
                    Some(computation) => to_invoke.push(computation),
                    None => stale.push(id),
                }
            }
        }

        // Locks are released here: a subscriber may re-enter notify.
        for computation in to_invoke {
            computation.invoke();
        }

        for id in stale {
            self.unregister(id);
        }
    }

    /// Run a computation with dependency tracking.
    ///
    /// The active-computation slot is set to `computation` for the duration
    /// of one synchronous invocation and cleared on every exit path, even
    /// if the computation panics. This is the only way subscriptions are
    /// created.
    ///
    /// Nested tracked runs are not supported; starting one while a
    /// computation is already active is a caller bug.
    pub fn run_tracked(&self, computation: &Computation) {
        {
            let mut active = self.inner.active.write().expect("active slot lock poisoned");
            debug_assert!(
                active.is_none(),
                "run_tracked is non-reentrant: a computation is already active"
            );
            *active = Some(computation.id());
        }

        let _guard = TrackingGuard {
            inner: Arc::clone(&self.inner),
        };
        computation.invoke();
    }

    /// Create an effect: run `f` immediately under tracking, then re-run
    /// it every time a field it read is written.
    ///
    /// The returned [`Effect`] owns the computation; dropping it stops
    /// future re-runs.
    pub fn watch<F>(&self, f: F) -> Effect
    where
        F: Fn() + Send + Sync + 'static,
    {
        Effect::new(self, f)
    }

    /// Whether a computation is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        self.inner
            .active
            .read()
            .expect("active slot lock poisoned")
            .is_some()
    }

    /// Number of subscribers currently registered for `(store, key)`.
    pub fn subscriber_count(&self, store: StoreId, key: &str) -> usize {
        self.inner
            .registry
            .read()
            .expect("registry lock poisoned")
            .get(&store)
            .and_then(|fields| fields.get(key))
            .map(HashSet::len)
            .unwrap_or(0)
    }

    /// Drop every registry entry belonging to `store`.
    ///
    /// Called when the last clone of a store is dropped, so registry
    /// entries live exactly as long as the data object they describe.
    pub(crate) fn forget_store(&self, store: StoreId) {
        self.inner
            .registry
            .write()
            .expect("registry lock poisoned")
            .remove(&store);
    }

    /// Whether the registry still has an entry for `store` (test hook).
    #[cfg(test)]
    pub(crate) fn knows_store(&self, store: StoreId) -> bool {
        self.inner
            .registry
            .read()
            .expect("registry lock poisoned")
            .contains_key(&store)
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.registry.read().expect("registry lock poisoned");
        f.debug_struct("Runtime")
            .field("stores", &registry.len())
            .field("tracking", &self.is_tracking())
            .finish()
    }
}
