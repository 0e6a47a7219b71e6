//! Store Implementation
//!
//! A Store is a reactive record: a string-keyed collection of values whose
//! reads and writes are routed through the runtime's dependency registry.
//!
//! # How Stores Work
//!
//! 1. [`Store::get`] registers the active computation (if any) as a
//!    subscriber of that field, then returns the value.
//!
//! 2. [`Store::set`] assigns the value, then synchronously notifies every
//!    subscriber of that field.
//!
//! # Interception is explicit
//!
//! Rust has no transparent property interception, so the wrapper is an
//! explicit `get`/`set` capability interface over the backing map rather
//! than field syntax on the record itself. Reads and writes observe
//! exactly the values an unwrapped map would; only the side channel
//! (subscribe on read, notify on write) differs.
//!
//! # Scope
//!
//! Fields may be created at any time after construction; reactivity is
//! shallow (a value that is itself a record is not wrapped unless the
//! caller wraps it in its own store).

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::runtime::Runtime;

/// Identity of a store, used to key the dependency registry.
///
/// Registry entries are keyed by this ID rather than by the backing map's
/// contents, so two stores with equal fields are still distinct subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(u64);

impl StoreId {
    /// Generate a new unique store ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the store's registry entries when the last clone drops.
///
/// This ties the lifetime of the registry's `(store, field)` entries to
/// the store itself: once the data object is unreachable, its subscriber
/// sets are gone rather than leaked.
struct Registration {
    id: StoreId,
    runtime: Runtime,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.runtime.forget_store(self.id);
    }
}

/// A reactive string-keyed record of values of type `V`.
///
/// Cloning shares state: all clones read and write the same backing map
/// and the same registry entries.
///
/// # Example
///
/// ```rust,ignore
/// let runtime = Runtime::new();
/// let state: Store<i64> = Store::new(&runtime);
/// state.set("count", 0);
///
/// let state_clone = state.clone();
/// let _effect = runtime.watch(move || {
///     println!("{:?}", state_clone.get("count"));
/// });
///
/// state.set("count", 1); // effect re-runs
/// ```
pub struct Store<V>
where
    V: Clone + Send + Sync + 'static,
{
    id: StoreId,
    runtime: Runtime,
    fields: Arc<RwLock<HashMap<String, V>>>,
    registration: Arc<Registration>,
}

impl<V> Store<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty store attached to `runtime`.
    pub fn new(runtime: &Runtime) -> Self {
        let id = StoreId::new();
        Self {
            id,
            runtime: runtime.clone(),
            fields: Arc::new(RwLock::new(HashMap::new())),
            registration: Arc::new(Registration {
                id,
                runtime: runtime.clone(),
            }),
        }
    }

    /// Create a store pre-populated from `entries`.
    pub fn from_entries<K, I>(runtime: &Runtime, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let store = Self::new(runtime);
        {
            let mut fields = store.fields.write().expect("fields lock poisoned");
            for (key, value) in entries {
                fields.insert(key.into(), value);
            }
        }
        store
    }

    /// Get the store's identity.
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Read a field.
    ///
    /// If a computation is being tracked, it is subscribed to this field
    /// before the value is returned. Absent fields read as `None` (and
    /// still subscribe, so a later write to the field re-runs the reader).
    pub fn get(&self, key: &str) -> Option<V> {
        self.runtime.depend(self.id, key);
        self.fields
            .read()
            .expect("fields lock poisoned")
            .get(key)
            .cloned()
    }

    /// Read a field without establishing a dependency.
    pub fn get_untracked(&self, key: &str) -> Option<V> {
        self.fields
            .read()
            .expect("fields lock poisoned")
            .get(key)
            .cloned()
    }

    /// Write a field, then notify its subscribers.
    ///
    /// The assignment is visible to the subscribers when they run, and all
    /// of them run before this call returns.
    pub fn set(&self, key: &str, value: V) {
        {
            let mut fields = self.fields.write().expect("fields lock poisoned");
            fields.insert(key.to_owned(), value);
        }
        self.runtime.notify(self.id, key);
    }

    /// Update a field from its current value.
    ///
    /// The closure sees `None` when the field is absent. Notification
    /// happens once, after the new value is assigned.
    pub fn update<F>(&self, key: &str, f: F)
    where
        F: FnOnce(Option<&V>) -> V,
    {
        let new_value = {
            let fields = self.fields.read().expect("fields lock poisoned");
            f(fields.get(key))
        };
        self.set(key, new_value);
    }

    /// Whether the field currently exists. Untracked.
    pub fn contains(&self, key: &str) -> bool {
        self.fields
            .read()
            .expect("fields lock poisoned")
            .contains_key(key)
    }

    /// Number of fields currently present. Untracked.
    pub fn len(&self) -> usize {
        self.fields.read().expect("fields lock poisoned").len()
    }

    /// Whether the store has no fields. Untracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Clone for Store<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            runtime: self.runtime.clone(),
            fields: Arc::clone(&self.fields),
            registration: Arc::clone(&self.registration),
        }
    }
}

impl<V> Debug for Store<V>
where
    V: Clone + Send + Sync + Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields = self.fields.read().expect("fields lock poisoned");
        f.debug_struct("Store")
            .field("id", &self.id)
            .field("fields", &*fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn store_get_and_set() {
        let runtime = Runtime::new();
        let store: Store<i32> = Store::new(&runtime);

        assert_eq!(store.get("count"), None);

        store.set("count", 42);
        assert_eq!(store.get("count"), Some(42));
        assert_eq!(store.get_untracked("count"), Some(42));
    }

    #[test]
    fn store_accepts_keys_unknown_at_creation() {
        let runtime = Runtime::new();
        let store: Store<&'static str> = Store::from_entries(&runtime, [("title", "hello")]);

        assert_eq!(store.get("title"), Some("hello"));
        assert!(!store.contains("subtitle"));

        store.set("subtitle", "world");
        assert_eq!(store.get("subtitle"), Some("world"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn store_update_sees_current_value() {
        let runtime = Runtime::new();
        let store: Store<i32> = Store::from_entries(&runtime, [("count", 10)]);

        store.update("count", |v| v.copied().unwrap_or(0) + 5);
        assert_eq!(store.get("count"), Some(15));

        store.update("missing", |v| {
            assert!(v.is_none());
            1
        });
        assert_eq!(store.get("missing"), Some(1));
    }

    #[test]
    fn store_clone_shares_state() {
        let runtime = Runtime::new();
        let store1: Store<i32> = Store::new(&runtime);
        let store2 = store1.clone();

        store1.set("count", 42);
        assert_eq!(store2.get("count"), Some(42));
        assert_eq!(store1.id(), store2.id());
    }

    #[test]
    fn write_notifies_field_subscribers() {
        let runtime = Runtime::new();
        let store: Store<i32> = Store::from_entries(&runtime, [("count", 0)]);

        let observed = Arc::new(AtomicI32::new(-1));
        let observed_clone = observed.clone();
        let store_clone = store.clone();

        let _effect = runtime.watch(move || {
            if let Some(v) = store_clone.get("count") {
                observed_clone.store(v, Ordering::SeqCst);
            }
        });

        assert_eq!(observed.load(Ordering::SeqCst), 0);
        store.set("count", 7);
        assert_eq!(observed.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn untracked_reads_do_not_subscribe() {
        let runtime = Runtime::new();
        let store: Store<i32> = Store::from_entries(&runtime, [("count", 0)]);

        let runs = Arc::new(AtomicI32::new(0));
        let runs_clone = runs.clone();
        let store_clone = store.clone();

        let _effect = runtime.watch(move || {
            let _ = store_clone.get_untracked("count");
            runs_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        store.set("count", 1);
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_last_clone_forgets_registry_entries() {
        let runtime = Runtime::new();
        let store: Store<i32> = Store::from_entries(&runtime, [("count", 0)]);
        let id = store.id();

        let store_clone = store.clone();
        let _effect = runtime.watch(move || {
            let _ = store_clone.get("count");
        });
        assert!(runtime.knows_store(id));

        // `_effect` captured a clone; dropping both releases the store.
        drop(_effect);
        drop(store);
        assert!(!runtime.knows_store(id));
    }
}
