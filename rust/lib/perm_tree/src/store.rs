use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::PermTreeError;
use crate::forest::ResourceForest;
use crate::node::NodeId;
use crate::state::{SelectedRows, StateChange};
use crate::topic;

/// Callback type for state change notifications.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateChange) + Send + Sync>;

/// Unique handle for a subscription, returned by `PermTreeStore::subscribe()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Owner of the permission tree state.
///
/// - `perm/forest`: the loaded `ResourceForest` (absent until loaded)
/// - `perm/selected`: the last select-all `SelectedRows`
///
/// Both paths live behind one lock, so a request that writes both is seen
/// by readers either entirely or not at all.
///
/// Reads go through `with_forest` / snapshots. Writes are crate-private
/// and only issued by request handlers. Every write notifies subscribers
/// whose pattern matches the written path, after the lock is released.
pub struct PermTreeStore {
    state: RwLock<TreeState>,
    subscribers: RwLock<Vec<Subscriber>>,
    /// Monotonic counter for subscription IDs.
    next_id: AtomicU64,
}

#[derive(Default)]
struct TreeState {
    forest: Option<ResourceForest>,
    selected: SelectedRows,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    pattern: String,
    handler: ChangeHandler,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl PermTreeStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(TreeState::default()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    // ====================================================================
    // Read
    // ====================================================================

    pub fn is_loaded(&self) -> bool {
        read(&self.state).forest.is_some()
    }

    /// Run `f` against the loaded forest.
    pub fn with_forest<R>(&self, f: impl FnOnce(&ResourceForest) -> R) -> Result<R, PermTreeError> {
        let guard = read(&self.state);
        let forest = guard.forest.as_ref().ok_or(PermTreeError::NotLoaded)?;
        Ok(f(forest))
    }

    /// Ids of all checked nodes, in pre-order.
    pub fn checked_ids(&self) -> Result<Vec<NodeId>, PermTreeError> {
        self.with_forest(ResourceForest::checked_ids)
    }

    pub fn selected_rows(&self) -> SelectedRows {
        read(&self.state).selected.clone()
    }

    // ====================================================================
    // Write
    // ====================================================================

    pub(crate) fn replace_forest(&self, forest: ResourceForest) {
        let checked = forest.checked_ids();
        write(&self.state).forest = Some(forest);
        self.notify(ResourceForest::PATH, &StateChange::Forest { checked });
    }

    /// Mutate the loaded forest, then notify `perm/forest` subscribers.
    pub(crate) fn update_forest<R>(
        &self,
        f: impl FnOnce(&mut ResourceForest) -> R,
    ) -> Result<R, PermTreeError> {
        let (result, checked) = {
            let mut guard = write(&self.state);
            let forest = guard.forest.as_mut().ok_or(PermTreeError::NotLoaded)?;
            let result = f(forest);
            (result, forest.checked_ids())
        };
        self.notify(ResourceForest::PATH, &StateChange::Forest { checked });
        Ok(result)
    }

    /// Record `rows` and mutate the loaded forest in one write section,
    /// then notify `perm/selected` followed by `perm/forest`.
    ///
    /// Nothing is recorded when no forest is loaded.
    pub(crate) fn update_with_rows<R>(
        &self,
        rows: SelectedRows,
        f: impl FnOnce(&mut ResourceForest) -> R,
    ) -> Result<R, PermTreeError> {
        let (result, checked) = {
            let mut guard = write(&self.state);
            let state = &mut *guard;
            let forest = state.forest.as_mut().ok_or(PermTreeError::NotLoaded)?;
            let result = f(forest);
            let checked = forest.checked_ids();
            state.selected = rows.clone();
            (result, checked)
        };
        self.notify(SelectedRows::PATH, &StateChange::SelectedRows(rows));
        self.notify(ResourceForest::PATH, &StateChange::Forest { checked });
        Ok(result)
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    /// Subscribe to changes on paths matching `pattern` (`+` / `#` wildcards).
    ///
    /// The handler runs synchronously on the writing thread, after the
    /// write lock is released, so it may read the store.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        write(&self.subscribers).push(Subscriber {
            id,
            pattern: pattern.to_string(),
            handler: Arc::new(handler),
        });
        id
    }

    /// Remove a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        write(&self.subscribers).retain(|s| !(s.id == id && s.pattern == pattern));
    }

    fn notify(&self, path: &str, change: &StateChange) {
        let handlers: Vec<ChangeHandler> = read(&self.subscribers)
            .iter()
            .filter(|s| topic::matches(&s.pattern, path))
            .map(|s| Arc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(path, change);
        }
    }
}

impl Default for PermTreeStore {
    fn default() -> Self {
        Self::new()
    }
}
