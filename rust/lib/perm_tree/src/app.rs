use std::sync::Arc;

use tracing::debug;

use crate::config::PermTreeConfig;
use crate::error::PermTreeError;
use crate::forest::ResourceForest;
use crate::handlers;
use crate::node::NodeId;
use crate::request::PermRequest;
use crate::state::{SelectedRows, StateChange};
use crate::store::{PermTreeStore, SubscriptionId};

/// Permission tree: the checkbox state engine behind a role's permission
/// picker.
///
/// - `emit(request)`: apply a request synchronously
/// - `with_forest(f)` / `selected_rows()`: read state
/// - `subscribe(pattern)`: observe state changes by path
///
/// # Examples
///
/// ```ignore
/// let tree = PermTree::new();
/// tree.subscribe("perm/#", |path, change| println!("{path} changed"));
///
/// tree.emit(LoadForestReq { roots })?;
/// tree.emit(SelectionChangeReq { selection: vec!["pms:device".into()] })?;
///
/// let granted = tree.permissions()?;
/// ```
pub struct PermTree {
    store: Arc<PermTreeStore>,
    config: PermTreeConfig,
}

impl PermTree {
    pub fn new() -> Self {
        Self::with_config(PermTreeConfig::default())
    }

    pub fn with_config(config: PermTreeConfig) -> Self {
        Self {
            store: Arc::new(PermTreeStore::new()),
            config,
        }
    }

    pub fn config(&self) -> &PermTreeConfig {
        &self.config
    }

    // ====================================================================
    // Requests
    // ====================================================================

    /// Route a request to its handler and apply it.
    ///
    /// Every request except load fails with `NotLoaded` until a forest
    /// has been loaded; a failed request leaves state untouched.
    pub fn emit(&self, request: impl Into<PermRequest>) -> Result<(), PermTreeError> {
        let request = request.into();
        debug!(path = request.path(), "emit");
        match request {
            PermRequest::Load(req) => handlers::handle_load(req, &self.store),
            PermRequest::SelectAll(req) => handlers::handle_select_all(req, &self.store),
            PermRequest::SelectionChange(req) => {
                handlers::handle_selection_change(&req, &self.store, self.config.search_scope)
            }
            PermRequest::Restore(req) => handlers::handle_restore(&req, &self.store),
        }
    }

    // ====================================================================
    // State
    // ====================================================================

    pub fn is_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn with_forest<R>(&self, f: impl FnOnce(&ResourceForest) -> R) -> Result<R, PermTreeError> {
        self.store.with_forest(f)
    }

    pub fn selected_rows(&self) -> SelectedRows {
        self.store.selected_rows()
    }

    /// Checked resource ids in pre-order, ready to save as a role's
    /// permission list.
    pub fn permissions(&self) -> Result<Vec<NodeId>, PermTreeError> {
        self.store.checked_ids()
    }

    // ====================================================================
    // Subscriptions
    // ====================================================================

    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateChange) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) {
        self.store.unsubscribe(pattern, id);
    }
}

impl Default for PermTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchScope;
    use crate::node::ResourceNode;
    use crate::request::*;
    use std::sync::Mutex;

    fn roots() -> Vec<ResourceNode> {
        vec![
            ResourceNode::new("sys").with_children(vec![
                ResourceNode::new("user").with_buttons(vec![ResourceNode::new("user:add")]),
            ]),
            ResourceNode::new("pms"),
        ]
    }

    fn ids(v: &[&str]) -> Vec<NodeId> {
        v.iter().map(|s| NodeId::from(*s)).collect()
    }

    #[test]
    fn new_tree_is_empty_and_unloaded() {
        let tree = PermTree::default();
        assert!(!tree.is_loaded());
        assert_eq!(tree.permissions(), Err(PermTreeError::NotLoaded));
        assert_eq!(tree.config().search_scope, SearchScope::Children);
    }

    #[test]
    fn requests_before_load_fail() {
        let tree = PermTree::new();
        let err = tree
            .emit(SelectionChangeReq {
                selection: ids(&["sys"]),
            })
            .unwrap_err();
        assert_eq!(err, PermTreeError::NotLoaded);
        let err = tree
            .emit(RestorePermissionsReq {
                permissions: ids(&["sys"]),
            })
            .unwrap_err();
        assert_eq!(err, PermTreeError::NotLoaded);
    }

    #[test]
    fn load_then_select() {
        let tree = PermTree::new();
        tree.emit(LoadForestReq { roots: roots() }).unwrap();
        tree.emit(SelectionChangeReq {
            selection: ids(&["user"]),
        })
        .unwrap();
        assert_eq!(tree.permissions().unwrap(), ids(&["user", "user:add"]));
        assert_eq!(tree.with_forest(|f| f.len()).unwrap(), 4);
    }

    #[test]
    fn config_scope_reaches_buttons() {
        let tree = PermTree::with_config(PermTreeConfig {
            search_scope: SearchScope::ChildrenAndButtons,
        });
        tree.emit(LoadForestReq { roots: roots() }).unwrap();
        tree.emit(SelectionChangeReq {
            selection: ids(&["user:add"]),
        })
        .unwrap();
        assert_eq!(tree.permissions().unwrap(), ids(&["user:add"]));
    }

    #[test]
    fn reload_replaces_forest() {
        let tree = PermTree::new();
        tree.emit(LoadForestReq { roots: roots() }).unwrap();
        tree.emit(SelectAllReq {
            selected_rows: ids(&["sys"]),
        })
        .unwrap();
        tree.emit(LoadForestReq {
            roots: vec![ResourceNode::new("only")],
        })
        .unwrap();
        assert!(tree.permissions().unwrap().is_empty());
        assert_eq!(tree.with_forest(|f| f.len()).unwrap(), 1);
    }

    #[test]
    fn reload_after_deep_forest() {
        let mut node = ResourceNode::new("n100000");
        for i in (0..100_000).rev() {
            node = ResourceNode::new(format!("n{i}")).with_children(vec![node]);
        }
        let tree = PermTree::new();
        tree.emit(LoadForestReq { roots: vec![node] }).unwrap();
        tree.emit(SelectAllReq {
            selected_rows: ids(&["n0"]),
        })
        .unwrap();
        assert_eq!(tree.permissions().unwrap().len(), 100_001);

        tree.emit(LoadForestReq { roots: vec![] }).unwrap();
        assert!(tree.permissions().unwrap().is_empty());
    }

    #[test]
    fn rows_subscriber_never_sees_half_applied_select_all() {
        let tree = Arc::new(PermTree::new());
        tree.emit(LoadForestReq { roots: roots() }).unwrap();

        let tree_c = tree.clone();
        let observed = Arc::new(Mutex::new(Vec::new()));
        let observed_c = observed.clone();
        tree.subscribe(SelectedRows::PATH, move |_, _| {
            observed_c
                .lock()
                .unwrap()
                .push((tree_c.selected_rows(), tree_c.permissions().unwrap().len()));
        });

        tree.emit(SelectAllReq {
            selected_rows: ids(&["sys"]),
        })
        .unwrap();
        tree.emit(SelectAllReq {
            selected_rows: vec![],
        })
        .unwrap();

        assert_eq!(
            *observed.lock().unwrap(),
            vec![
                (SelectedRows(ids(&["sys"])), 4),
                (SelectedRows::default(), 0),
            ]
        );
    }

    #[test]
    fn subscribers_see_each_write() {
        let tree = PermTree::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_c = seen.clone();
        let id = tree.subscribe("perm/#", move |path, _| {
            seen_c.lock().unwrap().push(path.to_string());
        });

        tree.emit(LoadForestReq { roots: roots() }).unwrap();
        tree.emit(SelectAllReq {
            selected_rows: ids(&["sys"]),
        })
        .unwrap();
        tree.unsubscribe("perm/#", id);
        tree.emit(SelectAllReq {
            selected_rows: vec![],
        })
        .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["perm/forest", "perm/selected", "perm/forest"]
        );
    }

    #[test]
    fn request_paths() {
        assert_eq!(
            PermRequest::from(LoadForestReq { roots: vec![] }).path(),
            "perm/load"
        );
        assert_eq!(
            PermRequest::from(SelectAllReq {
                selected_rows: vec![]
            })
            .path(),
            "perm/select-all"
        );
        assert_eq!(
            PermRequest::from(SelectionChangeReq { selection: vec![] }).path(),
            "perm/selection-change"
        );
        assert_eq!(
            PermRequest::from(RestorePermissionsReq {
                permissions: vec![]
            })
            .path(),
            "perm/restore"
        );
    }
}
