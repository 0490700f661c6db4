//! Request handler implementations.
//!
//! Each handler runs to completion synchronously. The store notifies
//! subscribers once per written path.

use tracing::{debug, info, warn};

use crate::config::SearchScope;
use crate::error::PermTreeError;
use crate::forest::ResourceForest;
use crate::request::*;
use crate::state::SelectedRows;
use crate::store::PermTreeStore;

/// Handle `perm/load`.
pub fn handle_load(req: LoadForestReq, store: &PermTreeStore) -> Result<(), PermTreeError> {
    let forest = ResourceForest::new(req.roots)?;
    info!(nodes = forest.len(), roots = forest.roots().len(), "resource forest loaded");
    store.replace_forest(forest);
    Ok(())
}

/// Handle `perm/select-all`.
pub fn handle_select_all(req: SelectAllReq, store: &PermTreeStore) -> Result<(), PermTreeError> {
    let checked = !req.selected_rows.is_empty();
    store.update_with_rows(SelectedRows(req.selected_rows), |forest| {
        forest.set_all(checked)
    })?;
    debug!(checked, "select-all applied");
    Ok(())
}

/// Handle `perm/selection-change`.
pub fn handle_selection_change(
    req: &SelectionChangeReq,
    store: &PermTreeStore,
    scope: SearchScope,
) -> Result<(), PermTreeError> {
    let missing = store.update_forest(|forest| {
        forest.set_all(false);
        req.selection
            .iter()
            .filter(|id| !forest.find_and_update(id, true, scope))
            .cloned()
            .collect::<Vec<_>>()
    })?;
    debug!(selected = req.selection.len(), ?missing, "selection applied");
    Ok(())
}

/// Handle `perm/restore`.
pub fn handle_restore(
    req: &RestorePermissionsReq,
    store: &PermTreeStore,
) -> Result<(), PermTreeError> {
    let missing = store.update_forest(|forest| forest.check_exact(&req.permissions))?;
    if !missing.is_empty() {
        warn!(?missing, "saved permissions reference unknown resources");
    }
    debug!(restored = req.permissions.len() - missing.len(), "permissions restored");
    Ok(())
}
