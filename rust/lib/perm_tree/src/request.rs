//! Requests the table widget emits.

use crate::node::{NodeId, ResourceNode};

/// Hand a freshly loaded forest to the store.
#[derive(Debug, Clone)]
pub struct LoadForestReq {
    pub roots: Vec<ResourceNode>,
}

impl LoadForestReq {
    pub const PATH: &'static str = "perm/load";
}

/// The header "select all" checkbox toggled.
///
/// Only emptiness of `selected_rows` matters for the forest: non-empty
/// checks everything, empty clears everything.
#[derive(Debug, Clone)]
pub struct SelectAllReq {
    pub selected_rows: Vec<NodeId>,
}

impl SelectAllReq {
    pub const PATH: &'static str = "perm/select-all";
}

/// The table's row selection changed; `selection` is the full new set.
#[derive(Debug, Clone)]
pub struct SelectionChangeReq {
    pub selection: Vec<NodeId>,
}

impl SelectionChangeReq {
    pub const PATH: &'static str = "perm/selection-change";
}

/// Restore checkbox state from a saved permission list (e.g. a role's
/// `permissions`). Listed ids are checked exactly, without cascading.
#[derive(Debug, Clone)]
pub struct RestorePermissionsReq {
    pub permissions: Vec<NodeId>,
}

impl RestorePermissionsReq {
    pub const PATH: &'static str = "perm/restore";
}

#[derive(Debug, Clone)]
pub enum PermRequest {
    Load(LoadForestReq),
    SelectAll(SelectAllReq),
    SelectionChange(SelectionChangeReq),
    Restore(RestorePermissionsReq),
}

impl PermRequest {
    pub fn path(&self) -> &'static str {
        match self {
            PermRequest::Load(_) => LoadForestReq::PATH,
            PermRequest::SelectAll(_) => SelectAllReq::PATH,
            PermRequest::SelectionChange(_) => SelectionChangeReq::PATH,
            PermRequest::Restore(_) => RestorePermissionsReq::PATH,
        }
    }
}

impl From<LoadForestReq> for PermRequest {
    fn from(req: LoadForestReq) -> Self {
        PermRequest::Load(req)
    }
}

impl From<SelectAllReq> for PermRequest {
    fn from(req: SelectAllReq) -> Self {
        PermRequest::SelectAll(req)
    }
}

impl From<SelectionChangeReq> for PermRequest {
    fn from(req: SelectionChangeReq) -> Self {
        PermRequest::SelectionChange(req)
    }
}

impl From<RestorePermissionsReq> for PermRequest {
    fn from(req: RestorePermissionsReq) -> Self {
        PermRequest::Restore(req)
    }
}
