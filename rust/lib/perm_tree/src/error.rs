use thiserror::Error;

use crate::node::NodeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermTreeError {
    #[error("resource forest is not loaded")]
    NotLoaded,

    #[error("duplicate resource id: {0}")]
    DuplicateId(NodeId),

    #[error("resource id must not be empty")]
    EmptyId,

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for PermTreeError {
    fn from(e: serde_json::Error) -> Self {
        PermTreeError::Parse(e.to_string())
    }
}
