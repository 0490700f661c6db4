use serde::{Deserialize, Serialize};

/// Which edge kinds selection lookups may descend through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchScope {
    /// Only `children`. Buttons receive cascaded state but are never
    /// selection targets themselves.
    #[default]
    Children,
    /// `children` and `buttonItems`; buttons can be selected directly.
    ChildrenAndButtons,
}

impl SearchScope {
    pub fn includes_buttons(self) -> bool {
        matches!(self, SearchScope::ChildrenAndButtons)
    }
}

/// Runtime options for a `PermTree`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermTreeConfig {
    #[serde(default)]
    pub search_scope: SearchScope,
}
