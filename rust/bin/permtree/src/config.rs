//! Tool configuration.
//!
//! Reads `~/.openerp/permtree.toml`:
//!
//! ```toml
//! search_scope = "children-and-buttons"
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use openerp_perm_tree::PermTreeConfig;

/// Default config file path: ~/.openerp/permtree.toml.
pub fn default_path() -> PathBuf {
    dirs_path().join("permtree.toml")
}

/// Load config from disk, or return defaults if the file doesn't exist.
pub fn load(path: &Path) -> anyhow::Result<PermTreeConfig> {
    if !path.exists() {
        return Ok(PermTreeConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: PermTreeConfig =
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Return the OpenERP config directory (~/.openerp).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".openerp")
}
