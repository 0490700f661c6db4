//! `permtree`: inspect and edit checkbox state of a permission resource tree.
//!
//! Usage:
//!   permtree -f <forest.json> [-o table|json] [--save] <command>
//!
//! The forest file is a JSON array of resource nodes
//! (`{ "id", "name", "checked", "children", "buttonItems" }`).

mod config;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use openerp_perm_tree::{
    LoadForestReq, NodeId, PermRequest, PermTree, ResourceNode, RestorePermissionsReq,
    SelectAllReq, SelectionChangeReq,
};
use tracing::info;

/// Permission tree tool.
#[derive(Parser, Debug)]
#[command(name = "permtree", about = "Permission resource tree checkbox tool")]
struct Cli {
    /// Forest JSON file.
    #[arg(short = 'f', long = "forest")]
    forest: PathBuf,

    /// Path to config file (default: ~/.openerp/permtree.toml).
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value_t = Output::Table)]
    output: Output,

    /// Write the resulting state back to the forest file.
    #[arg(long = "save", global = true)]
    save: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Output {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tree as loaded.
    Show,

    /// Replace the selection: clear everything, then check each id's subtree.
    Select {
        /// Resource ids.
        ids: Vec<String>,
    },

    /// Check every resource (or clear every resource with --none).
    SelectAll {
        #[arg(long)]
        none: bool,
    },

    /// Check exactly the given ids (a saved permission list), no cascading.
    Restore {
        /// Resource ids.
        ids: Vec<String>,
    },

    /// Print checked resource ids.
    Permissions,
}

impl Commands {
    /// The request this command emits, if any. `root_ids` are the
    /// top-level rows, reported as selected by a select-all.
    fn request(&self, root_ids: Vec<NodeId>) -> Option<PermRequest> {
        match self {
            Commands::Show | Commands::Permissions => None,
            Commands::Select { ids: raw } => {
                Some(SelectionChangeReq { selection: to_ids(raw) }.into())
            }
            Commands::SelectAll { none } => {
                let selected_rows = if *none { Vec::new() } else { root_ids };
                Some(SelectAllReq { selected_rows }.into())
            }
            Commands::Restore { ids: raw } => {
                Some(RestorePermissionsReq { permissions: to_ids(raw) }.into())
            }
        }
    }
}

fn to_ids(raw: &[String]) -> Vec<NodeId> {
    raw.iter().map(|s| NodeId::from(s.as_str())).collect()
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let tree_config = config::load(&config_path)?;
    info!(scope = ?tree_config.search_scope, "configuration loaded");

    let content = std::fs::read_to_string(&cli.forest)
        .with_context(|| format!("failed to read {}", cli.forest.display()))?;
    let roots: Vec<ResourceNode> = serde_json::from_str(&content)
        .with_context(|| format!("invalid forest JSON in {}", cli.forest.display()))?;

    let tree = PermTree::with_config(tree_config);
    tree.emit(LoadForestReq { roots })
        .context("failed to load forest")?;

    let root_ids: Vec<NodeId> =
        tree.with_forest(|f| f.roots().iter().map(|n| n.id.clone()).collect())?;
    if let Some(request) = cli.command.request(root_ids) {
        let path = request.path();
        tree.emit(request)
            .with_context(|| format!("{} failed", path))?;
    }

    match (&cli.command, cli.output) {
        (Commands::Permissions, Output::Table) => {
            for id in tree.permissions()? {
                println!("{}", id);
            }
        }
        (Commands::Permissions, Output::Json) => {
            println!("{}", serde_json::to_string_pretty(&tree.permissions()?)?);
        }
        (_, Output::Table) => print!("{}", tree.with_forest(render::render_table)?),
        (_, Output::Json) => println!("{}", tree.with_forest(|f| f.to_json_pretty())??),
    }

    if cli.save {
        let json = tree.with_forest(|f| f.to_json_pretty())??;
        std::fs::write(&cli.forest, json + "\n")
            .with_context(|| format!("failed to write {}", cli.forest.display()))?;
        info!("Saved {}", cli.forest.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots() -> Vec<NodeId> {
        vec![NodeId::from("sys"), NodeId::from("pms")]
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn parses_select_with_global_flags() {
        let cli = parse(&["permtree", "-f", "tree.json", "select", "a", "b", "-o", "json"]);
        assert_eq!(cli.forest, PathBuf::from("tree.json"));
        assert_eq!(cli.output, Output::Json);
        assert!(!cli.save);
        match cli.command {
            Commands::Select { ids } => assert_eq!(ids, vec!["a", "b"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn forest_is_required() {
        assert!(Cli::try_parse_from(["permtree", "show"]).is_err());
    }

    #[test]
    fn select_all_reports_root_rows() {
        let cli = parse(&["permtree", "-f", "t.json", "select-all", "--none"]);
        match cli.command.request(roots()) {
            Some(PermRequest::SelectAll(req)) => assert!(req.selected_rows.is_empty()),
            other => panic!("unexpected request {:?}", other),
        }
        let cli = parse(&["permtree", "-f", "t.json", "select-all"]);
        match cli.command.request(roots()) {
            Some(PermRequest::SelectAll(req)) => assert_eq!(req.selected_rows, roots()),
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn read_only_commands_emit_nothing() {
        assert!(parse(&["permtree", "-f", "t.json", "show"]).command.request(roots()).is_none());
        assert!(
            parse(&["permtree", "-f", "t.json", "permissions"])
                .command
                .request(roots())
                .is_none()
        );
    }

    #[test]
    fn restore_maps_ids() {
        let cli = parse(&["permtree", "-f", "t.json", "restore", "x", "y"]);
        match cli.command.request(roots()) {
            Some(PermRequest::Restore(req)) => {
                assert_eq!(req.permissions, vec![NodeId::from("x"), NodeId::from("y")])
            }
            other => panic!("unexpected request {:?}", other),
        }
    }
}
