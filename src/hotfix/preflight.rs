//! Clean working tree check before the hotfix sequence starts.

use tracing::{debug, info};

use crate::error::HotfixError;
use crate::git::{dirty_paths, registered_submodule_paths, update_submodules};
use crate::host::CommandContext;

/// Result of the clean tree check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeState {
    /// Nothing differs from HEAD.
    Clean,
    /// Only submodule pointers differ; `updated` tells whether they were
    /// updated to their remote tips.
    SubmodulesOnly { updated: bool },
    /// Other paths differ; the sequence must stop.
    Dirty { paths: Vec<String> },
}

impl TreeState {
    pub fn can_proceed(&self) -> bool {
        !matches!(self, TreeState::Dirty { .. })
    }
}

/// Whether `path` belongs to a submodule.
///
/// A path matches when it contains `marker` (the naming convention used for
/// submodule directories) or when it is, or lies under, a registered
/// submodule path.
pub fn is_submodule_path(path: &str, marker: &str, registered: &[String]) -> bool {
    if !marker.is_empty() && path.contains(marker) {
        return true;
    }
    registered.iter().any(|sub| {
        path == sub
            || path
                .strip_prefix(sub.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Check the working tree and handle submodule-only changes.
///
/// Dirty non-submodule paths are reported through the host.
pub fn check_clean_tree(
    ctx: &CommandContext,
    submodule_marker: &str,
) -> Result<TreeState, HotfixError> {
    let paths = dirty_paths(ctx.git.as_ref())?;
    if paths.is_empty() {
        debug!("Working tree is clean");
        return Ok(TreeState::Clean);
    }

    let registered = registered_submodule_paths(&ctx.workspace);
    let submodules_only = paths
        .iter()
        .all(|p| is_submodule_path(p, submodule_marker, &registered));

    if submodules_only {
        let update = ctx
            .host
            .confirm("There are submodule changes. Update submodules?")?;
        if update {
            update_submodules(ctx.git.as_ref())?;
            info!("Updated submodules to their remote tips");
        }
        return Ok(TreeState::SubmodulesOnly { updated: update });
    }

    let quoted: Vec<String> = paths.iter().map(|p| format!("'{}'", p)).collect();
    ctx.host.error(&format!(
        "There are uncommitted changes - {}. Commit or stash them and try again.",
        quoted.join(",")
    ));

    Ok(TreeState::Dirty { paths })
}
