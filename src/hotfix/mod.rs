//! Hotfix pipeline: sync branches, bump the patch version, branch off.
//!
//! Steps run in order and each is a precondition for the next. The first
//! failure aborts the sequence; steps already applied are not rolled back.

pub mod manifest;
pub mod preflight;

use semver::Version;
use tracing::{error, info};

use crate::config::HotfixConfig;
use crate::error::{HotfixError, error_chain};
use crate::git::{checkout, default_branch, pull};
use crate::host::CommandContext;

use self::manifest::bump_manifests;
use self::preflight::{TreeState, check_clean_tree};

/// Progress added by each reported step.
const STEP_INCREMENT: u32 = 20;

/// How a hotfix run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotfixOutcome {
    /// The branch creation command was handed to the terminal.
    Dispatched { version: Version, branch: String },
    /// Uncommitted changes outside submodules; nothing after the check ran.
    DirtyWorkingTree { paths: Vec<String> },
}

/// The branch name for a hotfix version.
pub fn hotfix_branch_name(prefix: &str, version: &Version) -> String {
    format!("{}{}", prefix, version)
}

/// The literal command that creates and switches to the hotfix branch.
pub fn branch_command(branch: &str) -> String {
    format!("git checkout -b {}", branch)
}

/// Run the hotfix sequence.
///
/// Steps:
/// 1. Clean tree check (submodule-only changes may be updated)
/// 2. `git checkout <secondary>` + `git pull <remote> <secondary>`
/// 3. Resolve the remote default branch, check it out and pull it
/// 4. Bump the patch version in both manifests
/// 5. Dispatch `git checkout -b hotfix/<version>` to the terminal
pub fn run_hotfix(ctx: &CommandContext, config: &HotfixConfig) -> Result<HotfixOutcome, HotfixError> {
    let git = ctx.git.as_ref();
    let host = ctx.host.as_ref();

    // ── Stage 1: Clean tree ──
    let tree = check_clean_tree(ctx, &config.submodule_marker)?;
    if !tree.can_proceed() {
        let paths = match tree {
            TreeState::Dirty { paths } => paths,
            _ => Vec::new(),
        };
        info!("Stopping: {} uncommitted path(s)", paths.len());
        return Ok(HotfixOutcome::DirtyWorkingTree { paths });
    }

    // ── Stage 2: Secondary branch ──
    host.progress(
        STEP_INCREMENT,
        &format!("Pulling the {} branch...", config.secondary_branch),
    );
    checkout(git, &config.secondary_branch)?;
    pull(git, &config.remote, &config.secondary_branch)?;

    // ── Stage 3: Default branch ──
    let primary = default_branch(git, &config.remote)?;
    host.progress(STEP_INCREMENT, &format!("Pulling the {} branch...", primary));
    checkout(git, &primary)?;
    pull(git, &config.remote, &primary)?;

    // ── Stage 4: Version bump ──
    host.progress(STEP_INCREMENT, "Updating package versions...");
    let version = bump_manifests(
        &ctx.workspace.join(&config.manifest),
        &ctx.workspace.join(&config.lock_manifest),
    )?;
    info!("Bumped {} and {} to {}", config.manifest, config.lock_manifest, version);

    // ── Stage 5: Branch creation ──
    host.progress(STEP_INCREMENT, "Creating the hotfix branch...");
    let branch = hotfix_branch_name(&config.branch_prefix, &version);
    host.send_to_terminal(&branch_command(&branch))?;

    Ok(HotfixOutcome::Dispatched { version, branch })
}

/// Run [`run_hotfix`] and surface any failure through the host.
pub fn run_hotfix_reported(
    ctx: &CommandContext,
    config: &HotfixConfig,
) -> Result<HotfixOutcome, HotfixError> {
    match run_hotfix(ctx, config) {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            let text = error_chain(&e);
            error!("Hotfix failed: {}", text);
            ctx.host.error(&text);
            Err(e)
        }
    }
}
