//! Branch synchronisation commands used by the hotfix sequence.

use crate::error::GitError;

use super::runner::GitRunner;

pub fn checkout(git: &dyn GitRunner, branch: &str) -> Result<(), GitError> {
    git.run(&["checkout", branch])?;
    Ok(())
}

pub fn pull(git: &dyn GitRunner, remote: &str, branch: &str) -> Result<(), GitError> {
    git.run(&["pull", remote, branch])?;
    Ok(())
}

/// Resolve the remote's default branch from `refs/remotes/<remote>/HEAD`.
pub fn default_branch(git: &dyn GitRunner, remote: &str) -> Result<String, GitError> {
    let reference = format!("refs/remotes/{}/HEAD", remote);
    let target = git.run(&["symbolic-ref", &reference])?;
    let target = target.trim();

    let prefix = format!("refs/remotes/{}/", remote);
    match target.strip_prefix(&prefix) {
        Some(branch) if !branch.is_empty() => Ok(branch.to_string()),
        _ => Err(GitError::DefaultBranchUnresolved {
            remote: remote.to_string(),
            reference: target.to_string(),
        }),
    }
}

/// Update every submodule to its remote tip.
pub fn update_submodules(git: &dyn GitRunner) -> Result<(), GitError> {
    git.run(&["submodule", "update", "--remote"])?;
    Ok(())
}
