//! Staged change collection for commit message generation.

use tracing::debug;

use crate::error::GitError;

use super::runner::GitRunner;

const ADDED_NAMES_ARGS: [&str; 4] = ["diff", "--staged", "--diff-filter=A", "--name-only"];
const MODIFIED_DIFF_ARGS: [&str; 4] = ["diff", "--staged", "--diff-filter=CM", "--unified=0"];

/// Staged changes as opaque text, exactly as git printed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedChanges {
    /// Names of newly added files, one per line.
    pub added_names: String,
    /// Zero-context unified diff of copied and modified files.
    pub modified_diff: String,
}

impl StagedChanges {
    pub fn is_empty(&self) -> bool {
        self.added_names.is_empty() && self.modified_diff.is_empty()
    }

    /// The text sent to the model: added names followed by the diff.
    pub fn combined(&self) -> String {
        format!("{}{}", self.added_names, self.modified_diff)
    }
}

/// Collect the staged added-file names and the staged modification diff.
pub fn collect_staged_changes(git: &dyn GitRunner) -> Result<StagedChanges, GitError> {
    let added_names = git.run(&ADDED_NAMES_ARGS)?;
    let modified_diff = git.run(&MODIFIED_DIFF_ARGS)?;

    debug!(
        "Staged changes: {} chars of added names, {} chars of diff",
        added_names.len(),
        modified_diff.len()
    );

    Ok(StagedChanges {
        added_names,
        modified_diff,
    })
}
