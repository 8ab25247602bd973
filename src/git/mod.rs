//! Git operations: the `git` binary for every mutation and query the
//! commands perform, git2 for workspace discovery and submodule lookup.

pub mod branch;
pub mod runner;
pub mod staged;
pub mod status;
pub mod workspace;

pub use branch::{checkout, default_branch, pull, update_submodules};
pub use runner::{GitRunner, SystemGit};
pub use staged::{StagedChanges, collect_staged_changes};
pub use status::{dirty_paths, registered_submodule_paths};
pub use workspace::discover_workspace;
