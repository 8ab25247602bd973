//! hotcommit - A CLI tool that drafts commit messages from staged changes and
//! automates hotfix branches.
//!
//! # Overview
//!
//! `hotcommit message` sends the staged diff to a chat completion API and
//! shows the suggested commit message. `hotcommit hotfix` syncs `develop` and
//! the default branch, bumps the patch version in `package.json` and
//! `package-lock.json`, and creates a `hotfix/<version>` branch.

pub mod commit;
pub mod completion;
pub mod config;
pub mod error;
pub mod git;
pub mod hotfix;
pub mod host;

// Re-export commonly used types
pub use commit::CommitOutcome;
pub use config::{CommitConfig, HotfixConfig};
pub use error::{CommitMessageError, CompletionError, GitError, HostError, HotfixError, ManifestError};
pub use hotfix::HotfixOutcome;
pub use host::{CommandContext, Host};
