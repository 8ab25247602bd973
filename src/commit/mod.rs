//! AI-generated commit messages for staged changes.

pub mod flow;
pub mod progress;

pub use flow::{CommitOutcome, generate_commit_message, resolve_api_key, run_commit_message};
pub use progress::{Presentation, ProgressStep, commit_schedule};
