//! Running the system `git` binary.
//!
//! All commands use `std::process::Command` to shell out to `git`, inheriting
//! the user's existing git config, SSH agent, and credential store. Arguments
//! are passed as a fixed vector, never through a shell.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Runs git subcommands and returns their stdout.
pub trait GitRunner: Send + Sync {
    /// Run `git <args>` and return stdout. Non-zero exit is an error.
    fn run(&self, args: &[&str]) -> Result<String, GitError>;
}

/// Runs the real `git` binary inside a working directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!("git {} (in {})", command, self.workdir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::CommandFailed {
                command,
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput { command })
    }
}
