//! Host surfaces the commands talk to: notifications, prompts, clipboard,
//! browser, and terminal.
//!
//! Both commands receive a [`CommandContext`] instead of reaching for
//! process-wide state, so tests can drive them with a fixture host.

pub mod console;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::HostError;
use crate::git::GitRunner;

pub use console::ConsoleHost;

/// User-facing surfaces of the environment a command runs in.
pub trait Host: Send + Sync {
    /// Show an informational message.
    fn info(&self, message: &str);

    /// Show an error message.
    fn error(&self, message: &str);

    /// Report progress. `increment` is the percentage added by this step.
    fn progress(&self, increment: u32, message: &str);

    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str) -> Result<bool, HostError>;

    fn copy_to_clipboard(&self, text: &str) -> Result<(), HostError>;

    fn open_url(&self, url: &str) -> Result<(), HostError>;

    /// Hand a command line to the interactive terminal without waiting for it.
    fn send_to_terminal(&self, command: &str) -> Result<(), HostError>;
}

/// Everything a command needs from its surroundings.
#[derive(Clone)]
pub struct CommandContext {
    /// Root of the workspace the command operates on.
    pub workspace: PathBuf,
    pub host: Arc<dyn Host>,
    pub git: Arc<dyn GitRunner>,
}

impl CommandContext {
    pub fn new(workspace: impl Into<PathBuf>, host: Arc<dyn Host>, git: Arc<dyn GitRunner>) -> Self {
        Self {
            workspace: workspace.into(),
            host,
            git,
        }
    }
}
