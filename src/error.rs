//! Error types for hotcommit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git subprocess calls.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {command} exited with {}: {stderr}",
             code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git {command} produced non-UTF-8 output")]
    InvalidOutput { command: String },

    #[error("Could not resolve the default branch of remote '{remote}' from '{reference}'")]
    DefaultBranchUnresolved { remote: String, reference: String },

    #[error("No git repository found at {}. Run hotcommit from within a git repository.", path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("{} is a bare repository; a working tree is required", path.display())]
    BareRepository { path: PathBuf },

    #[error("Could not read the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Errors from the chat completion API.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Chat completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Chat completion API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Chat completion API returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from reading or rewriting version manifests.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("{} has no string \"version\" field", path.display())]
    MissingVersion { path: PathBuf },

    #[error("{} has version '{version}' which is not major.minor.patch: {source}", path.display())]
    InvalidVersion {
        path: PathBuf,
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("{} has version {version}, whose patch number cannot be incremented", path.display())]
    VersionOverflow { path: PathBuf, version: String },
}

/// Errors from the host surfaces (prompts, clipboard, terminal, browser).
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error(
        "No clipboard tool found. Install one of: pbcopy, wl-copy, xclip, xsel"
    )]
    ClipboardUnavailable,

    #[error("Clipboard tool {tool} failed: {reason}")]
    ClipboardFailed { tool: String, reason: String },

    #[error("Failed to open {url}: {source}")]
    OpenUrl {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to dispatch terminal command '{command}': {source}")]
    Terminal {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the commit message command.
#[derive(Error, Debug)]
pub enum CommitMessageError {
    #[error("Failed to collect staged changes: {0}")]
    Git(#[from] GitError),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors from the hotfix command.
#[derive(Error, Debug)]
pub enum HotfixError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to bump the package version: {0}")]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Errors from configuration overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Temperature must be between 0 and 2, got {0}")]
    TemperatureOutOfRange(f32),

    #[error("Model name must not be empty")]
    EmptyModel,

    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Render an error followed by its `source()` chain, one cause per line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // transparent/#[from] wrappers often repeat their source verbatim
        if !text.contains(&cause_text) {
            text.push_str("\n  caused by: ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
