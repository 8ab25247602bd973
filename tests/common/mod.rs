//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};

use hotcommit::{Host, HostError};

/// Run a git command in `dir` for test setup, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    /// Bare remote, once [`TestRepo::with_origin`] has been called.
    pub remote: Option<tempfile::TempDir>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, on `main`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        Self {
            dir,
            repo,
            remote: None,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file relative to the repository root.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&full, content).expect("Failed to write file");
        full
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).expect("Failed to read file")
    }

    /// Add a path to the index.
    pub fn stage(&self, path: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write and stage files, then commit them on HEAD. Returns the commit OID.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Oid {
        for (path, content) in files {
            self.write(path, content);
            self.stage(path);
        }

        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo.branch(name, &commit, true).expect("Failed to create branch");
    }

    /// Point HEAD at a local branch and update the working tree.
    pub fn switch(&self, name: &str) {
        git(self.path(), &["checkout", "-q", name]);
    }

    pub fn current_branch(&self) -> String {
        git(self.path(), &["rev-parse", "--abbrev-ref", "HEAD"])
            .trim()
            .to_string()
    }

    /// Create a bare `origin`, push `branches` to it, and record
    /// `default_branch` as `origin/HEAD`.
    pub fn with_origin(mut self, branches: &[&str], default_branch: &str) -> Self {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");

        let url = remote_dir.path().to_str().expect("Invalid remote path");
        git(self.path(), &["remote", "add", "origin", url]);

        let mut push = vec!["push", "-q", "origin"];
        push.extend_from_slice(branches);
        git(self.path(), &push);
        git(self.path(), &["fetch", "-q", "origin"]);
        git(self.path(), &["remote", "set-head", "origin", default_branch]);

        self.remote = Some(remote_dir);
        self
    }
}

/// A single interaction with the host, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Info(String),
    Error(String),
    Progress(u32, String),
    Confirm(String),
    Clipboard(String),
    OpenUrl(String),
    Terminal(String),
}

/// Host that records interactions and answers prompts from a queue.
#[derive(Default)]
pub struct TestHost {
    events: Mutex<Vec<HostEvent>>,
    answers: Mutex<VecDeque<bool>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(answers: &[bool]) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            answers: Mutex::new(answers.iter().copied().collect()),
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn terminal_commands(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Terminal(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                HostEvent::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Host for TestHost {
    fn info(&self, message: &str) {
        self.record(HostEvent::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.record(HostEvent::Error(message.to_string()));
    }

    fn progress(&self, increment: u32, message: &str) {
        self.record(HostEvent::Progress(increment, message.to_string()));
    }

    fn confirm(&self, prompt: &str) -> Result<bool, HostError> {
        self.record(HostEvent::Confirm(prompt.to_string()));
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or(false))
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), HostError> {
        self.record(HostEvent::Clipboard(text.to_string()));
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<(), HostError> {
        self.record(HostEvent::OpenUrl(url.to_string()));
        Ok(())
    }

    fn send_to_terminal(&self, command: &str) -> Result<(), HostError> {
        self.record(HostEvent::Terminal(command.to_string()));
        Ok(())
    }
}
