//! Terminal-backed host used by the CLI.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};

use dialoguer::Confirm;
use tracing::{debug, info};

use crate::error::HostError;

use super::Host;

/// Clipboard tools tried in order, with the arguments that make them read stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Notifications on stdout/stderr, prompts through dialoguer.
pub struct ConsoleHost {
    workdir: PathBuf,
    interactive: bool,
    percent: AtomicU32,
}

impl ConsoleHost {
    /// `workdir` is where terminal commands run.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            interactive: std::io::stdin().is_terminal(),
            percent: AtomicU32::new(0),
        }
    }
}

impl Host for ConsoleHost {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn progress(&self, increment: u32, message: &str) {
        let total = self.percent.fetch_add(increment, Ordering::Relaxed) + increment;
        eprintln!("  [{:>3}%] {}", total.min(100), message);
    }

    fn confirm(&self, prompt: &str) -> Result<bool, HostError> {
        if !self.interactive {
            debug!("stdin is not a terminal, answering no to: {}", prompt);
            return Ok(false);
        }

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| HostError::Prompt(e.to_string()))
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), HostError> {
        let (tool, args) = CLIPBOARD_TOOLS
            .iter()
            .find(|(tool, _)| which::which(tool).is_ok())
            .ok_or(HostError::ClipboardUnavailable)?;

        pipe_to_tool(tool, args, text)
    }

    fn open_url(&self, url: &str) -> Result<(), HostError> {
        open::that(url).map_err(|source| HostError::OpenUrl {
            url: url.to_string(),
            source,
        })
    }

    fn send_to_terminal(&self, command: &str) -> Result<(), HostError> {
        info!("Dispatching to terminal: {}", command);

        let mut shell = shell_command(command);
        // The child is not waited on; its outcome is not observed.
        shell
            .current_dir(&self.workdir)
            .spawn()
            .map(|_child| ())
            .map_err(|source| HostError::Terminal {
                command: command.to_string(),
                source,
            })
    }
}

/// Write `text` to the tool's stdin and wait for the tool itself to exit.
///
/// Only the exit status is observed. xclip and wl-copy leave a forked child
/// serving the selection, and that child keeps any inherited pipe open.
fn pipe_to_tool(tool: &str, args: &[&str], text: &str) -> Result<(), HostError> {
    let failed = |reason: String| HostError::ClipboardFailed {
        tool: tool.to_string(),
        reason,
    };

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| failed(e.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| failed(e.to_string()))?;
    }

    let status = child.wait().map_err(|e| failed(e.to_string()))?;
    if !status.success() {
        return Err(failed(format!("exited with {}", status)));
    }

    Ok(())
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_accumulates_and_caps() {
        let host = ConsoleHost::new(std::env::temp_dir());
        host.progress(60, "first");
        host.progress(60, "second");
        assert_eq!(host.percent.load(Ordering::Relaxed), 120);
    }

    #[test]
    fn test_confirm_without_terminal_answers_no() {
        let host = ConsoleHost {
            workdir: std::env::temp_dir(),
            interactive: false,
            percent: AtomicU32::new(0),
        };
        assert!(!host.confirm("Proceed?").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_tool_returns_when_tool_exits() {
        // Leaves a background child holding the inherited descriptors
        let started = std::time::Instant::now();
        pipe_to_tool("sh", &["-c", "cat >/dev/null; sleep 20 & exit 0"], "feat: x").unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_pipe_to_tool_reports_failure_status() {
        let err = pipe_to_tool("sh", &["-c", "cat >/dev/null; exit 3"], "x").unwrap_err();
        assert!(matches!(err, HostError::ClipboardFailed { ref tool, .. } if tool == "sh"));
        assert!(err.to_string().contains("3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_send_to_terminal_runs_in_workdir() {
        let dir = tempfile::tempdir().unwrap();
        let host = ConsoleHost::new(dir.path());
        host.send_to_terminal("touch dispatched.txt").unwrap();

        // Fire-and-forget: poll briefly for the side effect
        let marker = dir.path().join("dispatched.txt");
        for _ in 0..50 {
            if marker.exists() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        assert!(marker.exists());
    }
}
