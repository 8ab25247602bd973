//! Cosmetic progress messages shown while the completion request runs.
//!
//! The messages follow a fixed timer schedule, not the request's real phases.
//! They run as a separate task owned by a [`Presentation`] guard; dropping
//! the guard aborts the task, so nothing is reported once the request has
//! settled, whichever way it settled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::host::Host;

/// One scheduled progress message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    /// Delay from the start of the presentation.
    pub delay: Duration,
    pub increment: u32,
    pub message: String,
}

/// The schedule shown while waiting for a commit message.
pub fn commit_schedule(model: &str) -> Vec<ProgressStep> {
    let messages = [
        (0, "Requesting the OpenAI API...".to_string()),
        (40, "Requesting chat completions...".to_string()),
        (60, format!("Using the {} model...", model)),
        (80, "The OpenAI API queue is long...".to_string()),
    ];

    messages
        .into_iter()
        .enumerate()
        .map(|(index, (increment, message))| ProgressStep {
            delay: Duration::from_secs(index as u64),
            increment,
            message,
        })
        .collect()
}

/// Running presentation task. Aborted on drop.
pub struct Presentation {
    handle: JoinHandle<()>,
}

impl Presentation {
    /// Spawn the presentation task on the current tokio runtime.
    pub fn start(host: Arc<dyn Host>, schedule: Vec<ProgressStep>) -> Self {
        let started = Instant::now();
        let handle = tokio::spawn(async move {
            for step in schedule {
                sleep_until(started + step.delay).await;
                host.progress(step.increment, &step.message);
            }
        });
        Self { handle }
    }
}

impl Drop for Presentation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
