//! Commit message prompt and request construction.

use crate::git::StagedChanges;

use super::client::{ChatMessage, ChatRequest};

/// Fixed instruction sent as the system message.
pub const COMMIT_SYSTEM_PROMPT: &str = "\
You write a commit message from a set of code changes. \
The commit message must be at most 100 characters including spaces. \
Use the format: <type>: <subject>\n\
The type must be one of the following, chosen to match the change:\n\
feat->add a new feature,\
fix->fix a bug,\
docs->change documentation,\
style->change code style (no behavior change),\
refactor->refactor code,\
test->change test code,\
chore->other maintenance,\
perf->improve performance,\
ci->change CI configuration,\
build->change the build or packages (ex: gulp, broccoli, npm),\
temp->temporary work\n\n\
The subject summarises the change in one sentence in the imperative mood \
and does not end with a period. Example:\n\n\
feat: add the plugin \n\n";

/// Prefix of the user message, followed by the staged changes.
pub const DIFF_PREAMBLE: &str = "my diff ---\n\n";

/// Build the two-message request for the given staged changes.
pub fn build_request(model: &str, temperature: f32, staged: &StagedChanges) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        temperature,
        stream: false,
        messages: vec![
            ChatMessage::system(COMMIT_SYSTEM_PROMPT),
            ChatMessage::user(format!("{}{}", DIFF_PREAMBLE, staged.combined())),
        ],
    }
}
