//! The commit message command: staged changes in, candidate message out.

use std::env;

use tracing::{debug, error, info, warn};

use crate::completion::{CompletionClient, build_request};
use crate::config::{API_KEYS_URL, CommitConfig};
use crate::error::{CommitMessageError, error_chain};
use crate::git::collect_staged_changes;
use crate::host::CommandContext;

use super::progress::{Presentation, commit_schedule};

/// How a commit message run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing staged; no request was sent.
    NoStagedChanges,
    /// The API key variable is unset or empty; no request was sent.
    MissingCredential,
    /// The request would exceed the size limit; no request was sent.
    TooLarge { size: usize, limit: usize },
    /// The model's answer (empty if the response carried no content).
    Generated(String),
}

/// Look up the API key. Unset, empty, and whitespace-only values count as missing.
pub fn resolve_api_key(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

/// Generate a commit message for the staged changes in the workspace.
///
/// Steps:
/// 1. Collect staged added-file names and the zero-context diff
/// 2. Stop if nothing is staged
/// 3. Stop if the API key is missing (offer the key page)
/// 4. Stop if the request exceeds `max_input_chars`
/// 5. Send one request, show the result and offer to copy it
pub async fn generate_commit_message(
    ctx: &CommandContext,
    client: &dyn CompletionClient,
    config: &CommitConfig,
) -> Result<CommitOutcome, CommitMessageError> {
    let host = ctx.host.as_ref();

    let staged = collect_staged_changes(ctx.git.as_ref())?;
    if staged.is_empty() {
        host.info("No staged changes found.");
        return Ok(CommitOutcome::NoStagedChanges);
    }

    let Some(api_key) = resolve_api_key(&config.api_key_var) else {
        offer_key_page(ctx, &config.api_key_var);
        return Ok(CommitOutcome::MissingCredential);
    };

    let request = build_request(&config.model, config.temperature, &staged);
    let size = request.input_size();
    if size > config.max_input_chars {
        host.info(&format!(
            "Too long diff. Please commit or stash your changes. ({} characters, limit {})",
            size, config.max_input_chars
        ));
        return Ok(CommitOutcome::TooLarge {
            size,
            limit: config.max_input_chars,
        });
    }

    debug!("Sending {} characters to {}", size, config.api_url);

    let response = {
        let _presentation = Presentation::start(ctx.host.clone(), commit_schedule(&config.model));
        client.complete(&api_key, &request).await
    }?;

    let message = response.first_content();
    info!("Generated commit message ({} chars)", message.chars().count());

    host.info(&format!("Result \"{}\"", message));
    if host.confirm("Copy to clipboard?")? {
        match host.copy_to_clipboard(&message) {
            Ok(()) => host.info("Text copied to clipboard!"),
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                host.error(&e.to_string());
            }
        }
    }

    Ok(CommitOutcome::Generated(message))
}

/// Run [`generate_commit_message`] and surface any failure through the host.
pub async fn run_commit_message(
    ctx: &CommandContext,
    client: &dyn CompletionClient,
    config: &CommitConfig,
) -> Result<CommitOutcome, CommitMessageError> {
    match generate_commit_message(ctx, client, config).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            let text = error_chain(&e);
            error!("Commit message generation failed: {}", text);
            ctx.host.error(&text);
            Err(e)
        }
    }
}

fn offer_key_page(ctx: &CommandContext, var: &str) {
    let host = ctx.host.as_ref();
    host.info(&format!(
        "{} is not set. Create an API key on the OpenAI API page and export it as an environment variable.",
        var
    ));

    match host.confirm("Open the OpenAI API keys page?") {
        Ok(true) => {
            if let Err(e) = host.open_url(API_KEYS_URL) {
                warn!("{}", e);
                host.error(&e.to_string());
            }
        }
        Ok(false) => {}
        Err(e) => warn!("{}", e),
    }
}
