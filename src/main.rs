//! hotcommit - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use hotcommit::commit::run_commit_message;
use hotcommit::completion::HttpCompletionClient;
use hotcommit::git::{SystemGit, discover_workspace};
use hotcommit::hotfix::run_hotfix_reported;
use hotcommit::host::ConsoleHost;
use hotcommit::{CommandContext, CommitConfig, CommitOutcome, HotfixConfig, HotfixOutcome};

/// Draft commit messages and start hotfix branches.
#[derive(Parser, Debug)]
#[command(name = "hotcommit")]
#[command(about = "Draft commit messages from staged changes and start hotfix branches")]
#[command(version)]
struct Cli {
    /// Workspace to operate on (defaults to the enclosing git repository)
    #[arg(short = 'C', long, global = true)]
    workspace: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a commit message for the staged changes
    Message {
        /// Chat completion endpoint
        #[arg(long)]
        api_url: Option<String>,

        /// Model to request
        #[arg(long)]
        model: Option<String>,
    },

    /// Sync develop and the default branch, bump the patch version, and
    /// create a hotfix branch
    Hotfix {
        /// Remote to pull from
        #[arg(long, default_value = "origin")]
        remote: String,

        /// Branch synced before the default branch
        #[arg(long, default_value = "develop")]
        secondary_branch: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = discover_workspace(cli.workspace.as_deref())?;
    debug!("Workspace: {}", workspace.display());

    let ctx = CommandContext::new(
        workspace.clone(),
        Arc::new(ConsoleHost::new(&workspace)),
        Arc::new(SystemGit::new(&workspace)),
    );

    match cli.command {
        Command::Message { api_url, model } => {
            let config = CommitConfig::from_env()
                .with_overrides(api_url, model)
                .context("Invalid commit message settings")?;
            let client = HttpCompletionClient::new(&config.api_url);

            match run_commit_message(&ctx, &client, &config).await {
                Ok(CommitOutcome::Generated(_)) | Ok(CommitOutcome::NoStagedChanges) => {
                    Ok(ExitCode::SUCCESS)
                }
                Ok(_) | Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::Hotfix {
            remote,
            secondary_branch,
        } => {
            let config = HotfixConfig {
                remote,
                secondary_branch,
                ..HotfixConfig::default()
            };

            // Cancellation is observed and logged; in-flight git commands are
            // not aborted.
            tokio::spawn(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("User canceled the hotfix; the current step keeps running");
                }
            });

            let result = tokio::task::spawn_blocking(move || run_hotfix_reported(&ctx, &config))
                .await
                .context("Hotfix task panicked")?;

            match result {
                Ok(HotfixOutcome::Dispatched { .. }) => Ok(ExitCode::SUCCESS),
                Ok(HotfixOutcome::DirtyWorkingTree { .. }) | Err(_) => Ok(ExitCode::FAILURE),
            }
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "hotcommit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
