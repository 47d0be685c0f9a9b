//! Binary entry point for the pr-autoupdate CI step

use clap::Parser;
use pr_autoupdate::config::ActionConfig;
use pr_autoupdate::outputs::StepOutputs;
use pr_autoupdate::platform::GitHubService;
use pr_autoupdate::update::{run_autoupdate, UpdateOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keep auto-merge pull requests up to date with their base branch
///
/// Configuration comes from the CI runner's environment (`INPUT_*` and
/// `GITHUB_*` variables); the flags below override it for local runs.
#[derive(Parser)]
#[command(name = "pr-autoupdate", version)]
struct Cli {
    /// Base branch to target (defaults to the branch from GITHUB_REF)
    #[arg(long)]
    base_branch: Option<String>,

    /// Zero-based index after which to stop processing (-1 or 0 = unlimited)
    #[arg(long)]
    limit: Option<i64>,

    /// Minimum approving reviews before an update is attempted (0 = no gate)
    #[arg(long)]
    required_approvals: Option<u32>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "pr-autoupdate action failed");
        std::process::exit(1);
    }
}

async fn run() -> pr_autoupdate::Result<()> {
    let cli = Cli::parse();

    let mut config = ActionConfig::from_env()?;
    if let Some(base_branch) = cli.base_branch {
        config.base_branch = base_branch;
    }
    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(required_approvals) = cli.required_approvals {
        config.required_approvals = required_approvals;
    }

    tracing::info!(
        owner = %config.owner,
        repo = %config.repo,
        base_branch = %config.base_branch,
        limit = config.limit,
        required_approvals = config.required_approvals,
        "starting branch update run"
    );

    let platform = GitHubService::new(
        &config.repo_token,
        config.owner.clone(),
        config.repo.clone(),
        config.api_base.clone(),
    )?;

    let options = UpdateOptions::from(&config);
    let summary = run_autoupdate(&platform, &options).await?;

    if let Some(outputs) = StepOutputs::from_env() {
        outputs.write_conflicts(&summary.conflicts)?;
    } else {
        tracing::debug!("GITHUB_OUTPUT not set, skipping step outputs");
    }

    tracing::info!(
        processed = summary.processed.len(),
        updated = summary.updated.len(),
        skipped = summary.skipped.len(),
        conflicted = summary.conflicts.len(),
        "branch update run finished"
    );

    Ok(())
}
