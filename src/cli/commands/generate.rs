//! Generate command - fetch, reconcile, render

use crate::cache::{CacheEngine, CacheStore, Fingerprinter, ReconcileReport};
use crate::cli::args::GenerateArgs;
use crate::config::{Config, Settings};
use crate::error::{StatcardError, StatcardResult};
use crate::github::{
    collect_edges, organization_pages, repository_pages, Affiliation, ClientOptions, GithubApi,
    GithubClient, UserIdentity,
};
use crate::render;
use crate::stats::{self, Summary};
use crate::ui::{self, RepoProgress, TaskSpinner, UiContext};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Result of one full run
#[derive(Debug)]
pub struct RunOutcome {
    pub identity: UserIdentity,
    pub report: ReconcileReport,
    pub summary: Summary,
    pub output_path: PathBuf,
}

/// Execute the generate command
pub async fn execute(args: GenerateArgs, config: &Config) -> StatcardResult<()> {
    let ctx = UiContext::detect();
    let settings = Settings::resolve(config, args.into())?;
    let client = GithubClient::new(ClientOptions::from(&settings));

    ui::intro(&ctx, &format!("statcard generate for {}", settings.username));

    let outcome = run(&client, &settings, &ctx, Utc::now()).await?;

    let counters = client.counters();
    info!("Queries issued: {} (total {})", counters, counters.total());

    ui::section(&ctx, "Summary");
    ui::key_value(&ctx, "account age", &format!("{} days", outcome.summary.account_age));
    ui::key_value(&ctx, "repositories", &outcome.summary.repo_count.to_string());
    ui::key_value(&ctx, "commits", &outcome.summary.commits.to_string());
    ui::key_value(
        &ctx,
        "lines",
        &format!(
            "{} (+{} -{})",
            outcome.summary.net_lines(),
            outcome.summary.additions,
            outcome.summary.deletions
        ),
    );
    ui::key_value(&ctx, "queries", &counters.to_string());

    let written = format!("Wrote {}", outcome.output_path.display());
    if outcome.report.failed.is_empty() {
        ui::outro_success(&ctx, &written);
    } else {
        ui::note(&ctx, "Kept previous values", &outcome.report.failed.join(", "));
        ui::outro_warn(
            &ctx,
            &format!(
                "{} ({} repositories kept their previous values)",
                written,
                outcome.report.failed.len()
            ),
        );
    }
    Ok(())
}

/// Full pipeline against any [`GithubApi`].
///
/// Only the identity lookup and local file writes are fatal. Listing and
/// per-repository failures degrade the result and are logged.
pub async fn run(
    api: &dyn GithubApi,
    settings: &Settings,
    ctx: &UiContext,
    now: DateTime<Utc>,
) -> StatcardResult<RunOutcome> {
    let mut spinner = TaskSpinner::new(ctx);

    spinner.start("Looking up account...");
    let identity = match api.user_identity(&settings.username).await {
        Ok(identity) => identity,
        Err(e) => {
            spinner.stop_error("Account lookup failed");
            return Err(e);
        }
    };
    spinner.stop(&format!(
        "{} created {}",
        settings.username,
        identity.created_at.format("%Y-%m-%d")
    ));

    spinner.start("Listing repositories...");
    let mut edges = collect_edges(
        "owned repositories",
        repository_pages(api, &settings.username, Affiliation::all()),
    )
    .await;
    let owned = edges.len();
    edges.extend(
        collect_edges(
            "organization repositories",
            organization_pages(api, &settings.username),
        )
        .await,
    );
    spinner.stop(&format!(
        "Listed {} repositories ({} owned or collaborating, {} from organizations)",
        edges.len(),
        owned,
        edges.len() - owned
    ));

    let store = CacheStore::new(&settings.cache_path);
    let mut cache = store.load_or_flush(settings.flush_cache).await;
    debug!("Cache holds {} repositories before reconciling", cache.entries.len());

    let fingerprinter = Fingerprinter::new(&settings.salt);
    let progress = RepoProgress::new(ctx, edges.len());
    let observer = |identity: &str| progress.advance(identity);
    let report = CacheEngine::new(api, &fingerprinter, &settings.policy)
        .with_observer(&observer)
        .reconcile(&identity.id, &mut cache, &edges)
        .await;
    progress.finish();

    ui::step_ok(
        ctx,
        &format!(
            "Reconciled {} repositories: {} refreshed, {} unchanged",
            report.processed(),
            report.refreshed,
            report.fresh
        ),
    );
    let skipped = report.stale_forks + report.empty + report.duplicates;
    if skipped > 0 {
        ui::step_info(
            ctx,
            &format!(
                "Skipped {} ({} old forks, {} empty, {} listed twice)",
                skipped, report.stale_forks, report.empty, report.duplicates
            ),
        );
    }
    if !report.failed.is_empty() {
        ui::step_warn(
            ctx,
            &format!("{} repositories could not be aggregated", report.failed.len()),
        );
    }

    store.save(&cache).await?;

    let summary = stats::project(&cache, &identity, now);
    let svg = render::render(&summary, &settings.username);
    write_output(&settings.output_path, &svg).await?;

    Ok(RunOutcome {
        identity,
        report,
        summary,
        output_path: settings.output_path.clone(),
    })
}

async fn write_output(path: &Path, svg: &str) -> StatcardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            StatcardError::io(format!("creating output directory {}", parent.display()), e)
        })?;
    }
    fs::write(path, svg)
        .await
        .map_err(|e| StatcardError::io(format!("writing {}", path.display()), e))?;
    debug!("Wrote {} bytes to {}", svg.len(), path.display());
    Ok(())
}
