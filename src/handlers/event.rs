use crate::config::Config;
use crate::error::{NotifierError, Result};
use crate::models::change::{ChangeSummary, FileListing};
use crate::models::event::{EventDocument, Release};
use crate::models::payload::NotificationPayload;
use crate::services::github::{CompareOutcome, GitHubClient};
use crate::services::render::{self, PushDetails, RepoContext};
use crate::services::webhook::WebhookClient;
use crate::utils::branches::branch_from_ref;
use chrono::Utc;
use log::{debug, info, warn};

const PUBLISHED: &str = "published";

#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Delivered,
    Skipped(String),
}

pub async fn handle_event(config: &Config, event: &EventDocument) -> Result<RunOutcome> {
    let repo_name = event
        .repository_name()
        .or(config.fallback_repository.as_deref())
        .unwrap_or("unknown");
    let repo = RepoContext::new(repo_name, &config.server_url);

    if let Some(release) = &event.release {
        return handle_release(config, event, release, &repo).await;
    }

    handle_push(config, event, &repo).await
}

async fn handle_release(
    config: &Config,
    event: &EventDocument,
    release: &Release,
    repo: &RepoContext,
) -> Result<RunOutcome> {
    if let Some(action) = event.action() {
        if action != PUBLISHED {
            let reason = format!("release action '{}' is not '{}'", action, PUBLISHED);
            info!("Skipping notification: {}", reason);
            return Ok(RunOutcome::Skipped(reason));
        }
    }

    info!("Sending release notification for {} {}", repo.full_name, release.tag());
    let embed = render::release_embed(repo, release, Utc::now());
    let payload = NotificationPayload::new(&config.username, embed);
    deliver(config, &payload).await?;

    info!("Release webhook delivered");
    Ok(RunOutcome::Delivered)
}

async fn handle_push(config: &Config, event: &EventDocument, repo: &RepoContext) -> Result<RunOutcome> {
    let git_ref = event.git_ref().or(config.fallback_ref.as_deref()).unwrap_or("");
    let branch = branch_from_ref(git_ref);

    if !config.branches.allows(&branch) {
        let reason = format!(
            "branch '{}' is not in NOTIFY_BRANCHES ({})",
            branch,
            config.branches.branches().join(",")
        );
        info!("Skipping notification: {}", reason);
        return Ok(RunOutcome::Skipped(reason));
    }

    let pusher = event
        .pusher_name()
        .or(config.fallback_actor.as_deref())
        .unwrap_or("unknown");
    let commits = event.commits();
    let summary = ChangeSummary::from_commits(commits);
    info!(
        "Push to {}@{} by {}: {} commit(s), {}",
        repo.full_name,
        branch,
        pusher,
        commits.len(),
        summary.summary_line()
    );

    let files = match event.compare_url() {
        Some(compare) => files_listing(config, compare, &summary).await,
        None => summary.fallback_listing(),
    };

    let push = PushDetails {
        branch: &branch,
        pusher,
        commits,
        summary: &summary,
        files: &files,
        compare_url: event.compare_url(),
        color: config.embed_color,
    };
    let embed = render::push_embed(repo, &push, Utc::now());
    let payload = NotificationPayload::new(&config.username, embed);
    deliver(config, &payload).await?;

    info!("Push webhook delivered");
    Ok(RunOutcome::Delivered)
}

/// Detailed listing from the compare API, or the commit-derived one on any failure.
async fn files_listing(config: &Config, compare: &str, summary: &ChangeSummary) -> FileListing {
    let github = match GitHubClient::new(config.github_token.as_deref(), &config.server_url, &config.api_url) {
        Ok(client) => client,
        Err(e) => {
            warn!("Could not build compare client: {}", e);
            return summary.fallback_listing();
        }
    };

    let files = match github.fetch_compare(compare, config.detail_timeout).await {
        CompareOutcome::Files(files) => files,
        CompareOutcome::Empty => {
            debug!("Compare API listed no files, using commit data");
            return summary.fallback_listing();
        }
        CompareOutcome::Unavailable(reason) => {
            warn!("Could not fetch detailed diff: {}", reason);
            return summary.fallback_listing();
        }
        CompareOutcome::TimedOut(deadline) => {
            warn!("Compare API did not answer within {}ms, using commit data", deadline.as_millis());
            return summary.fallback_listing();
        }
    };

    debug!("Compare API returned {} file(s)", files.len());
    render::detailed_file_listing(&files).unwrap_or_else(|| summary.fallback_listing())
}

async fn deliver(config: &Config, payload: &NotificationPayload) -> Result<()> {
    if config.verbose {
        match serde_json::to_string_pretty(payload) {
            Ok(json) => debug!("Payload to send:\n{}", json),
            Err(e) => warn!("Could not serialize payload for logging: {}", e),
        }
    }

    let outcome = WebhookClient::new(config.webhook_url.as_str()).deliver(payload).await?;
    if !outcome.success {
        return Err(NotifierError::DeliveryFailed {
            status: outcome.status,
            body: outcome.body.unwrap_or_default(),
        });
    }

    Ok(())
}
