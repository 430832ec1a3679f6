pub mod types;

pub use types::{IssueOutcome, RunSummary};

use colored::Colorize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::github::{self, GitHubError, Issue, IssueQuery};
use crate::images;
use crate::markdown;
use crate::output::{self, SetupError};

const USER_AGENT: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Error fetching issues: {0}")]
    Fetch(#[from] GitHubError),
}

/// Everything one export run needs besides the HTTP client.
#[derive(Debug, Clone)]
pub struct ExportSettings<'a> {
    pub query: IssueQuery<'a>,
    pub markdown_dir: &'a Path,
    pub image_dir: &'a Path,
}

/// HTTP client shared by the issue and image requests. Every request is
/// bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Fetch the labeled issues once and export them one after another.
///
/// Setup and fetch failures abort before any issue is touched. Failures on a
/// single image or issue are logged and counted, and the run moves on.
pub async fn run(
    client: &reqwest::Client,
    settings: &ExportSettings<'_>,
) -> Result<RunSummary, ExportError> {
    output::prepare_directories(settings.markdown_dir, settings.image_dir)?;

    let issues = github::fetch_issues(client, &settings.query).await?;
    info!(count = issues.len(), "fetched issues");

    let mut summary = RunSummary {
        issues_fetched: issues.len(),
        ..Default::default()
    };
    for issue in &issues {
        let outcome = export_issue(client, issue, settings).await;
        summary.record(&outcome);
    }

    Ok(summary)
}

/// Download the issue's images, rewrite its body and write its document.
#[instrument(skip(client, issue, settings), fields(issue = issue.number))]
pub async fn export_issue(
    client: &reqwest::Client,
    issue: &Issue,
    settings: &ExportSettings<'_>,
) -> IssueOutcome {
    let mut outcome = IssueOutcome::default();
    let mut replacements = Vec::new();

    for url in markdown::extract_image_urls(&issue.body) {
        match images::download_image(client, url, issue.number, settings.image_dir).await {
            Ok(path) => {
                outcome.images_downloaded += 1;
                replacements.push((url, path.display().to_string()));
            }
            Err(e) => {
                outcome.images_failed += 1;
                warn!(%url, error = %e, "failed to download image, keeping remote URL");
            }
        }
    }

    let body = markdown::rewrite_body(&issue.body, &replacements);
    match output::write_issue(issue, &body, settings.markdown_dir) {
        Ok(path) => {
            outcome.written = true;
            info!(path = %path.display(), images = outcome.images_downloaded, "exported issue");
        }
        Err(e) => warn!(error = %e, "skipping issue"),
    }

    outcome
}

/// Print the end-of-run counts to the terminal.
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("Issues fetched:    {}", summary.issues_fetched);
    println!(
        "Issues written:    {}",
        summary.issues_written.to_string().green().bold()
    );
    println!("Images downloaded: {}", summary.images_downloaded);
    if summary.issues_failed > 0 {
        println!(
            "Issues failed:     {}",
            summary.issues_failed.to_string().red().bold()
        );
    }
    if summary.images_failed > 0 {
        println!(
            "Images failed:     {}",
            summary.images_failed.to_string().yellow().bold()
        );
    }
    println!();
}
