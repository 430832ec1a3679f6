mod config;
mod export;
mod github;
mod images;
mod markdown;
mod output;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, info_span, warn};
use tracing_subscriber::EnvFilter;

/// Export labeled GitHub issues to Markdown files, downloading the images they
/// embed and pointing the image links at the local copies.
#[derive(Parser, Debug)]
#[command(name = "issues-to-markdown", version, about)]
struct Cli {
    /// Repository to export from, as owner/name
    #[arg(long)]
    repo: Option<String>,

    /// Only issues carrying this label are exported
    #[arg(long)]
    label: Option<String>,

    /// Directory the Markdown files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Root directory for downloaded images
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file to read instead of ./.issues-to-markdown.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over the config file.
    fn apply(self, config: &mut config::Config) {
        if let Some(repo) = self.repo {
            config.github.repo = Some(repo);
        }
        if let Some(label) = self.label {
            config.github.label = Some(label);
        }
        if let Some(dir) = self.output_dir {
            config.output.markdown_dir = Some(dir);
        }
        if let Some(dir) = self.image_dir {
            config.output.image_dir = Some(dir);
        }
        if let Some(secs) = self.timeout {
            config.http.timeout_secs = Some(secs);
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();

    info!("loading configuration");
    let mut config = match cli.config.take() {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };
    cli.apply(&mut config);

    let token = config.github_token();
    if token.is_none() {
        warn!("GITHUB_TOKEN is not set; requests are unauthenticated and rate limited");
    }

    let _main_span = info_span!("export", repo = %config.repo(), label = %config.label()).entered();

    let client = export::build_client(config.timeout())?;
    let settings = export::ExportSettings {
        query: github::IssueQuery {
            api_base: config.api_base(),
            repo: config.repo(),
            label: config.label(),
            token: token.as_deref(),
        },
        markdown_dir: config.markdown_dir(),
        image_dir: config.image_dir(),
    };

    let result = export::run(&client, &settings).await;
    Ok(if finish(result) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Report how the run ended. Returns false when the export was aborted; the
/// failure is logged here and nowhere else.
fn finish(result: Result<export::RunSummary, export::ExportError>) -> bool {
    match result {
        Ok(summary) => {
            export::print_summary(&summary);
            info!(
                written = summary.issues_written,
                clean = summary.is_clean(),
                "done"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "export aborted");
            false
        }
    }
}
