use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".issues-to-markdown.toml";
pub const DEFAULT_REPO: &str = "eatyourgreens/issues-to-markdown-action";
pub const DEFAULT_LABEL: &str = "done";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_MARKDOWN_DIR: &str = ".";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .issues-to-markdown.toml.
/// All fields are optional — the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// Repository in `owner/name` form
    pub repo: Option<String>,
    /// Label the exported issues must carry
    pub label: Option<String>,
    /// API root, overridable for GitHub Enterprise
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-issue Markdown files are written to
    pub markdown_dir: Option<PathBuf>,
    /// Root directory for downloaded images
    pub image_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from .issues-to-markdown.toml in the current directory.
    /// Returns default config if the file doesn't exist. The environment is
    /// not consulted here; see `github_token`.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path. Unlike `load`, a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
    }

    pub fn repo(&self) -> &str {
        self.github.repo.as_deref().unwrap_or(DEFAULT_REPO)
    }

    pub fn label(&self) -> &str {
        self.github.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn api_base(&self) -> &str {
        self.github
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
    }

    pub fn markdown_dir(&self) -> &Path {
        self.output
            .markdown_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_MARKDOWN_DIR))
    }

    pub fn image_dir(&self) -> &Path {
        self.output
            .image_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_IMAGE_DIR))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
