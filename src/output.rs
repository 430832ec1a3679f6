use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::github::Issue;
use crate::markdown;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Create the Markdown and image roots if they don't exist yet.
/// Existing directories are left as they are.
pub fn prepare_directories(markdown_dir: &Path, image_dir: &Path) -> Result<(), SetupError> {
    for dir in [markdown_dir, image_dir] {
        std::fs::create_dir_all(dir).map_err(|source| SetupError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Write the issue's document into `markdown_dir`, replacing any previous
/// export of the same issue. Returns the path written.
#[instrument(skip(issue, body, markdown_dir), fields(issue = issue.number))]
pub fn write_issue(issue: &Issue, body: &str, markdown_dir: &Path) -> Result<PathBuf, WriteError> {
    let path = markdown_dir.join(markdown::issue_filename(issue));
    let document = markdown::compose_document(&issue.title, body);

    std::fs::write(&path, document).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote issue document");

    Ok(path)
}
