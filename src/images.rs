use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// File name used when a URL has no usable final path segment.
const FALLBACK_IMAGE_NAME: &str = "image";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Image request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Image host returned {0}")]
    Status(StatusCode),

    #[error("Failed to save image: {0}")]
    Write(#[from] std::io::Error),
}

/// Directory holding the images of one issue: `<image_root>/issue-<number>`.
pub fn issue_image_dir(image_root: &Path, issue_number: u64) -> PathBuf {
    image_root.join(format!("issue-{issue_number}"))
}

/// Local path for an image URL, named after the URL's last non-empty path
/// segment. Query strings and fragments do not contribute to the name, and the
/// segment is percent-decoded so the file matches the link as written.
pub fn local_image_path(
    image_root: &Path,
    url: &str,
    issue_number: u64,
) -> Result<PathBuf, ImageError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| ImageError::InvalidUrl(url.to_string()))?;

    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .unwrap_or(FALLBACK_IMAGE_NAME);

    let name = match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    };
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ImageError::InvalidUrl(url.to_string()));
    }

    Ok(issue_image_dir(image_root, issue_number).join(name))
}

/// Download one image into the issue's directory and return where it landed.
///
/// The directory is created on demand. An existing file at the same path is
/// overwritten, including one written earlier in the same issue by a
/// different URL with the same final segment.
#[instrument(skip(client, image_root))]
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    issue_number: u64,
    image_root: &Path,
) -> Result<PathBuf, ImageError> {
    let path = local_image_path(image_root, url, issue_number)?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(ImageError::Status(status));
    }
    let bytes = response.bytes().await?;

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&path, &bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved image");

    Ok(path)
}
