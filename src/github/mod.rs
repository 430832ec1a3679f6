pub mod types;

pub use types::Issue;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Page size GitHub applies when `per_page` is not given.
pub const DEFAULT_PAGE_SIZE: usize = 30;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("GitHub API error: {0}")]
    Status(StatusCode),

    #[error("Failed to decode issue list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where and what to fetch.
#[derive(Debug, Clone)]
pub struct IssueQuery<'a> {
    pub api_base: &'a str,
    pub repo: &'a str,
    pub label: &'a str,
    pub token: Option<&'a str>,
}

/// Fetch every issue (open or closed) carrying `query.label`.
///
/// Only the first page of results is requested. Repositories with more
/// matching issues than one page holds are truncated; a warning is logged
/// when a full page comes back.
#[instrument(skip(client, query), fields(repo = %query.repo, label = %query.label))]
pub async fn fetch_issues(
    client: &reqwest::Client,
    query: &IssueQuery<'_>,
) -> Result<Vec<Issue>, GitHubError> {
    let url = format!("{}/repos/{}/issues", query.api_base, query.repo);

    let mut request = client
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .query(&[("state", "all"), ("labels", query.label)]);
    match query.token {
        Some(token) => request = request.header("Authorization", format!("token {token}")),
        None => debug!("no GitHub token available, sending unauthenticated request"),
    }

    debug!(%url, "fetching issue list from GitHub API");
    let response = request.send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(GitHubError::Status(status));
    }

    let bytes = response.bytes().await?;
    let issues: Vec<Issue> = serde_json::from_slice(&bytes)?;
    debug!(count = issues.len(), "received issue list");

    if issues.len() >= DEFAULT_PAGE_SIZE {
        warn!(
            count = issues.len(),
            "received a full page of issues; later pages are not fetched"
        );
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn query<'a>(api_base: &'a str, token: Option<&'a str>) -> IssueQuery<'a> {
        IssueQuery {
            api_base,
            repo: "octo/widgets",
            label: "done",
            token,
        }
    }

    #[tokio::test]
    async fn test_fetch_issues_sends_filter_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues"))
            .and(query_param("state", "all"))
            .and(query_param("labels", "done"))
            .and(header("Authorization", "token secret"))
            .and(header("Accept", "application/vnd.github+json"))
            .and(header("User-Agent", "issues-to-markdown"))
            .respond_with(ResponseTemplate::new(200).set_body_string(include_str!(
                "../../tests/fixtures/issues.json"
            )))
            .expect(1)
            .mount(&server)
            .await;

        let client = crate::export::build_client(Duration::from_secs(5)).unwrap();
        let issues = fetch_issues(&client, &query(&server.uri(), Some("secret")))
            .await
            .unwrap();

        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].number, 42);
        assert_eq!(issues[0].title, "Fix it!");
        assert_eq!(issues[2].body, "");
    }

    #[tokio::test]
    async fn test_fetch_issues_without_token_is_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let issues = fetch_issues(&client, &query(&server.uri(), None)).await.unwrap();
        assert!(issues.is_empty());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(!received[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_fetch_issues_full_page_is_returned_as_is() {
        let page: Vec<serde_json::Value> = (1..=DEFAULT_PAGE_SIZE)
            .map(|n| serde_json::json!({ "number": n, "title": format!("Issue {n}"), "body": null }))
            .collect();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&page))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let issues = fetch_issues(&client, &query(&server.uri(), None)).await.unwrap();

        // Only the first page is requested; nothing asks for page 2.
        assert_eq!(issues.len(), 30);
        assert_eq!(issues[29].number, 30);
        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].url.query_pairs().all(|(k, _)| k != "page"));
    }

    #[tokio::test]
    async fn test_fetch_issues_non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch_issues(&client, &query(&server.uri(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Status(StatusCode::FORBIDDEN)));
        assert_eq!(err.to_string(), "GitHub API error: 403 Forbidden");
    }

    #[tokio::test]
    async fn test_fetch_issues_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"message\": 1}"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let err = fetch_issues(&client, &query(&server.uri(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubError::Decode(_)));
    }
}
