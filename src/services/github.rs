use crate::models::github::{CompareResponse, FileDiffEntry};
use anyhow::Result;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

/// What came back from the compare endpoint within the deadline.
#[derive(Debug)]
pub enum CompareOutcome {
    Files(Vec<FileDiffEntry>),
    /// The request succeeded but listed no files.
    Empty,
    Unavailable(String),
    TimedOut(Duration),
}

pub struct GitHubClient {
    client: reqwest::Client,
    server_url: String,
    api_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, server_url: &str, api_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("event-notifier"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(t) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", t))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Rewrites a web compare link (`https://github.com/o/r/compare/a...b`)
    /// to its API form (`https://api.github.com/repos/o/r/compare/a...b`).
    /// Anything else is returned untouched.
    pub fn compare_api_url(&self, compare_url: &str) -> String {
        let web_prefix = format!("{}/", self.server_url);
        match compare_url.strip_prefix(&web_prefix) {
            Some(rest) => format!("{}/repos/{}", self.api_url, rest),
            None => compare_url.to_string(),
        }
    }

    /// Fetches the per-file diff for a compare link, giving up after `deadline`.
    pub async fn fetch_compare(&self, compare_url: &str, deadline: Duration) -> CompareOutcome {
        let url = self.compare_api_url(compare_url);
        debug!("GET {}", url);

        match tokio::time::timeout(deadline, self.request_compare(&url)).await {
            Err(_) => CompareOutcome::TimedOut(deadline),
            Ok(Err(e)) => CompareOutcome::Unavailable(e.to_string()),
            Ok(Ok(files)) if files.is_empty() => CompareOutcome::Empty,
            Ok(Ok(files)) => CompareOutcome::Files(files),
        }
    }

    async fn request_compare(&self, url: &str) -> Result<Vec<FileDiffEntry>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("Compare API error body: {}", response.text().await.unwrap_or_default());
            anyhow::bail!("compare API returned {}", status);
        }

        let compare: CompareResponse = response.json().await?;
        Ok(compare.files.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(token: Option<&str>) -> GitHubClient {
        GitHubClient::new(token, "https://github.com", "https://api.github.com").unwrap()
    }

    #[test]
    fn rewrites_web_compare_links() {
        let gh = client(None);
        assert_eq!(
            gh.compare_api_url("https://github.com/octo/widgets/compare/abc123...def456"),
            "https://api.github.com/repos/octo/widgets/compare/abc123...def456"
        );
        assert_eq!(
            gh.compare_api_url("https://api.github.com/repos/octo/widgets/compare/a...b"),
            "https://api.github.com/repos/octo/widgets/compare/a...b"
        );
    }

    #[test]
    fn rewrites_enterprise_links() {
        let gh = GitHubClient::new(None, "https://git.corp.example/", "https://git.corp.example/api/v3").unwrap();
        assert_eq!(
            gh.compare_api_url("https://git.corp.example/team/app/compare/a...b"),
            "https://git.corp.example/api/v3/repos/team/app/compare/a...b"
        );
    }

    #[tokio::test]
    async fn returns_files_and_sends_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/octo/widgets/compare/a...b")
            .match_header("authorization", "Bearer ghp_test")
            .match_header("accept", "application/vnd.github.v3+json")
            .match_header("user-agent", Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"files":[{"filename":"src/main.rs","status":"modified","additions":3,"deletions":1}]}"#)
            .create_async()
            .await;

        let url = format!("{}/repos/octo/widgets/compare/a...b", server.url());
        let outcome = client(Some("ghp_test")).fetch_compare(&url, Duration::from_secs(5)).await;

        mock.assert_async().await;
        match outcome {
            CompareOutcome::Files(files) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].filename, "src/main.rs");
                assert_eq!(files[0].additions, 3);
            }
            other => panic!("expected files, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn error_status_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/compare")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let url = format!("{}/compare", server.url());
        let outcome = client(None).fetch_compare(&url, Duration::from_secs(5)).await;
        assert!(matches!(outcome, CompareOutcome::Unavailable(reason) if reason.contains("404")));
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/compare")
            .with_status(200)
            .with_body("<html>rate limited</html>")
            .create_async()
            .await;

        let url = format!("{}/compare", server.url());
        let outcome = client(None).fetch_compare(&url, Duration::from_secs(5)).await;
        assert!(matches!(outcome, CompareOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn empty_file_list_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/compare")
            .with_status(200)
            .with_body(r#"{"files":[]}"#)
            .create_async()
            .await;

        let url = format!("{}/compare", server.url());
        let outcome = client(None).fetch_compare(&url, Duration::from_secs(5)).await;
        assert!(matches!(outcome, CompareOutcome::Empty));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        // Accepts connections into the backlog but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/compare", listener.local_addr().unwrap());

        let deadline = Duration::from_millis(100);
        let outcome = client(None).fetch_compare(&url, deadline).await;
        assert!(matches!(outcome, CompareOutcome::TimedOut(d) if d == deadline));
        drop(listener);
    }
}
