//! Minimal client for the GitHub repository contents API.
//!
//! Covers the two calls the publish gateway needs: reading the current blob
//! sha of a file (to decide between create and update) and writing a file at
//! a repository path.

mod error;

pub use error::{ContentsError, Result};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default contents API base; overridable for tests and GitHub Enterprise.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("pagegate-server/", env!("CARGO_PKG_VERSION"));

/// Payload of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct PutFile {
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
    pub branch: String,
    /// Current blob sha. Present means "update this exact version"; absent
    /// means "create".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsMeta {
    sha: String,
}

/// Typed HTTP client for one repository's contents API.
pub struct ContentsClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
    owner: String,
    repo: String,
}

impl ContentsClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(token: &str, owner: &str, repo: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(
            client,
            DEFAULT_API_BASE,
            token,
            owner,
            repo,
        ))
    }

    /// Create from an existing `reqwest::Client` and API base (e.g. a mock
    /// upstream in tests).
    pub fn with_client(
        client: reqwest::Client,
        api_base: &str,
        token: &str,
        owner: &str,
        repo: &str,
    ) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base,
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo),
            encode_segments(path)
        )
    }

    /// Current blob sha of `path` on `branch`, or `None` if the file does not
    /// exist. Any response other than success or a clean 404 is an error.
    pub async fn file_sha(&self, path: &str, branch: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .get(self.contents_url(path))
            .query(&[("ref", branch)])
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_JSON)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(status, path, resp).await);
        }

        let meta: ContentsMeta = resp.json().await?;
        Ok(Some(meta.sha))
    }

    /// Create or update `path` with the given commit payload.
    pub async fn put_file(&self, path: &str, file: &PutFile) -> Result<()> {
        let resp = self
            .client
            .put(self.contents_url(path))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_GITHUB_JSON)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(file)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status, path, resp).await);
        }
        Ok(())
    }
}

async fn status_error(
    status: reqwest::StatusCode,
    path: &str,
    resp: reqwest::Response,
) -> ContentsError {
    let body = resp.text().await.unwrap_or_default();
    ContentsError::Status {
        status,
        path: path.to_string(),
        body,
    }
}

fn encode_segments(value: &str) -> String {
    value
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
