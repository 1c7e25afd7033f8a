use std::time::Duration;

/// Timeout applied to every upstream GitHub call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway configuration loaded from environment variables.
///
/// Read once at startup and passed into handlers through axum state.
/// Publish-critical values stay optional here and are resolved per request,
/// so `/health` keeps answering on a misconfigured process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub github_token: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    pub branch: String,
    pub publish_key: Option<String>,
    pub path_prefix: String,
    pub pages_base_url: Option<String>,
    pub github_api_base: String,
}

/// Configuration a publish cannot proceed without.
#[derive(Debug)]
pub struct UpstreamConfig<'a> {
    pub token: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub pages_base_url: &'a str,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            github_token: env("GH_TOKEN"),
            github_owner: env("GH_OWNER"),
            github_repo: env("GH_REPO"),
            branch: env("GH_BRANCH").unwrap_or_else(|| "main".into()),
            publish_key: env("PUBLISH_KEY"),
            path_prefix: env("GITHUB_PATH_PREFIX").unwrap_or_else(|| "data".into()),
            pages_base_url: env("PAGES_BASE_URL"),
            github_api_base: env("GITHUB_API_BASE")
                .unwrap_or_else(|| pagegate_github::DEFAULT_API_BASE.into()),
        }
    }

    /// Resolve the values a publish call requires; the error names the first
    /// missing variable.
    pub fn upstream(&self) -> Result<UpstreamConfig<'_>, String> {
        Ok(UpstreamConfig {
            token: required(&self.github_token, "GH_TOKEN")?,
            owner: required(&self.github_owner, "GH_OWNER")?,
            repo: required(&self.github_repo, "GH_REPO")?,
            pages_base_url: required(&self.pages_base_url, "PAGES_BASE_URL")?,
        })
    }

    /// Publish-critical variables currently unset, for startup warnings.
    pub fn missing_publish_vars(&self) -> Vec<&'static str> {
        [
            ("GH_TOKEN", self.github_token.is_none()),
            ("GH_OWNER", self.github_owner.is_none()),
            ("GH_REPO", self.github_repo.is_none()),
            ("PUBLISH_KEY", self.publish_key.is_none()),
            ("PAGES_BASE_URL", self.pages_base_url.is_none()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| name)
        .collect()
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, String> {
    value.as_deref().ok_or_else(|| format!("Missing env var: {name}"))
}
