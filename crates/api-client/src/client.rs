use std::time::Duration;

use anyhow::{Result, bail};

use pagegate_api::{ErrorResponse, PUBLISH_KEY_HEADER, PublishRequest, PublishResponse};

/// Typed HTTP client for the pagegate publish API.
///
/// Holds the publish key once and attaches it to every `publish` call, so
/// callers (scripts, tests) deal in typed requests and plain `Result`s.
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
    publish_key: Option<String>,
}

impl GatewayClient {
    /// Create a new client with the given base URL and timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            publish_key: None,
        }
    }

    pub fn set_publish_key(&mut self, key: String) {
        self.publish_key = Some(key);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /health — liveness probe; returns the raw body (`"ok"`).
    pub async fn health(&self) -> Result<String> {
        let resp = self.client.get(self.url("/health")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("health check failed: {status}");
        }
        Ok(resp.text().await?)
    }

    /// POST /publish — publish `data` under `id`, returning the public URL.
    pub async fn publish(&self, id: &str, data: &serde_json::Value) -> Result<PublishResponse> {
        let mut req = self.client.post(self.url("/publish"));
        if let Some(key) = &self.publish_key {
            req = req.header(PUBLISH_KEY_HEADER, key);
        }

        let resp = req
            .json(&PublishRequest {
                id: Some(id.to_string()),
                data: Some(data.clone()),
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => bail!("publish failed ({status}): {}", err.error),
                Err(_) => bail!("publish failed ({status}): {body}"),
            }
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = GatewayClient::with_client(reqwest::Client::new(), "http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/publish"), "http://localhost:3000/publish");
    }
}
