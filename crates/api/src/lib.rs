//! Shared API types for the pagegate publish gateway.
//!
//! This crate is the single source of truth for the gateway's wire contract:
//! the publish request/response bodies, the error body shape, and the
//! id-sanitization and URL-composition rules both the server and the typed
//! client rely on.

use serde::{Deserialize, Serialize};

/// Header carrying the shared publish secret.
pub const PUBLISH_KEY_HEADER: &str = "x-publish-key";

/// Maximum accepted `/publish` request body, in bytes.
pub const MAX_PUBLISH_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Maximum length of a sanitized document id.
pub const MAX_ID_LEN: usize = 64;

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Body of `POST /publish`.
///
/// Both fields are optional at the serde layer so that presence is validated
/// by the handler (producing the contract's 400 body) rather than by the
/// framework's deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Successful `POST /publish` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub ok: bool,
    /// Public URL where the published document becomes reachable.
    pub url: String,
}

/// Error body returned by every failing gateway route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

// ─── Id sanitization ─────────────────────────────────────────────────────────

/// Reduce an untrusted document id to a safe, bounded path segment.
///
/// Keeps only `[A-Za-z0-9_-]` and truncates to [`MAX_ID_LEN`] characters.
/// Total and idempotent; the result may be empty if the input contains no
/// usable characters.
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_ID_LEN)
        .collect()
}

/// Repository-relative storage path for a sanitized id.
pub fn storage_path(path_prefix: &str, sanitized_id: &str) -> String {
    format!("{path_prefix}/{sanitized_id}.json")
}

/// Public URL for a sanitized id, independent of any upstream response.
pub fn public_url(pages_base_url: &str, path_prefix: &str, sanitized_id: &str) -> String {
    format!(
        "{}/{}",
        pages_base_url.trim_end_matches('/'),
        storage_path(path_prefix, sanitized_id)
    )
}

/// Whether a publish payload counts as present.
///
/// Mirrors the truthiness rule of the original relay: `null`, `false`, `0`,
/// and `""` are rejected; empty arrays and objects are accepted.
pub fn is_publishable_data(data: &serde_json::Value) -> bool {
    match data {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64() != Some(0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_keeps_only_safe_characters() {
        assert_eq!(sanitize_id("hello world!"), "helloworld");
        assert_eq!(sanitize_id("a/../b"), "ab");
        assert_eq!(sanitize_id("doc_1-B"), "doc_1-B");
        assert_eq!(sanitize_id("абв ☃"), "");
    }

    #[test]
    fn sanitize_truncates_to_64() {
        let long = "x".repeat(100);
        let sanitized = sanitize_id(&long);
        assert_eq!(sanitized.len(), 64);
        assert!(sanitized.chars().all(|c| c == 'x'));
    }

    #[test]
    fn sanitize_is_idempotent() {
        let long = "y".repeat(200);
        for input in ["hello world!", "a/../b", "абв", long.as_str(), "", "ok-1_2"] {
            let once = sanitize_id(input);
            assert_eq!(sanitize_id(&once), once);
            assert!(once.len() <= MAX_ID_LEN);
            assert!(
                once.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            );
        }
    }

    #[test]
    fn storage_path_and_url_compose_deterministically() {
        assert_eq!(storage_path("data", "doc1"), "data/doc1.json");
        assert_eq!(
            public_url("https://x.test", "data", "doc1"),
            "https://x.test/data/doc1.json"
        );
        assert_eq!(
            public_url("https://x.test/", "data", "doc1"),
            "https://x.test/data/doc1.json"
        );
    }

    #[test]
    fn falsy_payloads_are_not_publishable() {
        assert!(!is_publishable_data(&json!(null)));
        assert!(!is_publishable_data(&json!(false)));
        assert!(!is_publishable_data(&json!(0)));
        assert!(!is_publishable_data(&json!(0.0)));
        assert!(!is_publishable_data(&json!("")));
    }

    #[test]
    fn truthy_payloads_are_publishable() {
        assert!(is_publishable_data(&json!(true)));
        assert!(is_publishable_data(&json!(1)));
        assert!(is_publishable_data(&json!("x")));
        assert!(is_publishable_data(&json!([])));
        assert!(is_publishable_data(&json!({})));
        assert!(is_publishable_data(&json!({"a": 1})));
    }

    #[test]
    fn publish_request_tolerates_missing_fields() {
        let req: PublishRequest = serde_json::from_str("{}").unwrap();
        assert!(req.id.is_none());
        assert!(req.data.is_none());

        let req: PublishRequest =
            serde_json::from_str(r#"{"id":"doc1","data":{"a":1}}"#).unwrap();
        assert_eq!(req.id.as_deref(), Some("doc1"));
        assert_eq!(req.data, Some(json!({"a": 1})));
    }
}
