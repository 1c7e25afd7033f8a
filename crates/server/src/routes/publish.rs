use axum::{Json, extract::State, http::HeaderMap};
use base64::Engine;

use pagegate_api::{
    PUBLISH_KEY_HEADER, PublishRequest, PublishResponse, is_publishable_data, public_url,
    sanitize_id, storage_path,
};
use pagegate_github::{ContentsClient, PutFile};

use crate::AppState;
use crate::error::ApiErr;

/// POST /publish — write the payload into the content repository and return
/// its public URL.
///
/// Linear per-request pipeline: key check, config check, input validation,
/// version lookup, conditional create-or-update. Two concurrent publishes to
/// the same id race; the last write accepted upstream wins.
pub async fn publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiErr> {
    let config = &state.config;

    // An unset PUBLISH_KEY is a misconfiguration, never an open door.
    let expected_key = config
        .publish_key
        .as_deref()
        .ok_or_else(|| ApiErr::config("Missing env var: PUBLISH_KEY"))?;
    let presented_key = headers.get(PUBLISH_KEY_HEADER).and_then(|v| v.to_str().ok());
    if presented_key != Some(expected_key) {
        return Err(ApiErr::unauthorized("Bad publish key"));
    }

    let upstream = config.upstream().map_err(ApiErr::config)?;
    let (id, data) = require_inputs(&req)?;

    let safe_id = sanitize_id(id);
    if safe_id.is_empty() {
        return Err(ApiErr::bad_request("id contains no usable characters"));
    }
    let path = storage_path(&config.path_prefix, &safe_id);

    let github = ContentsClient::with_client(
        state.http.clone(),
        &config.github_api_base,
        upstream.token,
        upstream.owner,
        upstream.repo,
    );

    // A captured sha turns the write into "update this exact version";
    // a clean 404 means create.
    let sha = github
        .file_sha(&path, &config.branch)
        .await
        .map_err(ApiErr::from_upstream("read current version"))?;

    let pretty = serde_json::to_string_pretty(data)
        .map_err(ApiErr::from_upstream("serialize payload"))?;
    let content = base64::engine::general_purpose::STANDARD.encode(pretty);

    github
        .put_file(
            &path,
            &PutFile {
                message: format!("publish {safe_id}"),
                content,
                branch: config.branch.clone(),
                sha,
            },
        )
        .await
        .map_err(ApiErr::from_upstream("write content"))?;

    tracing::info!("published {path}");

    Ok(Json(PublishResponse {
        ok: true,
        url: public_url(upstream.pages_base_url, &config.path_prefix, &safe_id),
    }))
}

/// Presence check for the two request fields, mirroring the relay's
/// truthiness rule: empty ids and falsy payloads are rejected.
fn require_inputs(req: &PublishRequest) -> Result<(&str, &serde_json::Value), ApiErr> {
    let id = req.id.as_deref().filter(|s| !s.is_empty());
    let data = req.data.as_ref().filter(|d| is_publishable_data(d));
    match (id, data) {
        (Some(id), Some(data)) => Ok((id, data)),
        _ => Err(ApiErr::bad_request("Need id and data")),
    }
}
