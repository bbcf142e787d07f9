//! Effective request resolution.
//!
//! Merges the ambient defaults with a per-call configuration into a single
//! request descriptor. The merge is a pure function with no caching: either
//! input may have changed between dispatches, so it runs fresh every time.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::schema::{
    AmbientConfig, EffectiveRequest, RequestConfig, DEFAULT_METHOD, DEFAULT_TIMEOUT_MS,
};
use crate::config::ConfigError;

/// Merge ambient and per-call configuration into an [`EffectiveRequest`].
///
/// Precedence: per-call beats ambient beats built-in defaults. Headers are
/// unioned key-by-key with per-call entries winning on collision.
///
/// # Errors
///
/// Fails fast on caller contract violations: an empty base URL, a full URL
/// that does not parse, or a body that cannot be serialized.
pub fn resolve(
    ambient: &AmbientConfig,
    per_call: &RequestConfig,
) -> Result<EffectiveRequest, ConfigError> {
    if per_call.url.is_empty() {
        return Err(ConfigError::MissingUrl);
    }

    let mut headers: HashMap<String, String> = HashMap::new();
    if let Some(ambient_headers) = &ambient.headers {
        headers.extend(
            ambient_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
    }
    if let Some(call_headers) = &per_call.headers {
        headers.extend(call_headers.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let method = per_call
        .method
        .clone()
        .or_else(|| ambient.method.clone())
        .unwrap_or_else(|| DEFAULT_METHOD.to_string());

    let timeout_ms = per_call
        .timeout_ms
        .or(ambient.timeout_ms)
        .unwrap_or(DEFAULT_TIMEOUT_MS);

    let mut url = per_call.url.clone();
    if let Some(endpoint) = &per_call.endpoint {
        url.push_str(endpoint);
    }
    if let Some(query) = &per_call.query {
        url.push('?');
        url.push_str(query);
    }
    url::Url::parse(&url).map_err(|e| ConfigError::InvalidUrl {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    let body = match &per_call.body {
        Some(value) => {
            Some(serde_json::to_string(value).map_err(|e| ConfigError::Body(e.to_string()))?)
        }
        None => None,
    };

    Ok(EffectiveRequest {
        url,
        method,
        headers,
        body,
        timeout: Duration::from_millis(timeout_ms),
    })
}
