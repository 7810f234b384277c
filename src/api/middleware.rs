//! Axum middleware for request validation and origin enforcement.

use std::{collections::HashMap, sync::Arc};

use axum::{
    body::{to_bytes, Body},
    extract::{RawPathParams, State},
    http::{header::CONTENT_TYPE, header::ORIGIN, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::api::error::ApiError;
use crate::validation::RuleSet;

/// Rule set and body limit for one route
#[derive(Debug, Clone)]
pub struct ValidationState {
    rules: Arc<RuleSet>,
    max_body_size: usize,
}

impl ValidationState {
    pub fn new(rules: RuleSet, max_body_size: usize) -> Self {
        Self { rules: Arc::new(rules), max_body_size }
    }
}

/// The single origin allowed to call the API from a browser
pub type OriginState = Arc<Option<HeaderValue>>;

/// Run the route's rule set and answer 400 with every failure, or hand the
/// request on with its body intact.
///
/// Only `application/json` bodies are parsed; anything else is seen by the
/// rules as an empty object. An empty JSON body is also an empty object.
pub async fn validate_request(
    State(state): State<ValidationState>,
    params: RawPathParams,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let params: HashMap<String, String> =
        params.iter().map(|(name, value)| (name.to_string(), value.to_string())).collect();

    if !state.rules.reads_body() {
        let errors = state.rules.validate(&params, &Value::Null);
        return if errors.is_empty() {
            Ok(next.run(request).await)
        } else {
            debug!(error_count = errors.len(), "request rejected by validation");
            Err(ApiError::Validation(errors))
        };
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, state.max_body_size).await.map_err(|e| {
        let inner = e.into_inner();
        if inner.is::<LengthLimitError>() {
            warn!(limit = state.max_body_size, "request body exceeds size limit");
            ApiError::PayloadTooLarge
        } else {
            warn!(error = %inner, "failed to read request body");
            ApiError::MalformedBody
        }
    })?;

    let json = if is_json(&parts.headers) {
        parse_body(&bytes)?
    } else {
        Value::Object(Map::new())
    };

    let errors = state.rules.validate(&params, &json);
    if !errors.is_empty() {
        debug!(
            method = %parts.method,
            path = %parts.uri.path(),
            error_count = errors.len(),
            "request rejected by validation"
        );
        return Err(ApiError::Validation(errors));
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Reject browser requests from any origin other than the configured one.
///
/// Requests without an `Origin` header are not cross-origin and always pass.
pub async fn enforce_origin(
    State(allowed): State<OriginState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let rejected = match request.headers().get(ORIGIN) {
        None => None,
        Some(origin) if (*allowed).as_ref() == Some(origin) => None,
        Some(origin) => Some(String::from_utf8_lossy(origin.as_bytes()).into_owned()),
    };

    let Some(origin) = rejected else {
        return Ok(next.run(request).await);
    };

    warn!(%origin, path = %request.uri().path(), "rejected request from disallowed origin");
    Err(ApiError::CorsRejected)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json"
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}

fn parse_body(bytes: &[u8]) -> Result<Value, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        debug!(error = %e, "request body is not valid JSON");
        ApiError::MalformedBody
    })
}
