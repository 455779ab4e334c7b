//! API key check for entity routes.
//!
//! Disabled when no key is configured. Otherwise the `Authorization`
//! header must carry the key, either bare or as `Bearer <key>`.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::error::ApiError;
use crate::http::server::AppState;

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.http.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(value) if key_matches(value, expected) => Ok(next.run(request).await),
        _ => {
            tracing::warn!(path = %request.uri().path(), "rejected request without valid api key");
            Err(ApiError::Unauthorized)
        }
    }
}

fn key_matches(header_value: &str, expected: &str) -> bool {
    let token = header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
        .trim();
    !token.is_empty() && token == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_bare_and_bearer() {
        assert!(key_matches("s3cret", "s3cret"));
        assert!(key_matches("Bearer s3cret", "s3cret"));
        assert!(!key_matches("Bearer other", "s3cret"));
        assert!(!key_matches("Basic s3cret", "s3cret"));
        assert!(!key_matches("", "s3cret"));
    }
}
