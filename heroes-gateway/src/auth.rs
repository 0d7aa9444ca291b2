//! Admin guard for privileged routes.
//!
//! Callers present `Authorization: Bearer <token>`. The guard keeps only the
//! SHA-256 digest of the configured token and compares digests without
//! short-circuiting.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::GatewayError;

/// Checks bearer tokens against the configured admin token.
#[derive(Clone)]
pub struct AdminGuard {
    digest: Option<[u8; 32]>,
}

impl AdminGuard {
    /// Build a guard. With `None`, every admin request is rejected.
    #[must_use]
    pub fn new(admin_token: Option<&str>) -> Self {
        Self { digest: admin_token.map(digest) }
    }

    /// Returns `true` if an admin token is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Authorize a request by its headers.
    ///
    /// # Errors
    /// Returns [`GatewayError::Unauthorized`] if no admin token is
    /// configured, the header is missing or not a bearer token, or the token
    /// does not match.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), GatewayError> {
        let Some(expected) = &self.digest else {
            return Err(GatewayError::Unauthorized("admin access is disabled"));
        };
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .ok_or(GatewayError::Unauthorized("missing bearer token"))?;

        let presented = digest(token);
        let diff = presented.iter().zip(expected).fold(0u8, |acc, (a, b)| acc | (a ^ b));
        if diff != 0 {
            return Err(GatewayError::Unauthorized("invalid admin token"));
        }
        Ok(())
    }
}

fn digest(token: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(token.as_bytes()));
    out
}

impl std::fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGuard")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Middleware rejecting non-admin callers before the handler runs.
///
/// # Errors
/// Returns [`GatewayError::Unauthorized`] when [`AdminGuard::authorize`] fails.
pub async fn require_admin(
    State(guard): State<Arc<AdminGuard>>,
    request: Request,
    next: Next,
) -> Result<Response, GatewayError> {
    if let Err(err) = guard.authorize(request.headers()) {
        warn!(method = %request.method(), uri = %request.uri(), error = %err, "admin check failed");
        return Err(err);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(value) {
            Ok(v) => headers.insert(header::AUTHORIZATION, v),
            Err(e) => panic!("invalid header value: {e}"),
        };
        headers
    }

    #[test]
    fn matching_bearer_token_is_authorized() {
        let guard = AdminGuard::new(Some("s3cret"));
        assert!(guard.authorize(&headers("Bearer s3cret")).is_ok());
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let guard = AdminGuard::new(Some("s3cret"));
        assert!(guard.authorize(&headers("bearer s3cret")).is_ok());
        assert!(guard.authorize(&headers("BEARER s3cret")).is_ok());
        assert!(guard.authorize(&headers("Bearers3cret")).is_err());
    }

    #[test]
    fn wrong_missing_or_malformed_tokens_are_rejected() {
        let guard = AdminGuard::new(Some("s3cret"));
        assert!(guard.authorize(&headers("Bearer nope")).is_err());
        assert!(guard.authorize(&headers("Basic s3cret")).is_err());
        assert!(guard.authorize(&HeaderMap::new()).is_err());
    }

    #[test]
    fn unconfigured_guard_rejects_everyone() {
        let guard = AdminGuard::new(None);
        assert!(!guard.is_configured());
        assert!(matches!(
            guard.authorize(&headers("Bearer anything")),
            Err(GatewayError::Unauthorized("admin access is disabled"))
        ));
    }

    #[test]
    fn debug_output_hides_the_digest() {
        let rendered = format!("{:?}", AdminGuard::new(Some("s3cret")));
        assert_eq!(rendered, "AdminGuard { configured: true }");
    }
}
