//! HTTP Basic authentication gate for the IP-echo route.
//!
//! Credentials are checked against the [`CredentialStore`] held in
//! [`AppState`]. When the state carries no store, auth is disabled and every
//! request passes straight through.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ipecho_core::CredentialStore;
use tracing::debug;

use crate::error::{ApiError, AuthFailure};
use crate::state::AppState;

/// Username and password decoded from an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Middleware that requires valid Basic credentials.
///
/// Failures answer 401 with a `WWW-Authenticate: Basic` challenge.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(store) = state.credentials.as_deref() else {
        return Ok(next.run(request).await);
    };

    if let Err(failure) = authenticate(store, request.headers()) {
        debug!(reason = failure.reason(), "basic auth rejected");
        metrics::counter!("ipecho_auth_failures_total", "reason" => failure.reason()).increment(1);
        return Err(failure.into());
    }

    Ok(next.run(request).await)
}

/// Validate the request's Basic credentials against `store`.
pub fn authenticate(store: &CredentialStore, headers: &HeaderMap) -> Result<(), AuthFailure> {
    let creds = basic_credentials(headers)?;
    if !store.contains_user(&creds.username) {
        return Err(AuthFailure::UnknownUser);
    }
    if !store.verify(&creds.username, &creds.password) {
        return Err(AuthFailure::BadPassword);
    }
    Ok(())
}

/// Extract and decode `Authorization: Basic <base64(user:pass)>`.
///
/// The scheme name is case-insensitive. The decoded payload is split on its
/// first colon, so passwords may contain colons.
pub fn basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, AuthFailure> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthFailure::Missing)?;
    let value = value.to_str().map_err(|_| AuthFailure::Malformed)?;

    let (scheme, encoded) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthFailure::Malformed)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthFailure::Malformed);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthFailure::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthFailure::Malformed)?;
    let (username, password) = decoded.split_once(':').ok_or(AuthFailure::Malformed)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(user_pass: &str) -> HeaderMap {
        headers_with(&format!("Basic {}", STANDARD.encode(user_pass)))
    }

    #[test]
    fn decodes_basic_header() {
        let creds = basic_credentials(&basic("alice:pa:ss")).expect("creds");
        assert_eq!(
            creds,
            BasicCredentials {
                username: "alice".into(),
                password: "pa:ss".into(),
            }
        );
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let headers = headers_with(&format!("bAsIc {}", STANDARD.encode("a:b")));
        assert!(basic_credentials(&headers).is_ok());
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            basic_credentials(&HeaderMap::new()),
            Err(AuthFailure::Missing)
        );
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(
            basic_credentials(&headers_with("Bearer abc")),
            Err(AuthFailure::Malformed)
        );
        assert_eq!(
            basic_credentials(&headers_with("Basic")),
            Err(AuthFailure::Malformed)
        );
        assert_eq!(
            basic_credentials(&headers_with("Basic !!!not-base64!!!")),
            Err(AuthFailure::Malformed)
        );
        assert_eq!(
            basic_credentials(&basic("no-colon")),
            Err(AuthFailure::Malformed)
        );
    }

    #[test]
    fn authenticate_checks_store() {
        let store = CredentialStore::parse("alice:pa:ss\nbob:builder\n");
        assert_eq!(authenticate(&store, &basic("alice:pa:ss")), Ok(()));
        assert_eq!(authenticate(&store, &basic("bob:builder")), Ok(()));
        assert_eq!(
            authenticate(&store, &basic("alice:wrong")),
            Err(AuthFailure::BadPassword)
        );
        assert_eq!(
            authenticate(&store, &basic("carol:pa:ss")),
            Err(AuthFailure::UnknownUser)
        );
    }
}
