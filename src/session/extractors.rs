use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::error::ApiError;
use crate::session::cookie::SESSION_COOKIE;

/// Session identifier taken from the request cookies.
///
/// Rejecting here keeps cookie-less requests away from the store entirely.
/// The value itself is never checked against anything; there is no session
/// table, a session exists only as a recognized cookie value.
#[derive(Debug)]
pub struct SessionId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match session_from_jar(&jar) {
            Some(id) => Ok(SessionId(id)),
            None => {
                warn!("missing sessionId cookie");
                Err(ApiError::MissingSession)
            }
        }
    }
}

/// Reads the session cookie, treating an empty value as absent.
pub fn session_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}
