use axum_extra::extract::cookie::Cookie;
use time::Duration;
use uuid::Uuid;

/// Cookie carrying the anonymous session identifier.
pub const SESSION_COOKIE: &str = "sessionId";

/// 7 days.
pub const SESSION_TTL_SECONDS: i64 = 60 * 60 * 24 * 7;

/// New opaque session identifier. Pure UUID v4 entropy, no collision check
/// against existing rows.
pub fn mint_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// The `Set-Cookie` issued on first creation: root path, 7-day max-age,
/// default flags otherwise.
pub fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL_SECONDS))
        .build()
}
