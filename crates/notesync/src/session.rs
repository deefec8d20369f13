//! Session authority: signed-cookie sessions and the authentication gate.
//!
//! A client is either Anonymous or Authenticated. Login stores the identity
//! in a signed cookie; logout removes it unconditionally. The [`CurrentUser`]
//! extractor is the gate every protected handler declares: it re-validates
//! the cookie on each request (never cached) and short-circuits with 401
//! before any repository code runs.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use tower_cookies::{
    cookie::SameSite,
    Cookie, Cookies, Key,
};

use notesync_core::auth::SessionUser;

use crate::state::AppState;

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "notesync_session";

const AUTH_REQUIRED: (StatusCode, &str) = (StatusCode::UNAUTHORIZED, "Authentication required");

/// Extractor for the authenticated user. Rejects with 401 if the request
/// carries no valid session.
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let cookies = Cookies::from_request_parts(parts, state).await?;

        let cookie = cookies
            .signed(&app_state.cookie_key)
            .get(SESSION_COOKIE)
            .ok_or(AUTH_REQUIRED)?;

        let user = decode(cookie.value()).ok_or(AUTH_REQUIRED)?;
        Ok(CurrentUser(user))
    }
}

/// Transitions the client to Authenticated: stores the identity in a signed,
/// http-only cookie. No expiry is set; sessions do not time out.
pub fn establish(cookies: &Cookies, key: &Key, user: &SessionUser) {
    let cookie = Cookie::build((SESSION_COOKIE, encode(user)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookies.signed(key).add(cookie);
}

/// Transitions the client back to Anonymous, whether or not a session exists.
pub fn clear(cookies: &Cookies, key: &Key) {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    cookies.signed(key).remove(cookie);
}

/// Cookie payload is `<id>:<email>`. The signature covers integrity; this
/// only needs to be unambiguous, and the id never contains a colon.
fn encode(user: &SessionUser) -> String {
    format!("{}:{}", user.id, user.email)
}

fn decode(value: &str) -> Option<SessionUser> {
    let (id, email) = value.split_once(':')?;
    let id = id.parse().ok()?;
    if email.is_empty() {
        return None;
    }
    Some(SessionUser {
        id,
        email: email.to_string(),
    })
}
