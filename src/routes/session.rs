//! Session cookie plumbing.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::state::AppState;

pub const COOKIE_NAME: &str = "oretrack_session";

/// The caller's session token, if the cookie names a live session.
/// Read-only handlers use this so anonymous reads never allocate a session.
pub async fn known(state: &AppState, jar: &CookieJar) -> Option<String> {
    let token = jar.get(COOKIE_NAME)?.value().to_owned();
    state.sessions.touch(&token).await.then_some(token)
}

/// Resolve the caller's session token for a write, issuing a cookie when a
/// new session was created. The returned jar must be part of the response.
pub async fn resolve(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
    let presented = jar.get(COOKIE_NAME).map(|c| c.value().to_owned());
    let (token, issued) = state.sessions.ensure(presented.as_deref()).await;
    if !issued {
        return (jar, token);
    }

    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure);
    (jar.add(cookie), token)
}
