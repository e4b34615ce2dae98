use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    routing::post,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    application::Application,
    server::{response::error_payload, CSRF_TOKEN_COOKIE, ORGANIZATION_ID_COOKIE},
};

const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

pub(crate) fn router(application: Arc<Application>) -> axum::Router {
    Router::new().route("/auth/sign-out", post(handle_post_sign_out)).with_state(application)
}

/// Clears the server-side session cookies and sends the client back to the
/// sign-in page with `signOut=true` so it drops its own session state too.
#[debug_handler]
async fn handle_post_sign_out(
    State(application): State<Arc<Application>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> axum::response::Response {
    let token_is_valid = headers
        .get(CSRF_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|token| application.csrf().verify(token))
        .unwrap_or(false);

    if !token_is_valid {
        return (StatusCode::FORBIDDEN, error_payload("INVALID_CSRF_TOKEN", "the CSRF token is missing or invalid"))
            .into_response();
    }

    let jar = jar
        .remove(Cookie::build((application.session_cookie_name().to_owned(), "")).path("/"))
        .remove(Cookie::build((ORGANIZATION_ID_COOKIE, "")).path("/"))
        .remove(Cookie::build((CSRF_TOKEN_COOKIE, "")).path("/"));

    let destination = format!("{}?signOut=true", application.sign_in_path());

    (jar, Redirect::temporary(&destination)).into_response()
}
