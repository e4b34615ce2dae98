use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::{
    application::{
        props::{command::PagePropsCommand, data::PageOutcome, PagePropsUseCase},
        Application,
    },
    server::{CSRF_TOKEN_COOKIE, ORGANIZATION_ID_COOKIE, SIDEBAR_STATE_COOKIE, THEME_COOKIE},
};

use self::response::GetDashboardResponse;

mod response;

pub(crate) fn router(application: Arc<Application>) -> axum::Router {
    Router::new().route("/dashboard", get(handle_get_dashboard)).with_state(application)
}

#[derive(Deserialize)]
struct PageQuery {
    locale: Option<String>,
}

#[debug_handler]
async fn handle_get_dashboard(
    State(application): State<Arc<Application>>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
    jar: CookieJar,
) -> axum::response::Response {
    let cmd = PagePropsCommand {
        session_token: jar.get(application.session_cookie_name()).map(|cookie| cookie.value().to_owned()),
        organization_hint: jar.get(ORGANIZATION_ID_COOKIE).map(|cookie| cookie.value().to_owned()),
        theme: jar.get(THEME_COOKIE).map(|cookie| cookie.value().to_owned()),
        sidebar_state: jar.get(SIDEBAR_STATE_COOKIE).map(|cookie| cookie.value().to_owned()),
        resolved_url: uri.to_string(),
        locale: query.locale,
    };

    match application.props().assemble(cmd).await {
        PageOutcome::Props(props) => {
            // The hint cookie is rewritten on every successful resolution so
            // the next request takes the fast path.
            let jar = jar
                .add(
                    Cookie::build((ORGANIZATION_ID_COOKIE, props.organization.id.clone()))
                        .path("/")
                        .http_only(true),
                )
                .add(Cookie::build((CSRF_TOKEN_COOKIE, props.csrf_token.clone())).path("/").http_only(true));

            (StatusCode::OK, jar, Json(GetDashboardResponse::from(*props))).into_response()
        }
        PageOutcome::SignOut(redirect) => {
            let jar = jar
                .remove(Cookie::build((application.session_cookie_name().to_owned(), "")).path("/"))
                .remove(Cookie::build((ORGANIZATION_ID_COOKIE, "")).path("/"));

            (jar, Redirect::temporary(&redirect.destination)).into_response()
        }
    }
}
