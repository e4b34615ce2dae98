use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use portico_token::claim::SessionClaim;

use crate::{
    application::{
        session::{self, SessionUseCase},
        Application,
    },
    server::response::{error_payload, handle_internal_server_error},
};

use self::response::GetSessionResponse;

mod response;

pub(crate) fn router(application: Arc<Application>) -> axum::Router {
    Router::new().route("/api/session", get(handle_get_session)).with_state(application)
}

#[debug_handler]
async fn handle_get_session(
    State(application): State<Arc<Application>>,
    Extension(claim): Extension<SessionClaim>,
) -> Result<axum::response::Response, session::Error> {
    let Some(user) = application.session().current_user(&claim.uid).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            error_payload("USER_NOT_FOUND", "no user record exists for the session"),
        )
            .into_response());
    };

    Ok((StatusCode::OK, Json(GetSessionResponse::new(claim, user))).into_response())
}

impl IntoResponse for session::Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            session::Error::Anyhow(e) => handle_internal_server_error(&*e).into_response(),
        }
    }
}
