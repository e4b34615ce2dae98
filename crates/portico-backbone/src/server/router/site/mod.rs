use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::application::Application;

use self::response::GetSiteResponse;

mod response;

pub(crate) fn router(application: Arc<Application>) -> axum::Router {
    Router::new().route("/site", get(handle_get_site)).with_state(application)
}

#[debug_handler]
async fn handle_get_site(State(application): State<Arc<Application>>) -> impl IntoResponse {
    (StatusCode::OK, Json(GetSiteResponse::from(application.site())))
}
