use std::sync::Arc;

use axum::{
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    routing::get,
    Router,
};
use portico_token::auth::{extractor::SessionCookieTokenExtractor, layer::PorticoAuthLayer};
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::{
    application::Application,
    config::{ApplicationConfig, CorsConfig},
};

mod response;
mod router;

pub(crate) const ORGANIZATION_ID_COOKIE: &str = "organizationId";
pub(crate) const CSRF_TOKEN_COOKIE: &str = "csrfToken";
pub(crate) const THEME_COOKIE: &str = "theme";
pub(crate) const SIDEBAR_STATE_COOKIE: &str = "sidebarState";

pub(super) struct ServerConfig {
    pub port: u16,
    pub cors: Option<CorsConfig>,
}

impl From<&ApplicationConfig> for ServerConfig {
    fn from(value: &ApplicationConfig) -> Self {
        Self { port: value.port, cors: value.cors.clone() }
    }
}

pub(super) async fn run(application: Application, config: ServerConfig) -> anyhow::Result<()> {
    let application = Arc::new(application);

    let public_router = Router::new()
        .route("/health", get(|| async { "" }))
        .merge(router::site::router(application.clone()))
        .merge(router::page::router(application.clone()))
        .merge(router::auth::router(application.clone()));

    let session_extractor = SessionCookieTokenExtractor::new(application.session_cookie_name().to_owned());
    let protected_router = router::session::router(application.clone()).layer(
        PorticoAuthLayer::builder()
            .jwk_discovery(application.jwks_discovery().clone())
            .token_extractor(Arc::new(session_extractor))
            .build(),
    );

    let app = Router::new().merge(public_router).merge(protected_router);
    let app = if let Some(cors) = config.cors {
        let cors = CorsLayer::new()
            .allow_methods(Any)
            .allow_origin(match cors {
                CorsConfig::AllowAll => AllowOrigin::any(),
                CorsConfig::AllowList(allow_origins) => AllowOrigin::predicate(move |value, _| {
                    let value = value.as_bytes();
                    allow_origins.iter().any(|origin| {
                        let split_byte_wildcard = origin.split('*').map(|s| s.as_bytes()).collect::<Vec<_>>();
                        if split_byte_wildcard.len() == 2 {
                            let (prefix, suffix) = (split_byte_wildcard[0], split_byte_wildcard[1]);
                            value.starts_with(prefix) && value.ends_with(suffix)
                        } else {
                            origin.as_bytes() == value
                        }
                    })
                }),
            })
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
        app.layer(cors)
    } else {
        app
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    debug!("starting backbone server on {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}
