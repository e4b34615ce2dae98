use std::{sync::Arc, time::Duration};

use portico_token::auth::jwks_discovery::{CachedRemoteJwksDiscovery, JwksDiscovery};
use sea_orm::DatabaseConnection;

use crate::{
    config::ApplicationConfig,
    database::{connect_to_database, migration, AuthMethod},
    domain::{
        csrf::CsrfSigner,
        organization::{OrganizationService, OrganizationServiceImpl},
        session::{SessionVerifier, TokenSessionVerifier},
        user::{UserService, UserServiceImpl},
    },
};

use self::{
    locale::LocaleBundles,
    props::{PagePropsConfig, PagePropsUseCase, PagePropsUseCaseImpl},
    session::{SessionUseCase, SessionUseCaseImpl},
    site::SiteData,
};

pub(crate) mod locale;
pub(crate) mod props;
pub(crate) mod session;
pub(crate) mod site;

const DEFAULT_JWKS_REFRESH_INTERVAL_SECS: u64 = 600;

pub(crate) struct Application {
    database_connection: Arc<DatabaseConnection>,
    session_verifier: Arc<dyn SessionVerifier + Sync + Send>,
    user_service: Arc<dyn UserService + Sync + Send>,
    organization_service: Arc<dyn OrganizationService + Sync + Send>,
    locale_bundles: Arc<LocaleBundles>,
    csrf_signer: CsrfSigner,
    jwks_discovery: Arc<dyn JwksDiscovery + Sync + Send>,
    props_config: PagePropsConfig,
    site: SiteData,
    session_cookie_name: String,
    sign_in_path: String,
}

impl Application {
    pub fn props(&self) -> impl PagePropsUseCase {
        PagePropsUseCaseImpl::new(
            self.database_connection.clone(),
            self.session_verifier.clone(),
            self.user_service.clone(),
            self.organization_service.clone(),
            self.locale_bundles.clone(),
            self.csrf_signer.clone(),
            self.props_config.clone(),
        )
    }

    pub fn session(&self) -> impl SessionUseCase {
        SessionUseCaseImpl::new(self.database_connection.clone(), self.user_service.clone())
    }

    pub fn csrf(&self) -> &CsrfSigner {
        &self.csrf_signer
    }

    pub fn jwks_discovery(&self) -> &Arc<dyn JwksDiscovery + Sync + Send> {
        &self.jwks_discovery
    }

    pub fn site(&self) -> &SiteData {
        &self.site
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }
}

pub(super) async fn init(config: &ApplicationConfig) -> anyhow::Result<Application> {
    let database_connection = init_database_connection(config).await?;
    migration::migrate(database_connection.as_ref()).await?;

    let jwks_discovery: Arc<dyn JwksDiscovery + Sync + Send> = Arc::new(CachedRemoteJwksDiscovery::new(
        config.identity.jwks_url.clone(),
        Duration::from_secs(config.identity.jwks_refresh_interval.unwrap_or(DEFAULT_JWKS_REFRESH_INTERVAL_SECS)),
    ));
    let session_verifier = Arc::new(TokenSessionVerifier::new(jwks_discovery.clone()));
    let user_service = Arc::new(UserServiceImpl::new());
    let organization_service = Arc::new(OrganizationServiceImpl::new());
    let locale_bundles =
        Arc::new(LocaleBundles::load(&config.locales.path, &config.site.locale, &config.locales.namespaces));
    let csrf_signer = CsrfSigner::new(config.csrf.secret.clone());

    let props_config = PagePropsConfig {
        require_email_verification: config.auth.require_email_verification,
        sign_in_path: config.paths.sign_in.clone(),
        default_theme: config.ui.theme.as_str().to_owned(),
    };

    Ok(Application {
        database_connection,
        session_verifier,
        user_service,
        organization_service,
        locale_bundles,
        csrf_signer,
        jwks_discovery,
        props_config,
        site: SiteData::from(&config.site),
        session_cookie_name: config.identity.session_cookie.clone(),
        sign_in_path: config.paths.sign_in.clone(),
    })
}

async fn init_database_connection(config: &ApplicationConfig) -> anyhow::Result<Arc<DatabaseConnection>> {
    let database_host = &config.database.host;
    let database_port = config.database.port;
    let database_name = &config.database.database_name;
    let auth_method = create_database_auth_method(config);

    connect_to_database(database_host, database_port, database_name, &auth_method).await
}

fn create_database_auth_method(config: &ApplicationConfig) -> AuthMethod {
    match &config.database.auth {
        crate::config::DatabaseAuthConfig::Credential { username, password } => {
            AuthMethod::Credential { username: username.to_owned(), password: password.to_owned() }
        }
    }
}
