use std::sync::Arc;

use async_trait::async_trait;
use portico_token::claim::SignInProvider;
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

use crate::{
    application::locale::LocaleBundles,
    domain::{
        csrf::CsrfSigner,
        organization::{Error as OrganizationServiceError, OrganizationService},
        session::{Error as SessionError, SessionVerifier},
        user::{Error as UserServiceError, UserService},
    },
};

use self::{
    command::PagePropsCommand,
    data::{AppPropsData, PageOutcome, SignOutRedirectData, UiStateData},
};

pub(crate) mod command;
pub(crate) mod data;

const DEFAULT_SIDEBAR_STATE: &str = "expanded";

#[async_trait]
pub(crate) trait PagePropsUseCase {
    async fn assemble(&self, cmd: PagePropsCommand) -> PageOutcome;
}

#[derive(Clone)]
pub(crate) struct PagePropsConfig {
    pub require_email_verification: bool,
    pub sign_in_path: String,
    pub default_theme: String,
}

pub(crate) struct PagePropsUseCaseImpl {
    database_connection: Arc<DatabaseConnection>,
    session_verifier: Arc<dyn SessionVerifier + Sync + Send>,
    user_service: Arc<dyn UserService + Sync + Send>,
    organization_service: Arc<dyn OrganizationService + Sync + Send>,
    locale_bundles: Arc<LocaleBundles>,
    csrf_signer: CsrfSigner,
    config: PagePropsConfig,
}

impl PagePropsUseCaseImpl {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        database_connection: Arc<DatabaseConnection>,
        session_verifier: Arc<dyn SessionVerifier + Sync + Send>,
        user_service: Arc<dyn UserService + Sync + Send>,
        organization_service: Arc<dyn OrganizationService + Sync + Send>,
        locale_bundles: Arc<LocaleBundles>,
        csrf_signer: CsrfSigner,
        config: PagePropsConfig,
    ) -> Self {
        Self {
            database_connection,
            session_verifier,
            user_service,
            organization_service,
            locale_bundles,
            csrf_signer,
            config,
        }
    }

    async fn try_assemble(&self, cmd: &PagePropsCommand) -> Result<AppPropsData> {
        let claim = self.session_verifier.verify(cmd.session_token.as_deref()).await?;

        // OAuth providers verify addresses on their side; only password
        // accounts are gated here.
        if self.config.require_email_verification
            && !claim.email_verified
            && claim.sign_in_provider == SignInProvider::Password
        {
            return Err(Error::EmailNotVerified);
        }

        // Two independent reads joined explicitly; nothing is decided before
        // both complete.
        let (user, organization) = tokio::join!(
            self.user_service.get_by_id(self.database_connection.as_ref(), &claim.uid),
            self.organization_service.resolve(
                self.database_connection.as_ref(),
                &claim.uid,
                cmd.organization_hint.as_deref(),
            ),
        );

        let user = user?.ok_or(Error::ProfileMissing)?;
        let organization = organization?.ok_or(Error::OrganizationUnresolved)?;

        let csrf_token = self.csrf_signer.generate();
        let strings = self.locale_bundles.for_locale(cmd.locale.as_deref());
        let ui = UiStateData {
            theme: cmd.theme.clone().unwrap_or_else(|| self.config.default_theme.clone()),
            sidebar_state: cmd.sidebar_state.clone().unwrap_or_else(|| DEFAULT_SIDEBAR_STATE.to_owned()),
        };

        Ok(AppPropsData {
            session: claim.into(),
            user: user.into(),
            organization: organization.into(),
            csrf_token,
            strings,
            ui,
        })
    }
}

#[async_trait]
impl PagePropsUseCase for PagePropsUseCaseImpl {
    /// The per-request pipeline. Every failure class collapses to a sign-out
    /// redirect; nothing escapes to the server layer as an error.
    async fn assemble(&self, cmd: PagePropsCommand) -> PageOutcome {
        match self.try_assemble(&cmd).await {
            Ok(props) => PageOutcome::Props(Box::new(props)),
            Err(error) => {
                let needs_email_verification = matches!(error, Error::EmailNotVerified);
                match &error {
                    Error::Authentication(e) => {
                        debug!(error = %e, "session verification failed. forcing sign out.")
                    }
                    Error::EmailNotVerified => {
                        debug!("password account with unverified email. forcing sign out.")
                    }
                    Error::ProfileMissing => {
                        warn!("verified session without a user record. forcing sign out.")
                    }
                    Error::OrganizationUnresolved => {
                        debug!("no organization resolved for the user. forcing sign out.")
                    }
                    Error::Anyhow(e) => {
                        warn!(error = %e, "unexpected error while assembling page props. forcing sign out.")
                    }
                }

                PageOutcome::SignOut(SignOutRedirectData::new(
                    &self.config.sign_in_path,
                    &cmd.resolved_url,
                    needs_email_verification,
                ))
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Authentication(#[from] SessionError),
    #[error("password account with unverified email")]
    EmailNotVerified,
    #[error("no user record exists for the verified session")]
    ProfileMissing,
    #[error("no organization could be resolved for the user")]
    OrganizationUnresolved,
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<UserServiceError> for Error {
    fn from(value: UserServiceError) -> Self {
        match value {
            UserServiceError::Anyhow(e) => Self::Anyhow(e),
        }
    }
}

impl From<OrganizationServiceError> for Error {
    fn from(value: OrganizationServiceError) -> Self {
        match value {
            OrganizationServiceError::Anyhow(e) => Self::Anyhow(e),
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
