use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::{
    application::props::data::UserData,
    domain::user::{Error as UserServiceError, UserService},
};

#[async_trait]
pub(crate) trait SessionUseCase {
    async fn current_user(&self, uid: &str) -> Result<Option<UserData>>;
}

pub(crate) struct SessionUseCaseImpl {
    database_connection: Arc<DatabaseConnection>,
    user_service: Arc<dyn UserService + Sync + Send>,
}

impl SessionUseCaseImpl {
    pub(crate) fn new(
        database_connection: Arc<DatabaseConnection>,
        user_service: Arc<dyn UserService + Sync + Send>,
    ) -> Self {
        Self { database_connection, user_service }
    }
}

#[async_trait]
impl SessionUseCase for SessionUseCaseImpl {
    async fn current_user(&self, uid: &str) -> Result<Option<UserData>> {
        let user = self.user_service.get_by_id(self.database_connection.as_ref(), uid).await?;

        Ok(user.map(UserData::from))
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
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

pub(crate) type Result<T> = std::result::Result<T, Error>;
