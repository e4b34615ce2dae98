use super::{Error, Result, User};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

#[cfg_attr(test, automock)]
#[async_trait]
pub(crate) trait UserService {
    async fn get_by_id(&self, connection: &DatabaseConnection, user_id: &str) -> Result<Option<User>>;
}

pub(crate) struct UserServiceImpl;

impl UserServiceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_by_id(&self, connection: &DatabaseConnection, user_id: &str) -> Result<Option<User>> {
        use crate::database::user::Entity;

        let user_model = Entity::find_by_id(user_id).one(connection).await?;

        Ok(user_model.map(User::from))
    }
}

impl From<crate::database::user::Model> for User {
    fn from(value: crate::database::user::Model) -> Self {
        User::new(value.id, value.email, value.display_name, value.photo_url)
    }
}

impl From<DbErr> for Error {
    fn from(value: DbErr) -> Self {
        Self::Anyhow(value.into())
    }
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::{Error, UserService, UserServiceImpl};

    #[tokio::test]
    async fn when_user_exists_then_user_service_returns_ok_of_user() {
        use crate::database::user::Model;

        const USER_ID: &str = "user_1";
        let now = Utc::now();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![Model {
            id: USER_ID.to_owned(),
            email: "one@example.com".to_owned(),
            display_name: Some("User One".to_owned()),
            photo_url: None,
            created_at: now,
            updated_at: now,
        }]]);
        let connection = mock_database.into_connection();

        let result = UserServiceImpl::new().get_by_id(&connection, USER_ID).await;

        let user = result.expect("getting user should be successful").expect("user should exist");
        assert_eq!(user.id, USER_ID);
        assert_eq!(user.email, "one@example.com");
    }

    #[tokio::test]
    async fn when_user_does_not_exist_then_user_service_returns_ok_of_none() {
        use crate::database::user::Model;

        let mock_database = MockDatabase::new(DatabaseBackend::Postgres).append_query_results([Vec::<Model>::new()]);
        let connection = mock_database.into_connection();

        let result = UserServiceImpl::new().get_by_id(&connection, "user_1").await;

        assert_eq!(result.expect("getting user should be successful"), None);
    }

    #[tokio::test]
    async fn when_getting_user_is_failed_then_user_service_returns_anyhow_err() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("some error".to_owned())]);
        let connection = mock_database.into_connection();

        let result = UserServiceImpl::new().get_by_id(&connection, "user_1").await;

        assert!(matches!(result, Err(Error::Anyhow(_))));
        assert_eq!(result.err().unwrap().to_string(), "Custom Error: some error");
    }
}
