use super::{Error, Member, Organization, Result};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tracing::debug;
use ulid::Ulid;

use crate::database::UlidId;

#[cfg_attr(test, automock)]
#[async_trait]
pub(crate) trait OrganizationService {
    async fn get_by_id(&self, connection: &DatabaseConnection, organization_id: &str) -> Result<Option<Organization>>;
    async fn get_first_for_member(
        &self,
        connection: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<Organization>>;
    async fn resolve<'a>(
        &self,
        connection: &DatabaseConnection,
        user_id: &str,
        candidate_organization_id: Option<&'a str>,
    ) -> Result<Option<Organization>>;
}

pub(crate) struct OrganizationServiceImpl;

impl OrganizationServiceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrganizationService for OrganizationServiceImpl {
    async fn get_by_id(&self, connection: &DatabaseConnection, organization_id: &str) -> Result<Option<Organization>> {
        use crate::database::{organization, organization_member};

        // A malformed id can only come from a stale or tampered hint.
        let Ok(id) = Ulid::from_string(organization_id) else {
            return Ok(None);
        };

        let Some(organization_model) = organization::Entity::find_by_id(UlidId::new(id)).one(connection).await? else {
            return Ok(None);
        };

        let member_models = organization_member::Entity::find()
            .filter(organization_member::Column::OrganizationId.eq(UlidId::new(id)))
            .all(connection)
            .await?;

        Ok(Some(assemble_organization(organization_model, member_models)))
    }

    async fn get_first_for_member(
        &self,
        connection: &DatabaseConnection,
        user_id: &str,
    ) -> Result<Option<Organization>> {
        use crate::database::organization_member::{Column, Entity};

        // No secondary ordering: whichever membership the query returns first
        // wins.
        let Some(membership) = Entity::find().filter(Column::UserId.eq(user_id)).one(connection).await? else {
            return Ok(None);
        };

        self.get_by_id(connection, &membership.organization_id.to_string()).await
    }

    /// Two-tier lookup: the hinted organization when the caller is still a
    /// member of it, the first queried membership otherwise. The hint is a
    /// cache, not a source of truth; membership is re-checked every time.
    async fn resolve<'a>(
        &self,
        connection: &DatabaseConnection,
        user_id: &str,
        candidate_organization_id: Option<&'a str>,
    ) -> Result<Option<Organization>> {
        if let Some(candidate) = candidate_organization_id {
            match self.get_by_id(connection, candidate).await {
                Ok(Some(organization)) if organization.has_member(user_id) => return Ok(Some(organization)),
                Ok(_) => {}
                Err(e) => {
                    debug!(error = %e, "organization hint lookup failed. falling back to the membership query.");
                }
            }
        }

        match self.get_first_for_member(connection, user_id).await {
            Ok(organization) => Ok(organization),
            Err(e) => {
                debug!(error = %e, "membership query failed. treating the user as belonging to no organization.");
                Ok(None)
            }
        }
    }
}

fn assemble_organization(
    organization: crate::database::organization::Model,
    members: Vec<crate::database::organization_member::Model>,
) -> Organization {
    let members = members
        .into_iter()
        .map(|member| {
            (member.user_id.clone(), Member { user_id: member.user_id, role: member.role.into() })
        })
        .collect();

    Organization::new(organization.id.to_string(), organization.name, organization.logo_url, members)
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
    use ulid::Ulid;

    use crate::database::{organization, organization_member, UlidId};
    use crate::domain::organization::Role;

    use super::{Error, OrganizationService, OrganizationServiceImpl};

    fn organization_model(id: Ulid, name: &str) -> organization::Model {
        let now = Utc::now();
        organization::Model {
            id: UlidId::new(id),
            name: name.to_owned(),
            logo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn member_model(organization_id: Ulid, user_id: &str, role: &str) -> organization_member::Model {
        organization_member::Model {
            id: UlidId::new(Ulid::new()),
            organization_id: UlidId::new(organization_id),
            user_id: user_id.to_owned(),
            role: role.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn when_organization_exists_then_get_by_id_returns_it_with_its_members() {
        let organization_id = Ulid::new();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![organization_model(organization_id, "acme")]])
            .append_query_results([vec![
                member_model(organization_id, "user_1", "owner"),
                member_model(organization_id, "user_2", "member"),
            ]]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().get_by_id(&connection, &organization_id.to_string()).await;

        let organization =
            result.expect("getting organization should be successful").expect("organization should exist");
        assert_eq!(organization.id, organization_id.to_string());
        assert_eq!(organization.members.len(), 2);
        assert_eq!(organization.members["user_1"].role, Role::Owner);
    }

    #[tokio::test]
    async fn when_organization_does_not_exist_then_get_by_id_returns_ok_of_none() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<organization::Model>::new()]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().get_by_id(&connection, &Ulid::new().to_string()).await;

        assert_eq!(result.expect("getting organization should be successful"), None);
    }

    #[tokio::test]
    async fn when_organization_id_is_malformed_then_get_by_id_returns_ok_of_none_without_querying() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().get_by_id(&connection, "not-a-ulid").await;

        assert_eq!(result.expect("getting organization should be successful"), None);
    }

    #[tokio::test]
    async fn when_user_is_a_member_of_the_hinted_organization_then_resolve_returns_it() {
        let organization_id = Ulid::new();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![organization_model(organization_id, "acme")]])
            .append_query_results([vec![member_model(organization_id, "user_1", "owner")]]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new()
            .resolve(&connection, "user_1", Some(&organization_id.to_string()))
            .await;

        let organization = result.expect("resolving should be successful").expect("organization should be resolved");
        assert_eq!(organization.id, organization_id.to_string());
    }

    #[tokio::test]
    async fn when_user_is_not_a_member_of_the_hinted_organization_then_resolve_falls_back_to_a_membership() {
        let hinted_id = Ulid::new();
        let actual_id = Ulid::new();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            // hinted organization exists but the user is not in its members
            .append_query_results([vec![organization_model(hinted_id, "acme")]])
            .append_query_results([vec![member_model(hinted_id, "someone_else", "owner")]])
            // fallback membership query
            .append_query_results([vec![member_model(actual_id, "user_1", "member")]])
            .append_query_results([vec![organization_model(actual_id, "globex")]])
            .append_query_results([vec![member_model(actual_id, "user_1", "member")]]);
        let connection = mock_database.into_connection();

        let result =
            OrganizationServiceImpl::new().resolve(&connection, "user_1", Some(&hinted_id.to_string())).await;

        let organization = result.expect("resolving should be successful").expect("organization should be resolved");
        assert_eq!(organization.id, actual_id.to_string());
    }

    #[tokio::test]
    async fn when_the_hinted_organization_does_not_exist_then_resolve_falls_back_to_a_membership() {
        let actual_id = Ulid::new();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<organization::Model>::new()])
            .append_query_results([vec![member_model(actual_id, "user_1", "member")]])
            .append_query_results([vec![organization_model(actual_id, "globex")]])
            .append_query_results([vec![member_model(actual_id, "user_1", "member")]]);
        let connection = mock_database.into_connection();

        let result =
            OrganizationServiceImpl::new().resolve(&connection, "user_1", Some(&Ulid::new().to_string())).await;

        let organization = result.expect("resolving should be successful").expect("organization should be resolved");
        assert_eq!(organization.id, actual_id.to_string());
    }

    #[tokio::test]
    async fn when_no_hint_is_given_then_resolve_returns_the_first_membership() {
        let first_id = Ulid::new();
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                member_model(first_id, "user_1", "owner"),
            ]])
            .append_query_results([vec![organization_model(first_id, "acme")]])
            .append_query_results([vec![member_model(first_id, "user_1", "owner")]]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().resolve(&connection, "user_1", None).await;

        let organization = result.expect("resolving should be successful").expect("organization should be resolved");
        assert_eq!(organization.id, first_id.to_string());
    }

    #[tokio::test]
    async fn when_user_belongs_to_no_organization_then_resolve_returns_ok_of_none() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<organization_member::Model>::new()]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().resolve(&connection, "user_1", None).await;

        assert_eq!(result.expect("resolving should be successful"), None);
    }

    #[tokio::test]
    async fn when_the_membership_query_fails_then_resolve_returns_ok_of_none() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("some error".to_owned())]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().resolve(&connection, "user_1", None).await;

        assert_eq!(result.expect("resolving should swallow the failure"), None);
    }

    #[tokio::test]
    async fn when_getting_organization_is_failed_then_get_by_id_returns_anyhow_err() {
        let mock_database = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("some error".to_owned())]);
        let connection = mock_database.into_connection();

        let result = OrganizationServiceImpl::new().get_by_id(&connection, &Ulid::new().to_string()).await;

        assert!(matches!(result, Err(Error::Anyhow(_))));
    }
}
