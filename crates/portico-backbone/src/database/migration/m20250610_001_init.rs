use async_trait::async_trait;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    DisplayName,
    PhotoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Organization {
    Table,
    Id,
    Name,
    LogoUrl,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum OrganizationMember {
    Table,
    Id,
    OrganizationId,
    UserId,
    Role,
    CreatedAt,
}

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 128).primary_key())
                    .col(string_len(User::Email, 320))
                    .col(string_len_null(User::DisplayName, 100))
                    .col(text_null(User::PhotoUrl))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .take(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(char_len(Organization::Id, 26).primary_key())
                    .col(string_len(Organization::Name, 100))
                    .col(text_null(Organization::LogoUrl))
                    .col(timestamp_with_time_zone(Organization::CreatedAt))
                    .col(timestamp_with_time_zone(Organization::UpdatedAt))
                    .take(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrganizationMember::Table)
                    .if_not_exists()
                    .col(char_len(OrganizationMember::Id, 26).primary_key())
                    .col(char_len(OrganizationMember::OrganizationId, 26))
                    .col(string_len(OrganizationMember::UserId, 128))
                    .col(string_len(OrganizationMember::Role, 20))
                    .col(timestamp_with_time_zone(OrganizationMember::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organization_member-organization_id")
                            .from(OrganizationMember::Table, OrganizationMember::OrganizationId)
                            .to(Organization::Table, Organization::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organization_member-user_id")
                            .from(OrganizationMember::Table, OrganizationMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uidx-organization_member-organization_id-user_id")
                    .table(OrganizationMember::Table)
                    .col(OrganizationMember::OrganizationId)
                    .col(OrganizationMember::UserId)
                    .unique()
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-organization_member-user_id")
                    .table(OrganizationMember::Table)
                    .col(OrganizationMember::UserId)
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(OrganizationMember::Table).if_exists().take()).await?;
        manager.drop_table(Table::drop().table(Organization::Table).if_exists().take()).await?;
        manager.drop_table(Table::drop().table(User::Table).if_exists().take()).await
    }
}
