//! Create test_cases table.

use sea_orm_migration::prelude::*;

use super::m20261019_000003_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TestCases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(TestCases::ProjectId).uuid().not_null())
                    .col(ColumnDef::new(TestCases::Title).string_len(500).not_null())
                    .col(
                        ColumnDef::new(TestCases::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TestCases::Priority).string_len(16).not_null())
                    .col(ColumnDef::new(TestCases::Status).string_len(16).not_null())
                    .col(
                        ColumnDef::new(TestCases::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(TestCases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestCases::Table, TestCases::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_cases_project_id")
                    .table(TestCases::Table)
                    .col(TestCases::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestCases::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestCases {
    Table,
    Id,
    ProjectId,
    Title,
    Description,
    Priority,
    Status,
    Version,
    CreatedAt,
    UpdatedAt,
}
