//! Create test_case_versions table.
//!
//! Snapshots are append-only. The unique (test_case_id, version) index rejects
//! a second writer that raced to supersede the same version.

use sea_orm_migration::prelude::*;

use super::m20261019_000004_create_test_cases::TestCases;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestCaseVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestCaseVersions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestCaseVersions::TestCaseId).uuid().not_null())
                    .col(ColumnDef::new(TestCaseVersions::Version).integer().not_null())
                    .col(
                        ColumnDef::new(TestCaseVersions::Title)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseVersions::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(TestCaseVersions::Priority)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseVersions::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseVersions::ChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestCaseVersions::Table, TestCaseVersions::TestCaseId)
                            .to(TestCases::Table, TestCases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_case_versions_case_version")
                    .table(TestCaseVersions::Table)
                    .col(TestCaseVersions::TestCaseId)
                    .col(TestCaseVersions::Version)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestCaseVersions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestCaseVersions {
    Table,
    Id,
    TestCaseId,
    Version,
    Title,
    Description,
    Priority,
    Status,
    ChangedAt,
}
