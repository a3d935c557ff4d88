//! Create test_run_entries table.

use sea_orm_migration::prelude::*;

use super::m20261019_000004_create_test_cases::TestCases;
use super::m20261019_000006_create_test_runs::TestRuns;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TestRunEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestRunEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestRunEntries::TestRunId).uuid().not_null())
                    .col(ColumnDef::new(TestRunEntries::TestCaseId).uuid().not_null())
                    .col(ColumnDef::new(TestRunEntries::Position).integer().not_null())
                    .col(
                        ColumnDef::new(TestRunEntries::Status)
                            .string_len(16)
                            .not_null()
                            .default("not_run"),
                    )
                    .col(
                        ColumnDef::new(TestRunEntries::Comments)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TestRunEntries::ExecutedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestRunEntries::Table, TestRunEntries::TestRunId)
                            .to(TestRuns::Table, TestRuns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestRunEntries::Table, TestRunEntries::TestCaseId)
                            .to(TestCases::Table, TestCases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_run_entries_run_case")
                    .table(TestRunEntries::Table)
                    .col(TestRunEntries::TestRunId)
                    .col(TestRunEntries::TestCaseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_test_run_entries_test_case_id")
                    .table(TestRunEntries::Table)
                    .col(TestRunEntries::TestCaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TestRunEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TestRunEntries {
    Table,
    Id,
    TestRunId,
    TestCaseId,
    Position,
    Status,
    Comments,
    ExecutedAt,
}
