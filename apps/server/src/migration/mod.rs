//! SeaORM database migrations.
//!
//! Written with the schema builder so the same set runs on PostgreSQL and SQLite.

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_users;
mod m20261019_000002_create_api_tokens;
mod m20261019_000003_create_projects;
mod m20261019_000004_create_test_cases;
mod m20261019_000005_create_test_case_versions;
mod m20261019_000006_create_test_runs;
mod m20261019_000007_create_test_run_entries;
mod m20261019_000008_create_activity_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_users::Migration),
            Box::new(m20261019_000002_create_api_tokens::Migration),
            Box::new(m20261019_000003_create_projects::Migration),
            Box::new(m20261019_000004_create_test_cases::Migration),
            Box::new(m20261019_000005_create_test_case_versions::Migration),
            Box::new(m20261019_000006_create_test_runs::Migration),
            Box::new(m20261019_000007_create_test_run_entries::Migration),
            Box::new(m20261019_000008_create_activity_logs::Migration),
        ]
    }
}
