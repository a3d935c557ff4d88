//! SeaORM entity definitions.

pub mod activity_log;
pub mod api_token;
pub mod project;
pub mod test_case;
pub mod test_case_version;
pub mod test_run;
pub mod test_run_entry;
pub mod user;
