//! Business logic services.
//!
//! Services own the ownership checks and choose the activity event for each
//! mutation; the `db` module writes the change and its event in one
//! transaction.

pub mod activity;
pub mod credentials;
pub mod identity;
pub mod projects;
pub mod summary;
pub mod test_cases;
pub mod test_runs;

pub use activity::{ACTIVITY_LOG_CAPACITY, ActivityEvent};
