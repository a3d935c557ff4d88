//! Authentication module for API token verification.

mod extractor;

pub use extractor::{AuthError, CurrentUser};
