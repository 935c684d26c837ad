//! Shared types for Tavola
//!
//! Entity models, response envelopes, list queries and client-side
//! validation used by the client library and the CLI.

pub mod client;
pub mod models;
pub mod query;
pub mod response;
pub mod util;
pub mod validation;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use query::ListQuery;
pub use response::{ApiResponse, Paginated};
pub use validation::{Validate, ValidationError};
