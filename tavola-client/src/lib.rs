//! Tavola Client - typed client for the restaurant backend
//!
//! Wraps the REST API (storefront and admin) with a query cache, the
//! signed-in session, the cart snapshot and list/dashboard view-models.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod query;
pub mod services;
pub mod stores;
pub mod views;

pub use client::{HttpClient, NetworkHttpClient, TavolaClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::{ClientConfig, RetryPolicy};
pub use dashboard::DashboardPoller;
pub use error::{ClientError, ClientResult};
pub use query::{QueryCache, QueryKey, QueryState};

// Re-export shared types for convenience
pub use shared::client::{AuthSession, UserInfo};
pub use shared::{ApiResponse, ListQuery, Paginated};
