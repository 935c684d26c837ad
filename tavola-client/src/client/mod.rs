//! Client module - transports and the `TavolaClient` entry point.

mod common;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use common::{ClientContext, TavolaClient};
pub use http::{HttpClient, NetworkHttpClient, TokenSlot};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
