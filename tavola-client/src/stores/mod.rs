//! Global client state: auth session and cart snapshot

mod auth_store;
mod cart_store;

pub use auth_store::{AuthStore, StoredSession};
pub use cart_store::{CartStore, CartSummary};
