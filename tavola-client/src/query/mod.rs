//! Client-side query layer: keyed cache, staleness, dedup and retry

mod cache;
mod key;
mod state;

pub use cache::{QueryCache, QueryOptions};
pub use key::{QueryKey, keys};
pub use state::QueryState;
