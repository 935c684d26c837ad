//! Data models
//!
//! Mirrors of the backend's JSON shapes. The backend speaks camelCase;
//! every wire type carries `#[serde(rename_all = "camelCase")]`.
//! All IDs are `i64`.

pub mod branch;
pub mod cart;
pub mod finance;
pub mod meal;
pub mod page;
pub mod payment;
pub mod reservation;
pub mod tag;

// Re-exports
pub use branch::*;
pub use cart::*;
pub use finance::*;
pub use meal::*;
pub use page::*;
pub use payment::*;
pub use reservation::*;
pub use tag::*;
