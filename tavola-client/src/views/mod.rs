//! View-models: the state a screen renders, without the rendering

pub mod branch_admin;
pub mod filter;
pub mod list;
pub mod menu_admin;
pub mod pagination;

pub use branch_admin::BranchAdmin;
pub use filter::{BranchField, Searchable, filter, filter_by};
pub use list::{ListSource, ListView, SearchField};
pub use menu_admin::MenuAdmin;
pub use pagination::{PageButton, PageControl};
