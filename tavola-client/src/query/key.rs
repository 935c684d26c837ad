//! Query keys
//!
//! A key is an ordered list of segments, e.g. `branches/list/page=1&limit=10`.
//! Invalidation works on prefixes: invalidating `branches` marks every
//! branch list and detail entry stale.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    /// The empty key; every key starts with it
    pub(crate) fn any() -> Self {
        Self(Vec::new())
    }

    /// Append a segment
    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` names this key or one of its ancestors
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0.iter().zip(&prefix.0).all(|(a, b)| a == b)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<&str> for QueryKey {
    fn from(root: &str) -> Self {
        Self::new(root)
    }
}

/// Keys used by the services
pub mod keys {
    use super::QueryKey;

    pub const AUTH: &str = "auth";
    pub const BRANCHES: &str = "branches";
    pub const MEALS: &str = "meals";
    pub const TAGS: &str = "tags";
    pub const CART: &str = "cart";
    pub const RESERVATIONS: &str = "reservations";
    pub const PAGES: &str = "pages";
    pub const ANALYTICS: &str = "analytics";

    pub fn list(root: &str, query: &str) -> QueryKey {
        QueryKey::new(root).with("list").with(query)
    }

    pub fn detail(root: &str, id: impl ToString) -> QueryKey {
        QueryKey::new(root).with("detail").with(id)
    }
}
