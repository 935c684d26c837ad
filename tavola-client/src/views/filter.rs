//! Client-side search over loaded rows

use std::fmt;
use std::str::FromStr;

use shared::models::{Branch, Meal, Page, Reservation, Tag};

/// Records a list view can search
pub trait Searchable {
    /// Field values the search text is matched against
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match on any searchable field.
/// Blank search text matches everything.
pub fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

/// Rows whose searchable fields contain `needle`, in their original order
pub fn filter<'a, T: Searchable>(items: &'a [T], needle: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, needle)).collect()
}

/// Filter on one chosen field instead of all of them
pub fn filter_by<'a, T>(items: &'a [T], needle: &str, field: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let needle = needle.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || field(item).to_lowercase().contains(&needle))
        .collect()
}

/// Branch column a search can be narrowed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchField {
    Name,
    City,
    Address,
}

impl BranchField {
    pub fn accessor(self) -> fn(&Branch) -> &str {
        match self {
            BranchField::Name => |b| b.name.as_str(),
            BranchField::City => |b| b.city.as_str(),
            BranchField::Address => |b| b.address.as_str(),
        }
    }
}

impl fmt::Display for BranchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BranchField::Name => "name",
            BranchField::City => "city",
            BranchField::Address => "address",
        })
    }
}

impl FromStr for BranchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(BranchField::Name),
            "city" => Ok(BranchField::City),
            "address" => Ok(BranchField::Address),
            other => Err(format!("unknown branch field: {other} (name, city, address)")),
        }
    }
}

impl Searchable for Branch {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.city, &self.address]
    }
}

impl Searchable for Meal {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description]
    }
}

impl Searchable for Reservation {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.customer_name, &self.customer_phone]
    }
}

impl Searchable for Tag {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title]
    }
}

impl Searchable for Page {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.slug]
    }
}
