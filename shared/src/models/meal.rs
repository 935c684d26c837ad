//! Meal Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Tag;
use crate::query::ListQuery;

/// Menu section a meal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealCategory {
    pub const ALL: [MealCategory; 3] = [
        MealCategory::Breakfast,
        MealCategory::Lunch,
        MealCategory::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealCategory::Breakfast => "breakfast",
            MealCategory::Lunch => "lunch",
            MealCategory::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "dinner" => Ok(MealCategory::Dinner),
            other => Err(format!("unknown meal category: {other}")),
        }
    }
}

/// Meal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Image URL or upload reference
    pub image: Option<String>,
    pub category: MealCategory,
    pub is_available: bool,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Meal {
    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}

/// Create meal payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: MealCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<i64>,
}

/// Update meal payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MealCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
}

/// Availability toggle payload (`PATCH /meals/{id}/availability`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealAvailabilityUpdate {
    pub is_available: bool,
}

/// Menu list filters (`GET /meals`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealQuery {
    pub list: ListQuery,
    pub category: Option<MealCategory>,
    pub tag_id: Option<i64>,
    /// Storefront view hides meals that are switched off
    pub available_only: bool,
}

impl MealQuery {
    pub fn new(list: ListQuery) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn category(mut self, category: MealCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tag(mut self, tag_id: i64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn available_only(mut self) -> Self {
        self.available_only = true;
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut query = self.list.clone();
        if let Some(category) = self.category {
            query = query.filter("category", category);
        }
        if let Some(tag_id) = self.tag_id {
            query = query.filter("tag", tag_id);
        }
        if self.available_only {
            query = query.filter("available", true);
        }
        query.to_query_string()
    }
}
