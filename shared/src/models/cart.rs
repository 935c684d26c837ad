//! Cart Model
//!
//! Totals are computed by the backend; the client only displays them.

use serde::{Deserialize, Serialize};

use super::Meal;

/// One line of the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub meal: Meal,
    pub quantity: u32,
    pub line_total: f64,
}

/// Cart entity - the in-progress order of the signed-in customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i64,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
}

impl Cart {
    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, item_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Line holding `meal_id`, if the meal is already in the cart
    pub fn item_for_meal(&self, meal_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.meal.id == meal_id)
    }
}

/// Add item payload (`POST /cart/items`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemAdd {
    pub meal_id: i64,
    pub quantity: u32,
}

/// Quantity change payload (`PUT /cart/items/{id}`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemUpdate {
    pub quantity: u32,
}
