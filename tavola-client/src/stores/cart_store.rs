//! CartStore - last known cart snapshot for the header badge

use parking_lot::RwLock;
use shared::models::Cart;

/// Summary shown next to the cart icon
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CartSummary {
    pub item_count: u32,
    pub total: f64,
}

#[derive(Debug, Default)]
pub struct CartStore {
    cart: RwLock<Option<Cart>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the cart the backend returned
    pub fn update(&self, cart: &Cart) {
        *self.cart.write() = Some(cart.clone());
    }

    pub fn clear(&self) {
        *self.cart.write() = None;
    }

    pub fn snapshot(&self) -> Option<Cart> {
        self.cart.read().clone()
    }

    pub fn summary(&self) -> CartSummary {
        self.cart
            .read()
            .as_ref()
            .map(|c| CartSummary {
                item_count: c.item_count(),
                total: c.total,
            })
            .unwrap_or_default()
    }

    /// Current quantity of a cart line, if known
    pub fn quantity_of(&self, item_id: i64) -> Option<u32> {
        self.cart
            .read()
            .as_ref()
            .and_then(|c| c.item(item_id))
            .map(|i| i.quantity)
    }
}
