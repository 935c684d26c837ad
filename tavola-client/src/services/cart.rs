//! Cart API
//!
//! Every cart call answers with the whole cart. That answer replaces the
//! cached cart and the store snapshot; totals are never recomputed here.

use shared::models::{Cart, CartItemAdd, CartItemUpdate};
use shared::validation::MAX_CART_QUANTITY;
use shared::{Validate, ValidationError};

use super::delete_resource;
use crate::client::HttpClient;
use crate::query::{QueryKey, keys};
use crate::{ClientError, ClientResult};

service!(
    /// Cart API (`/cart`)
    CartService
);

impl<C: HttpClient> CartService<C> {
    fn key() -> QueryKey {
        QueryKey::new(keys::CART)
    }

    fn store(&self, cart: &Cart) -> ClientResult<()> {
        self.ctx.cache.set(&Self::key(), cart)?;
        self.ctx.cart.update(cart);
        Ok(())
    }

    pub async fn get(&self) -> ClientResult<Cart> {
        let cart: Cart = self
            .ctx
            .cache
            .fetch(&Self::key(), || self.ctx.http.get::<Cart>("/cart"))
            .await?;
        self.ctx.cart.update(&cart);
        Ok(cart)
    }

    pub async fn add_item(&self, meal_id: i64, quantity: u32) -> ClientResult<Cart> {
        let body = CartItemAdd { meal_id, quantity };
        body.validate()?;
        let cart: Cart = self.ctx.http.post("/cart/items", &body).await?;
        self.store(&cart)?;
        tracing::info!(meal_id, quantity, "Added to cart");
        Ok(cart)
    }

    /// Set a line's quantity. Zero removes the line with a DELETE; a
    /// zero-quantity line is never written.
    pub async fn set_quantity(&self, item_id: i64, quantity: u32) -> ClientResult<Cart> {
        if quantity == 0 {
            return self.remove_item(item_id).await;
        }
        if quantity > MAX_CART_QUANTITY {
            return Err(ValidationError::new(
                "quantity",
                format!("quantity must be between 1 and {MAX_CART_QUANTITY}"),
            )
            .into());
        }

        let cart: Cart = self
            .ctx
            .http
            .put(
                &format!("/cart/items/{item_id}"),
                &CartItemUpdate { quantity },
            )
            .await?;
        self.store(&cart)?;
        tracing::debug!(item_id, quantity, "Cart quantity changed");
        Ok(cart)
    }

    async fn current_quantity(&self, item_id: i64) -> ClientResult<u32> {
        if let Some(quantity) = self.ctx.cart.quantity_of(item_id) {
            return Ok(quantity);
        }
        let cart = self.get().await?;
        cart.item(item_id)
            .map(|i| i.quantity)
            .ok_or_else(|| ClientError::NotFound(format!("Cart item {item_id} not found")))
    }

    pub async fn increment(&self, item_id: i64) -> ClientResult<Cart> {
        let quantity = self.current_quantity(item_id).await?;
        self.set_quantity(item_id, quantity + 1).await
    }

    /// One less; the last unit removes the line
    pub async fn decrement(&self, item_id: i64) -> ClientResult<Cart> {
        let quantity = self.current_quantity(item_id).await?;
        self.set_quantity(item_id, quantity.saturating_sub(1)).await
    }

    pub async fn remove_item(&self, item_id: i64) -> ClientResult<Cart> {
        let cart: Cart = self
            .ctx
            .http
            .delete(&format!("/cart/items/{item_id}"))
            .await?;
        self.store(&cart)?;
        tracing::info!(item_id, "Removed from cart");
        Ok(cart)
    }

    pub async fn clear(&self) -> ClientResult<()> {
        delete_resource(&self.ctx.http, "/cart").await?;
        self.ctx.cache.remove(&Self::key());
        self.ctx.cart.clear();
        tracing::info!("Cart cleared");
        Ok(())
    }
}
