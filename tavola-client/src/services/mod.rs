//! Entity services
//!
//! Every service shares the client context. Reads go through the query
//! cache; mutations validate first, send exactly one request and then
//! invalidate the entity's cached queries. Mutations are never retried.

use serde::de::IgnoredAny;

use crate::ClientResult;
use crate::client::{ClientContext, HttpClient};
use crate::query::QueryKey;

/// Declares a service struct holding the shared client context
macro_rules! service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<C: $crate::client::HttpClient> {
            ctx: ::std::sync::Arc<$crate::client::ClientContext<C>>,
        }

        impl<C: $crate::client::HttpClient> $name<C> {
            pub(crate) fn new(ctx: ::std::sync::Arc<$crate::client::ClientContext<C>>) -> Self {
                Self { ctx }
            }
        }

        impl<C: $crate::client::HttpClient> Clone for $name<C> {
            fn clone(&self) -> Self {
                Self {
                    ctx: self.ctx.clone(),
                }
            }
        }
    };
}

mod analytics;
mod auth;
mod branch;
mod cart;
mod meal;
mod page;
mod payment;
mod reservation;
mod tag;

pub use analytics::{AnalyticsService, FinancialOverview};
pub use auth::AuthService;
pub use branch::BranchService;
pub use cart::CartService;
pub use meal::{BulkOutcome, MealService};
pub use page::PageService;
pub use payment::{CheckoutRedirect, PaymentService};
pub use reservation::ReservationService;
pub use tag::TagService;

/// Mark every cached query under each root stale
pub(crate) fn invalidate<C: HttpClient>(ctx: &ClientContext<C>, roots: &[&str]) {
    for root in roots {
        ctx.cache.invalidate(&QueryKey::new(*root));
    }
}

/// DELETE that succeeds on any `success: true` envelope; a payload the
/// backend sends back is discarded
pub(crate) async fn delete_resource<C: HttpClient>(http: &C, path: &str) -> ClientResult<()> {
    http.delete::<IgnoredAny>(path).await?;
    Ok(())
}
