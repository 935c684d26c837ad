//! Meal (menu) API

use futures::future::join_all;
use shared::models::{Meal, MealAvailabilityUpdate, MealCreate, MealQuery, MealUpdate};
use shared::query::with_query;
use shared::{Paginated, Validate};

use super::{delete_resource, invalidate};
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::keys;

/// Result of a bulk operation. Partial writes are not rolled back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<(i64, String)>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// "3 updated, 1 failed"
    pub fn summary(&self) -> String {
        format!(
            "{} updated, {} failed",
            self.succeeded.len(),
            self.failed.len()
        )
    }
}

service!(
    /// Meal API (`/meals`)
    MealService
);

impl<C: HttpClient> MealService<C> {
    pub async fn list(&self, query: &MealQuery) -> ClientResult<Paginated<Meal>> {
        let qs = query.to_query_string();
        let path = with_query("/meals", &qs);
        let key = keys::list(keys::MEALS, &qs);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Paginated<Meal>>(&path))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Meal> {
        let path = format!("/meals/{id}");
        let key = keys::detail(keys::MEALS, id);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Meal>(&path))
            .await
    }

    pub async fn create(&self, data: &MealCreate) -> ClientResult<Meal> {
        data.validate()?;
        let meal: Meal = self.ctx.http.post("/meals", data).await?;
        invalidate(&self.ctx, &[keys::MEALS, keys::TAGS]);
        tracing::info!(meal_id = meal.id, title = %meal.title, "Meal created");
        Ok(meal)
    }

    pub async fn update(&self, id: i64, data: &MealUpdate) -> ClientResult<Meal> {
        data.validate()?;
        let meal: Meal = self.ctx.http.put(&format!("/meals/{id}"), data).await?;
        invalidate(&self.ctx, &[keys::MEALS, keys::TAGS, keys::CART]);
        self.ctx.cache.set(&keys::detail(keys::MEALS, id), &meal)?;
        tracing::info!(meal_id = id, "Meal updated");
        Ok(meal)
    }

    async fn patch_availability(&self, id: i64, is_available: bool) -> ClientResult<Meal> {
        let body = MealAvailabilityUpdate { is_available };
        self.ctx
            .http
            .patch(&format!("/meals/{id}/availability"), &body)
            .await
    }

    /// Switch one meal on or off; returns the updated meal
    pub async fn set_availability(&self, id: i64, is_available: bool) -> ClientResult<Meal> {
        let meal = self.patch_availability(id, is_available).await?;
        invalidate(&self.ctx, &[keys::MEALS, keys::CART]);
        self.ctx.cache.set(&keys::detail(keys::MEALS, id), &meal)?;
        tracing::info!(meal_id = id, is_available, "Meal availability changed");
        Ok(meal)
    }

    /// Switch several meals at once. Requests run concurrently, one per
    /// meal; failures are collected and the successes are kept.
    pub async fn bulk_set_availability(&self, ids: &[i64], is_available: bool) -> BulkOutcome {
        let results = join_all(
            ids.iter()
                .map(|&id| async move { (id, self.patch_availability(id, is_available).await) }),
        )
        .await;

        let mut outcome = BulkOutcome::default();
        for (id, result) in results {
            match result {
                Ok(meal) => {
                    let _ = self.ctx.cache.set(&keys::detail(keys::MEALS, id), &meal);
                    outcome.succeeded.push(id);
                }
                Err(e) => {
                    tracing::warn!(meal_id = id, error = %e, "Availability update failed");
                    outcome.failed.push((id, e.display_message()));
                }
            }
        }

        if !outcome.succeeded.is_empty() {
            invalidate(&self.ctx, &[keys::MEALS, keys::CART]);
        }
        tracing::info!(is_available, "{}", outcome.summary());
        outcome
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        delete_resource(&self.ctx.http, &format!("/meals/{id}")).await?;
        self.ctx.cache.remove(&keys::detail(keys::MEALS, id));
        invalidate(&self.ctx, &[keys::MEALS, keys::TAGS, keys::CART]);
        tracing::info!(meal_id = id, "Meal deleted");
        Ok(())
    }
}
