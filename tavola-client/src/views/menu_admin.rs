//! Menu management screen

use shared::models::Meal;

use super::list::ListView;
use crate::ClientResult;
use crate::client::HttpClient;
use crate::services::{BulkOutcome, MealService};

pub struct MenuAdmin<C: HttpClient> {
    service: MealService<C>,
    list: ListView<MealService<C>>,
}

impl<C: HttpClient> MenuAdmin<C> {
    pub fn new(service: MealService<C>, page_size: u32) -> Self {
        Self {
            list: ListView::new(service.clone(), page_size),
            service,
        }
    }

    pub fn list(&self) -> &ListView<MealService<C>> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<MealService<C>> {
        &mut self.list
    }

    /// Flip availability of a loaded meal; the row is replaced in place
    pub async fn toggle_availability(&mut self, id: i64) -> ClientResult<Meal> {
        let current = match self.list.find(id) {
            Some(meal) => meal.is_available,
            None => self.service.get(id).await?.is_available,
        };
        let meal = self.service.set_availability(id, !current).await?;
        self.list.replace_item(meal.clone());
        Ok(meal)
    }

    /// Switch the given meals and reload the page to show the outcome
    pub async fn set_availability_bulk(&mut self, ids: &[i64], is_available: bool) -> BulkOutcome {
        let outcome = self.service.bulk_set_availability(ids, is_available).await;
        self.list.reload().await;
        outcome
    }
}
