//! Paginated, searchable list state

use async_trait::async_trait;
use shared::models::{Branch, Meal, MealQuery, Reservation, ReservationQuery};
use shared::{ListQuery, Paginated};

use super::filter::{Searchable, filter, filter_by};
use super::pagination::PageControl;
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::QueryState;
use crate::services::{BranchService, MealService, ReservationService};

/// Backend list a [`ListView`] pages through
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Clone + Searchable + Send + Sync;

    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Paginated<Self::Item>>;

    fn item_id(item: &Self::Item) -> i64;
}

#[async_trait]
impl<C: HttpClient> ListSource for BranchService<C> {
    type Item = Branch;

    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Paginated<Branch>> {
        self.list(query).await
    }

    fn item_id(item: &Branch) -> i64 {
        item.id
    }
}

#[async_trait]
impl<C: HttpClient> ListSource for MealService<C> {
    type Item = Meal;

    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Paginated<Meal>> {
        self.list(&MealQuery::new(query.clone())).await
    }

    fn item_id(item: &Meal) -> i64 {
        item.id
    }
}

#[async_trait]
impl<C: HttpClient> ListSource for ReservationService<C> {
    type Item = Reservation;

    async fn fetch_page(&self, query: &ListQuery) -> ClientResult<Paginated<Reservation>> {
        self.list(&ReservationQuery::new(query.clone())).await
    }

    fn item_id(item: &Reservation) -> i64 {
        item.id
    }
}

/// Accessor for the one field a local search is narrowed to
pub type SearchField<T> = fn(&T) -> &str;

/// List view state: the query, the loaded page and the local search text.
///
/// `load` replaces the page from the backend; `replace_item` patches one
/// row in place after a toggle so the view does not reload.
pub struct ListView<S: ListSource> {
    source: S,
    query: ListQuery,
    search: String,
    search_field: Option<SearchField<S::Item>>,
    state: QueryState<Paginated<S::Item>>,
}

impl<S: ListSource> ListView<S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            query: ListQuery::new().paginate(1, page_size),
            search: String::new(),
            search_field: None,
            state: QueryState::default(),
        }
    }

    /// Start from a prepared query (extra filters, different page)
    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn state(&self) -> &QueryState<Paginated<S::Item>> {
        &self.state
    }

    /// Fetch the current page. On failure the previous rows stay visible
    /// next to the error.
    pub async fn load(&mut self) -> &QueryState<Paginated<S::Item>> {
        let previous = self.state.data.take();
        self.state = QueryState {
            data: previous.clone(),
            loading: true,
            error: None,
        };
        let result = self.source.fetch_page(&self.query).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, page = self.query.page, "list load failed");
        }
        self.state = QueryState::from_result(result, previous);
        &self.state
    }

    pub async fn reload(&mut self) -> &QueryState<Paginated<S::Item>> {
        self.load().await
    }

    /// Jump to `page`; pages outside the loaded range are ignored
    pub async fn go_to_page(&mut self, page: u32) -> &QueryState<Paginated<S::Item>> {
        if let Some(control) = self.page_control()
            && !control.contains(page)
        {
            return &self.state;
        }
        self.query = self.query.clone().page(page);
        self.load().await
    }

    pub async fn next_page(&mut self) -> &QueryState<Paginated<S::Item>> {
        match self.page_control().and_then(|c| c.next()) {
            Some(page) => self.go_to_page(page).await,
            None => &self.state,
        }
    }

    pub async fn prev_page(&mut self) -> &QueryState<Paginated<S::Item>> {
        match self.page_control().and_then(|c| c.prev()) {
            Some(page) => self.go_to_page(page).await,
            None => &self.state,
        }
    }

    /// Server-side search: restarts at page 1
    pub async fn search_remote(&mut self, text: &str) -> &QueryState<Paginated<S::Item>> {
        self.query = self.query.clone().search(text).page(1);
        self.load().await
    }

    /// Local search over the loaded rows
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Match the search text against one field; `None` searches them all
    pub fn set_search_field(&mut self, field: Option<SearchField<S::Item>>) {
        self.search_field = field;
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn items(&self) -> &[S::Item] {
        self.state
            .data
            .as_ref()
            .map(|p| p.items.as_slice())
            .unwrap_or(&[])
    }

    /// Loaded rows matching the local search text
    pub fn visible(&self) -> Vec<&S::Item> {
        match self.search_field {
            Some(field) => filter_by(self.items(), &self.search, field),
            None => filter(self.items(), &self.search),
        }
    }

    pub fn page_control(&self) -> Option<PageControl> {
        self.state.data.as_ref().map(PageControl::from_page)
    }

    /// Swap in the updated row with the same id; false if it is not loaded
    pub fn replace_item(&mut self, item: S::Item) -> bool {
        let id = S::item_id(&item);
        let Some(page) = self.state.data.as_mut() else {
            return false;
        };
        match page.items.iter_mut().find(|row| S::item_id(row) == id) {
            Some(row) => {
                *row = item;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: i64) -> Option<&S::Item> {
        self.items().iter().find(|row| S::item_id(row) == id)
    }
}
