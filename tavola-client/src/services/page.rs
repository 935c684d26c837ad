//! CMS page API, keyed by slug

use shared::Validate;
use shared::models::{Page, PageCreate, PageUpdate};
use shared::validation::validate_slug;

use super::{delete_resource, invalidate};
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::{QueryKey, keys};

service!(
    /// Page API (`/pages`)
    PageService
);

fn page_path(slug: &str) -> String {
    format!("/pages/{}", urlencoding::encode(slug))
}

impl<C: HttpClient> PageService<C> {
    pub async fn list(&self) -> ClientResult<Vec<Page>> {
        let key = QueryKey::new(keys::PAGES).with("all");
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Vec<Page>>("/pages"))
            .await
    }

    pub async fn get(&self, slug: &str) -> ClientResult<Page> {
        validate_slug(slug)?;
        let path = page_path(slug);
        let key = keys::detail(keys::PAGES, slug);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Page>(&path))
            .await
    }

    pub async fn create(&self, data: &PageCreate) -> ClientResult<Page> {
        data.validate()?;
        let page: Page = self.ctx.http.post("/pages", data).await?;
        invalidate(&self.ctx, &[keys::PAGES]);
        tracing::info!(slug = %page.slug, "Page created");
        Ok(page)
    }

    /// Update a page; a changed slug moves the cached entry
    pub async fn update(&self, slug: &str, data: &PageUpdate) -> ClientResult<Page> {
        validate_slug(slug)?;
        data.validate()?;
        let page: Page = self.ctx.http.put(&page_path(slug), data).await?;
        self.ctx.cache.remove(&keys::detail(keys::PAGES, slug));
        invalidate(&self.ctx, &[keys::PAGES]);
        self.ctx
            .cache
            .set(&keys::detail(keys::PAGES, &page.slug), &page)?;
        tracing::info!(slug = %page.slug, "Page updated");
        Ok(page)
    }

    pub async fn delete(&self, slug: &str) -> ClientResult<()> {
        validate_slug(slug)?;
        delete_resource(&self.ctx.http, &page_path(slug)).await?;
        self.ctx.cache.remove(&keys::detail(keys::PAGES, slug));
        invalidate(&self.ctx, &[keys::PAGES]);
        tracing::info!(slug, "Page deleted");
        Ok(())
    }
}
