//! Tag API

use shared::Validate;
use shared::models::{Tag, TagCreate, TagUpdate};

use super::{delete_resource, invalidate};
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::{QueryKey, keys};

service!(
    /// Tag API (`/tags`)
    TagService
);

impl<C: HttpClient> TagService<C> {
    /// All tags; the list is small and not paginated
    pub async fn list(&self) -> ClientResult<Vec<Tag>> {
        let key = QueryKey::new(keys::TAGS).with("all");
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Vec<Tag>>("/tags"))
            .await
    }

    pub async fn create(&self, data: &TagCreate) -> ClientResult<Tag> {
        data.validate()?;
        let tag: Tag = self.ctx.http.post("/tags", data).await?;
        invalidate(&self.ctx, &[keys::TAGS, keys::MEALS]);
        tracing::info!(tag_id = tag.id, title = %tag.title, "Tag created");
        Ok(tag)
    }

    pub async fn update(&self, id: i64, data: &TagUpdate) -> ClientResult<Tag> {
        data.validate()?;
        let tag: Tag = self.ctx.http.put(&format!("/tags/{id}"), data).await?;
        invalidate(&self.ctx, &[keys::TAGS, keys::MEALS]);
        tracing::info!(tag_id = id, "Tag updated");
        Ok(tag)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        delete_resource(&self.ctx.http, &format!("/tags/{id}")).await?;
        invalidate(&self.ctx, &[keys::TAGS, keys::MEALS]);
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
