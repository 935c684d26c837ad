//! Branch API

use shared::models::{Branch, BranchCreate, BranchStatusUpdate, BranchUpdate};
use shared::query::with_query;
use shared::{ListQuery, Paginated, Validate};

use super::{delete_resource, invalidate};
use crate::ClientResult;
use crate::client::HttpClient;
use crate::query::keys;

service!(
    /// Branch API (`/branches`)
    BranchService
);

impl<C: HttpClient> BranchService<C> {
    pub async fn list(&self, query: &ListQuery) -> ClientResult<Paginated<Branch>> {
        let qs = query.to_query_string();
        let path = with_query("/branches", &qs);
        let key = keys::list(keys::BRANCHES, &qs);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Paginated<Branch>>(&path))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Branch> {
        let path = format!("/branches/{id}");
        let key = keys::detail(keys::BRANCHES, id);
        self.ctx
            .cache
            .fetch(&key, || self.ctx.http.get::<Branch>(&path))
            .await
    }

    pub async fn create(&self, data: &BranchCreate) -> ClientResult<Branch> {
        data.validate()?;
        let branch: Branch = self.ctx.http.post("/branches", data).await?;
        invalidate(&self.ctx, &[keys::BRANCHES]);
        tracing::info!(branch_id = branch.id, name = %branch.name, "Branch created");
        Ok(branch)
    }

    pub async fn update(&self, id: i64, data: &BranchUpdate) -> ClientResult<Branch> {
        data.validate()?;
        let branch: Branch = self.ctx.http.put(&format!("/branches/{id}"), data).await?;
        invalidate(&self.ctx, &[keys::BRANCHES]);
        self.ctx
            .cache
            .set(&keys::detail(keys::BRANCHES, id), &branch)?;
        tracing::info!(branch_id = id, "Branch updated");
        Ok(branch)
    }

    /// Switch a branch on or off; returns the updated branch
    pub async fn set_active(&self, id: i64, is_active: bool) -> ClientResult<Branch> {
        let body = BranchStatusUpdate { is_active };
        let branch: Branch = self
            .ctx
            .http
            .patch(&format!("/branches/{id}/status"), &body)
            .await?;
        invalidate(&self.ctx, &[keys::BRANCHES, keys::ANALYTICS]);
        self.ctx
            .cache
            .set(&keys::detail(keys::BRANCHES, id), &branch)?;
        tracing::info!(branch_id = id, is_active, "Branch status changed");
        Ok(branch)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        delete_resource(&self.ctx.http, &format!("/branches/{id}")).await?;
        self.ctx.cache.remove(&keys::detail(keys::BRANCHES, id));
        invalidate(&self.ctx, &[keys::BRANCHES, keys::ANALYTICS]);
        tracing::info!(branch_id = id, "Branch deleted");
        Ok(())
    }
}
