//! Branch management screen

use shared::models::{Branch, BranchCreate, BranchUpdate};

use super::list::ListView;
use crate::client::HttpClient;
use crate::services::BranchService;
use crate::{ClientError, ClientResult};

/// Branch list plus the create/edit form.
///
/// The form error holds the inline message of the last failed submit.
pub struct BranchAdmin<C: HttpClient> {
    service: BranchService<C>,
    list: ListView<BranchService<C>>,
    form_error: Option<String>,
}

impl<C: HttpClient> BranchAdmin<C> {
    pub fn new(service: BranchService<C>, page_size: u32) -> Self {
        Self {
            list: ListView::new(service.clone(), page_size),
            service,
            form_error: None,
        }
    }

    pub fn list(&self) -> &ListView<BranchService<C>> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<BranchService<C>> {
        &mut self.list
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    fn record<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        self.form_error = result.as_ref().err().map(ClientError::display_message);
        result
    }

    /// Create a branch from the form draft, then refresh the list.
    /// An invalid draft sends nothing.
    pub async fn submit(&mut self, draft: &BranchCreate) -> ClientResult<Branch> {
        let result = self.service.create(draft).await;
        let branch = self.record(result)?;
        self.list.reload().await;
        Ok(branch)
    }

    /// Save edits to an existing branch; the row is replaced in place
    pub async fn save(&mut self, id: i64, changes: &BranchUpdate) -> ClientResult<Branch> {
        let result = self.service.update(id, changes).await;
        let branch = self.record(result)?;
        self.list.replace_item(branch.clone());
        Ok(branch)
    }

    /// Flip the active flag of a loaded branch without reloading the list
    pub async fn toggle_active(&mut self, id: i64) -> ClientResult<Branch> {
        let current = match self.list.find(id) {
            Some(branch) => branch.is_active,
            None => self.service.get(id).await?.is_active,
        };
        let branch = self.service.set_active(id, !current).await?;
        self.list.replace_item(branch.clone());
        Ok(branch)
    }

    pub async fn delete(&mut self, id: i64) -> ClientResult<()> {
        self.service.delete(id).await?;
        self.list.reload().await;
        Ok(())
    }
}
