use async_trait::async_trait;

use super::types::{RepositoryRef, WorkflowRun};
use crate::error::Result;

/// One page of a paginated GitHub listing. An empty page marks the end of the
/// listing; errors are never used for that.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_repositories_page(&self, org: &str, page: u32) -> Result<Vec<RepositoryRef>>;

    /// Completed runs created within `created` (a `from..to` filter).
    async fn fetch_workflow_runs_page(
        &self,
        org: &str,
        repo: &str,
        created: &str,
        page: u32,
    ) -> Result<Vec<WorkflowRun>>;
}
