use std::sync::Arc;

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use super::client::GitHubClient;
use super::coordinator::collect_repository_stats;
use super::fetcher::PageFetcher;
use super::pagination::paginate;
use super::types::RepositoryRef;
use crate::auth::Token;
use crate::date_range::DateRange;
use crate::error::{GhaTimeError, Result};
use crate::report::Report;

pub struct GitHubProvider<F = GitHubClient> {
    fetcher: Arc<F>,
    org: String,
}

impl GitHubProvider {
    pub fn new(base_url: &str, org: String, token: Option<Token>) -> Result<Self> {
        let client = GitHubClient::new(base_url, token)?;

        Ok(Self::with_fetcher(Arc::new(client), org))
    }
}

impl<F: PageFetcher + 'static> GitHubProvider<F> {
    pub fn with_fetcher(fetcher: Arc<F>, org: String) -> Self {
        Self { fetcher, org }
    }

    async fn fetch_repositories(&self, cancel: &CancellationToken) -> Result<Vec<RepositoryRef>> {
        info!("Listing repositories for organization: {}", self.org);

        let repos = paginate(cancel, |page| {
            self.fetcher.fetch_repositories_page(&self.org, page)
        })
        .await
        .map_err(GhaTimeError::for_repository_listing)?;

        info!("Found {} repositories", repos.len());
        Ok(repos)
    }

    /// Execution-time report for every repository of the organization with
    /// completed runs created inside `range`.
    pub async fn collect_report(
        &self,
        range: &DateRange,
        cancel: &CancellationToken,
    ) -> Result<Report> {
        let created = range.query_filter();
        info!(
            "Starting execution time analysis for {} from {} to {}",
            self.org,
            range.from(),
            range.to()
        );

        let repos = self.fetch_repositories(cancel).await?;
        if repos.is_empty() {
            warn!("No repositories found for organization: {}", self.org);
        }

        let stats =
            collect_repository_stats(Arc::clone(&self.fetcher), &self.org, repos, &created, cancel)
                .await?;

        Ok(Report::assemble(self.org.clone(), stats))
    }
}
