use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use super::fetcher::PageFetcher;
use super::types::{RepositoryRef, WorkflowRun, WorkflowRunsPage};
use crate::auth::Token;
use crate::error::{GhaTimeError, Result};

const PER_PAGE: u32 = 100;
const GITHUB_JSON: &str = "application/vnd.github+json";

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

        let client = Client::builder()
            .user_agent(concat!("ghatime/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|e| GhaTimeError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| GhaTimeError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Appends percent-encoded path segments to the API base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GhaTimeError::Config(format!("Invalid API base URL: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.auth_request(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GhaTimeError::Api(format!("{status} - {body}")));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                GhaTimeError::Decode(e.to_string())
            } else {
                GhaTimeError::Network(e)
            }
        })
    }
}

#[async_trait]
impl PageFetcher for GitHubClient {
    async fn fetch_repositories_page(&self, org: &str, page: u32) -> Result<Vec<RepositoryRef>> {
        let url = self.endpoint(&["orgs", org, "repos"])?;
        let request = self
            .client
            .get(url)
            .query(&[("per_page", PER_PAGE), ("page", page)]);

        self.get_json(request).await
    }

    async fn fetch_workflow_runs_page(
        &self,
        org: &str,
        repo: &str,
        created: &str,
        page: u32,
    ) -> Result<Vec<WorkflowRun>> {
        let url = self.endpoint(&["repos", org, repo, "actions", "runs"])?;
        let request = self
            .client
            .get(url)
            .query(&[("status", "completed")])
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .query(&[("created", created)]);

        let runs_page: WorkflowRunsPage = self.get_json(request).await?;
        debug!(
            "{org}/{repo} page {page}: {} of {} runs",
            runs_page.workflow_runs.len(),
            runs_page.total_count
        );

        Ok(runs_page.workflow_runs)
    }
}
