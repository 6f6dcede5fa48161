use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhaTimeError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    DateRange(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Repository task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to fetch workflow runs for {name}: {source}")]
    Repository {
        name: String,
        #[source]
        source: Box<GhaTimeError>,
    },

    #[error("Failed to fetch repositories: {0}")]
    RepositoryListing(#[source] Box<GhaTimeError>),
}

impl GhaTimeError {
    /// Attach the repository name, leaving cancellation untouched so it can
    /// still be told apart from the failure that caused it.
    pub fn for_repository(self, name: &str) -> Self {
        match self {
            Self::Cancelled | Self::Repository { .. } => self,
            other => Self::Repository {
                name: name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Marks a failure of the organization repository listing.
    pub fn for_repository_listing(self) -> Self {
        match self {
            Self::Cancelled => self,
            other => Self::RepositoryListing(Box::new(other)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, GhaTimeError>;
