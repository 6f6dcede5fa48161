use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Entry of the organization repository listing. Only the name is needed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkflowRun {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowRun {
    /// Whole seconds between creation and last update. Inverted timestamps
    /// yield a negative value.
    pub fn duration_seconds(&self) -> i64 {
        (self.updated_at - self.created_at).num_seconds()
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkflowRunsPage {
    pub total_count: u64,
    pub workflow_runs: Vec<WorkflowRun>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
