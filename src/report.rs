use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub org: String,
    pub repos: Vec<Repository>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub total_time: i64,
    pub avg_time: i64,
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    pub total_time: i64,
    pub avg_time: i64,
    pub run_count: u64,
}

impl Report {
    /// Orders repositories by total execution time, longest first.
    pub fn assemble(org: impl Into<String>, mut repos: Vec<Repository>) -> Self {
        repos.sort_unstable_by_key(|repo| Reverse(repo.total_time));

        Self {
            org: org.into(),
            repos,
        }
    }

    /// Two-space indented JSON document.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
