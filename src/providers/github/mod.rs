mod aggregation;
mod client;
mod coordinator;
mod fetcher;
mod pagination;
mod provider;
mod types;

pub use provider::GitHubProvider;
