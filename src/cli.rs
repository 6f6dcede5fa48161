use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::auth::Token;
use crate::date_range::DateRange;
use crate::error::GhaTimeError;
use crate::providers::github::GitHubProvider;

#[derive(Parser)]
#[command(name = "ghatime")]
#[command(
    author,
    version,
    about = "Analyze GitHub Actions execution time in an organization",
    long_about = None
)]
pub struct Cli {
    /// Organization name
    #[arg(short, long)]
    org: String,

    /// Start date (YYYY-MM-DD), defaults to one week ago
    #[arg(long)]
    from: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    to: Option<String>,

    /// GitHub API token
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitHub API URL
    #[arg(short, long, default_value = "https://api.github.com")]
    url: String,

    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Output file path (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let token = Token::from_optional(self.token.as_deref())
            .ok_or_else(|| GhaTimeError::Config("no GitHub token provided".to_string()))?;

        let today = Local::now().date_naive();
        let range = DateRange::resolve(self.from.as_deref(), self.to.as_deref(), today)?;

        let provider = GitHubProvider::new(&self.url, self.org.clone(), Some(token))?;

        let cancel = CancellationToken::new();
        self.watch_for_cancellation(&cancel);

        let report = provider.collect_report(&range, &cancel).await?;
        let json_output = report.to_json_pretty()?;

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Report written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }

    /// Ctrl-C and `--timeout` both cancel the run.
    fn watch_for_cancellation(&self, cancel: &CancellationToken) {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, waiting for in-flight requests");
                on_interrupt.cancel();
            }
        });

        if let Some(seconds) = self.timeout {
            let on_timeout = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(seconds)).await;
                warn!("Timed out after {seconds}s, waiting for in-flight requests");
                on_timeout.cancel();
            });
        }
    }
}
