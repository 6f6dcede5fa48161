use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::aggregation::aggregate_runs;
use super::fetcher::PageFetcher;
use super::pagination::paginate;
use super::types::RepositoryRef;
use crate::error::{GhaTimeError, Result};
use crate::report::Repository;

const RESULT_BUFFER: usize = 16;

/// Runs one fetch-and-aggregate task per repository, all at once, and
/// collects the repositories that had runs in completion order.
///
/// The first failing task cancels the others (they stop before their next
/// page request) and its error is returned once every task has finished.
/// Cancelling `cancel` from outside stops all tasks the same way.
pub async fn collect_repository_stats<F>(
    fetcher: Arc<F>,
    org: &str,
    repos: Vec<RepositoryRef>,
    created: &str,
    cancel: &CancellationToken,
) -> Result<Vec<Repository>>
where
    F: PageFetcher + 'static,
{
    let cancel = cancel.child_token();
    let _abort_on_drop = cancel.clone().drop_guard();

    let (tx, mut rx) = mpsc::channel(RESULT_BUFFER);
    let mut tasks = JoinSet::new();

    info!("Fetching workflow runs for {} repositories...", repos.len());

    for repo in repos {
        let fetcher = Arc::clone(&fetcher);
        let org = org.to_string();
        let created = created.to_string();
        let cancel = cancel.clone();
        let tx = tx.clone();

        tasks.spawn(async move {
            let outcome = paginate(&cancel, |page| {
                fetcher.fetch_workflow_runs_page(&org, &repo.name, &created, page)
            })
            .await;

            let runs = match outcome {
                Ok(runs) => runs,
                Err(err) => {
                    cancel.cancel();
                    return Err(err.for_repository(&repo.name));
                }
            };

            match aggregate_runs(&repo.name, &runs) {
                Some(stats) => tx.send(stats).await.map_err(|_| GhaTimeError::Cancelled),
                None => {
                    debug!("No completed runs for {org}/{}", repo.name);
                    Ok(())
                }
            }
        });
    }

    let supervisor = tokio::spawn(supervise(tasks, tx, cancel.clone()));

    let mut collected = Vec::new();
    while let Some(stats) = rx.recv().await {
        collected.push(stats);
    }

    supervisor.await??;

    info!("Collected statistics for {} repositories", collected.len());
    Ok(collected)
}

/// Waits for every task, then closes the result channel by dropping the last
/// sender. Returns the first real failure; `Cancelled` from siblings only
/// counts when nothing else failed.
async fn supervise(
    mut tasks: JoinSet<Result<()>>,
    tx: mpsc::Sender<Repository>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut first_error: Option<GhaTimeError> = None;

    while let Some(joined) = tasks.join_next().await {
        let Err(err) = joined.map_err(GhaTimeError::from).and_then(|outcome| outcome) else {
            continue;
        };

        cancel.cancel();

        match &first_error {
            None => {
                warn!("{err}");
                first_error = Some(err);
            }
            Some(existing) if existing.is_cancelled() && !err.is_cancelled() => {
                warn!("{err}");
                first_error = Some(err);
            }
            Some(_) => debug!("Discarding later failure: {err}"),
        }
    }

    drop(tx);

    first_error.map_or(Ok(()), Err)
}
