use indexmap::IndexMap;

use super::types::WorkflowRun;
use crate::report::{Job, Repository};

#[derive(Debug, Default)]
struct JobTotals {
    total_time: i64,
    run_count: u64,
}

impl JobTotals {
    fn add(&mut self, duration: i64) {
        self.total_time += duration;
        self.run_count += 1;
    }

    #[allow(clippy::cast_possible_wrap)]
    fn average(&self) -> i64 {
        self.total_time / self.run_count as i64
    }
}

/// Sums run durations for one repository, overall and per run name.
///
/// Returns `None` when there are no runs: such repositories are left out of
/// the report. Jobs keep the order in which their names first appear.
pub fn aggregate_runs(repo: &str, runs: &[WorkflowRun]) -> Option<Repository> {
    let mut totals = JobTotals::default();
    let mut jobs: IndexMap<&str, JobTotals> = IndexMap::new();

    for run in runs {
        let duration = run.duration_seconds();
        totals.add(duration);
        jobs.entry(run.name.as_str()).or_default().add(duration);
    }

    if totals.run_count == 0 {
        return None;
    }

    let jobs = jobs
        .into_iter()
        .map(|(name, job)| Job {
            name: name.to_string(),
            total_time: job.total_time,
            avg_time: job.average(),
            run_count: job.run_count,
        })
        .collect();

    Some(Repository {
        name: repo.to_string(),
        total_time: totals.total_time,
        avg_time: totals.average(),
        jobs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::github::fetcher::testing::run;

    #[test]
    fn test_groups_runs_by_name() {
        let runs = vec![run("build", 10), run("test", 5), run("build", 20)];

        let repo = aggregate_runs("A", &runs).unwrap();

        assert_eq!(
            repo,
            Repository {
                name: "A".to_string(),
                total_time: 35,
                avg_time: 11,
                jobs: vec![
                    Job {
                        name: "build".to_string(),
                        total_time: 30,
                        avg_time: 15,
                        run_count: 2,
                    },
                    Job {
                        name: "test".to_string(),
                        total_time: 5,
                        avg_time: 5,
                        run_count: 1,
                    },
                ],
            }
        );
    }

    #[test]
    fn test_no_runs_drops_repository() {
        assert_eq!(aggregate_runs("empty", &[]), None);
    }

    #[test]
    fn test_job_totals_partition_repository_total() {
        let runs: Vec<_> = (0..40)
            .map(|i| run(["lint", "build", "deploy", ""][i % 4], (i as i64 * 37) % 101 - 20))
            .collect();

        let repo = aggregate_runs("web", &runs).unwrap();

        let job_sum: i64 = repo.jobs.iter().map(|j| j.total_time).sum();
        let run_sum: u64 = repo.jobs.iter().map(|j| j.run_count).sum();
        assert_eq!(job_sum, repo.total_time);
        assert_eq!(run_sum, 40);
        assert_eq!(repo.avg_time, repo.total_time / 40);
        assert!(repo.jobs.iter().all(|j| j.run_count >= 1));
    }

    #[test]
    fn test_negative_durations_are_not_clamped() {
        let runs = vec![run("build", -7), run("build", 2)];

        let repo = aggregate_runs("skewed", &runs).unwrap();

        assert_eq!(repo.total_time, -5);
        // Truncates toward zero, not toward negative infinity.
        assert_eq!(repo.avg_time, -2);
        assert_eq!(repo.jobs[0].avg_time, -2);
    }

    #[test]
    fn test_average_truncates() {
        let runs = vec![run("build", 1), run("build", 1), run("build", 2)];

        let repo = aggregate_runs("web", &runs).unwrap();

        assert_eq!(repo.total_time, 4);
        assert_eq!(repo.avg_time, 1);
    }
}
