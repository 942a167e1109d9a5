//! Validating many documents at once.

use std::path::PathBuf;
use std::thread;

use log::{error, info};

use crate::error::WorkerError;
use crate::record::ArchiveRecord;
use crate::validation::RecordValidator;
use crate::worker::job::{JobResult, Outcome, ValidationJob};
use crate::worker::pool::ValidationPool;
use crate::worker::scanner::DirectoryScanner;

/// Results of a batch, ordered by source path.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<JobResult>,
}

impl BatchReport {
    pub fn valid_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Valid(_)))
    }

    pub fn invalid_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Invalid(_)))
    }

    pub fn unreadable_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Unreadable(_)))
    }

    /// True when every document was readable and valid.
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_valid())
    }

    /// Every validated record across all valid documents.
    pub fn records(&self) -> impl Iterator<Item = &ArchiveRecord> {
        self.results
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Valid(records) => Some(records),
                _ => None,
            })
            .flatten()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Runs `jobs` through a pool of `worker_count` threads.
pub fn validate_jobs(
    jobs: Vec<ValidationJob>,
    validator: RecordValidator,
    worker_count: usize,
) -> BatchReport {
    if jobs.is_empty() {
        return BatchReport::default();
    }

    let pool = ValidationPool::new(validator, worker_count.clamp(1, jobs.len()));
    let mut results = collect_results(&pool, jobs);

    pool.shutdown();
    pool.wait();

    results.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    let report = BatchReport { results };
    info!(
        "Validated {} documents: {} valid, {} invalid, {} unreadable",
        report.results.len(),
        report.valid_count(),
        report.invalid_count(),
        report.unreadable_count()
    );
    report
}

/// Feeds `jobs` to `pool` and drains one result per accepted job.
fn collect_results(pool: &ValidationPool, jobs: Vec<ValidationJob>) -> Vec<JobResult> {
    let expected = jobs.len();
    let mut results = Vec::with_capacity(expected);

    // Submitting from its own thread keeps the bounded queues from filling
    // up while results wait to be drained.
    thread::scope(|scope| {
        scope.spawn(|| {
            for job in jobs {
                if let Err(e) = pool.submit(job) {
                    error!("Failed to submit validation job: {}", e);
                    // Stopping the workers disconnects the result queue
                    pool.shutdown();
                    break;
                }
            }
        });

        while results.len() < expected {
            match pool.recv_result() {
                Some(result) => results.push(result),
                None => break,
            }
        }
    });

    results
}

/// Scans every path (file or directory) and validates what it finds.
pub fn validate_paths(
    paths: &[PathBuf],
    validator: RecordValidator,
    worker_count: usize,
) -> Result<BatchReport, WorkerError> {
    let mut jobs = Vec::new();
    for path in paths {
        jobs.extend(DirectoryScanner::new(path).scan()?);
    }

    Ok(validate_jobs(jobs, validator, worker_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch() {
        let report = validate_jobs(vec![], RecordValidator::new(), 4);
        assert!(report.results.is_empty());
        assert!(report.is_success());
    }

    #[test]
    fn test_more_jobs_than_queue_capacity() {
        let jobs: Vec<ValidationJob> = (0..50)
            .map(|i| ValidationJob::inline(format!("doc-{:02}", i), "{}".to_string()))
            .collect();

        let report = validate_jobs(jobs, RecordValidator::new(), 2);
        assert_eq!(report.results.len(), 50);
        assert_eq!(report.invalid_count(), 50);
        assert!(!report.is_success());
        assert!(report.results[0].source_path.ends_with("doc-00"));
    }

    #[test]
    fn test_rejected_submission_does_not_block() {
        let pool = ValidationPool::new(RecordValidator::new(), 2);
        pool.shutdown();

        let jobs = (0..3)
            .map(|i| ValidationJob::inline(format!("doc-{}", i), "{}".to_string()))
            .collect();
        let results = collect_results(&pool, jobs);

        assert!(results.is_empty());
        pool.wait();
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let result = validate_paths(
            &[PathBuf::from("/nonexistent/records")],
            RecordValidator::new(),
            1,
        );
        assert!(matches!(result, Err(WorkerError::PathNotFound(_))));
    }
}
