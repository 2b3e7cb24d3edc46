// orchestrator.rs - All-to-all and cross alignment on a bounded worker pool

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::alignment::AlignmentResult;
use crate::core::engine::{NeedlemanWunsch, PairAligner};
use crate::data::Sequence;
use crate::error::{AlignError, AlignResult};
use crate::report::{Reporter, SilentReporter};

/// Progress is reported after this many joined tasks
pub const PROGRESS_INTERVAL: usize = 3;

/// Number of workers used when none is configured
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Settings for one all-to-all run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignAllConfig {
    /// Size of the worker pool, at least 1
    pub workers: usize,
    /// Keep the traceback text of every pair
    pub traceback: bool,
}

impl Default for AlignAllConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            traceback: false,
        }
    }
}

impl AlignAllConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }
}

/// One query aligned against every target, in target order
pub struct PairwiseTask {
    query: Sequence,
    targets: Arc<[Sequence]>,
    traceback: bool,
}

impl PairwiseTask {
    pub fn new(query: Sequence, targets: Arc<[Sequence]>, traceback: bool) -> Self {
        Self {
            query,
            targets,
            traceback,
        }
    }

    pub fn run(&self, aligner: &dyn PairAligner) -> AlignResult<Vec<AlignmentResult>> {
        self.targets
            .iter()
            .map(|target| aligner.align(&self.query, target, self.traceback))
            .collect()
    }
}

/// What one task produced
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Submission index
    pub task: usize,
    pub query_id: usize,
    pub query: String,
    pub result: AlignResult<Vec<AlignmentResult>>,
}

impl TaskOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every task outcome of a run, in submission order
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Merge all task results sorted by query id, or fail on the first failed
    /// task in submission order. No partial result set is ever returned.
    pub fn into_results(self) -> AlignResult<Vec<AlignmentResult>> {
        let failed_tasks = self.failure_count();
        let capacity = self
            .outcomes
            .iter()
            .map(|o| o.result.as_ref().map(|r| r.len()).unwrap_or(0))
            .sum();
        let mut results = Vec::with_capacity(capacity);

        for outcome in self.outcomes {
            match outcome.result {
                Ok(mut task_results) => results.append(&mut task_results),
                Err(AlignError::PoolDisruption(msg)) => {
                    return Err(AlignError::PoolDisruption(msg));
                }
                Err(err) => {
                    return Err(AlignError::WorkerFailure {
                        task: outcome.task,
                        query: outcome.query,
                        reason: err.to_string(),
                        failed_tasks,
                    });
                }
            }
        }

        // Stable: equal query ids keep submission order
        results.sort_by(|a, b| a.cmp_by_query(b));
        Ok(results)
    }
}

/// Runs one pairwise task per query on a dedicated thread pool
pub struct AlignAll {
    config: AlignAllConfig,
    aligner: Arc<dyn PairAligner>,
    reporter: Arc<dyn Reporter>,
}

impl AlignAll {
    pub fn new(config: AlignAllConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self::with_aligner(config, Arc::new(NeedlemanWunsch::new()), reporter)
    }

    pub fn with_aligner(
        config: AlignAllConfig,
        aligner: Arc<dyn PairAligner>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            aligner,
            reporter,
        }
    }

    pub fn config(&self) -> &AlignAllConfig {
        &self.config
    }

    /// Align every sequence against the whole collection.
    ///
    /// Returns `N²` results sorted by query id, or the first task failure.
    pub fn run(&self, sequences: &[Sequence]) -> AlignResult<Vec<AlignmentResult>> {
        self.run_cross(sequences, sequences)
    }

    /// Align every query against every target.
    ///
    /// Returns `|queries| × |targets|` results sorted by query id, or the
    /// first task failure.
    pub fn run_cross(
        &self,
        queries: &[Sequence],
        targets: &[Sequence],
    ) -> AlignResult<Vec<AlignmentResult>> {
        let start = Instant::now();
        let report = self.run_cross_outcomes(queries, targets)?;

        for failure in report.failures() {
            if let Err(err) = &failure.result {
                self.reporter.warn(&format!(
                    "Task {} (query {}) failed: {}",
                    failure.task, failure.query, err
                ));
            }
        }

        let results = report.into_results();
        match &results {
            Ok(results) => self.reporter.status(&format!(
                "Analysis complete: {} alignments in {:.2}s. Thread-pool closed. [OK]",
                results.len(),
                start.elapsed().as_secs_f64()
            )),
            Err(err) => self.reporter.warn(&format!("Analysis aborted: {}", err)),
        }
        results
    }

    /// All-outcome view of [`AlignAll::run`]
    pub fn run_outcomes(&self, sequences: &[Sequence]) -> AlignResult<BatchReport> {
        self.run_cross_outcomes(sequences, sequences)
    }

    /// Submit one task per query, then join every one of them in submission
    /// order.
    ///
    /// Task failures are kept in the report rather than cutting the join
    /// short, so running tasks always finish before the pool is dropped.
    pub fn run_cross_outcomes(
        &self,
        queries: &[Sequence],
        targets: &[Sequence],
    ) -> AlignResult<BatchReport> {
        let workers = self.config.workers;
        if workers == 0 {
            return Err(AlignError::InvalidInput(
                "worker count must be at least 1".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("align-worker-{}", i))
            .build()
            .map_err(|e| {
                AlignError::PoolDisruption(format!(
                    "failed to start {} worker threads: {}",
                    workers, e
                ))
            })?;
        self.reporter
            .status(&format!("{}x worker threads created [OK]", workers));

        let total = queries.len();
        let targets: Arc<[Sequence]> = targets.to_vec().into();
        let mut pending = Vec::with_capacity(total);

        for query in queries {
            let (tx, rx) = mpsc::sync_channel(1);
            let task = PairwiseTask::new(query.clone(), Arc::clone(&targets), self.config.traceback);
            let aligner = Arc::clone(&self.aligner);

            pool.spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| task.run(aligner.as_ref())))
                    .unwrap_or_else(|payload| {
                        Err(AlignError::invariant(format!(
                            "task panicked: {}",
                            panic_message(payload.as_ref())
                        )))
                    });
                // The receiver lives until every task is joined
                let _ = tx.send(result);
            });

            pending.push((query.id(), query.to_string(), rx));
        }

        let mut outcomes = Vec::with_capacity(total);
        for (task, (query_id, query, rx)) in pending.into_iter().enumerate() {
            let result = rx.recv().unwrap_or_else(|_| {
                Err(AlignError::PoolDisruption(format!(
                    "task {} ended without reporting an outcome",
                    task
                )))
            });

            let completed = task + 1;
            self.reporter.tick(completed, total);
            if completed % PROGRESS_INTERVAL == 0 {
                self.reporter.progress(completed, total);
            }

            outcomes.push(TaskOutcome {
                task,
                query_id,
                query,
                result,
            });
        }
        self.reporter.finish();

        Ok(BatchReport { outcomes })
    }
}

/// All-to-all alignment with the default engine and no status output
pub fn align_all(sequences: &[Sequence], workers: usize) -> AlignResult<Vec<AlignmentResult>> {
    AlignAll::new(
        AlignAllConfig::with_workers(workers),
        Arc::new(SilentReporter),
    )
    .run(sequences)
}

/// Every query against every target with the default engine and no status output
pub fn align_cross(
    queries: &[Sequence],
    targets: &[Sequence],
    workers: usize,
) -> AlignResult<Vec<AlignmentResult>> {
    AlignAll::new(
        AlignAllConfig::with_workers(workers),
        Arc::new(SilentReporter),
    )
    .run_cross(queries, targets)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
