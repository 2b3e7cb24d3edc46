// error.rs - Error taxonomy shared by the engine, the orchestrator and the loader

use thiserror::Error;

/// Errors raised while loading sequences or computing alignments
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    /// A sequence record or a configuration value is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An index or matrix-shape assumption inside the engine does not hold
    #[error("Internal invariant violated: {context}")]
    InternalInvariantViolation { context: String },

    /// A pairwise task failed; `task` is its submission index
    #[error("Alignment task {task} (query {query}) failed: {reason} ({failed_tasks} task(s) failed in total)")]
    WorkerFailure {
        task: usize,
        query: String,
        reason: String,
        failed_tasks: usize,
    },

    /// The worker pool could not be built or stopped delivering outcomes
    #[error("Worker pool disrupted: {0}")]
    PoolDisruption(String),
}

impl AlignError {
    pub(crate) fn invariant(context: impl Into<String>) -> Self {
        AlignError::InternalInvariantViolation {
            context: context.into(),
        }
    }

    pub fn is_worker_failure(&self) -> bool {
        matches!(self, AlignError::WorkerFailure { .. })
    }
}

pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AlignError::invariant("cell (4, 2) outside 3x3 matrix");
        assert_eq!(
            err.to_string(),
            "Internal invariant violated: cell (4, 2) outside 3x3 matrix"
        );

        let err = AlignError::WorkerFailure {
            task: 1,
            query: "\"seq2\"".to_string(),
            reason: "boom".to_string(),
            failed_tasks: 2,
        };
        assert!(err.is_worker_failure());
        assert!(err.to_string().contains("task 1"));
        assert!(err.to_string().contains("2 task(s) failed"));
    }
}
