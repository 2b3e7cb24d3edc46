// mod.rs - Core logic module

pub mod alignment;
pub mod engine;
pub mod matrix;
pub mod orchestrator;

// Re-export main types for convenience
pub use alignment::{compute_alignment_stats, AlignmentResult, AlignmentStats, ScoreType};
pub use engine::{NeedlemanWunsch, PairAligner, GAP_SYMBOL};
pub use matrix::AlignmentMatrix;
pub use orchestrator::{
    align_all, align_cross, default_workers, AlignAll, AlignAllConfig, BatchReport, PairwiseTask, TaskOutcome,
};
