// lib.rs - treealign library root

//! # treealign - All-to-all global sequence alignment on a bounded worker pool
//!
//! Every sequence of a collection is aligned against every sequence of the
//! same collection (self-pairs and both orderings included) with a
//! Needleman-Wunsch style recurrence, one task per query on a fixed-size
//! thread pool. [`AlignAll::run_cross`] aligns a separate query set against
//! the collection instead.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use treealign::prelude::*;
//!
//! let sequences = load_sequences(
//!     std::path::Path::new("sequences.fasta"),
//!     &FastaFilter::default(),
//! )?;
//!
//! let runner = AlignAll::new(AlignAllConfig::with_workers(4), Arc::new(ConsoleReporter::new()));
//! let results = runner.run(&sequences)?;
//! assert_eq!(results.len(), sequences.len() * sequences.len());
//! # Ok::<(), treealign::AlignError>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;
pub mod report;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::core::{align_all, align_cross, AlignAll, AlignAllConfig, BatchReport, TaskOutcome};
    pub use crate::core::{AlignmentMatrix, AlignmentResult, NeedlemanWunsch, PairAligner, ScoreType};
    pub use crate::data::{load_from_reader, load_sequences, FastaFilter, Sequence};
    pub use crate::error::{AlignError, AlignResult};
    pub use crate::output::{write_alignments, write_results, OutputFormat};
    pub use crate::report::{CaptureReporter, ConsoleReporter, Reporter, SilentReporter};
}

// Re-export main types at the root level for convenience
pub use crate::core::{align_all, align_cross, AlignAll, AlignAllConfig, AlignmentResult, NeedlemanWunsch};
pub use crate::data::Sequence;
pub use crate::error::{AlignError, AlignResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("treealign v{} - All-to-all global sequence alignment", VERSION)
}
