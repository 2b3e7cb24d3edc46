// validation.rs - Input validation utilities

use regex::Regex;
use std::str::FromStr;

use crate::cli::args::Args;
use crate::core::{default_workers, ScoreType};
use crate::data::FastaFilter;
use crate::output::OutputFormat;

pub struct ValidationResult {
    pub workers: usize,
    pub format: OutputFormat,
    pub score_type: ScoreType,
    /// Traceback requested directly or needed by the score type or alignments file
    pub traceback: bool,
    pub filter: FastaFilter,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let workers = match args.threads {
        Some(0) => return Err("Thread count must be at least 1".to_string()),
        Some(n) => n,
        None => default_workers(),
    };

    let format = OutputFormat::from_str(&args.format)?;
    let score_type = ScoreType::from_str(&args.score)?;
    let traceback = args.traceback || score_type.needs_traceback() || args.alignments.is_some();

    if args.quiet && args.progress_bar {
        return Err("--quiet and --progress-bar cannot be used together".to_string());
    }

    // Compile regex patterns
    let include = if let Some(pattern) = &args.include {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid include regex: {}", e))?)
    } else {
        None
    };

    let exclude = if let Some(pattern) = &args.exclude {
        Some(Regex::new(pattern).map_err(|e| format!("Invalid exclude regex: {}", e))?)
    } else {
        None
    };

    Ok(ValidationResult {
        workers,
        format,
        score_type,
        traceback,
        filter: FastaFilter::new(include, exclude),
    })
}
