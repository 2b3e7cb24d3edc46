// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub queries: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub score: Option<String>,
    pub alignments: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Alignment
    pub traceback: Option<bool>,

    // Sequence filtering
    pub include: Option<String>,
    pub exclude: Option<String>,

    // Flags
    pub progress_bar: Option<bool>,
    pub quiet: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        Self::from_toml_str(&content)
            .map_err(|e| format!("{} ('{}')", e, path.display()))
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# treealign.toml - Configuration file for treealign
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to the input FASTA file
input = "/path/to/sequences.fasta"

# Second FASTA file of queries aligned against the input (omit for all-to-all)
# queries = "/path/to/queries.fasta"

# Output results file
output = "scores.tsv"

# Output format: tsv, csv, matrix, json
format = "tsv"

# Score written per pair: alignment, gaps, excess_gaps, short_normalized, long_normalized
# Anything but alignment turns traceback on
score = "alignment"

# Also write aligned pairs to this file (turns traceback on)
# alignments = "alignments.tsv"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of worker threads (omit for auto-detection)
threads = 8

# =============================================================================
# ALIGNMENT
# =============================================================================

# Keep the traceback alignment of every pair
traceback = false

# =============================================================================
# SEQUENCE FILTERING
# =============================================================================

# Include only sequences whose header matches regex pattern
# include = "neurite.*"

# Exclude sequences whose header matches regex pattern
# exclude = "control.*"

# =============================================================================
# FLAGS
# =============================================================================

# Show a progress bar instead of progress lines
progress_bar = false

# Suppress status output
quiet = false

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}
