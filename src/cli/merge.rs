// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.queries.is_none() {
            self.queries = config.queries;
        }
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.alignments.is_none() {
            self.alignments = config.alignments;
        }
        // Only override the default, not an explicit CLI value
        if self.format == "tsv" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.score == "alignment" {
            if let Some(score) = config.score {
                self.score = score;
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Sequence filtering
        if self.include.is_none() {
            self.include = config.include;
        }
        if self.exclude.is_none() {
            self.exclude = config.exclude;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.traceback && config.traceback.unwrap_or(false) {
            self.traceback = true;
        }
        if !self.progress_bar && config.progress_bar.unwrap_or(false) {
            self.progress_bar = true;
        }
        if !self.quiet && config.quiet.unwrap_or(false) {
            self.quiet = true;
        }
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["treealign"], args).unwrap()
    }

    #[test]
    fn test_cli_values_win() {
        let args = parse(&["--input", "cli.fasta", "--threads", "2", "--format", "csv"]);
        let config = Config {
            input: Some("config.fasta".to_string()),
            threads: Some(16),
            format: Some("json".to_string()),
            output: Some("out.json".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.input.as_deref(), Some("cli.fasta"));
        assert_eq!(merged.threads, Some(2));
        assert_eq!(merged.format, "csv");
        assert_eq!(merged.output.as_deref(), Some("out.json"));
    }

    #[test]
    fn test_config_fills_defaults_and_flags() {
        let args = parse(&[]);
        let config = Config {
            format: Some("matrix".to_string()),
            traceback: Some(true),
            quiet: Some(true),
            exclude: Some("^ctrl".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.format, "matrix");
        assert!(merged.traceback);
        assert!(merged.quiet);
        assert!(!merged.dry_run);
        assert_eq!(merged.exclude.as_deref(), Some("^ctrl"));
        assert!(merged.threads.is_none());
    }

    #[test]
    fn test_config_fills_cross_mode_and_score() {
        let args = parse(&["--score", "gaps"]);
        let config = Config {
            queries: Some("queries.fasta".to_string()),
            alignments: Some("pairs.tsv".to_string()),
            score: Some("long_normalized".to_string()),
            ..Config::new()
        };

        let merged = args.merge_with_config(config);
        assert_eq!(merged.queries.as_deref(), Some("queries.fasta"));
        assert_eq!(merged.alignments.as_deref(), Some("pairs.tsv"));
        assert_eq!(merged.score, "gaps");
    }
}
