// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// treealign - All-to-all global alignment scores for a FASTA collection
pub struct Args {
    /// path to input FASTA file (targets, and queries unless --queries is given)
    #[argh(option)]
    pub input: Option<String>,

    /// path to a second FASTA file of queries aligned against the input
    #[argh(option)]
    pub queries: Option<String>,

    /// output results file
    #[argh(option)]
    pub output: Option<String>,

    /// output format: tsv, csv, matrix, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// score written per pair: alignment, gaps, excess_gaps, short_normalized, long_normalized (default: alignment)
    #[argh(option, default = "String::from(\"alignment\")")]
    pub score: String,

    /// also write aligned pairs to this file
    #[argh(option)]
    pub alignments: Option<String>,

    /// number of worker threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// keep the traceback alignment of every pair
    #[argh(switch)]
    pub traceback: bool,

    /// include only sequences whose header matches regex pattern
    #[argh(option)]
    pub include: Option<String>,

    /// exclude sequences whose header matches regex pattern
    #[argh(option)]
    pub exclude: Option<String>,

    /// show a progress bar instead of progress lines
    #[argh(switch)]
    pub progress_bar: bool,

    /// suppress status output
    #[argh(switch)]
    pub quiet: bool,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
