// main.rs - CLI entry point

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use treealign::cli::{validate_args, Args, Config};
use treealign::output::write_alignments_file;
use treealign::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation_result = validate_args(&args)?;

    let input = args.input.as_ref().ok_or("--input is required")?;
    let output = if args.dry_run {
        None
    } else {
        Some(args.output.as_ref().ok_or("--output is required")?)
    };

    let status: Arc<dyn Reporter> = if args.quiet {
        Arc::new(SilentReporter)
    } else {
        Arc::new(ConsoleReporter::new())
    };

    status.status(&treealign::get_info());
    status.status(&format!("Parsing {}", input));

    let total_start = Instant::now();
    let targets = load_sequences(Path::new(input), &validation_result.filter)
        .map_err(|e| e.to_string())?;
    status.status(&format!("{} sequences parsed [OK]", targets.len()));

    let cross_queries = match &args.queries {
        Some(path) => {
            status.status(&format!("Parsing queries {}", path));
            let queries = load_sequences(Path::new(path), &validation_result.filter)
                .map_err(|e| e.to_string())?;
            status.status(&format!("{} query sequences parsed [OK]", queries.len()));
            Some(queries)
        }
        None => None,
    };
    let queries = cross_queries.as_deref().unwrap_or(&targets[..]);

    if args.dry_run {
        status.status(&format!(
            "Dry run completed successfully: {} tasks, {} alignments would run on {} threads",
            queries.len(),
            queries.len() * targets.len(),
            validation_result.workers
        ));
        return Ok(());
    }

    // The progress bar needs the task count, so it is built after loading
    let reporter: Arc<dyn Reporter> = if args.progress_bar {
        Arc::new(ConsoleReporter::with_progress_bar(queries.len()))
    } else {
        status
    };

    let config = AlignAllConfig {
        workers: validation_result.workers,
        traceback: validation_result.traceback,
    };
    let runner = AlignAll::new(config, reporter.clone());
    let results = runner
        .run_cross(queries, &targets)
        .map_err(|e| e.to_string())?;

    let output_path = output.ok_or("--output is required")?;
    write_results(
        output_path,
        validation_result.format,
        validation_result.score_type,
        queries,
        &targets,
        &results,
        &command_line,
    )?;

    if let Some(alignments_path) = &args.alignments {
        let written = write_alignments_file(alignments_path, queries, &targets, &results)?;
        reporter.status(&format!(
            "{} aligned pairs written to {} [OK]",
            written, alignments_path
        ));
    }

    reporter.status(&format!(
        "{} results written to {} in {:.2}s [OK]",
        results.len(),
        output_path,
        total_start.elapsed().as_secs_f64()
    ));

    Ok(())
}
