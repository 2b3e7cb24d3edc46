// mod.rs - Output formatters module

use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::core::{AlignmentResult, ScoreType};
use crate::data::Sequence;

/// Supported result layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One row per pair, tab separated
    Tsv,
    /// One row per pair, comma separated
    Csv,
    /// Square score matrix labelled with headers
    Matrix,
    /// JSON array of results
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "csv" => Ok(OutputFormat::Csv),
            "matrix" => Ok(OutputFormat::Matrix),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unsupported output format: {}. Use: tsv, csv, matrix, json",
                s
            )),
        }
    }
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent).map_err(|e| {
            format!("Failed to create parent directory '{}': {}", parent.display(), e)
        })?;
    }
    Ok(())
}

fn headers_by_id(sequences: &[Sequence]) -> HashMap<usize, &str> {
    sequences.iter().map(|s| (s.id(), s.header())).collect()
}

fn header_of<'a>(headers: &HashMap<usize, &'a str>, id: usize) -> &'a str {
    headers.get(&id).copied().unwrap_or("NA")
}

fn score_cell(score_type: ScoreType, result: &AlignmentResult) -> String {
    match score_type.value(result) {
        Some(value) => value.to_string(),
        None => "NA".to_string(),
    }
}

/// Write one row per pair
pub fn write_table<W: Write>(
    writer: W,
    delimiter: u8,
    score_type: ScoreType,
    queries: &[Sequence],
    targets: &[Sequence],
    results: &[AlignmentResult],
) -> Result<(), String> {
    let query_headers = headers_by_id(queries);
    let target_headers = headers_by_id(targets);
    let with_traceback = results.iter().any(|r| r.aligned_pair().is_some());

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    let mut columns = vec!["query_id", "target_id", "query", "target", "score"];
    if with_traceback {
        columns.extend(["aligned_query", "aligned_target", "identity_percent"]);
    }
    wtr.write_record(&columns)
        .map_err(|e| format!("Write error: {}", e))?;

    for result in results {
        let mut record = vec![
            result.query_id().to_string(),
            result.target_id().to_string(),
            header_of(&query_headers, result.query_id()).to_string(),
            header_of(&target_headers, result.target_id()).to_string(),
            score_cell(score_type, result),
        ];
        if with_traceback {
            match (result.aligned_pair(), result.stats()) {
                (Some((query, target)), Some(stats)) => {
                    record.push(query.to_string());
                    record.push(target.to_string());
                    record.push(format!("{:.2}", stats.identity_percent));
                }
                _ => record.extend(["NA".to_string(), "NA".to_string(), "NA".to_string()]),
            }
        }
        wtr.write_record(&record)
            .map_err(|e| format!("Write error: {}", e))?;
    }

    wtr.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write a score matrix, rows are queries and columns are targets
pub fn write_score_matrix<W: Write>(
    mut writer: W,
    score_type: ScoreType,
    queries: &[Sequence],
    targets: &[Sequence],
    results: &[AlignmentResult],
) -> Result<(), String> {
    let scores: HashMap<(usize, usize), String> = results
        .iter()
        .map(|r| ((r.query_id(), r.target_id()), score_cell(score_type, r)))
        .collect();

    write!(writer, "Sequence").map_err(|e| format!("Write error: {}", e))?;
    for seq in targets {
        write!(writer, "\t{}", seq.header()).map_err(|e| format!("Write error: {}", e))?;
    }
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;

    for query in queries {
        write!(writer, "{}", query.header()).map_err(|e| format!("Write error: {}", e))?;
        for target in targets {
            let score_str = scores
                .get(&(query.id(), target.id()))
                .map(String::as_str)
                .unwrap_or("NA");
            write!(writer, "\t{}", score_str).map_err(|e| format!("Write error: {}", e))?;
        }
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write results as a JSON array
pub fn write_json<W: Write>(mut writer: W, results: &[AlignmentResult]) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut writer, results)
        .map_err(|e| format!("Failed to serialize results: {}", e))?;
    writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}

/// Write one line per traced pair: query, target, aligned query, aligned target
pub fn write_alignments<W: Write>(
    mut writer: W,
    queries: &[Sequence],
    targets: &[Sequence],
    results: &[AlignmentResult],
) -> Result<usize, String> {
    let query_headers = headers_by_id(queries);
    let target_headers = headers_by_id(targets);
    let mut written = 0;

    for result in results {
        if let Some((aligned_query, aligned_target)) = result.aligned_pair() {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}",
                header_of(&query_headers, result.query_id()),
                header_of(&target_headers, result.target_id()),
                aligned_query,
                aligned_target
            )
            .map_err(|e| format!("Write error: {}", e))?;
            written += 1;
        }
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(written)
}

/// Write the aligned-pair file, returns the number of pairs written
pub fn write_alignments_file(
    file_path: &str,
    queries: &[Sequence],
    targets: &[Sequence],
    results: &[AlignmentResult],
) -> Result<usize, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create alignments file '{}': {}", file_path, e))?;
    write_alignments(BufWriter::new(file), queries, targets, results)
}

/// Write results in the specified format
pub fn write_results(
    file_path: &str,
    format: OutputFormat,
    score_type: ScoreType,
    queries: &[Sequence],
    targets: &[Sequence],
    results: &[AlignmentResult],
    command_line: &str,
) -> Result<(), String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    let mut writer = BufWriter::new(file);

    // JSON has no comment syntax
    if format != OutputFormat::Json {
        writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
        writeln!(
            writer,
            "# Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
        .map_err(|e| format!("Write error: {}", e))?;
        writeln!(writer, "# treealign v{}", env!("CARGO_PKG_VERSION"))
            .map_err(|e| format!("Write error: {}", e))?;
        writeln!(writer, "# Score: {}", score_type).map_err(|e| format!("Write error: {}", e))?;
    }

    match format {
        OutputFormat::Tsv => {
            write_table(&mut writer, b'\t', score_type, queries, targets, results)?
        }
        OutputFormat::Csv => write_table(&mut writer, b',', score_type, queries, targets, results)?,
        OutputFormat::Matrix => {
            write_score_matrix(&mut writer, score_type, queries, targets, results)?
        }
        OutputFormat::Json => write_json(&mut writer, results)?,
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    Ok(())
}
