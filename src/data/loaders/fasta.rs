// fasta.rs - FASTA loader producing ordered sequence records

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use bio::io::fasta;
use regex::Regex;

use crate::data::sequence::Sequence;
use crate::error::{AlignError, AlignResult};

/// Header filters applied while loading
#[derive(Debug, Clone, Default)]
pub struct FastaFilter {
    pub include: Option<Regex>,
    pub exclude: Option<Regex>,
}

impl FastaFilter {
    pub fn new(include: Option<Regex>, exclude: Option<Regex>) -> Self {
        Self { include, exclude }
    }

    /// Check whether a header passes both filters
    pub fn accepts(&self, header: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(header) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(header) {
                return false;
            }
        }
        true
    }
}

/// Load all sequences from a FASTA file
pub fn load_sequences(path: &Path, filter: &FastaFilter) -> AlignResult<Vec<Sequence>> {
    if !path.is_file() {
        return Err(AlignError::InvalidInput(format!(
            "FASTA file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path).map_err(|e| {
        AlignError::InvalidInput(format!("Failed to open FASTA file {}: {}", path.display(), e))
    })?;

    load_from_reader(BufReader::new(file), filter)
        .map_err(|e| match e {
            AlignError::InvalidInput(msg) => {
                AlignError::InvalidInput(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
}

/// Load sequences from any FASTA stream.
///
/// Ids are assigned 0.. over the records that survive filtering, in stream
/// order. Headers are the record id followed by its description, if any.
pub fn load_from_reader<R: Read>(reader: R, filter: &FastaFilter) -> AlignResult<Vec<Sequence>> {
    let reader = fasta::Reader::new(reader);
    let mut sequences = Vec::new();

    for (record_num, record_result) in reader.records().enumerate() {
        let record = record_result.map_err(|e| {
            AlignError::InvalidInput(format!("Invalid FASTA record {}: {}", record_num + 1, e))
        })?;

        let header = match record.desc() {
            Some(desc) => format!("{} {}", record.id(), desc),
            None => record.id().to_string(),
        };

        if !filter.accepts(&header) {
            continue;
        }

        if record.seq().is_empty() {
            return Err(AlignError::InvalidInput(format!(
                "Record '{}' has no residues",
                header
            )));
        }

        let residues = std::str::from_utf8(record.seq()).map_err(|_| {
            AlignError::InvalidInput(format!("Record '{}' contains non UTF-8 residues", header))
        })?;

        sequences.push(Sequence::new(sequences.len(), header, residues));
    }

    if sequences.is_empty() {
        return Err(AlignError::InvalidInput(
            "Input contains no FASTA sequences".to_string(),
        ));
    }

    Ok(sequences)
}
