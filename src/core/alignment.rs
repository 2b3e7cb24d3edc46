// alignment.rs - Alignment results and traceback statistics

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::engine::GAP_SYMBOL;

/// Score of one query/target pair.
///
/// `alignment_text` is empty unless traceback was requested, in which case it
/// holds the aligned query and aligned target separated by a newline.
/// Collections of results are ordered with [`AlignmentResult::cmp_by_query`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    query_id: usize,
    target_id: usize,
    score: f64,
    alignment_text: String,
}

impl AlignmentResult {
    pub fn new(query_id: usize, target_id: usize, score: f64, alignment_text: String) -> Self {
        Self {
            query_id,
            target_id,
            score,
            alignment_text,
        }
    }

    pub fn query_id(&self) -> usize {
        self.query_id
    }

    pub fn target_id(&self) -> usize {
        self.target_id
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn alignment_text(&self) -> &str {
        &self.alignment_text
    }

    /// Aligned query and target, when traceback text is present
    pub fn aligned_pair(&self) -> Option<(&str, &str)> {
        if self.alignment_text.is_empty() {
            return None;
        }
        self.alignment_text.split_once('\n')
    }

    /// Statistics over the traceback text, when present
    pub fn stats(&self) -> Option<AlignmentStats> {
        self.aligned_pair()
            .map(|(query, target)| compute_alignment_stats(query, target))
    }

    /// Ordering used for the final collection: ascending query id
    pub fn cmp_by_query(&self, other: &Self) -> Ordering {
        self.query_id.cmp(&other.query_id)
    }
}

/// Column counts of an aligned pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gap_events: usize,
    pub gap_bases: usize,
    pub alignment_length: usize,
    pub identity_percent: f64,
}

/// Compute alignment statistics from aligned sequences
pub fn compute_alignment_stats(query: &str, target: &str) -> AlignmentStats {
    let mut matches = 0;
    let mut mismatches = 0;
    let mut gap_events = 0;
    let mut gap_bases = 0;
    let mut alignment_length = 0;
    let mut in_gap = false;

    for (q, t) in query.chars().zip(target.chars()) {
        alignment_length += 1;

        if q == GAP_SYMBOL || t == GAP_SYMBOL {
            if !in_gap {
                gap_events += 1;
                in_gap = true;
            }
            gap_bases += 1;
        } else {
            in_gap = false;
            if q == t {
                matches += 1;
            } else {
                mismatches += 1;
            }
        }
    }

    let identity_percent = if alignment_length > 0 {
        matches as f64 / alignment_length as f64 * 100.0
    } else {
        0.0
    };

    AlignmentStats {
        matches,
        mismatches,
        gap_events,
        gap_bases,
        alignment_length,
        identity_percent,
    }
}

/// Value reported for each pair in tabular output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    /// Raw alignment score
    #[default]
    Alignment,
    /// Gap symbols in both aligned strings
    Gaps,
    /// Gaps beyond the ones the length difference forces
    ExcessGaps,
    /// Score divided by the shorter sequence length
    ShortNormalized,
    /// Score divided by the longer sequence length
    LongNormalized,
}

impl ScoreType {
    pub fn name(&self) -> &'static str {
        match self {
            ScoreType::Alignment => "alignment",
            ScoreType::Gaps => "gaps",
            ScoreType::ExcessGaps => "excess_gaps",
            ScoreType::ShortNormalized => "short_normalized",
            ScoreType::LongNormalized => "long_normalized",
        }
    }

    /// Whether the value is derived from traceback text
    pub fn needs_traceback(&self) -> bool {
        *self != ScoreType::Alignment
    }

    /// Value for one result; `None` without traceback text or on a zero divisor
    pub fn value(&self, result: &AlignmentResult) -> Option<f64> {
        if *self == ScoreType::Alignment {
            return Some(result.score());
        }

        let (query, target) = result.aligned_pair()?;
        let query_gaps = query.chars().filter(|&c| c == GAP_SYMBOL).count();
        let target_gaps = target.chars().filter(|&c| c == GAP_SYMBOL).count();
        let query_len = query.chars().count() - query_gaps;
        let target_len = target.chars().count() - target_gaps;
        let gaps = query_gaps + target_gaps;

        match self {
            ScoreType::Alignment => Some(result.score()),
            ScoreType::Gaps => Some(gaps as f64),
            ScoreType::ExcessGaps => {
                Some(gaps.saturating_sub(query_len.abs_diff(target_len)) as f64)
            }
            ScoreType::ShortNormalized => {
                normalized(result.score(), query_len.min(target_len))
            }
            ScoreType::LongNormalized => normalized(result.score(), query_len.max(target_len)),
        }
    }
}

fn normalized(score: f64, length: usize) -> Option<f64> {
    if length == 0 {
        None
    } else {
        Some(score / length as f64)
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alignment" => Ok(ScoreType::Alignment),
            "gaps" => Ok(ScoreType::Gaps),
            "excess_gaps" => Ok(ScoreType::ExcessGaps),
            "short_normalized" => Ok(ScoreType::ShortNormalized),
            "long_normalized" => Ok(ScoreType::LongNormalized),
            _ => Err(format!(
                "Unsupported score type: {}. Use: alignment, gaps, excess_gaps, short_normalized, long_normalized",
                s
            )),
        }
    }
}
