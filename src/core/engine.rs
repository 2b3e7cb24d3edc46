// engine.rs - Global alignment engine (build -> score -> traceback)

use crate::core::alignment::AlignmentResult;
use crate::core::matrix::AlignmentMatrix;
use crate::data::Sequence;
use crate::error::{AlignError, AlignResult};

/// Score added for identical residues
pub const MATCH_WEIGHT: f64 = 1.0;
/// Score added for differing residues
pub const MISMATCH_WEIGHT: f64 = -1.0;
/// Cost of a horizontal or vertical move
pub const GAP_COST: f64 = 1.0;
/// Symbol emitted for a gap in traceback strings
pub const GAP_SYMBOL: char = '-';

/// Pairwise aligner used by the all-to-all orchestrator.
///
/// The three phases must run in order on the same matrix: `build` seeds the
/// boundary, `score` fills the interior, `traceback` walks the filled grid.
pub trait PairAligner: Send + Sync {
    fn build(&self, query: &Sequence, target: &Sequence) -> AlignResult<AlignmentMatrix>;

    fn score(
        &self,
        matrix: &mut AlignmentMatrix,
        query: &Sequence,
        target: &Sequence,
    ) -> AlignResult<f64>;

    fn traceback(
        &self,
        matrix: &AlignmentMatrix,
        query: &Sequence,
        target: &Sequence,
    ) -> AlignResult<(String, String)>;

    /// Align one pair, optionally keeping the traceback text
    fn align(
        &self,
        query: &Sequence,
        target: &Sequence,
        with_traceback: bool,
    ) -> AlignResult<AlignmentResult> {
        let mut matrix = self.build(query, target)?;
        let score = self.score(&mut matrix, query, target)?;
        let alignment_text = if with_traceback {
            let (aligned_query, aligned_target) = self.traceback(&matrix, query, target)?;
            format!("{}\n{}", aligned_query, aligned_target)
        } else {
            String::new()
        };
        Ok(AlignmentResult::new(
            query.id(),
            target.id(),
            score,
            alignment_text,
        ))
    }
}

/// Needleman-Wunsch style global alignment with a unit scoring scheme.
///
/// Row 0 holds `j` and column 0 holds `i`; interior cells take
/// `max(diag + weight, left - 1, up - 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeedlemanWunsch;

impl NeedlemanWunsch {
    pub fn new() -> Self {
        Self
    }

    fn weight(query: &[char], target: &[char], i: usize, j: usize) -> AlignResult<f64> {
        let (q, t) = match (query.get(i.wrapping_sub(1)), target.get(j.wrapping_sub(1))) {
            (Some(q), Some(t)) => (q, t),
            _ => {
                return Err(AlignError::invariant(format!(
                    "weight requested for residues ({}, {}) of a {}x{} pair",
                    i,
                    j,
                    query.len(),
                    target.len()
                )))
            }
        };
        Ok(if q == t { MATCH_WEIGHT } else { MISMATCH_WEIGHT })
    }

    fn check_shape(
        matrix: &AlignmentMatrix,
        query: &Sequence,
        target: &Sequence,
    ) -> AlignResult<()> {
        if matrix.rows() != query.len() + 1 || matrix.cols() != target.len() + 1 {
            return Err(AlignError::invariant(format!(
                "matrix is {}x{} but {} vs {} needs {}x{}",
                matrix.rows(),
                matrix.cols(),
                query,
                target,
                query.len() + 1,
                target.len() + 1
            )));
        }
        Ok(())
    }
}

impl PairAligner for NeedlemanWunsch {
    fn build(&self, query: &Sequence, target: &Sequence) -> AlignResult<AlignmentMatrix> {
        let rows = query.len() + 1;
        let cols = target.len() + 1;
        let mut matrix = AlignmentMatrix::zeros(rows, cols);

        for j in 0..cols {
            matrix.set(0, j, j as f64)?;
        }
        for i in 1..rows {
            matrix.set(i, 0, i as f64)?;
        }

        Ok(matrix)
    }

    fn score(
        &self,
        matrix: &mut AlignmentMatrix,
        query: &Sequence,
        target: &Sequence,
    ) -> AlignResult<f64> {
        Self::check_shape(matrix, query, target)?;
        let q = query.symbols();
        let t = target.symbols();

        for i in 1..=q.len() {
            for j in 1..=t.len() {
                let diag = matrix.cell(i - 1, j - 1)? + Self::weight(q, t, i, j)?;
                let left = matrix.cell(i, j - 1)? - GAP_COST;
                let up = matrix.cell(i - 1, j)? - GAP_COST;
                matrix.set(i, j, diag.max(left).max(up))?;
            }
        }

        matrix.cell(q.len(), t.len())
    }

    fn traceback(
        &self,
        matrix: &AlignmentMatrix,
        query: &Sequence,
        target: &Sequence,
    ) -> AlignResult<(String, String)> {
        Self::check_shape(matrix, query, target)?;
        let q = query.symbols();
        let t = target.symbols();

        // Columns are collected end-to-start and reversed at the end
        let mut aligned_query: Vec<char> = Vec::with_capacity(q.len() + t.len());
        let mut aligned_target: Vec<char> = Vec::with_capacity(q.len() + t.len());

        let mut i = q.len();
        let mut j = t.len();
        while i > 0 && j > 0 {
            let current = matrix.cell(i, j)?;
            if current == matrix.cell(i - 1, j - 1)? + Self::weight(q, t, i, j)? {
                aligned_query.push(q[i - 1]);
                aligned_target.push(t[j - 1]);
                i -= 1;
                j -= 1;
            } else if current == matrix.cell(i, j - 1)? - GAP_COST {
                aligned_query.push(GAP_SYMBOL);
                aligned_target.push(t[j - 1]);
                j -= 1;
            } else {
                aligned_query.push(q[i - 1]);
                aligned_target.push(GAP_SYMBOL);
                i -= 1;
            }
        }

        // Leading residues left on one side are aligned against gaps
        while i > 0 {
            aligned_query.push(q[i - 1]);
            aligned_target.push(GAP_SYMBOL);
            i -= 1;
        }
        while j > 0 {
            aligned_query.push(GAP_SYMBOL);
            aligned_target.push(t[j - 1]);
            j -= 1;
        }

        Ok((
            aligned_query.into_iter().rev().collect(),
            aligned_target.into_iter().rev().collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(id: usize, residues: &str) -> Sequence {
        Sequence::new(id, format!("s{}", id), residues)
    }

    fn score_of(a: &str, b: &str) -> f64 {
        let engine = NeedlemanWunsch::new();
        let (qa, tb) = (seq(0, a), seq(1, b));
        let mut m = engine.build(&qa, &tb).unwrap();
        engine.score(&mut m, &qa, &tb).unwrap()
    }

    fn strip_gaps(s: &str) -> String {
        s.chars().filter(|&c| c != GAP_SYMBOL).collect()
    }

    #[test]
    fn test_build_boundary_and_shape() {
        let engine = NeedlemanWunsch::new();
        let m = engine.build(&seq(0, "AAT"), &seq(1, "AAGC")).unwrap();

        assert_eq!(m.rows(), 4);
        assert_eq!(m.cols(), 5);
        assert_eq!(m.get(0, 0), Some(0.0));
        assert_eq!(m.row(0), Some(&[0.0, 1.0, 2.0, 3.0, 4.0][..]));
        assert_eq!(m.column(0), Some(vec![0.0, 1.0, 2.0, 3.0]));
        assert_eq!(m.get(2, 3), Some(0.0));
    }

    #[test]
    fn test_build_zero_length_is_boundary_only() {
        let engine = NeedlemanWunsch::new();
        let empty = seq(0, "");
        let other = seq(1, "ACG");

        let m = engine.build(&empty, &other).unwrap();
        assert_eq!((m.rows(), m.cols()), (1, 4));
        let m = engine.build(&other, &empty).unwrap();
        assert_eq!((m.rows(), m.cols()), (4, 1));

        assert_eq!(score_of("", "ACG"), 3.0);
        assert_eq!(score_of("", ""), 0.0);
    }

    #[test]
    fn test_concrete_scores() {
        assert_eq!(score_of("AAT", "AAG"), 1.0);
        assert_eq!(score_of("AAT", "AAT"), 3.0);
    }

    #[test]
    fn test_filled_matrix_for_aat_vs_aag() {
        let engine = NeedlemanWunsch::new();
        let (q, t) = (seq(0, "AAT"), seq(1, "AAG"));
        let mut m = engine.build(&q, &t).unwrap();
        let score = engine.score(&mut m, &q, &t).unwrap();

        assert_eq!(m.row(1), Some(&[1.0, 1.0, 2.0, 2.0][..]));
        assert_eq!(m.row(2), Some(&[2.0, 2.0, 2.0, 1.0][..]));
        assert_eq!(m.row(3), Some(&[3.0, 2.0, 1.0, 1.0][..]));
        assert_eq!(score, m.get(3, 3).unwrap());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(score_of("a", "A"), 0.0);
        assert_eq!(score_of("A", "A"), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("AAT", "AAG"),
            ("GATTACA", "GCATGCU"),
            ("ACGTTGCA", "TGCA"),
            ("A", "CCCCC"),
            ("MKVLAAGIV", "MKVLGIVQ"),
        ];
        for (a, b) in pairs {
            assert_eq!(score_of(a, b), score_of(b, a), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_self_alignment_scores_length() {
        for s in ["A", "AT", "AAT", "GATTACA", "ACGTACGTTTGA", "αβγα"] {
            assert_eq!(score_of(s, s), s.chars().count() as f64, "{}", s);
        }
    }

    #[test]
    fn test_traceback_prefers_diagonal() {
        let engine = NeedlemanWunsch::new();
        let (q, t) = (seq(0, "AAT"), seq(1, "AAG"));
        let mut m = engine.build(&q, &t).unwrap();
        engine.score(&mut m, &q, &t).unwrap();

        let (aq, at) = engine.traceback(&m, &q, &t).unwrap();
        assert_eq!(aq, "AAT");
        assert_eq!(at, "AAG");
    }

    #[test]
    fn test_traceback_pads_leftover_prefix() {
        let engine = NeedlemanWunsch::new();
        let (q, t) = (seq(0, "A"), seq(1, "AAA"));
        let mut m = engine.build(&q, &t).unwrap();
        assert_eq!(engine.score(&mut m, &q, &t).unwrap(), 3.0);

        let (aq, at) = engine.traceback(&m, &q, &t).unwrap();
        assert_eq!(aq, "--A");
        assert_eq!(at, "AAA");
    }

    #[test]
    fn test_traceback_gap_placement() {
        let engine = NeedlemanWunsch::new();
        let cases = [
            // left steps: gaps go into the query
            ("AATTGG", "TTAAGG", "AATT--GG", "--TTAAGG"),
            // an up step: the first move from the corner gaps the target
            ("CA", "AAAC", "---CA", "AAAC-"),
            ("GATTACA", "GCATGCU", "GATTA-CA----", "-----GCATGCU"),
        ];
        for (a, b, expected_q, expected_t) in cases {
            let (q, t) = (seq(0, a), seq(1, b));
            let mut m = engine.build(&q, &t).unwrap();
            engine.score(&mut m, &q, &t).unwrap();

            let (aq, at) = engine.traceback(&m, &q, &t).unwrap();
            assert_eq!(aq, expected_q, "{} vs {}", a, b);
            assert_eq!(at, expected_t, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_traceback_round_trip() {
        let engine = NeedlemanWunsch::new();
        let pairs = [
            ("AAT", "AAG"),
            ("GATTACA", "GCATGCU"),
            ("ACGTTGCA", "TGCA"),
            ("TGCA", "ACGTTGCA"),
            ("A", "CCCCC"),
            ("ACG", ""),
        ];
        for (a, b) in pairs {
            let (q, t) = (seq(0, a), seq(1, b));
            let mut m = engine.build(&q, &t).unwrap();
            engine.score(&mut m, &q, &t).unwrap();
            let (aq, at) = engine.traceback(&m, &q, &t).unwrap();

            assert_eq!(aq.chars().count(), at.chars().count(), "{} vs {}", a, b);
            assert_eq!(strip_gaps(&aq), a);
            assert_eq!(strip_gaps(&at), b);
        }
    }

    #[test]
    fn test_shape_mismatch_is_invariant_violation() {
        let engine = NeedlemanWunsch::new();
        let (q, t, other) = (seq(0, "AAT"), seq(1, "AAG"), seq(2, "AAGGG"));
        let mut m = engine.build(&q, &other).unwrap();

        let err = engine.score(&mut m, &q, &t).unwrap_err();
        assert!(matches!(err, AlignError::InternalInvariantViolation { .. }));
        let err = engine.traceback(&m, &q, &t).unwrap_err();
        assert!(matches!(err, AlignError::InternalInvariantViolation { .. }));
    }

    #[test]
    fn test_align_builds_result() {
        let engine = NeedlemanWunsch::new();
        let (q, t) = (seq(4, "AAT"), seq(9, "AAG"));

        let plain = engine.align(&q, &t, false).unwrap();
        assert_eq!(plain.query_id(), 4);
        assert_eq!(plain.target_id(), 9);
        assert_eq!(plain.score(), 1.0);
        assert!(plain.alignment_text().is_empty());

        let traced = engine.align(&q, &t, true).unwrap();
        assert_eq!(traced.alignment_text(), "AAT\nAAG");
        assert_eq!(traced.score(), plain.score());
    }

    #[test]
    fn test_determinism() {
        let engine = NeedlemanWunsch::new();
        let (q, t) = (seq(0, "GATTACA"), seq(1, "GCATGCU"));
        let first = engine.align(&q, &t, true).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.align(&q, &t, true).unwrap(), first);
        }
    }
}
