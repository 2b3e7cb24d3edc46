// matrix.rs - Dense dynamic-programming score grid

use std::fmt;

use crate::error::{AlignError, AlignResult};

/// A `rows x cols` grid of scores stored row-major.
///
/// One matrix belongs to exactly one pairwise computation. Reads through the
/// public API are read-only views; cells are only written by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl AlignmentMatrix {
    /// Zero-filled matrix
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.cells[i * self.cols + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.rows {
            Some(&self.cells[i * self.cols..(i + 1) * self.cols])
        } else {
            None
        }
    }

    /// Copy of column `j`
    pub fn column(&self, j: usize) -> Option<Vec<f64>> {
        if j < self.cols {
            Some((0..self.rows).map(|i| self.cells[i * self.cols + j]).collect())
        } else {
            None
        }
    }

    /// Checked read used by the engine
    pub(crate) fn cell(&self, i: usize, j: usize) -> AlignResult<f64> {
        self.get(i, j).ok_or_else(|| {
            AlignError::invariant(format!(
                "read of cell ({}, {}) outside {}x{} matrix",
                i, j, self.rows, self.cols
            ))
        })
    }

    /// Checked write used by the engine
    pub(crate) fn set(&mut self, i: usize, j: usize, value: f64) -> AlignResult<()> {
        if i < self.rows && j < self.cols {
            self.cells[i * self.cols + j] = value;
            Ok(())
        } else {
            Err(AlignError::invariant(format!(
                "write of cell ({}, {}) outside {}x{} matrix",
                i, j, self.rows, self.cols
            )))
        }
    }
}

impl fmt::Display for AlignmentMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let line: Vec<String> = self.cells[i * self.cols..(i + 1) * self.cols]
                .iter()
                .map(|v| v.to_string())
                .collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}
