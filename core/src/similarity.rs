use crate::error::{MatchError, Result};
use crate::vector::{DocumentMatrix, SparseVector};
use serde::Serialize;

/// Dense job × résumé cosine scores, row-major.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn from_rows(rows: Vec<Vec<f32>>, cols: usize) -> Self {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for row in rows {
            debug_assert_eq!(row.len(), cols);
            data.extend(row);
        }
        Self { rows: n, cols, data }
    }

    pub fn rows(&self) -> usize { self.rows }

    pub fn cols(&self) -> usize { self.cols }

    pub fn get(&self, job: usize, cv: usize) -> Option<f32> {
        if job >= self.rows || cv >= self.cols { return None; }
        self.data.get(job * self.cols + cv).copied()
    }

    pub fn row(&self, job: usize) -> Option<&[f32]> {
        if job >= self.rows { return None; }
        Some(&self.data[job * self.cols..(job + 1) * self.cols])
    }
}

/// Cosine similarity; 0 when either vector has zero norm.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f32 {
    let na = a.norm();
    let nb = b.norm();
    if na == 0.0 || nb == 0.0 { return 0.0; }
    (a.dot(b) / (na * nb)).clamp(0.0, 1.0)
}

fn score_row(job: &SparseVector, cvs: &DocumentMatrix) -> Vec<f32> {
    cvs.rows().iter().map(|cv| cosine(job, cv)).collect()
}

/// Score every job row against every résumé row.
pub fn score(jobs: &DocumentMatrix, cvs: &DocumentMatrix) -> Result<SimilarityMatrix> {
    if jobs.num_features() != cvs.num_features() {
        return Err(MatchError::DimensionMismatch { jobs: jobs.num_features(), cvs: cvs.num_features() });
    }

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f32>> = {
        use rayon::prelude::*;
        jobs.rows().par_iter().map(|job| score_row(job, cvs)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f32>> = jobs.rows().iter().map(|job| score_row(job, cvs)).collect();

    tracing::debug!(rows = jobs.len(), cols = cvs.len(), "computed similarity matrix");
    Ok(SimilarityMatrix::from_rows(rows, cvs.len()))
}
