use crate::error::{MatchError, Result};
use crate::similarity::SimilarityMatrix;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TOP_N: usize = 10;

/// 1-based display label for a job row: row 0 is `Job_1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub usize);

impl JobId {
    pub fn from_row(row: usize) -> Self { Self(row) }

    pub fn row(self) -> usize { self.0 }

    pub fn label(self) -> String { self.to_string() }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Job_{}", self.0 + 1) }
}

impl Serialize for JobId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobMatches {
    pub job: JobId,
    pub row: usize,
    pub cv_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub cv_index: usize,
    pub score: f32,
}

/// Ranked résumé indices per job, in job row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ranking {
    jobs: Vec<JobMatches>,
}

impl Ranking {
    pub fn jobs(&self) -> &[JobMatches] { &self.jobs }

    pub fn len(&self) -> usize { self.jobs.len() }

    pub fn is_empty(&self) -> bool { self.jobs.is_empty() }

    pub fn for_row(&self, row: usize) -> Option<&[usize]> {
        self.jobs.get(row).map(|m| m.cv_indices.as_slice())
    }

    /// Lookup by display label, e.g. `"Job_3"`.
    pub fn for_label(&self, label: &str) -> Option<&[usize]> {
        let n: usize = label.strip_prefix("Job_")?.parse().ok()?;
        let row = n.checked_sub(1)?;
        if JobId::from_row(row).label() != label { return None; }
        self.for_row(row)
    }

    /// Pair each ranked index with its score from `sim`.
    pub fn with_scores(&self, sim: &SimilarityMatrix) -> Vec<(JobId, Vec<ScoredMatch>)> {
        self.jobs
            .iter()
            .map(|m| {
                let scored = m
                    .cv_indices
                    .iter()
                    .map(|&cv_index| ScoredMatch { cv_index, score: sim.get(m.job.row(), cv_index).unwrap_or(0.0) })
                    .collect();
                (m.job, scored)
            })
            .collect()
    }
}

/// Indices of the `n` highest scores, descending; equal scores keep ascending index order.
pub fn top_n_indices(scores: &[f32], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}

pub fn top_matches(sim: &SimilarityMatrix, top_n: usize) -> Result<Ranking> {
    if top_n == 0 {
        return Err(MatchError::InvalidTopN(top_n));
    }
    let jobs = (0..sim.rows())
        .map(|row| JobMatches {
            job: JobId::from_row(row),
            row,
            cv_indices: sim.row(row).map(|r| top_n_indices(r, top_n)).unwrap_or_default(),
        })
        .collect();
    Ok(Ranking { jobs })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_one_based() {
        assert_eq!(JobId::from_row(0).to_string(), "Job_1");
        assert_eq!(JobId::from_row(41).label(), "Job_42");
    }

    #[test]
    fn test_top_n() {
        let top = top_n_indices(&[0.1, 0.9, 0.5], 2);
        assert_eq!(top, vec![1, 2]);
    }

    #[test]
    fn ties_keep_ascending_index() {
        assert_eq!(top_n_indices(&[0.5, 0.7, 0.5, 0.7], 4), vec![1, 3, 0, 2]);
        assert_eq!(top_n_indices(&[0.0, 0.0, 0.0], 10), vec![0, 1, 2]);
    }

    #[test]
    fn top_n_zero_rejected() {
        let sim = SimilarityMatrix::from_rows(vec![vec![1.0]], 1);
        assert_eq!(top_matches(&sim, 0).unwrap_err(), MatchError::InvalidTopN(0));
    }

    #[test]
    fn ranking_lookup_and_scores() {
        let sim = SimilarityMatrix::from_rows(vec![vec![0.2, 0.8, 0.4], vec![0.0, 0.0, 0.3]], 3);
        let ranking = top_matches(&sim, 2).unwrap();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.for_label("Job_1"), Some(&[1, 2][..]));
        assert_eq!(ranking.for_label("Job_2"), Some(&[2, 0][..]));
        assert_eq!(ranking.for_label("Job_0"), None);
        assert_eq!(ranking.for_label("Job_3"), None);
        assert_eq!(ranking.for_label("Job_01"), None);
        assert_eq!(ranking.for_label("Job_+1"), None);
        assert_eq!(ranking.for_label("job_1"), None);

        let scored = ranking.with_scores(&sim);
        assert_eq!(scored[0].0.label(), "Job_1");
        assert_eq!(scored[0].1[0], ScoredMatch { cv_index: 1, score: 0.8 });
    }

    #[test]
    fn serializes_labels() {
        let sim = SimilarityMatrix::from_rows(vec![vec![0.5]], 1);
        let json = serde_json::to_value(top_matches(&sim, 1).unwrap()).unwrap();
        assert_eq!(json["jobs"][0]["job"], "Job_1");
        assert_eq!(json["jobs"][0]["row"], 0);
        assert_eq!(json["jobs"][0]["cv_indices"][0], 0);
    }
}
