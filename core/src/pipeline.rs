use crate::error::{MatchError, Result};
use crate::normalizer::{normalize_all, Analyzer, EnglishAnalyzer};
use crate::rank::{top_matches, Ranking, DEFAULT_TOP_N};
use crate::similarity::{score, SimilarityMatrix};
use crate::vectorizer::{build_vectors_with, VectorizerConfig};

pub struct MatchPipeline<A: Analyzer = EnglishAnalyzer> {
    pub analyzer: A,
    pub config: VectorizerConfig,
    pub top_n: usize,
}

impl Default for MatchPipeline<EnglishAnalyzer> {
    fn default() -> Self {
        Self { analyzer: EnglishAnalyzer, config: VectorizerConfig::default(), top_n: DEFAULT_TOP_N }
    }
}

#[derive(Debug, Clone)]
pub struct MatchReport {
    pub similarity: SimilarityMatrix,
    pub ranking: Ranking,
    pub vocabulary_size: usize,
}

impl<A: Analyzer> MatchPipeline<A> {
    pub fn new(analyzer: A, config: VectorizerConfig, top_n: usize) -> Self {
        Self { analyzer, config, top_n }
    }

    /// Normalize, fit jointly, score, and rank résumés against every job.
    pub fn run<S: AsRef<str>>(&self, jobs: &[S], cvs: &[S]) -> Result<MatchReport> {
        if self.top_n == 0 {
            return Err(MatchError::InvalidTopN(0));
        }
        let job_docs = normalize_all(jobs, &self.analyzer);
        let cv_docs = normalize_all(cvs, &self.analyzer);
        let space = build_vectors_with(&job_docs, &cv_docs, self.config.clone())?;
        let similarity = score(&space.jobs, &space.cvs)?;
        let ranking = top_matches(&similarity, self.top_n)?;
        tracing::info!(num_jobs = ranking.len(), top_n = self.top_n, "ranked resumes");
        Ok(MatchReport { similarity, ranking, vocabulary_size: space.vectorizer.vocabulary().len() })
    }
}
