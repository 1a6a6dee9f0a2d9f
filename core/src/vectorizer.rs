use crate::error::{MatchError, Result};
use crate::vector::{DocumentMatrix, SparseVector, TermId, Vocabulary};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L2,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Tokens with fewer characters are dropped before n-grams are built
    pub min_token_len: usize,
    /// Use smoothed IDF = ln((1 + N) / (1 + df)) + 1 instead of ln(N / df) + 1
    pub smooth_idf: bool,
    /// Use tf = 1 + ln(count) instead of the raw count
    pub sublinear_tf: bool,
    pub norm: Norm,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { ngram_min: 1, ngram_max: 2, min_token_len: 2, smooth_idf: true, sublinear_tf: false, norm: Norm::L2 }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ngram_min == 0 || self.ngram_min > self.ngram_max {
            return Err(MatchError::InvalidConfig(format!(
                "ngram range ({}, {}) must satisfy 1 <= min <= max",
                self.ngram_min, self.ngram_max
            )));
        }
        Ok(())
    }
}

/// Contiguous n-grams for every n in `min..=max` over whitespace-separated tokens
/// of at least `min_token_len` characters.
pub fn ngrams(text: &str, min: usize, max: usize, min_token_len: usize) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().filter(|t| t.chars().count() >= min_token_len).collect();
    let mut out = Vec::new();
    for n in min..=max {
        if n == 0 || n > tokens.len() { continue; }
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: Vocabulary,
    idf: Vec<f32>,
    num_docs: usize,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, vocabulary: Vocabulary::default(), idf: Vec::new(), num_docs: 0 })
    }

    pub fn config(&self) -> &VectorizerConfig { &self.config }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn idf(&self) -> &[f32] { &self.idf }

    pub fn num_docs(&self) -> usize { self.num_docs }

    /// Fit vocabulary and IDF over normalized documents. Replaces any previous fit.
    pub fn fit<S: AsRef<str>>(&mut self, docs: &[S]) -> Result<()> {
        if docs.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }
        let mut df: HashMap<String, u32> = HashMap::new();
        for doc in docs {
            let mut seen_in_doc: HashSet<String> = HashSet::new();
            for gram in ngrams(doc.as_ref(), self.config.ngram_min, self.config.ngram_max, self.config.min_token_len) {
                if seen_in_doc.insert(gram.clone()) {
                    *df.entry(gram).or_insert(0) += 1;
                }
            }
        }
        if df.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let vocabulary = Vocabulary::from_terms(df.keys().cloned());
        let n = docs.len() as f32;
        let idf = vocabulary
            .terms()
            .iter()
            .map(|term| {
                let df_t = df.get(term).copied().unwrap_or(0).max(1) as f32;
                if self.config.smooth_idf { ((1.0 + n) / (1.0 + df_t)).ln() + 1.0 } else { (n / df_t).ln() + 1.0 }
            })
            .collect();

        tracing::debug!(num_docs = docs.len(), num_terms = vocabulary.len(), "fitted tf-idf vocabulary");
        self.vocabulary = vocabulary;
        self.idf = idf;
        self.num_docs = docs.len();
        Ok(())
    }

    /// Encode documents against the fitted vocabulary; unknown n-grams are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> DocumentMatrix {
        let rows = docs.iter().map(|d| self.encode(d.as_ref())).collect();
        DocumentMatrix::new(rows, self.vocabulary.len())
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, docs: &[S]) -> Result<DocumentMatrix> {
        self.fit(docs)?;
        Ok(self.transform(docs))
    }

    fn encode(&self, doc: &str) -> SparseVector {
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for gram in ngrams(doc, self.config.ngram_min, self.config.ngram_max, self.config.min_token_len) {
            if let Some(tid) = self.vocabulary.id(&gram) {
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
        }
        let pairs = tf_counts
            .into_iter()
            .map(|(tid, tf_raw)| {
                let tf = if self.config.sublinear_tf { 1.0 + (tf_raw as f32).ln() } else { tf_raw as f32 };
                (tid, tf * self.idf[tid as usize])
            })
            .collect();
        let mut vector = SparseVector::from_pairs(pairs);
        if self.config.norm == Norm::L2 {
            let norm = vector.norm();
            if norm > 0.0 { vector.scale(1.0 / norm); }
        }
        vector
    }
}

/// Job and résumé vectors from one joint fit, split at the stored job count.
#[derive(Debug, Clone)]
pub struct JointSpace {
    pub vectorizer: TfidfVectorizer,
    pub jobs: DocumentMatrix,
    pub cvs: DocumentMatrix,
    pub split: usize,
}

pub fn build_vectors<S: AsRef<str>>(job_docs: &[S], cv_docs: &[S]) -> Result<JointSpace> {
    build_vectors_with(job_docs, cv_docs, VectorizerConfig::default())
}

/// Fit one vector space over jobs followed by résumés, then split back at `job_docs.len()`.
pub fn build_vectors_with<S: AsRef<str>>(job_docs: &[S], cv_docs: &[S], config: VectorizerConfig) -> Result<JointSpace> {
    let combined: Vec<&str> = job_docs.iter().chain(cv_docs.iter()).map(|d| d.as_ref()).collect();
    let mut vectorizer = TfidfVectorizer::new(config)?;
    let matrix = vectorizer.fit_transform(&combined)?;
    let split = job_docs.len();
    let (jobs, cvs) = matrix.split_at(split);
    tracing::info!(
        num_jobs = jobs.len(),
        num_cvs = cvs.len(),
        num_features = vectorizer.vocabulary().len(),
        "built joint vector space"
    );
    Ok(JointSpace { vectorizer, jobs, cvs, split })
}
