use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("empty corpus: no documents or no terms to fit a vector space")]
    EmptyCorpus,

    #[error("dimension mismatch: job vectors have {jobs} features, resume vectors have {cvs}")]
    DimensionMismatch { jobs: usize, cvs: usize },

    #[error("invalid top_n {0}: must be at least 1")]
    InvalidTopN(usize),

    #[error("invalid vectorizer config: {0}")]
    InvalidConfig(String),
}
