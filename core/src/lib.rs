pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod rank;
pub mod similarity;
pub mod vector;
pub mod vectorizer;

pub use error::{MatchError, Result};
pub use normalizer::{normalize, normalize_with, Analyzer, EnglishAnalyzer};
pub use pipeline::{MatchPipeline, MatchReport};
pub use rank::{top_matches, JobId, Ranking, DEFAULT_TOP_N};
pub use similarity::{score, SimilarityMatrix};
pub use vector::{DocumentMatrix, SparseVector, TermId, Vocabulary};
pub use vectorizer::{build_vectors, build_vectors_with, JointSpace, TfidfVectorizer, VectorizerConfig};
