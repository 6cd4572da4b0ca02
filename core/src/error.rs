use crate::DocId;

pub type Result<T> = std::result::Result<T, RankError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("unknown term weighting `{0}` (expected tf, tfidf or binary)")]
    UnknownWeighting(String),

    #[error("corpus size must be positive for tf-idf weighting")]
    ZeroCorpusSize,

    #[error("corpus size {corpus_size} is invalid: must be positive and at least the largest document frequency ({max_df})")]
    InvalidCorpusSize { corpus_size: u32, max_df: usize },

    #[error("no idf value cached for candidate term `{term}`")]
    MissingIdf { term: String },

    #[error("no document length cached for candidate document {doc_id}")]
    MissingDocumentLength { doc_id: DocId },
}

impl RankError {
    /// True for errors caused by how the ranker was set up rather than by a
    /// broken internal invariant.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            RankError::UnknownWeighting(_) | RankError::ZeroCorpusSize | RankError::InvalidCorpusSize { .. }
        )
    }
}
