//! Ranks documents of a precomputed inverted index against frequency-counted
//! queries, using TF, TF-IDF or binary cosine similarity.

pub mod candidates;
pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod ranker;
pub mod scorer;
pub mod stats;

pub use candidates::{select_candidates, Candidates};
pub use config::{CorpusSize, RankerConfig};
pub use error::{RankError, Result};
pub use index::{DocFreqs, DocId, Index, TermIndex};
pub use query::Query;
pub use ranker::{sort_scores, Ranker, ScoredDoc};
pub use scorer::{Scores, Weighting};
pub use stats::{CorpusStats, DocumentLengths, IdfValues};
