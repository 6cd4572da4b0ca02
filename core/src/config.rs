use crate::error::{RankError, Result};
use crate::Weighting;
use serde::{Deserialize, Serialize};

/// Where the document count used in the IDF formula comes from.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusSize {
    /// Number of distinct documents in the index.
    #[default]
    Derived,
    /// A known total, for indexes that leave some documents without postings.
    Fixed(u32),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub weighting: Weighting,
    pub corpus_size: CorpusSize,
}

impl RankerConfig {
    pub fn new(weighting: Weighting) -> Self {
        Self { weighting, ..Self::default() }
    }

    pub fn with_corpus_size(mut self, corpus_size: u32) -> Self {
        self.corpus_size = CorpusSize::Fixed(corpus_size);
        self
    }

    /// Checks that do not need to look at the index. A fixed corpus size of
    /// zero only matters when IDF is actually computed.
    pub fn validate(&self) -> Result<()> {
        if self.weighting.needs_idf() && self.corpus_size == CorpusSize::Fixed(0) {
            return Err(RankError::ZeroCorpusSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_tfidf_with_derived_size() {
        let cfg = RankerConfig::default();
        assert_eq!(cfg.weighting, Weighting::TfIdf);
        assert_eq!(cfg.corpus_size, CorpusSize::Derived);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_corpus_size_only_rejected_for_tfidf() {
        assert_eq!(
            RankerConfig::new(Weighting::TfIdf).with_corpus_size(0).validate(),
            Err(RankError::ZeroCorpusSize)
        );
        assert!(RankerConfig::new(Weighting::Tf).with_corpus_size(0).validate().is_ok());
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: RankerConfig = serde_json::from_str(r#"{"weighting": "binary"}"#).unwrap();
        assert_eq!(cfg, RankerConfig::new(Weighting::Binary));
        let cfg: RankerConfig = serde_json::from_str(r#"{"corpus_size": {"fixed": 3204}}"#).unwrap();
        assert_eq!(cfg.corpus_size, CorpusSize::Fixed(3204));
        assert!(serde_json::from_str::<RankerConfig>(r#"{"weighting": "cosine"}"#).is_err());
    }
}
