use crate::candidates::select_candidates;
use crate::config::{CorpusSize, RankerConfig};
use crate::error::Result;
use crate::scorer::{binary_scores, tf_scores, tfidf_scores, Scores};
use crate::stats::CorpusStats;
use crate::{DocId, Query, TermIndex, Weighting};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f32,
}

/// Order scores best first. Equal scores fall back to ascending document id
/// so the output does not depend on hash map iteration order.
pub fn sort_scores(scores: Scores) -> Vec<ScoredDoc> {
    let mut scored: Vec<ScoredDoc> = scores.into_iter().map(|(doc_id, score)| ScoredDoc { doc_id, score }).collect();
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    scored
}

/// Ranks documents of a borrowed, immutable index against queries.
///
/// Corpus statistics are computed on the first query that needs them and
/// reused afterwards; concurrent first queries still compute them only once.
#[derive(Debug)]
pub struct Ranker<'a, I: ?Sized> {
    index: &'a I,
    config: RankerConfig,
    stats: CorpusStats,
}

impl<'a, I: TermIndex + ?Sized> Ranker<'a, I> {
    pub fn new(index: &'a I, config: RankerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { index, config, stats: CorpusStats::new() })
    }

    pub fn with_weighting(index: &'a I, weighting: Weighting) -> Result<Self> {
        Self::new(index, RankerConfig::new(weighting))
    }

    pub fn index(&self) -> &'a I { self.index }

    pub fn weighting(&self) -> Weighting { self.config.weighting }

    pub fn config(&self) -> &RankerConfig { &self.config }

    pub fn stats(&self) -> &CorpusStats { &self.stats }

    /// Document ids matching `query`, most relevant first.
    pub fn for_query(&self, query: &Query) -> Result<Vec<DocId>> {
        Ok(self.score(query)?.into_iter().map(|d| d.doc_id).collect())
    }

    /// Same ranking as [`Ranker::for_query`], with scores attached.
    pub fn score(&self, query: &Query) -> Result<Vec<ScoredDoc>> {
        let candidates = select_candidates(self.index, query);
        let lengths = self.stats.document_lengths(self.index);

        let scores = match self.config.weighting {
            Weighting::Tf => tf_scores(query, &candidates, lengths)?,
            Weighting::TfIdf => {
                let corpus_size = match self.config.corpus_size {
                    CorpusSize::Fixed(n) => n,
                    CorpusSize::Derived => u32::try_from(lengths.len()).unwrap_or(u32::MAX),
                };
                let idf = self.stats.idf_values(self.index, corpus_size)?;
                tfidf_scores(query, &candidates, lengths, idf)?
            }
            Weighting::Binary => binary_scores(query, &candidates, lengths)?,
        };

        let ranked = sort_scores(scores);
        tracing::trace!(
            weighting = %self.config.weighting,
            terms = query.len(),
            candidates = candidates.doc_ids.len(),
            hits = ranked.len(),
            "ranked query"
        );
        Ok(ranked)
    }

    /// Drop cached corpus statistics so the next query recomputes them.
    pub fn reset_statistics(&mut self) {
        self.stats = CorpusStats::new();
    }
}
