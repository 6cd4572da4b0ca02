//! Corpus-wide statistics shared by every query against one index.
//!
//! Both tables depend only on the index, so they are computed on first use
//! and then read without locking for the rest of the ranker's life.

use crate::error::{RankError, Result};
use crate::{DocId, TermIndex};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Document -> squared L2 norm of its raw term-count vector.
pub type DocumentLengths = HashMap<DocId, u64>;

/// Term -> ln(corpus size / document frequency).
pub type IdfValues = HashMap<String, f32>;

pub fn document_lengths<I: TermIndex + ?Sized>(index: &I) -> DocumentLengths {
    let mut lengths = DocumentLengths::new();
    for (_, docs) in index.terms() {
        for (&doc_id, &count) in docs {
            let c = count as u64;
            // a single square always fits in u64; the running sum may not
            let len = lengths.entry(doc_id).or_insert(0);
            *len = len.saturating_add(c * c);
        }
    }
    lengths
}

/// IDF for every indexed term.
///
/// Fails when `corpus_size` is zero or smaller than a term's document
/// frequency; either would make the logarithm undefined or negative.
pub fn idf_values<I: TermIndex + ?Sized>(index: &I, corpus_size: u32) -> Result<IdfValues> {
    let mut postings: Vec<(&str, usize)> = Vec::new();
    let mut max_df = 0usize;
    for (term, docs) in index.terms() {
        max_df = max_df.max(docs.len());
        postings.push((term, docs.len()));
    }
    if (corpus_size as usize) < max_df {
        return Err(RankError::InvalidCorpusSize { corpus_size, max_df });
    }

    let n = corpus_size as f32;
    let mut idf = IdfValues::with_capacity(postings.len());
    for (term, df) in postings {
        if df == 0 { continue; }
        idf.insert(term.to_string(), (n / df as f32).ln());
    }
    Ok(idf)
}

/// Lazily built statistics for one index.
#[derive(Debug, Default)]
pub struct CorpusStats {
    lengths: OnceLock<DocumentLengths>,
    idf: OnceLock<Result<IdfValues>>,
}

impl CorpusStats {
    pub fn new() -> Self { Self::default() }

    pub fn document_lengths<I: TermIndex + ?Sized>(&self, index: &I) -> &DocumentLengths {
        self.lengths.get_or_init(|| {
            let lengths = document_lengths(index);
            tracing::debug!(num_docs = lengths.len(), "computed document lengths");
            lengths
        })
    }

    /// IDF table, computed against `corpus_size` the first time it is asked
    /// for. Later calls return the cached table (or cached error) regardless
    /// of the size passed.
    pub fn idf_values<I: TermIndex + ?Sized>(&self, index: &I, corpus_size: u32) -> Result<&IdfValues> {
        self.idf
            .get_or_init(|| {
                let idf = idf_values(index, corpus_size);
                match &idf {
                    Ok(values) => tracing::debug!(num_terms = values.len(), corpus_size, "computed idf values"),
                    Err(err) => tracing::warn!(%err, "idf computation failed"),
                }
                idf
            })
            .as_ref()
            .map_err(|e| e.clone())
    }

    pub fn has_document_lengths(&self) -> bool { self.lengths.get().is_some() }

    pub fn has_idf_values(&self) -> bool { self.idf.get().is_some() }
}
