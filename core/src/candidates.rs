use crate::{DocFreqs, DocId, Query, TermIndex};
use std::collections::HashMap;

/// Slice of the index restricted to the terms of one query.
#[derive(Debug, Default)]
pub struct Candidates<'q, 'a> {
    /// Query term -> postings of that term. Only terms present in the index.
    pub by_term: HashMap<&'q str, &'a DocFreqs>,
    /// One entry per (matched term, document) pair.
    pub doc_ids: Vec<DocId>,
}

impl<'q, 'a> Candidates<'q, 'a> {
    pub fn is_empty(&self) -> bool { self.by_term.is_empty() }

    pub fn get(&self, term: &str) -> Option<&'a DocFreqs> { self.by_term.get(term).copied() }
}

/// Collect the postings of every query term found in `index`.
///
/// Unknown terms are skipped. Query terms are map keys and therefore distinct,
/// so no (term, document) pair is ever emitted twice.
pub fn select_candidates<'q, 'a, I>(index: &'a I, query: &'q Query) -> Candidates<'q, 'a>
where
    I: TermIndex + ?Sized,
{
    let mut out = Candidates::default();
    for (term, _) in query.iter() {
        if let Some(docs) = index.postings(term) {
            out.doc_ids.extend(docs.keys().copied());
            out.by_term.insert(term, docs);
        }
    }
    out
}
