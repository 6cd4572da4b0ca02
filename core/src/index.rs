use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type DocId = u32;

/// Postings for one term: document -> raw occurrence count.
pub type DocFreqs = HashMap<DocId, u32>;

/// Read-only view of an inverted index.
///
/// The ranker only ever looks terms up and, when building corpus statistics,
/// walks every term once. Anything that can answer those two questions can be
/// ranked against.
pub trait TermIndex {
    /// Postings for `term`, or `None` when the term is not indexed.
    fn postings(&self, term: &str) -> Option<&DocFreqs>;

    /// Every indexed term with its postings, in no particular order.
    fn terms(&self) -> Box<dyn Iterator<Item = (&str, &DocFreqs)> + '_>;
}

/// In-memory inverted index: term -> (document -> term count).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, DocFreqs>", into = "HashMap<String, DocFreqs>")]
pub struct Index {
    postings: HashMap<String, DocFreqs>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    /// Record that `term` occurs `count` times in `doc_id`. Repeated calls for
    /// the same pair add up; a zero count is ignored.
    pub fn insert(&mut self, term: impl Into<String>, doc_id: DocId, count: u32) {
        if count == 0 { return; }
        *self.postings.entry(term.into()).or_default().entry(doc_id).or_insert(0) += count;
    }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    /// Number of distinct documents appearing in any postings list.
    pub fn num_docs(&self) -> usize {
        let mut seen: HashSet<DocId> = HashSet::new();
        for docs in self.postings.values() {
            seen.extend(docs.keys().copied());
        }
        seen.len()
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, |docs| docs.len())
    }
}

impl TermIndex for Index {
    fn postings(&self, term: &str) -> Option<&DocFreqs> {
        self.postings.get(term)
    }

    fn terms(&self) -> Box<dyn Iterator<Item = (&str, &DocFreqs)> + '_> {
        Box::new(self.postings.iter().map(|(t, docs)| (t.as_str(), docs)))
    }
}

impl From<HashMap<String, DocFreqs>> for Index {
    /// Empty postings lists and zero counts are dropped so every stored term
    /// has a positive document frequency.
    fn from(mut postings: HashMap<String, DocFreqs>) -> Self {
        postings.retain(|_, docs| {
            docs.retain(|_, count| *count > 0);
            !docs.is_empty()
        });
        Self { postings }
    }
}

impl From<Index> for HashMap<String, DocFreqs> {
    fn from(index: Index) -> Self { index.postings }
}

impl<T: Into<String>> FromIterator<(T, DocId, u32)> for Index {
    fn from_iter<It: IntoIterator<Item = (T, DocId, u32)>>(iter: It) -> Self {
        let mut index = Index::new();
        for (term, doc_id, count) in iter {
            index.insert(term, doc_id, count);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_accumulates_and_skips_zero() {
        let mut idx = Index::new();
        idx.insert("cat", 1, 2);
        idx.insert("cat", 1, 1);
        idx.insert("dog", 2, 0);
        assert_eq!(idx.postings("cat").unwrap()[&1], 3);
        assert!(idx.postings("dog").is_none());
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn num_docs_counts_distinct_ids() {
        let idx: Index = [("cat", 1, 2), ("cat", 2, 1), ("dog", 2, 3), ("eel", 7, 1)].into_iter().collect();
        assert_eq!(idx.num_docs(), 3);
        assert_eq!(idx.document_frequency("cat"), 2);
        assert_eq!(idx.document_frequency("owl"), 0);
    }

    #[test]
    fn from_map_drops_empty_postings() {
        let mut raw: HashMap<String, DocFreqs> = HashMap::new();
        raw.insert("cat".into(), HashMap::from([(1, 2), (2, 0)]));
        raw.insert("ghost".into(), HashMap::new());
        let idx = Index::from(raw);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.document_frequency("cat"), 1);
    }

    #[test]
    fn deserializes_from_plain_json_object() {
        let idx: Index = serde_json::from_str(r#"{"cat": {"1": 2, "2": 1}, "dog": {"2": 3}}"#).unwrap();
        assert_eq!(idx.num_docs(), 2);
        assert_eq!(idx.postings("dog").unwrap()[&2], 3);
    }
}
