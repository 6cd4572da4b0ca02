use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A frequency-counted query: term -> number of times it was asked for.
///
/// Terms are kept ordered so scoring walks them in the same order on every
/// call, which keeps floating point accumulation reproducible.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Query {
    terms: BTreeMap<String, u32>,
}

impl Query {
    pub fn new() -> Self { Self::default() }

    /// Count already-tokenized terms. Repeated tokens raise the count of a
    /// single entry rather than adding new ones.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut q = Query::new();
        for tok in tokens {
            q.add(tok, 1);
        }
        q
    }

    pub fn add(&mut self, term: impl Into<String>, count: u32) {
        if count == 0 { return; }
        *self.terms.entry(term.into()).or_insert(0) += count;
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn frequency(&self, term: &str) -> Option<u32> { self.terms.get(term).copied() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.terms.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Query {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut q = Query::new();
        for (term, count) in iter {
            q.add(term, count);
        }
        q
    }
}

impl From<HashMap<String, u32>> for Query {
    fn from(map: HashMap<String, u32>) -> Self { map.into_iter().collect() }
}

impl From<Query> for BTreeMap<String, u32> {
    fn from(q: Query) -> Self { q.terms }
}
