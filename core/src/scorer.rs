//! Cosine-style similarity under the three supported term weightings.
//!
//! Every scheme divides an accumulated relevance signal by the square root of
//! the document's squared norm. The query norm is left out: it is the same for
//! every document of a query and does not change the ranking.

use crate::candidates::Candidates;
use crate::error::{RankError, Result};
use crate::stats::{DocumentLengths, IdfValues};
use crate::{DocId, Query};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub type Scores = HashMap<DocId, f32>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Weighting {
    /// Raw term counts.
    Tf,
    /// Raw term counts scaled by inverse document frequency. Used when no
    /// weighting is configured.
    #[default]
    TfIdf,
    /// Fraction of distinct query terms the document contains.
    Binary,
}

impl Weighting {
    pub const ALL: [Weighting; 3] = [Weighting::Tf, Weighting::TfIdf, Weighting::Binary];

    pub fn as_str(self) -> &'static str {
        match self {
            Weighting::Tf => "tf",
            Weighting::TfIdf => "tfidf",
            Weighting::Binary => "binary",
        }
    }

    pub fn needs_idf(self) -> bool { matches!(self, Weighting::TfIdf) }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Weighting {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tf" => Ok(Weighting::Tf),
            "tfidf" | "tf-idf" | "tf_idf" => Ok(Weighting::TfIdf),
            "binary" => Ok(Weighting::Binary),
            _ => Err(RankError::UnknownWeighting(s.to_string())),
        }
    }
}

impl TryFrom<String> for Weighting {
    type Error = RankError;

    fn try_from(s: String) -> Result<Self> { s.parse() }
}

/// Sum `weight(term) * query_tf * doc_tf` per document over all matched terms.
fn accumulate<F>(query: &Query, candidates: &Candidates<'_, '_>, mut weight: F) -> Result<Scores>
where
    F: FnMut(&str) -> Result<f32>,
{
    let mut sums = Scores::new();
    for (term, q_tf) in query.iter() {
        let Some(docs) = candidates.get(term) else { continue };
        let w = weight(term)?;
        for (&doc_id, &d_tf) in docs {
            *sums.entry(doc_id).or_insert(0.0) += q_tf as f32 * d_tf as f32 * w;
        }
    }
    Ok(sums)
}

/// Divide each numerator by the document's norm, dropping documents whose
/// numerator did not come out positive.
fn normalize(numerators: Scores, lengths: &DocumentLengths) -> Result<Scores> {
    let mut scores = Scores::with_capacity(numerators.len());
    for (doc_id, num) in numerators {
        if num <= 0.0 { continue; }
        let len = lengths.get(&doc_id).copied().ok_or_else(|| missing_length(doc_id))?;
        scores.insert(doc_id, num / (len as f32).sqrt());
    }
    Ok(scores)
}

fn missing_length(doc_id: DocId) -> RankError {
    tracing::error!(doc_id, "candidate document has no cached length");
    RankError::MissingDocumentLength { doc_id }
}

pub fn tf_scores(query: &Query, candidates: &Candidates<'_, '_>, lengths: &DocumentLengths) -> Result<Scores> {
    let numerators = accumulate(query, candidates, |_| Ok(1.0))?;
    normalize(numerators, lengths)
}

/// Like [`tf_scores`] with each term's contribution scaled by its idf.
///
/// A term found in every document has an idf of zero. Documents matched only
/// by such terms get no positive numerator and are left out of the result
/// rather than returned with a score of zero.
pub fn tfidf_scores(
    query: &Query,
    candidates: &Candidates<'_, '_>,
    lengths: &DocumentLengths,
    idf: &IdfValues,
) -> Result<Scores> {
    let numerators = accumulate(query, candidates, |term| {
        idf.get(term).copied().ok_or_else(|| {
            tracing::error!(term, "candidate term has no cached idf value");
            RankError::MissingIdf { term: term.to_string() }
        })
    })?;
    normalize(numerators, lengths)
}

/// Ignores counts: a document scores by how many distinct query terms it
/// contains, relative to the number of distinct terms in the query.
pub fn binary_scores(query: &Query, candidates: &Candidates<'_, '_>, lengths: &DocumentLengths) -> Result<Scores> {
    let mut matched: HashMap<DocId, u32> = HashMap::new();
    for &doc_id in &candidates.doc_ids {
        *matched.entry(doc_id).or_insert(0) += 1;
    }
    let total = query.len() as f32;
    let mut scores = Scores::with_capacity(matched.len());
    for (doc_id, hits) in matched {
        let len = lengths.get(&doc_id).copied().ok_or_else(|| missing_length(doc_id))?;
        scores.insert(doc_id, (hits as f32 / total) / (len as f32).sqrt());
    }
    Ok(scores)
}
