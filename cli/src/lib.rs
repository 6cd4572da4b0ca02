use anyhow::{Context, Result};
use ranker::{DocId, Index, Query, Ranker, RankerConfig, ScoredDoc, Weighting};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Environment variable consulted when `--weighting` is not given.
pub const WEIGHTING_ENV: &str = "RANKER_WEIGHTING";

/// A query as written in the queries file: either pre-counted terms or a
/// line of text that is split on whitespace and counted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QueryInput {
    Counts(HashMap<String, u32>),
    Text(String),
}

impl From<QueryInput> for Query {
    fn from(input: QueryInput) -> Self {
        match input {
            QueryInput::Counts(map) => Query::from(map),
            QueryInput::Text(text) => Query::from_tokens(text.split_whitespace()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankOptions {
    pub weighting: Option<String>,
    pub corpus_size: Option<u32>,
    pub limit: Option<usize>,
    pub scores: bool,
}

impl RankOptions {
    /// Build the ranker configuration, falling back to `RANKER_WEIGHTING` and
    /// then to the library default. Unknown names are rejected.
    pub fn config(&self) -> Result<RankerConfig> {
        let name = self.weighting.clone().or_else(|| std::env::var(WEIGHTING_ENV).ok());
        let weighting = match name {
            Some(n) => n.parse::<Weighting>()?,
            None => Weighting::default(),
        };
        let mut config = RankerConfig::new(weighting);
        if let Some(n) = self.corpus_size {
            config = config.with_corpus_size(n);
        }
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Hits {
    Ids(Vec<DocId>),
    Scored(Vec<ScoredDoc>),
}

#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub results: Hits,
}

pub fn load_index(path: &Path) -> Result<Index> {
    let f = File::open(path).with_context(|| format!("opening index {}", path.display()))?;
    let index: Index = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing index {}", path.display()))?;
    Ok(index)
}

/// Load queries keyed by id, ordered numerically where ids are numbers and
/// lexically otherwise.
pub fn load_queries(path: &Path) -> Result<Vec<(String, Query)>> {
    let f = File::open(path).with_context(|| format!("opening queries {}", path.display()))?;
    let raw: HashMap<String, QueryInput> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing queries {}", path.display()))?;
    let mut queries: Vec<(String, Query)> = raw.into_iter().map(|(id, q)| (id, q.into())).collect();
    queries.sort_by(|a, b| query_order(&a.0).cmp(&query_order(&b.0)));
    Ok(queries)
}

fn query_order(id: &str) -> (u8, u64, &str) {
    match id.parse::<u64>() {
        Ok(n) => (0, n, id),
        Err(_) => (1, 0, id),
    }
}

pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let f = File::create(path).with_context(|| format!("creating output {}", path.display()))?;
    Ok(BufWriter::new(f))
}

/// Rank every query and write one JSON object per line. Returns the number of
/// queries processed.
pub fn run_rank<W: Write>(index: &Index, queries: &[(String, Query)], opts: &RankOptions, mut out: W) -> Result<usize> {
    let config = opts.config()?;
    let ranker = Ranker::new(index, config)?;
    tracing::info!(weighting = %ranker.weighting(), terms = index.len(), queries = queries.len(), "ranking queries");

    for (id, query) in queries {
        let mut hits = ranker.score(query).with_context(|| format!("ranking query {id}"))?;
        if let Some(k) = opts.limit {
            hits.truncate(k);
        }
        let results = if opts.scores {
            Hits::Scored(hits)
        } else {
            Hits::Ids(hits.into_iter().map(|h| h.doc_id).collect())
        };
        serde_json::to_writer(&mut out, &QueryResult { query: id.clone(), results })?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(queries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_queries_are_split_and_counted() {
        let q: Query = serde_json::from_str::<QueryInput>(r#""cat dog  cat""#).unwrap().into();
        assert_eq!(q.frequency("cat"), Some(2));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn numeric_ids_sort_numerically() {
        let mut ids = vec!["10", "2", "b", "1", "a"];
        ids.sort_by(|a, b| query_order(a).cmp(&query_order(b)));
        assert_eq!(ids, vec!["1", "2", "10", "a", "b"]);
    }

    #[test]
    fn explicit_weighting_wins_and_unknown_is_rejected() {
        let opts = RankOptions { weighting: Some("binary".into()), corpus_size: Some(10), ..Default::default() };
        let cfg = opts.config().unwrap();
        assert_eq!(cfg.weighting, Weighting::Binary);
        assert_eq!(cfg.corpus_size, ranker::CorpusSize::Fixed(10));

        let opts = RankOptions { weighting: Some("bm25".into()), ..Default::default() };
        assert!(opts.config().is_err());
    }
}
