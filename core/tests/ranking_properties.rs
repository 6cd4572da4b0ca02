use proptest::prelude::*;
use ranker::{select_candidates, Index, Query, Ranker, RankerConfig, Weighting};
use std::collections::{HashMap, HashSet};

const VOCAB: &[&str] = &["alpha", "beta", "gamma", "delta", "eps", "zeta", "eta", "theta"];

fn arb_index() -> impl Strategy<Value = Index> {
    prop::collection::vec((0..VOCAB.len(), 0u32..20, 1u32..6), 0..60)
        .prop_map(|postings| postings.into_iter().map(|(t, d, c)| (VOCAB[t], d, c)).collect::<Index>())
}

fn arb_query() -> impl Strategy<Value = Query> {
    // a few out-of-vocabulary terms too
    prop::collection::vec(prop::sample::select(vec!["alpha", "beta", "gamma", "eta", "nope", "zip"]), 0..6)
        .prop_map(|tokens| Query::from_tokens(tokens))
}

fn arb_weighting() -> impl Strategy<Value = Weighting> {
    prop::sample::select(Weighting::ALL.to_vec())
}

proptest! {
    #[test]
    fn results_are_candidates(idx in arb_index(), q in arb_query(), w in arb_weighting()) {
        let ranker = Ranker::new(&idx, RankerConfig::new(w)).unwrap();
        let candidates: HashSet<u32> = select_candidates(&idx, &q).doc_ids.into_iter().collect();
        let ids = ranker.for_query(&q).unwrap();
        let unique: HashSet<u32> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());
        for id in ids {
            prop_assert!(candidates.contains(&id));
        }
    }

    #[test]
    fn results_are_sorted_by_descending_score(idx in arb_index(), q in arb_query(), w in arb_weighting()) {
        let ranker = Ranker::new(&idx, RankerConfig::new(w)).unwrap();
        let hits = ranker.score(&q).unwrap();
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].doc_id < pair[1].doc_id);
            }
        }
        for h in &hits {
            prop_assert!(h.score > 0.0);
        }
    }

    #[test]
    fn binary_matches_are_bounded_by_query_terms(idx in arb_index(), q in arb_query()) {
        let ranker = Ranker::new(&idx, RankerConfig::new(Weighting::Binary)).unwrap();
        let candidates = select_candidates(&idx, &q);
        let mut matched: HashMap<u32, usize> = HashMap::new();
        for id in &candidates.doc_ids {
            *matched.entry(*id).or_insert(0) += 1;
        }
        for id in ranker.for_query(&q).unwrap() {
            let m = matched[&id];
            prop_assert!(m > 0 && m <= q.len());
        }
    }

    #[test]
    fn tf_and_binary_return_every_candidate(idx in arb_index(), q in arb_query()) {
        let candidates: HashSet<u32> = select_candidates(&idx, &q).doc_ids.into_iter().collect();
        for w in [Weighting::Tf, Weighting::Binary] {
            let ranker = Ranker::new(&idx, RankerConfig::new(w)).unwrap();
            let ids: HashSet<u32> = ranker.for_query(&q).unwrap().into_iter().collect();
            prop_assert_eq!(&ids, &candidates);
        }
    }

    #[test]
    fn queries_are_idempotent(idx in arb_index(), q in arb_query(), w in arb_weighting()) {
        let ranker = Ranker::new(&idx, RankerConfig::new(w)).unwrap();
        prop_assert_eq!(ranker.score(&q).unwrap(), ranker.score(&q).unwrap());
    }
}
