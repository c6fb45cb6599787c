//! The query engine: tokenizes a query string, scores candidate documents
//! with BM25 across all three fields (with prefix expansion), and returns a
//! ranked result set. Lives as an `impl MediaIndex` block so the IDF cache
//! ([`MediaIndex::cached_idf`]) stays index-owned, per the memoization note
//! in the concurrency model.

use crate::search::index::MediaIndex;
use crate::search::scoring::{term_score, BM25Params};
use crate::search::tokenize::tokenize;
use crate::types::{Field, ProcessedRecord};
use std::collections::BTreeMap;

/// Search-time knobs. Defaults match the literature/production defaults
/// documented alongside [`BM25Params`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryConfig {
    pub k1: f64,
    pub b: f64,
    pub desc_weight: f64,
    pub credit_weight: f64,
    pub id_weight: f64,
    pub min_prefix_length: usize,
    pub max_prefix_expansion: usize,
    pub prefix_penalty: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            k1: 1.2,
            b: 0.75,
            desc_weight: 3.0,
            credit_weight: 1.5,
            id_weight: 1.0,
            min_prefix_length: 3,
            max_prefix_expansion: 50,
            prefix_penalty: 0.8,
        }
    }
}

impl QueryConfig {
    pub fn with_k1(mut self, k1: f64) -> Self {
        self.k1 = k1;
        self
    }

    pub fn with_b(mut self, b: f64) -> Self {
        self.b = b;
        self
    }

    pub fn with_desc_weight(mut self, weight: f64) -> Self {
        self.desc_weight = weight;
        self
    }

    pub fn with_credit_weight(mut self, weight: f64) -> Self {
        self.credit_weight = weight;
        self
    }

    pub fn with_id_weight(mut self, weight: f64) -> Self {
        self.id_weight = weight;
        self
    }

    pub fn with_min_prefix_length(mut self, len: usize) -> Self {
        self.min_prefix_length = len;
        self
    }

    pub fn with_max_prefix_expansion(mut self, max: usize) -> Self {
        self.max_prefix_expansion = max;
        self
    }

    pub fn with_prefix_penalty(mut self, penalty: f64) -> Self {
        self.prefix_penalty = penalty;
        self
    }

    fn bm25_params(&self) -> BM25Params {
        BM25Params {
            k1: self.k1,
            b: self.b,
        }
    }

    fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Desc => self.desc_weight,
            Field::Credit => self.credit_weight,
            Field::IdField => self.id_weight,
        }
    }
}

/// A single scored document.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: usize,
    pub record: ProcessedRecord,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

#[derive(Default, Debug)]
struct Accumulator {
    score: f64,
    matched_terms: Vec<String>,
}

impl MediaIndex {
    fn score_field_exact(
        &self,
        field: Field,
        term: &str,
        config: &QueryConfig,
        penalty: f64,
        acc: &mut BTreeMap<usize, Accumulator>,
        matched_label: &str,
    ) {
        let idf_value = self.cached_idf(field, term);
        if idf_value == 0.0 {
            return;
        }
        let postings = self.get_postings(term, field);
        let avg_len = self.avg_doc_length(field);
        let params = config.bm25_params();
        let weight = config.weight(field) * penalty;

        for (doc_id, tf) in postings.doc_ids.iter().zip(postings.term_freqs.iter()) {
            let doc_len = self.doc_length(field, *doc_id);
            let score = term_score(*tf as usize, doc_len, avg_len, idf_value, params) * weight;
            let entry = acc.entry(*doc_id as usize).or_default();
            entry.score += score;
            entry.matched_terms.push(matched_label.to_string());
        }
    }

    /// Runs the full query pipeline: tokenize, score (exact + prefix
    /// expansion) across all three fields, accumulate, and sort.
    ///
    /// An empty query (after tokenization) returns every document at score
    /// 0 in document-id order — browse mode.
    ///
    /// Deterministic across repeated calls: the accumulator is a `BTreeMap`
    /// (ascending doc-id iteration, unlike `HashMap`'s per-call randomized
    /// order), and the final sort breaks score/date ties on doc id, so two
    /// documents with identical score and `iso_date` always come back in
    /// the same relative order.
    pub fn search(&self, query: &str, config: &QueryConfig) -> Vec<SearchResult> {
        let tokens = tokenize(query);

        if tokens.is_empty() {
            return self
                .get_all_documents()
                .iter()
                .enumerate()
                .map(|(id, record)| SearchResult {
                    id,
                    record: record.clone(),
                    score: 0.0,
                    matched_terms: Vec::new(),
                })
                .collect();
        }

        let mut acc: BTreeMap<usize, Accumulator> = BTreeMap::new();

        for token in &tokens {
            for field in Field::ALL {
                self.score_field_exact(field, token, config, 1.0, &mut acc, token);

                if token.len() >= config.min_prefix_length {
                    let expansions = self.get_prefix_terms(token, field, config.max_prefix_expansion);
                    for expanded in expansions {
                        if &expanded == token {
                            continue;
                        }
                        self.score_field_exact(
                            field,
                            &expanded,
                            config,
                            config.prefix_penalty,
                            &mut acc,
                            &expanded,
                        );
                    }
                }
            }
        }

        let mut results: Vec<SearchResult> = acc
            .into_iter()
            .filter_map(|(id, entry)| {
                self.get_document(id).map(|record| SearchResult {
                    id,
                    record: record.clone(),
                    score: entry.score,
                    matched_terms: dedup_preserving_order(entry.matched_terms),
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.record.iso_date.cmp(&a.record.iso_date))
                .then_with(|| a.id.cmp(&b.id))
        });

        results
    }
}

fn dedup_preserving_order(terms: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    terms.into_iter().filter(|t| seen.insert(t.clone())).collect()
}
