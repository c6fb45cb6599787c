//! In-memory inverted index over preprocessed records, built once and read
//! many times.
//!
//! Three fields are indexed independently — [`Field::Desc`] (marker-stripped
//! description), [`Field::Credit`], and [`Field::IdField`] (the record id
//! itself, so exact/prefix id lookups go through the same machinery as text
//! search) — each with its own postings, document-length table, and sorted
//! vocabulary.

use crate::error::IndexError;
use crate::normalize::normalize;
use crate::search::scoring::idf;
use crate::search::tokenize::{tokenize, tokenize_credit};
use crate::types::{Field, ProcessedRecord};
use ahash::AHashMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::RwLock;

/// Doc ids and per-document term frequencies for one term, stored as two
/// parallel vectors rather than a vector of small structs.
#[derive(Debug, Clone, Default)]
pub struct Postings {
    pub doc_ids: Vec<u32>,
    pub term_freqs: Vec<u32>,
}

impl Postings {
    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }
}

const EMPTY_POSTINGS: Postings = Postings {
    doc_ids: Vec::new(),
    term_freqs: Vec::new(),
};

#[derive(Debug, Clone, Default)]
struct FieldIndex {
    postings: AHashMap<String, Postings>,
    doc_lengths: AHashMap<u32, u32>,
    total_docs: usize,
    avg_doc_length: f64,
    vocabulary: Vec<String>,
}

impl FieldIndex {
    fn index_tokens(&mut self, id: u32, tokens: &[String]) {
        let mut freqs: AHashMap<&str, u32> = AHashMap::new();
        for token in tokens {
            *freqs.entry(token.as_str()).or_insert(0) += 1;
        }
        for (term, freq) in freqs {
            let postings = self.postings.entry(term.to_string()).or_default();
            postings.doc_ids.push(id);
            postings.term_freqs.push(freq);
        }
        self.doc_lengths.insert(id, tokens.len() as u32);
        self.total_docs += 1;
    }

    fn finalize(&mut self) {
        let total_len: u64 = self.doc_lengths.values().map(|&l| u64::from(l)).sum();
        self.avg_doc_length = if self.total_docs == 0 {
            0.0
        } else {
            total_len as f64 / self.total_docs as f64
        };
        self.vocabulary = self.postings.keys().cloned().collect();
        self.vocabulary.sort();
    }

    fn get_postings(&self, term: &str) -> &Postings {
        self.postings.get(term).unwrap_or(&EMPTY_POSTINGS)
    }

    fn get_prefix_terms(&self, prefix: &str, limit: usize) -> Vec<String> {
        if self.vocabulary.is_empty() || prefix.is_empty() {
            return Vec::new();
        }
        let start = self.vocabulary.partition_point(|term| term.as_str() < prefix);
        self.vocabulary[start..]
            .iter()
            .take_while(|term| term.starts_with(prefix))
            .take(limit)
            .cloned()
            .collect()
    }
}

/// The searchable corpus: documents plus one [`FieldIndex`] per field.
///
/// Also owns the IDF memoization table used by [`crate::search::query`]'s
/// query engine: IDF is a pure function of (document frequency, total docs),
/// both frozen after [`MediaIndex::finalize`], so caching it here — rather
/// than process-globally — keeps two independently-built indices in the
/// same process from cross-contaminating each other's cached values.
#[derive(Debug, Default)]
pub struct MediaIndex {
    documents: Vec<ProcessedRecord>,
    fields: AHashMap<Field, FieldIndex>,
    credits: BTreeSet<String>,
    restrictions: BTreeSet<String>,
    idf_cache: RwLock<HashMap<(Field, String), f64>>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `rec` at slot `id` and indexes its three fields. `id` must
    /// equal the number of documents already stored (ascending from 0);
    /// anything else is rejected.
    pub fn add_document(&mut self, id: usize, rec: ProcessedRecord) -> Result<(), IndexError> {
        let expected = self.documents.len();
        if id != expected {
            return Err(IndexError::OutOfOrder { expected, got: id });
        }

        let doc_id = id as u32;
        let desc_tokens = tokenize(&rec.clean_desc);
        let credit_tokens = tokenize_credit(&rec.credit);
        let id_tokens = tokenize(&rec.id);

        self.fields
            .entry(Field::Desc)
            .or_default()
            .index_tokens(doc_id, &desc_tokens);
        self.fields
            .entry(Field::Credit)
            .or_default()
            .index_tokens(doc_id, &credit_tokens);
        self.fields
            .entry(Field::IdField)
            .or_default()
            .index_tokens(doc_id, &id_tokens);

        self.credits.insert(rec.credit.clone());
        for marker in &rec.markers {
            self.restrictions.insert(marker.clone());
        }

        self.documents.push(rec);
        Ok(())
    }

    /// Computes per-field averages and sorted vocabularies. Must be called
    /// exactly once, after every document has been added.
    pub fn finalize(&mut self) {
        for field in Field::ALL {
            self.fields.entry(field).or_default().finalize();
        }
        for field in Field::ALL {
            let index = self.fields.entry(field).or_default();
            tracing::info!(
                field = %field,
                terms = index.vocabulary.len(),
                documents = index.total_docs,
                avg_doc_length = index.avg_doc_length,
                "field index finalized"
            );
        }
    }

    pub fn get_postings(&self, term: &str, field: Field) -> &Postings {
        let normalized = normalize(term);
        self.fields
            .get(&field)
            .map(|index| index.get_postings(&normalized))
            .unwrap_or(&EMPTY_POSTINGS)
    }

    pub fn get_prefix_terms(&self, prefix: &str, field: Field, limit: usize) -> Vec<String> {
        let normalized = normalize(prefix);
        self.fields
            .get(&field)
            .map(|index| index.get_prefix_terms(&normalized, limit))
            .unwrap_or_default()
    }

    pub fn get_document(&self, id: usize) -> Option<&ProcessedRecord> {
        self.documents.get(id)
    }

    pub fn get_all_documents(&self) -> &[ProcessedRecord] {
        &self.documents
    }

    pub fn get_credits(&self) -> Vec<String> {
        self.credits.iter().cloned().collect()
    }

    pub fn get_restrictions(&self) -> Vec<String> {
        self.restrictions.iter().cloned().collect()
    }

    pub(crate) fn total_docs(&self, field: Field) -> usize {
        self.fields.get(&field).map_or(0, |index| index.total_docs)
    }

    pub(crate) fn avg_doc_length(&self, field: Field) -> f64 {
        self.fields.get(&field).map_or(0.0, |index| index.avg_doc_length)
    }

    pub(crate) fn doc_length(&self, field: Field, id: u32) -> usize {
        self.fields
            .get(&field)
            .and_then(|index| index.doc_lengths.get(&id))
            .copied()
            .unwrap_or(0) as usize
    }

    /// Looks up this `(field, term)`'s IDF in the cache, computing and
    /// storing it on a miss. Safe under concurrent readers: a race just
    /// recomputes the same pure value twice instead of observing a torn one.
    pub(crate) fn cached_idf(&self, field: Field, term: &str) -> f64 {
        let key = (field, term.to_string());
        if let Some(&value) = self
            .idf_cache
            .read()
            .expect("idf cache lock poisoned")
            .get(&key)
        {
            return value;
        }
        let n = self.get_postings(term, field).len();
        let big_n = self.total_docs(field);
        let value = idf(n, big_n);
        self.idf_cache
            .write()
            .expect("idf cache lock poisoned")
            .insert(key, value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn record(id: &str, desc: &str, credit: &str, markers: Vec<&str>) -> ProcessedRecord {
        ProcessedRecord {
            id: id.to_string(),
            desc: desc.to_string(),
            credit: credit.to_string(),
            width: 1920,
            height: 1080,
            iso_date: "2024-01-01".to_string(),
            clean_desc: desc.to_string(),
            markers: markers.into_iter().map(String::from).collect(),
            normalized_credit: normalize(credit),
        }
    }

    #[test]
    fn add_document_out_of_order_is_rejected() {
        let mut index = MediaIndex::new();
        let err = index
            .add_document(1, record("r1", "Berlin", "IMAGO", vec![]))
            .unwrap_err();
        check!(err == IndexError::OutOfOrder { expected: 0, got: 1 });
    }

    #[test]
    fn postings_and_prefix_lookup_after_finalize() {
        let mut index = MediaIndex::new();
        index
            .add_document(0, record("r0", "Berlin Portrait", "IMAGO / Muller", vec![]))
            .unwrap();
        index
            .add_document(1, record("r1", "Berlin Skyline", "IMAGO / Schmidt", vec![]))
            .unwrap();
        index.finalize();

        let postings = index.get_postings("berlin", Field::Desc);
        check!(postings.doc_ids == vec![0, 1]);

        let prefix = index.get_prefix_terms("ber", Field::Desc, 10);
        check!(prefix == vec!["berlin".to_string()]);
    }

    #[test]
    fn credits_and_restrictions_are_collected_and_sorted() {
        let mut index = MediaIndex::new();
        index
            .add_document(0, record("r0", "Berlin", "Zebra Agency", vec!["NOxMODELxRELEASE"]))
            .unwrap();
        index
            .add_document(1, record("r1", "Munich", "Agentur Koeln", vec!["PUBLICATIONxINxGERxONLY"]))
            .unwrap();
        index.finalize();

        check!(index.get_credits() == vec!["Agentur Koeln".to_string(), "Zebra Agency".to_string()]);
        check!(
            index.get_restrictions()
                == vec![
                    "NOxMODELxRELEASE".to_string(),
                    "PUBLICATIONxINxGERxONLY".to_string(),
                ]
        );
    }

    #[test]
    fn empty_prefix_or_vocabulary_returns_empty() {
        let index = MediaIndex::new();
        check!(index.get_prefix_terms("ber", Field::Desc, 10).is_empty());

        let mut non_empty = MediaIndex::new();
        non_empty
            .add_document(0, record("r0", "Berlin", "IMAGO", vec![]))
            .unwrap();
        non_empty.finalize();
        check!(non_empty.get_prefix_terms("", Field::Desc, 10).is_empty());
    }
}
