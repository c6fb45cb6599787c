//! BM25 relevance scoring.
//!
//! Two pure functions: [`idf`] and [`term_score`]. Both take their inputs by
//! value so callers control memoization; this module has no state of its
//! own.

/// BM25 tuning parameters. Defaults (`k1 = 1.2`, `b = 0.75`) match the
/// literature defaults (Robertson & Zaragoza, 2009).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BM25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for BM25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

/// Inverse document frequency, Lucene variant. `n` is the number of
/// documents containing the term, `big_n` the total document count for the
/// field. Always >= 0; returns 0 when either input is 0.
pub fn idf(n: usize, big_n: usize) -> f64 {
    if big_n == 0 || n == 0 {
        return 0.0;
    }
    let n = n as f64;
    let big_n = big_n as f64;
    (1.0 + (big_n - n + 0.5) / (n + 0.5)).ln()
}

/// BM25 contribution of a single term in a single document. Returns 0 when
/// `avg_doc_len` or `tf` is 0.
pub fn term_score(tf: usize, doc_len: usize, avg_doc_len: f64, idf: f64, params: BM25Params) -> f64 {
    if avg_doc_len == 0.0 || tf == 0 {
        return 0.0;
    }
    let tf = tf as f64;
    let doc_len = doc_len as f64;
    let length_norm = 1.0 - params.b + params.b * (doc_len / avg_doc_len);
    idf * (tf * (params.k1 + 1.0)) / (tf + params.k1 * length_norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn idf_is_zero_when_corpus_or_term_is_absent() {
        check!(idf(0, 100) == 0.0);
        check!(idf(5, 0) == 0.0);
    }

    #[test]
    fn idf_is_nonnegative_and_decreases_as_df_grows() {
        let rare = idf(1, 1000);
        let common = idf(500, 1000);
        check!(rare > 0.0);
        check!(common >= 0.0);
        check!(rare > common);
    }

    #[test]
    fn term_score_is_zero_for_zero_tf_or_zero_avg_len() {
        let params = BM25Params::default();
        check!(term_score(0, 10, 5.0, 1.0, params) == 0.0);
        check!(term_score(3, 10, 0.0, 1.0, params) == 0.0);
    }

    #[test]
    fn term_score_rewards_higher_term_frequency() {
        let params = BM25Params::default();
        let low = term_score(1, 10, 10.0, 1.0, params);
        let high = term_score(5, 10, 10.0, 1.0, params);
        check!(high > low);
    }

    #[test]
    fn term_score_penalizes_documents_longer_than_average() {
        let params = BM25Params::default();
        let short_doc = term_score(2, 5, 10.0, 1.0, params);
        let long_doc = term_score(2, 20, 10.0, 1.0, params);
        check!(short_doc > long_doc);
    }

    #[test]
    fn default_params_match_documented_constants() {
        let params = BM25Params::default();
        check!(params.k1 == 1.2);
        check!(params.b == 0.75);
    }
}
