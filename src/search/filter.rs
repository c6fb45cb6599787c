//! Filtering and sort-order overrides applied to a ranked result set, after
//! scoring and before any pagination the caller performs.

use crate::search::query::SearchResult;

/// AND-across-categories filter. Each `Some` field narrows the result set;
/// `None` fields are not applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultFilter {
    pub credit: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub restrictions: Option<Vec<String>>,
}

/// Sort-order override. `Ranked` means "keep whatever `search` produced" —
/// it is also the unrequested default, so an empty query with no explicit
/// override still falls back to `Desc` (see [`apply`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ranked,
    Asc,
    Desc,
}

impl ResultFilter {
    fn matches(&self, result: &SearchResult) -> bool {
        if let Some(credit) = &self.credit {
            if &result.record.credit != credit {
                return false;
            }
        }
        if let Some(date_from) = &self.date_from {
            if result.record.iso_date.is_empty() || &result.record.iso_date < date_from {
                return false;
            }
        }
        if let Some(date_to) = &self.date_to {
            if result.record.iso_date.is_empty() || &result.record.iso_date > date_to {
                return false;
            }
        }
        if let Some(restrictions) = &self.restrictions {
            let wants_none = restrictions.iter().any(|r| r == "none");
            let named: Vec<&String> = restrictions.iter().filter(|r| r.as_str() != "none").collect();
            let is_unrestricted = result.record.markers.is_empty();
            let matches_named = named
                .iter()
                .any(|r| result.record.markers.iter().any(|m| m == *r));
            if !((wants_none && is_unrestricted) || matches_named) {
                return false;
            }
        }
        true
    }
}

/// Applies `filter` (if any) and then `sort` to `results`, which is assumed
/// to already be in BM25-ranked order as produced by
/// [`crate::search::MediaIndex::search`].
///
/// `query_was_empty` decides the default when `sort` is [`SortOrder::Ranked`]:
/// an empty query with no explicit sort defaults to [`SortOrder::Desc`];
/// otherwise the ranked order from `search` is preserved.
pub fn apply(
    mut results: Vec<SearchResult>,
    filter: Option<&ResultFilter>,
    sort: SortOrder,
    query_was_empty: bool,
) -> Vec<SearchResult> {
    if let Some(filter) = filter {
        results.retain(|r| filter.matches(r));
    }

    let effective_sort = if sort == SortOrder::Ranked && query_was_empty {
        SortOrder::Desc
    } else {
        sort
    };

    match effective_sort {
        SortOrder::Ranked => {}
        SortOrder::Asc => results.sort_by(|a, b| a.record.iso_date.cmp(&b.record.iso_date)),
        SortOrder::Desc => results.sort_by(|a, b| b.record.iso_date.cmp(&a.record.iso_date)),
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProcessedRecord;
    use assert2::check;

    fn result(id: usize, credit: &str, iso_date: &str, markers: Vec<&str>) -> SearchResult {
        SearchResult {
            id,
            record: ProcessedRecord {
                id: format!("r{id}"),
                desc: "desc".to_string(),
                credit: credit.to_string(),
                width: 1920,
                height: 1080,
                iso_date: iso_date.to_string(),
                clean_desc: "desc".to_string(),
                markers: markers.into_iter().map(String::from).collect(),
                normalized_credit: credit.to_lowercase(),
            },
            score: 0.0,
            matched_terms: Vec::new(),
        }
    }

    #[test]
    fn credit_filter_keeps_only_exact_matches() {
        let results = vec![
            result(0, "Agency A", "2024-01-01", vec![]),
            result(1, "Agency B", "2024-01-01", vec![]),
        ];
        let filter = ResultFilter {
            credit: Some("Agency A".to_string()),
            ..Default::default()
        };
        let filtered = apply(results, Some(&filter), SortOrder::Ranked, false);
        check!(filtered.len() == 1);
        check!(filtered[0].id == 0);
    }

    #[test]
    fn date_range_filter_is_inclusive_on_both_ends() {
        let results = vec![
            result(0, "A", "2024-01-01", vec![]),
            result(1, "A", "2024-06-01", vec![]),
            result(2, "A", "2024-12-31", vec![]),
        ];
        let filter = ResultFilter {
            date_from: Some("2024-01-01".to_string()),
            date_to: Some("2024-06-01".to_string()),
            ..Default::default()
        };
        let filtered = apply(results, Some(&filter), SortOrder::Ranked, false);
        check!(filtered.len() == 2);
    }

    #[test]
    fn restriction_filter_none_sentinel_keeps_unrestricted_records() {
        let results = vec![
            result(0, "A", "2024-01-01", vec![]),
            result(1, "A", "2024-01-01", vec!["NOxMODELxRELEASE"]),
        ];
        let filter = ResultFilter {
            restrictions: Some(vec!["none".to_string()]),
            ..Default::default()
        };
        let filtered = apply(results, Some(&filter), SortOrder::Ranked, false);
        check!(filtered.len() == 1);
        check!(filtered[0].id == 0);
    }

    #[test]
    fn restriction_filter_named_marker_uses_or_semantics() {
        let results = vec![
            result(0, "A", "2024-01-01", vec!["NOxMODELxRELEASE"]),
            result(1, "A", "2024-01-01", vec!["PUBLICATIONxINxGERxONLY"]),
            result(2, "A", "2024-01-01", vec![]),
        ];
        let filter = ResultFilter {
            restrictions: Some(vec!["NOxMODELxRELEASE".to_string(), "none".to_string()]),
            ..Default::default()
        };
        let filtered = apply(results, Some(&filter), SortOrder::Ranked, false);
        let mut ids: Vec<usize> = filtered.iter().map(|r| r.id).collect();
        ids.sort();
        check!(ids == vec![0, 2]);
    }

    #[test]
    fn empty_query_with_no_explicit_sort_defaults_to_descending_date() {
        let results = vec![
            result(0, "A", "2024-01-01", vec![]),
            result(1, "A", "2024-06-01", vec![]),
        ];
        let sorted = apply(results, None, SortOrder::Ranked, true);
        check!(sorted[0].record.iso_date == "2024-06-01");
    }

    #[test]
    fn nonempty_query_with_no_explicit_sort_preserves_ranked_order() {
        let results = vec![
            result(0, "A", "2024-01-01", vec![]),
            result(1, "A", "2024-06-01", vec![]),
        ];
        let sorted = apply(results, None, SortOrder::Ranked, false);
        check!(sorted[0].id == 0);
        check!(sorted[1].id == 1);
    }

    #[test]
    fn explicit_ascending_sort_overrides_ranked_order() {
        let results = vec![
            result(0, "A", "2024-06-01", vec![]),
            result(1, "A", "2024-01-01", vec![]),
        ];
        let sorted = apply(results, None, SortOrder::Asc, false);
        check!(sorted[0].record.iso_date == "2024-01-01");
    }
}
