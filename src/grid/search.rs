use crate::core::{
    utils::text_matches_search,
    TermRecord,
};

/// Full-row match: every field of the record, rendered as text, is a candidate.
/// `query` must already be lower-cased.
pub fn matches_search(record: &TermRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    text_matches_search(&record.content, query)
        || text_matches_search(&record.forgot_counter.to_string(), query)
        || text_matches_search(&record.sdate.to_string(), query)
        || text_matches_search(&record.ndate.to_string(), query)
        || text_matches_search(&record.status, query)
        || text_matches_search(&record.fdate.to_string(), query)
}
