//! Link-based deduplication

use super::types::SearchRecord;
use std::collections::HashSet;

/// Drop every record whose `link` was already seen, keeping the first.
///
/// Links are compared by exact string equality: `https://a.com` and
/// `https://a.com/` are distinct. Input order is preserved.
pub fn dedupe(records: Vec<SearchRecord>) -> Vec<SearchRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.link.clone()))
        .collect()
}
