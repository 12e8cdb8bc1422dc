use super::SourceRecord;
use std::collections::HashSet;

/// Keep the first occurrence of every canonical key within one batch.
///
/// The batch is expected newest first, so the newest copy survives. Records
/// without a key are always kept. Relative order is preserved. Nothing is
/// remembered between calls.
pub fn dedup_by_canonical_key(batch: Vec<SourceRecord>) -> Vec<SourceRecord> {
    let mut seen: HashSet<String> = HashSet::with_capacity(batch.len());
    let mut kept = Vec::with_capacity(batch.len());

    for record in batch {
        if let Some(key) = record.canonical_key() {
            if !seen.insert(key.to_string()) {
                continue;
            }
        }
        kept.push(record);
    }

    kept
}
