//! Keeps the records held by the target entity.

use pickastock_common::RawRecord;

/// Keep the records whose holder name equals `target` exactly.
pub fn filter_records(records: Vec<RawRecord>, target: &str) -> Vec<RawRecord> {
    records
        .into_iter()
        .filter(|record| record.is_held_by(target))
        .collect()
}

/// Append the records of one page that match `target` to `acc`; returns how many matched.
pub fn accumulate(acc: &mut Vec<RawRecord>, page: Vec<RawRecord>, target: &str) -> usize {
    let kept = filter_records(page, target);
    let matched = kept.len();
    acc.extend(kept);
    matched
}
