use crate::types::report::RankedEntry;
use indexmap::IndexMap;

/// Occurrence counts keyed by first appearance, so ties rank in insertion order.
pub type Tally = IndexMap<String, u64>;

pub fn bump(counts: &mut Tally, key: impl Into<String>) {
    *counts.entry(key.into()).or_insert(0) += 1;
}

pub fn add(counts: &mut Tally, key: impl Into<String>, amount: u64) {
    *counts.entry(key.into()).or_insert(0) += amount;
}

pub fn tally<I, S>(keys: I) -> Tally
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts = Tally::new();
    for key in keys {
        bump(&mut counts, key);
    }
    counts
}

/// Sort by count descending and keep at most `limit` entries.
///
/// `sort_by` is stable, equal counts keep the tally's insertion order.
pub fn top_n(counts: &Tally, limit: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = counts
        .iter()
        .map(|(key, count)| RankedEntry::new(key.clone(), *count))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
#[path = "tests/ranking_tests.rs"]
mod tests;
