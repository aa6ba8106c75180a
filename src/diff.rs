//! Merging two perft breakdowns into a comparison report.

use std::collections::BTreeMap;

use crate::engine::NodeCountResult;

/// Counts for one move from both sides. At least one side is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonEntry {
    pub subject: Option<u64>,
    pub oracle: Option<u64>,
}

/// How one move compares across the two engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Match,
    Mismatch,
    /// Only the oracle generated this move
    MissingInSubject,
    /// Only the subject generated this move
    MissingInOracle,
}

impl ComparisonEntry {
    #[must_use]
    pub fn status(&self) -> EntryStatus {
        match (self.subject, self.oracle) {
            (Some(s), Some(o)) if s == o => EntryStatus::Match,
            (Some(_), Some(_)) => EntryStatus::Mismatch,
            (None, _) => EntryStatus::MissingInSubject,
            (Some(_), None) => EntryStatus::MissingInOracle,
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool {
        self.status() == EntryStatus::Match
    }
}

/// Result of comparing one subject query against one oracle query.
///
/// Entries are ordered by ascending move string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    pub entries: BTreeMap<String, ComparisonEntry>,
    pub subject_total: u64,
    pub oracle_total: u64,
}

impl ComparisonReport {
    /// Whether the two totals agree, independent of the per-move entries.
    #[must_use]
    pub fn totals_match(&self) -> bool {
        self.subject_total == self.oracle_total
    }

    /// Entries that are not an exact match, in report order.
    pub fn mismatches(&self) -> impl Iterator<Item = (&str, &ComparisonEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_match())
            .map(|(mv, entry)| (mv.as_str(), entry))
    }

    /// First move (in report order) whose entry differs.
    #[must_use]
    pub fn first_divergence(&self) -> Option<(&str, EntryStatus)> {
        self.mismatches().next().map(|(mv, entry)| (mv, entry.status()))
    }

    /// Every entry matches and the totals agree.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.totals_match() && self.first_divergence().is_none()
    }

    #[must_use]
    pub fn count(&self, status: EntryStatus) -> usize {
        self.entries.values().filter(|e| e.status() == status).count()
    }
}

/// Merge the two breakdowns. Every move reported by either side gets an entry.
#[must_use]
pub fn compare(subject: &NodeCountResult, oracle: &NodeCountResult) -> ComparisonReport {
    let mut entries: BTreeMap<String, ComparisonEntry> = BTreeMap::new();

    for (mv, &count) in &subject.per_move {
        entries
            .entry(mv.clone())
            .or_insert(ComparisonEntry {
                subject: None,
                oracle: None,
            })
            .subject = Some(count);
    }
    for (mv, &count) in &oracle.per_move {
        entries
            .entry(mv.clone())
            .or_insert(ComparisonEntry {
                subject: None,
                oracle: None,
            })
            .oracle = Some(count);
    }

    ComparisonReport {
        entries,
        subject_total: subject.total,
        oracle_total: oracle.total,
    }
}
