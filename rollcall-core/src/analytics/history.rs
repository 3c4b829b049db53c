//! Date-series reconstruction.
//!
//! Raw attendance records arrive unsorted, possibly with duplicate
//! dates and malformed date strings. [`History`] normalizes them once
//! so every downstream computation can assume a clean, ascending
//! sequence of unique record days.
//!
//! Normalization rules:
//! - dates parse as `YYYY-MM-DD`; a record that fails to parse is
//!   skipped (and counted) rather than poisoning the whole run
//! - duplicate dates resolve last-write-wins, matching the upsert
//!   semantics of the stores that feed the engine
//! - days are sorted ascending; lexicographic ISO order equals
//!   chronological order, but we sort on parsed dates anyway

use crate::error::{Error, Result};
use crate::types::AttendanceRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Strict `YYYY-MM-DD` parsing for callers that must reject bad input
/// outright instead of skipping it.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// One normalized record day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    /// The record's calendar date
    pub date: NaiveDate,
    /// Ids marked present, deduplicated
    pub present: HashSet<String>,
}

impl DayRecord {
    /// Whether the given student was marked present on this day.
    pub fn is_present(&self, student_id: &str) -> bool {
        self.present.contains(student_id)
    }

    /// Raw present headcount, unknown ids included.
    pub fn present_count(&self) -> i64 {
        self.present.len() as i64
    }
}

/// A normalized attendance history: unique record days, ascending.
#[derive(Debug, Clone, Default)]
pub struct History {
    days: Vec<DayRecord>,
    skipped: usize,
}

impl History {
    /// Normalize raw records into a history.
    ///
    /// Records with malformed dates are dropped and surfaced via
    /// [`History::skipped`]; duplicates collapse last-write-wins.
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let mut by_date: BTreeMap<NaiveDate, HashSet<String>> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            match parse_date(&record.date) {
                Ok(date) => {
                    let present: HashSet<String> = record.present_ids.iter().cloned().collect();
                    by_date.insert(date, present);
                }
                Err(err) => {
                    tracing::warn!(date = %record.date, %err, "skipping record with malformed date");
                    skipped += 1;
                }
            }
        }

        let days = by_date
            .into_iter()
            .map(|(date, present)| DayRecord { date, present })
            .collect();

        Self { days, skipped }
    }

    /// Record days, ascending by date.
    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    /// Number of unique record days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when no valid records exist.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of raw records dropped for malformed dates.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The record for a specific date, if one exists.
    pub fn record_for(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days
            .binary_search_by_key(&date, |d| d.date)
            .ok()
            .map(|i| &self.days[i])
    }

    /// Record days with `from <= date <= to`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> &[DayRecord] {
        let start = self.days.partition_point(|d| d.date < from);
        let end = self.days.partition_point(|d| d.date <= to);
        &self.days[start..end]
    }

    /// Sum of raw present counts across all record days.
    pub fn total_present(&self) -> i64 {
        self.days.iter().map(DayRecord::present_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, ids: &[&str]) -> AttendanceRecord {
        AttendanceRecord {
            date: date.to_string(),
            present_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_sorts_unsorted_input() {
        let history = History::from_records(&[
            record("2024-01-03", &["S01"]),
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &[]),
        ]);
        let dates: Vec<_> = history.days().iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2024-01-01"), date("2024-01-02"), date("2024-01-03")]
        );
        assert_eq!(history.skipped(), 0);
    }

    #[test]
    fn test_duplicate_dates_last_write_wins() {
        let history = History::from_records(&[
            record("2024-01-01", &["S01", "S02"]),
            record("2024-01-01", &["S03"]),
        ]);
        assert_eq!(history.len(), 1);
        let day = history.record_for(date("2024-01-01")).unwrap();
        assert!(day.is_present("S03"));
        assert!(!day.is_present("S01"));
    }

    #[test]
    fn test_malformed_dates_skipped_and_counted() {
        let history = History::from_records(&[
            record("2024-01-01", &["S01"]),
            record("not-a-date", &["S01"]),
            record("2024-13-40", &["S01"]),
        ]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.skipped(), 2);
    }

    #[test]
    fn test_between_is_inclusive() {
        let history = History::from_records(&[
            record("2024-01-01", &[]),
            record("2024-01-05", &[]),
            record("2024-01-09", &[]),
        ]);
        let window = history.between(date("2024-01-01"), date("2024-01-05"));
        assert_eq!(window.len(), 2);
        let window = history.between(date("2024-01-02"), date("2024-01-04"));
        assert!(window.is_empty());
    }

    #[test]
    fn test_present_ids_deduplicated() {
        let history = History::from_records(&[record("2024-01-01", &["S01", "S01", "S02"])]);
        assert_eq!(history.total_present(), 2);
    }
}
