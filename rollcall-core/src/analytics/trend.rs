//! Daily attendance trend series.

use super::history::History;
use crate::types::TrendPoint;

/// Map the last `window` record days to trend points.
///
/// Only existing records are emitted; days without a record get no
/// synthesized zero-row. Absent counts floor at zero so unknown ids in
/// a record never produce a negative value.
pub fn daily_trend(history: &History, roster_size: usize, window: usize) -> Vec<TrendPoint> {
    let days = history.days();
    let start = days.len().saturating_sub(window);
    days[start..]
        .iter()
        .map(|day| {
            let present = day.present_count();
            TrendPoint {
                date: day.date.to_string(),
                present_count: present,
                absent_count: (roster_size as i64 - present).max(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttendanceRecord;

    fn record(date: &str, ids: &[&str]) -> AttendanceRecord {
        AttendanceRecord {
            date: date.to_string(),
            present_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_trend_takes_last_window() {
        let history = History::from_records(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &[]),
            record("2024-01-05", &["S01", "S02"]),
        ]);
        let points = daily_trend(&history, 2, 2);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, "2024-01-02");
        assert_eq!(points[0].present_count, 0);
        assert_eq!(points[0].absent_count, 2);
        assert_eq!(points[1].date, "2024-01-05");
        assert_eq!(points[1].absent_count, 0);
    }

    #[test]
    fn test_trend_no_gap_filling() {
        let history = History::from_records(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-09", &["S01"]),
        ]);
        let points = daily_trend(&history, 1, 30);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_trend_clamps_absent_for_unknown_ids() {
        let history = History::from_records(&[record("2024-01-01", &["S01", "S09", "S10"])]);
        let points = daily_trend(&history, 1, 30);
        assert_eq!(points[0].present_count, 3);
        assert_eq!(points[0].absent_count, 0);
    }

    #[test]
    fn test_trend_empty_history() {
        let history = History::from_records(&[]);
        assert!(daily_trend(&history, 5, 30).is_empty());
    }
}
