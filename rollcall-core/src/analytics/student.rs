//! Per-student statistics.
//!
//! Streak semantics, in one place because they are easy to get subtly
//! wrong:
//!
//! - **Longest streak** runs over *record days* only: consecutive
//!   records where the student was present, regardless of calendar
//!   gaps between sessions.
//! - **Current streak** is the trailing present-run over record days,
//!   with a 1-day wall-clock tolerance: it counts only while the
//!   latest record day is `today` or yesterday. A longer gap since the
//!   last session collapses the streak to 0.
//! - **Longest inactive streak** runs over *dense calendar days* from
//!   the first record through `today`: any day without a presence
//!   (absent or simply no record) extends the inactive run. This is
//!   the only metric that reconstructs missing days; attendance
//!   percentages never treat a missing day as a class day.

use super::history::{DayRecord, History};
use crate::format::WEEK_SUN_FIRST;
use crate::types::{StudentStats, WeekdayName};
use chrono::{Datelike, NaiveDate};

/// Compute all derived statistics for a single student.
///
/// An empty history yields neutral defaults (zero counts, no favorite
/// day) rather than an error.
pub fn student_stats(student_id: &str, history: &History, today: NaiveDate) -> StudentStats {
    let days = history.days();
    if days.is_empty() {
        return StudentStats {
            student_id: student_id.to_string(),
            ..StudentStats::default()
        };
    }

    let presence: Vec<bool> = days.iter().map(|d| d.is_present(student_id)).collect();
    let total_attended = presence.iter().filter(|&&p| p).count() as i64;

    // Weekday histogram of presences, Sun-first indexing
    let mut day_counts = [0i64; 7];
    for day in days.iter().filter(|d| d.is_present(student_id)) {
        day_counts[day.date.weekday().num_days_from_sunday() as usize] += 1;
    }

    let longest_streak = longest_run(&presence, true);

    // Trailing present-run, valid only while the latest session is
    // today or yesterday
    let last_date = days[days.len() - 1].date;
    let current_streak = if (today - last_date).num_days() > 1 {
        0
    } else {
        trailing_present_run(days, student_id)
    };

    let longest_inactive_streak = longest_inactive_run(days, student_id, today);

    let favorite_day = favorite_weekday(&day_counts);

    let consistency_score = consistency(total_attended, days.len() as i64);

    StudentStats {
        student_id: student_id.to_string(),
        total_attended,
        current_streak,
        longest_streak,
        longest_inactive_streak,
        favorite_day,
        consistency_score,
    }
}

/// Attendance rate scaled to 0..=10, rounded to one decimal.
pub fn consistency(attended: i64, recorded: i64) -> f64 {
    if recorded == 0 {
        return 0.0;
    }
    let score = attended as f64 / recorded as f64 * 10.0;
    (score * 10.0).round() / 10.0
}

/// Longest run of `target` values in a presence sequence.
fn longest_run(presence: &[bool], target: bool) -> i64 {
    let mut longest = 0i64;
    let mut run = 0i64;
    for &p in presence {
        if p == target {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Present-run length counting backward from the latest record day.
///
/// Record-adjacency only: no wall-clock check. Callers that need the
/// 1-day tolerance apply it before calling.
pub(crate) fn trailing_present_run(days: &[DayRecord], student_id: &str) -> i64 {
    days.iter()
        .rev()
        .take_while(|d| d.is_present(student_id))
        .count() as i64
}

/// Longest run of calendar days without a presence, dense from the
/// first record day through `today`.
fn longest_inactive_run(days: &[DayRecord], student_id: &str, today: NaiveDate) -> i64 {
    let first = days[0].date;
    let mut longest = 0i64;
    let mut run = 0i64;

    for date in first.iter_days().take_while(|d| *d <= today) {
        let present = days
            .binary_search_by_key(&date, |d| d.date)
            .map(|i| days[i].is_present(student_id))
            .unwrap_or(false);
        if present {
            run = 0;
        } else {
            run += 1;
            longest = longest.max(run);
        }
    }
    longest
}

/// Weekday with the highest count, Sun→Sat tie-break, None if all zero.
pub(crate) fn favorite_weekday(day_counts: &[i64; 7]) -> Option<WeekdayName> {
    let mut best: Option<(chrono::Weekday, i64)> = None;
    for weekday in WEEK_SUN_FIRST {
        let count = day_counts[weekday.num_days_from_sunday() as usize];
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((weekday, count));
        }
    }
    best.map(|(weekday, _)| WeekdayName(weekday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttendanceRecord;
    use chrono::Weekday;

    fn record(date: &str, ids: &[&str]) -> AttendanceRecord {
        AttendanceRecord {
            date: date.to_string(),
            present_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn history(records: &[AttendanceRecord]) -> History {
        History::from_records(records)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_history_neutral_defaults() {
        let stats = student_stats("S01", &history(&[]), date("2024-01-05"));
        assert_eq!(stats.total_attended, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 0);
        assert_eq!(stats.longest_inactive_streak, 0);
        assert!(stats.favorite_day.is_none());
        assert_eq!(stats.consistency_score, 0.0);
    }

    #[test]
    fn test_streaks_over_record_days() {
        // P P A P P, evaluated on the last record's day
        let h = history(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &["S01"]),
            record("2024-01-03", &[]),
            record("2024-01-04", &["S01"]),
            record("2024-01-05", &["S01"]),
        ]);
        let stats = student_stats("S01", &h, date("2024-01-05"));
        assert_eq!(stats.total_attended, 4);
        assert_eq!(stats.longest_streak, 2);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn test_current_streak_one_day_tolerance() {
        let h = history(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &["S01"]),
        ]);
        // Documented choice: streak survives a 1-day gap since the
        // last session, collapses beyond that.
        let on_day = student_stats("S01", &h, date("2024-01-02"));
        assert_eq!(on_day.current_streak, 2);
        let next_day = student_stats("S01", &h, date("2024-01-03"));
        assert_eq!(next_day.current_streak, 2);
        let two_days_later = student_stats("S01", &h, date("2024-01-04"));
        assert_eq!(two_days_later.current_streak, 0);
    }

    #[test]
    fn test_current_streak_stops_at_absence() {
        let h = history(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &[]),
            record("2024-01-03", &["S01"]),
        ]);
        let stats = student_stats("S01", &h, date("2024-01-03"));
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_inactive_streak_counts_missing_days() {
        // Records on Jan 1 and Jan 5; student absent on the 5th.
        // Dense days Jan 1..=6: P, -, -, -, A, - => inactive run 5.
        let h = history(&[
            record("2024-01-01", &["S01"]),
            record("2024-01-05", &[]),
        ]);
        let stats = student_stats("S01", &h, date("2024-01-06"));
        assert_eq!(stats.longest_inactive_streak, 5);
    }

    #[test]
    fn test_favorite_day_tie_breaks_sun_first() {
        // One Monday and one Tuesday presence: Monday wins the tie.
        let h = history(&[
            record("2024-01-01", &["S01"]), // Monday
            record("2024-01-02", &["S01"]), // Tuesday
        ]);
        let stats = student_stats("S01", &h, date("2024-01-02"));
        assert_eq!(stats.favorite_day, Some(WeekdayName(Weekday::Mon)));
    }

    #[test]
    fn test_favorite_day_none_when_never_present() {
        let h = history(&[record("2024-01-01", &["S02"])]);
        let stats = student_stats("S01", &h, date("2024-01-01"));
        assert!(stats.favorite_day.is_none());
    }

    #[test]
    fn test_consistency_rounding_and_bounds() {
        assert_eq!(consistency(0, 0), 0.0);
        assert_eq!(consistency(3, 3), 10.0);
        assert_eq!(consistency(1, 3), 3.3);
        assert_eq!(consistency(2, 3), 6.7);
        for attended in 0..=7 {
            let score = consistency(attended, 7);
            assert!((0.0..=10.0).contains(&score));
        }
    }

    #[test]
    fn test_monotonic_in_new_presences() {
        let mut records = vec![
            record("2024-01-01", &["S01"]),
            record("2024-01-02", &[]),
        ];
        let before = student_stats("S01", &history(&records), date("2024-01-03"));
        records.push(record("2024-01-03", &["S01"]));
        let after = student_stats("S01", &history(&records), date("2024-01-03"));
        assert!(after.total_attended >= before.total_attended);
        assert!(after.longest_streak >= before.longest_streak);
    }
}
