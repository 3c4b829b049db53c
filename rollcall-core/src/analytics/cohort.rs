//! Cohort-level aggregation.
//!
//! Weekday metrics (most active day, most common dropout day) break
//! ties by scanning weekdays in canonical Sun→Sat order and keeping
//! the first maximum, and only report a weekday whose count is
//! positive. The two week windows used by trend metrics are date
//! granular: the current window is `today-6 ..= today`, the previous
//! one `today-13 ..= today-7`.

use super::history::{DayRecord, History};
use super::student::{consistency, favorite_weekday, student_stats, trailing_present_run};
use crate::format::day_name;
use crate::types::{ChangeType, Stat, StatKind, Student, WeekdayName};
use chrono::{Datelike, Duration, NaiveDate};

/// Week-over-week attendance movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyTrend {
    /// Attendance % over the last 7 calendar days
    pub current_pct: i64,
    /// Attendance % over the 7 days before that
    pub previous_pct: i64,
    /// `current - previous`, in percentage points
    pub change: i64,
    /// `Increase` when the change is zero or positive
    pub change_type: ChangeType,
}

/// Overall attendance percentage across the whole history.
///
/// `round(total present / (record days * roster size) * 100)`; 0 when
/// either factor is zero.
pub fn overall_attendance(history: &History, roster_size: usize) -> i64 {
    attendance_pct(history.days(), roster_size)
}

/// Attendance percentage over an arbitrary run of record days.
pub fn attendance_pct(days: &[DayRecord], roster_size: usize) -> i64 {
    if days.is_empty() || roster_size == 0 {
        return 0;
    }
    let possible = (days.len() * roster_size) as f64;
    let actual: i64 = days.iter().map(DayRecord::present_count).sum();
    (actual as f64 / possible * 100.0).round() as i64
}

/// Attendance % of the last 7 calendar days vs the preceding 7.
pub fn weekly_trend(history: &History, roster_size: usize, today: NaiveDate) -> WeeklyTrend {
    let current = history.between(today - Duration::days(6), today);
    let previous = history.between(today - Duration::days(13), today - Duration::days(7));

    let current_pct = attendance_pct(current, roster_size);
    let previous_pct = attendance_pct(previous, roster_size);
    let change = current_pct - previous_pct;

    WeeklyTrend {
        current_pct,
        previous_pct,
        change,
        change_type: if change >= 0 {
            ChangeType::Increase
        } else {
            ChangeType::Decrease
        },
    }
}

/// 7-day attendance % as a leading indicator; 0 when the window holds
/// no records.
pub fn engagement_index(history: &History, roster_size: usize, today: NaiveDate) -> i64 {
    let current = history.between(today - Duration::days(6), today);
    if current.is_empty() {
        return 0;
    }
    attendance_pct(current, roster_size)
}

/// Weekday with the highest total present count across all records.
pub fn most_active_day(history: &History) -> Option<WeekdayName> {
    let mut day_counts = [0i64; 7];
    for day in history.days() {
        day_counts[day.date.weekday().num_days_from_sunday() as usize] += day.present_count();
    }
    favorite_weekday(&day_counts)
}

/// Weekday with the highest total absence count across all records.
///
/// Absences per record floor at zero, so records carrying ids of
/// since-deleted students never produce negative counts.
pub fn most_common_dropout_day(history: &History, roster_size: usize) -> Option<WeekdayName> {
    let mut day_counts = [0i64; 7];
    for day in history.days() {
        let absent = (roster_size as i64 - day.present_count()).max(0);
        day_counts[day.date.weekday().num_days_from_sunday() as usize] += absent;
    }
    favorite_weekday(&day_counts)
}

/// Maximum longest streak across the roster, 0 for an empty roster.
pub fn longest_class_streak(history: &History, roster: &[Student], today: NaiveDate) -> i64 {
    roster
        .iter()
        .map(|s| student_stats(&s.id, history, today).longest_streak)
        .max()
        .unwrap_or(0)
}

/// Student of the week: presence count in the last 7 days plus the
/// trailing present-run restricted to that window.
///
/// Ties resolve to the earliest roster entry; None when no records
/// fall inside the window.
pub fn student_of_week<'a>(
    history: &History,
    roster: &'a [Student],
    today: NaiveDate,
) -> Option<&'a Student> {
    let window = history.between(today - Duration::days(6), today);
    if window.is_empty() {
        return None;
    }

    let mut best: Option<(&Student, i64)> = None;
    for student in roster {
        let attended = window.iter().filter(|d| d.is_present(&student.id)).count() as i64;
        let streak = trailing_present_run(window, &student.id);
        let score = attended + streak;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((student, score));
        }
    }
    best.map(|(student, _)| student)
}

/// Top `count` students by total days attended, full history.
///
/// Stable sort, so ties keep roster order.
pub fn top_regulars<'a>(
    history: &History,
    roster: &'a [Student],
    count: usize,
) -> Vec<(&'a Student, i64)> {
    let mut totals: Vec<(&Student, i64)> = roster
        .iter()
        .map(|student| {
            let attended = history
                .days()
                .iter()
                .filter(|d| d.is_present(&student.id))
                .count() as i64;
            (student, attended)
        })
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(count);
    totals
}

/// Students whose consistency score sits below `threshold`, worst
/// first.
pub fn low_attendance<'a>(
    history: &History,
    roster: &'a [Student],
    threshold: f64,
) -> Vec<(&'a Student, f64)> {
    let recorded = history.len() as i64;
    let mut below: Vec<(&Student, f64)> = roster
        .iter()
        .map(|student| {
            let attended = history
                .days()
                .iter()
                .filter(|d| d.is_present(&student.id))
                .count() as i64;
            (student, consistency(attended, recorded))
        })
        .filter(|(_, score)| *score < threshold)
        .collect();
    below.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    below
}

/// Top `count` students by longest inactive streak, descending.
pub fn inactive_streak_leaders<'a>(
    history: &History,
    roster: &'a [Student],
    today: NaiveDate,
    count: usize,
) -> Vec<(&'a Student, i64)> {
    let mut leaders: Vec<(&Student, i64)> = roster
        .iter()
        .map(|s| (s, student_stats(&s.id, history, today).longest_inactive_streak))
        .collect();
    leaders.sort_by(|a, b| b.1.cmp(&a.1));
    leaders.truncate(count);
    leaders
}

/// The dashboard stat tiles, assembled from the metrics above.
pub fn dashboard_stats(history: &History, roster: &[Student], today: NaiveDate) -> Vec<Stat> {
    let trend = weekly_trend(history, roster.len(), today);
    let engagement = engagement_index(history, roster.len(), today);

    let todays_value = match history.record_for(today) {
        Some(day) => format!("{} / {}", day.present_count(), roster.len()),
        None => "Not Taken".to_string(),
    };

    let active_day = most_active_day(history)
        .map(|d| d.as_str().to_string())
        .unwrap_or_else(|| "N/A".to_string());

    vec![
        Stat::new(StatKind::Headcount, "Today's Attendance", todays_value),
        Stat::new(
            StatKind::Attendance,
            "Overall Attendance",
            format!("{}%", overall_attendance(history, roster.len())),
        ),
        Stat {
            kind: StatKind::Engagement,
            name: "Class Engagement (7d)".to_string(),
            value: format!("{}%", engagement),
            change: Some(format_change(trend.change)),
            change_type: Some(trend.change_type),
        },
        Stat::new(StatKind::Activity, "Most Active Day", active_day),
        Stat::new(
            StatKind::Streak,
            "Longest Class Streak",
            format!("{} days", longest_class_streak(history, roster, today)),
        ),
    ]
}

/// Format a signed change in percentage points ("+5%", "-3%").
fn format_change(change: i64) -> String {
    if change >= 0 {
        format!("+{}%", change)
    } else {
        format!("{}%", change)
    }
}

/// Render an optional weekday metric for display.
pub fn weekday_label(day: Option<WeekdayName>) -> &'static str {
    day.map(|d| day_name(d.0)).unwrap_or("N/A")
}
