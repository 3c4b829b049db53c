//! Calendar heatmap classification.
//!
//! Produces one cell per calendar day for a whole-week grid covering
//! the start of the month `months_back` months ago through the end of
//! the current week. All arithmetic is plain calendar dates (UTC by
//! contract); mixing in local time here would shift cells by a day
//! near midnight.

use super::history::History;
use crate::types::{CalendarDay, DayStatus};
use chrono::{Datelike, Duration, NaiveDate};

/// First day of the month `months_back` whole months before `today`.
fn first_of_month_back(today: NaiveDate, months_back: u32) -> NaiveDate {
    let total = today.year() * 12 + today.month0() as i32 - months_back as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap()
}

/// Classify every day of the heatmap window for one student.
///
/// Cell priority: `empty` (padding before the anchor month), `future`,
/// then `present`/`absent` where a record exists, `no-record`
/// otherwise. The grid is padded to whole Sun..Sat weeks on both ends.
pub fn calendar_days(
    student_id: &str,
    history: &History,
    months_back: u32,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let anchor = first_of_month_back(today, months_back);
    let start = anchor - Duration::days(anchor.weekday().num_days_from_sunday() as i64);
    let end = today + Duration::days((6 - today.weekday().num_days_from_sunday()) as i64);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let status = if date < anchor && date.month() != anchor.month() {
                DayStatus::Empty
            } else if date > today {
                DayStatus::Future
            } else if let Some(day) = history.record_for(date) {
                if day.is_present(student_id) {
                    DayStatus::Present
                } else {
                    DayStatus::Absent
                }
            } else {
                DayStatus::NoRecord
            };
            CalendarDay {
                date: date.to_string(),
                status,
            }
        })
        .collect()
}
