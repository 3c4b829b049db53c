//! Shareable plain-text attendance summary.
//!
//! The rendered string is stable for fixed inputs: callers paste it to
//! a clipboard or an image caption, and tests assert on exact output.

use super::cohort::top_regulars;
use super::history::History;
use crate::format::long_date;
use crate::types::Student;
use chrono::NaiveDate;

/// Render the daily summary from pre-computed pieces.
///
/// `top_students` and `present_students` are display names, already in
/// the order they should be enumerated.
pub fn render_summary(
    date: NaiveDate,
    present_count: i64,
    total_count: i64,
    top_students: &[String],
    present_students: &[String],
) -> String {
    let percentage = if total_count > 0 {
        (present_count as f64 / total_count as f64 * 100.0).round() as i64
    } else {
        0
    };

    let summary = format!(
        "📅 {header}\n\
         🧾 Daily Attendance Summary\n\
         ✅ Present: {present} / {total} ({percentage}%)\n\
         \n\
         📈 Most Consistent Students:\n\
         {top}\n\
         \n\
         🟢 Students Present:\n\
         {names}",
        header = long_date(date),
        present = present_count,
        total = total_count,
        percentage = percentage,
        top = enumerate(top_students),
        names = enumerate(present_students),
    );

    summary.trim().to_string()
}

/// Assemble the summary for one day of a history, or None when that
/// day has no record.
///
/// Present students are listed in roster order; ids with no roster
/// entry stay in the headcount but get no line of their own.
pub fn daily_summary(
    history: &History,
    roster: &[Student],
    date: NaiveDate,
    top_count: usize,
) -> Option<String> {
    let day = history.record_for(date)?;

    let top_students: Vec<String> = top_regulars(history, roster, top_count)
        .into_iter()
        .map(|(student, _)| student.name.clone())
        .collect();

    let present_students: Vec<String> = roster
        .iter()
        .filter(|s| day.is_present(&s.id))
        .map(|s| s.name.clone())
        .collect();

    Some(render_summary(
        date,
        day.present_count(),
        roster.len() as i64,
        &top_students,
        &present_students,
    ))
}

/// "1. Name" lines, one per entry.
fn enumerate(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}
