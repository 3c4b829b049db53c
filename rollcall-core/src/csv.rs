//! CSV export builders.
//!
//! Pure string builders; writing the result anywhere is the caller's
//! job. The column layout matches what the tracker has historically
//! exported, so existing spreadsheets keep working.

use crate::analytics::History;
use crate::types::Student;
use std::collections::HashMap;

/// Quote a field when it contains a comma, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Roster export: one row per student.
pub fn roster_csv(students: &[Student]) -> String {
    let mut out = String::from("id,name\n");
    for student in students {
        out.push_str(&escape(&student.id));
        out.push(',');
        out.push_str(&escape(&student.name));
        out.push('\n');
    }
    out
}

/// History export: one row per record day with counts and the present
/// students' names (ids without a roster entry fall back to the id).
pub fn history_csv(history: &History, students: &[Student]) -> String {
    let names: HashMap<&str, &str> = students
        .iter()
        .map(|s| (s.id.as_str(), s.name.as_str()))
        .collect();

    let mut out = String::from("date,present_count,absent_count,present_students\n");
    for day in history.days() {
        let present = day.present_count();
        let absent = (students.len() as i64 - present).max(0);

        // Roster order first, then unknown ids in sorted order so the
        // output is deterministic.
        let mut listed: Vec<&str> = students
            .iter()
            .filter(|s| day.is_present(&s.id))
            .map(|s| names[s.id.as_str()])
            .collect();
        let mut unknown: Vec<&str> = day
            .present
            .iter()
            .filter(|id| !names.contains_key(id.as_str()))
            .map(String::as_str)
            .collect();
        unknown.sort_unstable();
        listed.extend(unknown);

        out.push_str(&format!(
            "{},{},{},{}\n",
            day.date,
            present,
            absent,
            escape(&listed.join("; "))
        ));
    }
    out
}
