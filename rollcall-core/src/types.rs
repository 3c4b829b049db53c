//! Core domain types for rollcall
//!
//! Two collections flow into the analytics engine:
//!
//! | Term | Definition |
//! |------|------------|
//! | **Roster** | The ordered list of active [`Student`]s |
//! | **Record** | One date's attendance snapshot: the set of present student ids |
//! | **Snapshot** | Roster + full attendance history, as persisted by a store |
//!
//! Everything else in this module is a derived, engine-produced value
//! (stats, trend points, heatmap cells). Derived types are plain data:
//! no rendering concerns, no clocks, no storage handles.
//!
//! Serialized field names are camelCase to stay compatible with
//! snapshots written by earlier versions of the tracker.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

// ============================================
// Input collections
// ============================================

/// A student on the roster.
///
/// Ids are stable, unique strings of the form `S` + zero-padded integer
/// (e.g. `S01`). The engine never mutates students; roster management
/// lives with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique, stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// When the student was added to the roster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One calendar day's attendance snapshot.
///
/// `date` is an ISO `YYYY-MM-DD` string and is the record's key: the
/// store upserts by date, and [`History`](crate::analytics::History)
/// deduplicates last-write-wins if duplicates slip through anyway.
/// `present_ids` may reference since-deleted students; those ids are
/// kept in raw present counts but ignored for per-student lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Ids of students marked present on that date
    pub present_ids: Vec<String>,
}

/// A full persisted state: roster plus attendance history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub records: Vec<AttendanceRecord>,
}

impl Snapshot {
    /// Look up a roster entry by id.
    pub fn student(&self, id: &str) -> crate::error::Result<&Student> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| crate::error::Error::StudentNotFound(id.to_string()))
    }
}

// ============================================
// Derived: per-student statistics
// ============================================

/// Derived statistics for a single student.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    /// Student these stats belong to
    pub student_id: String,
    /// Number of record days the student was present
    pub total_attended: i64,
    /// Consecutive present record-days ending at the latest record,
    /// 0 if the latest record is older than yesterday
    pub current_streak: i64,
    /// Longest run of consecutive present record-days
    pub longest_streak: i64,
    /// Longest run of consecutive calendar days without a presence,
    /// counted densely from the first record through today
    pub longest_inactive_streak: i64,
    /// Weekday the student is most often present, None if never present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_day: Option<WeekdayName>,
    /// Attendance rate scaled to 0..=10, one decimal
    pub consistency_score: f64,
}

/// A weekday wrapper that serializes and displays as its English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayName(pub Weekday);

impl WeekdayName {
    /// Full English day name ("Sunday".."Saturday").
    pub fn as_str(&self) -> &'static str {
        crate::format::day_name(self.0)
    }
}

impl std::fmt::Display for WeekdayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WeekdayName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================
// Derived: cohort statistics
// ============================================

/// Category tag for a cohort stat.
///
/// Replaces the icon components the original UI attached to stat rows;
/// a presentation layer maps these to whatever visuals it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    /// Headcount-style value ("12 / 15")
    Headcount,
    /// Whole-history percentage
    Attendance,
    /// Short-window leading indicator
    Engagement,
    /// Weekday activity metric
    Activity,
    /// Streak metric
    Streak,
    /// Something that needs attention (dropouts, inactivity)
    Alert,
    /// Recognition metric (student of the week)
    Award,
}

/// Direction of a week-over-week change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Increase,
    Decrease,
}

/// A labeled cohort-level metric with an optional week-over-week delta.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    /// Category tag for presentation
    pub kind: StatKind,
    /// Human-readable metric name
    pub name: String,
    /// Rendered value ("87%", "14 days", "Not Taken")
    pub value: String,
    /// Signed delta vs the previous window, if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    /// Direction of the delta
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
}

impl Stat {
    /// A plain stat with no delta attached.
    pub fn new(kind: StatKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            change: None,
            change_type: None,
        }
    }
}

// ============================================
// Derived: trend series and heatmap
// ============================================

/// One point of the daily attendance trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Record date, `YYYY-MM-DD`
    pub date: String,
    /// Raw present count for that record
    pub present_count: i64,
    /// Roster size minus present count, floored at zero
    pub absent_count: i64,
}

/// Classification of one heatmap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayStatus {
    /// Record exists and the student was present
    Present,
    /// Record exists and the student was absent
    Absent,
    /// No record for this day
    NoRecord,
    /// Day is after today
    Future,
    /// Leading padding before the window's first month
    Empty,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Present => "present",
            DayStatus::Absent => "absent",
            DayStatus::NoRecord => "no-record",
            DayStatus::Future => "future",
            DayStatus::Empty => "empty",
        }
    }
}

/// One calendar-heatmap cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Cell classification
    pub status: DayStatus,
}
