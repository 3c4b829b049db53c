//! Attendance analytics engine.
//!
//! A handful of composable pure functions over two collections: the
//! roster and the attendance history. Everything takes an injected
//! `today: NaiveDate` instead of reading a clock, so every computation
//! is reproducible; nothing here does I/O or holds state, and all
//! functions are safe to call from any number of threads.
//!
//! Pipeline: normalize raw records once with [`History::from_records`]
//! (sort, dedupe, drop malformed dates), then feed the same `History`
//! to whichever stat functions a caller needs:
//!
//! - [`student_stats`] - streaks, favorite day, consistency score
//! - [`cohort`] - dashboard tiles, weekly trend, weekday aggregates,
//!   student of the week, top/low lists
//! - [`daily_trend`] - present/absent series for charting
//! - [`calendar_days`] - heatmap cell classification
//! - [`daily_summary`] / [`render_summary`] - shareable text

pub mod cohort;
pub mod heatmap;
pub mod history;
pub mod student;
pub mod summary;
pub mod trend;

pub use cohort::{
    dashboard_stats, engagement_index, inactive_streak_leaders, longest_class_streak,
    low_attendance, most_active_day, most_common_dropout_day, overall_attendance, student_of_week,
    top_regulars, weekday_label, weekly_trend, WeeklyTrend,
};
pub use heatmap::calendar_days;
pub use history::{parse_date, DayRecord, History};
pub use student::student_stats;
pub use summary::{daily_summary, render_summary};
pub use trend::daily_trend;
