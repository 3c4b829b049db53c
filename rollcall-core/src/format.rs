//! Formatting helpers shared across report surfaces.

use chrono::{Datelike, NaiveDate, Weekday};

/// Weekdays in canonical Sun→Sat order.
///
/// Tie-breaks for weekday metrics scan this order and keep the first
/// maximum, so results are deterministic regardless of input order.
pub const WEEK_SUN_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English day name for a weekday.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Full English month name (1-12).
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Ordinal suffix for a day of month ("st", "nd", "rd", "th").
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Format a date as a summary header, e.g. "Monday, 1st January 2024".
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {}{} {} {}",
        day_name(date.weekday()),
        date.day(),
        ordinal_suffix(date.day()),
        month_name(date.month()),
        date.year()
    )
}
