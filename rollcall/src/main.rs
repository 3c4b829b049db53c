//! rollcall - attendance reports from the command line
//!
//! Loads the roster + history snapshot, runs the analytics engine, and
//! prints text reports. All date-sensitive output honors `--today`, so
//! reports are reproducible.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rollcall_core::analytics::{self, History};
use rollcall_core::types::{DayStatus, Snapshot, Student};
use rollcall_core::{csv, Config, JsonSnapshotStore, SnapshotStore};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Attendance reports for a class roster")]
#[command(version)]
struct Args {
    /// Snapshot file to read (defaults to the XDG data path)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Evaluate stats as of this date, YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cohort dashboard: headline stats plus watch lists
    Dashboard,
    /// Stats for a single student
    Student {
        /// Student id (e.g. S01)
        id: String,
    },
    /// Present/absent counts for recent record days
    Trend {
        /// Number of record days to include
        #[arg(long)]
        days: Option<usize>,
    },
    /// Calendar heatmap for a single student
    Heatmap {
        /// Student id (e.g. S01)
        id: String,
        /// Whole months of history to cover
        #[arg(long)]
        months: Option<u32>,
    },
    /// Shareable plain-text summary for today
    Summary,
    /// Write roster and history CSV exports
    Export {
        /// Directory to write students.csv and attendance_history.csv into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        rollcall_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let today = match &args.today {
        Some(raw) => analytics::parse_date(raw)
            .with_context(|| format!("invalid --today value '{}', expected YYYY-MM-DD", raw))?,
        None => Utc::now().date_naive(),
    };

    // Load the snapshot and normalize the history once
    let data_path = args.data.clone().unwrap_or_else(Config::snapshot_path);
    let store = JsonSnapshotStore::new(&data_path);
    let snapshot = store
        .load()
        .with_context(|| format!("failed to load snapshot from {}", data_path.display()))?;

    let history = History::from_records(&snapshot.records);
    if history.skipped() > 0 {
        eprintln!(
            "warning: skipped {} record(s) with malformed dates",
            history.skipped()
        );
    }
    tracing::info!(
        students = snapshot.students.len(),
        records = history.len(),
        skipped = history.skipped(),
        "snapshot loaded"
    );

    match args.command {
        Command::Dashboard => dashboard(&history, &snapshot, today, &config),
        Command::Student { id } => student_report(&id, &history, &snapshot, today),
        Command::Trend { days } => {
            trend(&history, &snapshot, days.unwrap_or(config.analytics.trend_window))
        }
        Command::Heatmap { id, months } => heatmap(
            &id,
            &history,
            &snapshot,
            months.unwrap_or(config.analytics.heatmap_months_back),
            today,
        ),
        Command::Summary => summary(&history, &snapshot, today, &config),
        Command::Export { dir } => export(&history, &snapshot, &dir),
    }
}

fn find_student<'a>(snapshot: &'a Snapshot, id: &str) -> Result<&'a Student> {
    snapshot
        .student(id)
        .with_context(|| format!("'{}' is not on the roster", id))
}

fn dashboard(history: &History, snapshot: &Snapshot, today: NaiveDate, config: &Config) -> Result<()> {
    let roster = &snapshot.students;

    println!("Class Dashboard: {} students, {} record days\n", roster.len(), history.len());

    for stat in analytics::dashboard_stats(history, roster, today) {
        match &stat.change {
            Some(change) => println!("  {:<24} {} ({})", stat.name, stat.value, change),
            None => println!("  {:<24} {}", stat.name, stat.value),
        }
    }

    let dropout = analytics::most_common_dropout_day(history, roster.len());
    println!("  {:<24} {}", "Most Common Dropout Day", analytics::weekday_label(dropout));

    match analytics::student_of_week(history, roster, today) {
        Some(star) => println!("  {:<24} {}", "Student of the Week", star.name),
        None => println!("  {:<24} N/A", "Student of the Week"),
    }

    let regulars = analytics::top_regulars(history, roster, config.analytics.top_regulars);
    if !regulars.is_empty() {
        println!("\nTop Regulars:");
        for (i, (student, attended)) in regulars.iter().enumerate() {
            println!("  {}. {} ({} days)", i + 1, student.name, attended);
        }
    }

    let low = analytics::low_attendance(history, roster, config.analytics.low_score_threshold);
    if !low.is_empty() {
        println!("\nNeeds Attention (score < {}):", config.analytics.low_score_threshold);
        for (student, score) in &low {
            println!("  {}: {}/10", student.name, score);
        }
    }

    let inactive = analytics::inactive_streak_leaders(history, roster, today, 5);
    if !inactive.is_empty() && history.len() >= 2 {
        println!("\nLongest Inactive Streaks:");
        for (student, days) in &inactive {
            println!("  {}: {} days", student.name, days);
        }
    }

    Ok(())
}

fn student_report(id: &str, history: &History, snapshot: &Snapshot, today: NaiveDate) -> Result<()> {
    let student = find_student(snapshot, id)?;
    let stats = analytics::student_stats(&student.id, history, today);

    println!("{} ({})\n", student.name, student.id);
    println!("  Days attended:          {} of {}", stats.total_attended, history.len());
    println!("  Current streak:         {} days", stats.current_streak);
    println!("  Longest streak:         {} days", stats.longest_streak);
    println!("  Longest inactive:       {} days", stats.longest_inactive_streak);
    println!(
        "  Favorite day:           {}",
        stats.favorite_day.map(|d| d.as_str()).unwrap_or("N/A")
    );
    println!("  Consistency score:      {}/10", stats.consistency_score);

    Ok(())
}

fn trend(history: &History, snapshot: &Snapshot, days: usize) -> Result<()> {
    let points = analytics::daily_trend(history, snapshot.students.len(), days);
    if points.is_empty() {
        println!("No attendance records yet.");
        return Ok(());
    }

    println!("{:<12} {:>8} {:>8}", "date", "present", "absent");
    for point in points {
        println!(
            "{:<12} {:>8} {:>8}",
            point.date, point.present_count, point.absent_count
        );
    }
    Ok(())
}

fn heatmap(
    id: &str,
    history: &History,
    snapshot: &Snapshot,
    months: u32,
    today: NaiveDate,
) -> Result<()> {
    let student = find_student(snapshot, id)?;
    let days = analytics::calendar_days(&student.id, history, months, today);

    println!("Attendance heatmap for {} (last {} months)\n", student.name, months);
    println!("  S M T W T F S");
    for week in days.chunks(7) {
        let row: Vec<&str> = week
            .iter()
            .map(|cell| match cell.status {
                DayStatus::Present => "#",
                DayStatus::Absent => "x",
                DayStatus::NoRecord => "·",
                DayStatus::Future | DayStatus::Empty => " ",
            })
            .collect();
        println!("  {}", row.join(" "));
    }
    println!("\n  # present   x absent   · no record");
    Ok(())
}

fn summary(history: &History, snapshot: &Snapshot, today: NaiveDate, config: &Config) -> Result<()> {
    match analytics::daily_summary(
        history,
        &snapshot.students,
        today,
        config.analytics.summary_top_count,
    ) {
        Some(text) => println!("{}", text),
        None => println!("No attendance data for today."),
    }
    Ok(())
}

fn export(history: &History, snapshot: &Snapshot, dir: &PathBuf) -> Result<()> {
    if !dir.exists() {
        bail!("export directory {} does not exist", dir.display());
    }

    let students_path = dir.join("students.csv");
    std::fs::write(&students_path, csv::roster_csv(&snapshot.students))
        .with_context(|| format!("failed to write {}", students_path.display()))?;

    let history_path = dir.join("attendance_history.csv");
    std::fs::write(&history_path, csv::history_csv(history, &snapshot.students))
        .with_context(|| format!("failed to write {}", history_path.display()))?;

    println!("Wrote {}", students_path.display());
    println!("Wrote {}", history_path.display());
    Ok(())
}
