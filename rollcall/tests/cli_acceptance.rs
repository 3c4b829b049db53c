use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    snapshot: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        let snapshot = base.join("attendance.json");
        seed_snapshot(&snapshot);

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
            snapshot,
        }
    }
}

fn seed_snapshot(path: &PathBuf) {
    let snapshot = serde_json::json!({
        "students": [
            { "id": "S01", "name": "Ada" },
            { "id": "S02", "name": "Grace" }
        ],
        "records": [
            { "date": "2024-01-01", "presentIds": ["S01", "S02"] },
            { "date": "2024-01-02", "presentIds": ["S01"] }
        ]
    });
    fs::write(path, serde_json::to_string_pretty(&snapshot).unwrap())
        .expect("failed to seed snapshot");
}

fn run(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("rollcall"));
    let snapshot = env.snapshot.to_string_lossy().to_string();

    let mut all_args = vec!["--data", snapshot.as_str(), "--today", "2024-01-02"];
    all_args.extend_from_slice(args);

    Command::new(bin_path)
        .args(&all_args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .expect("failed to execute rollcall")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn dashboard_reports_scenario_numbers() {
    let env = CliTestEnv::new();
    let out = stdout(&run(&env, &["dashboard"]));

    // 3 of 4 possible attendances => 75%
    assert!(out.contains("75%"), "missing overall %: {out}");
    assert!(out.contains("Today's Attendance"), "missing tile: {out}");
    assert!(out.contains("1 / 2"), "missing today's counts: {out}");
    // The only absence fell on Tuesday
    assert!(out.contains("Tuesday"), "missing dropout day: {out}");
}

#[test]
fn student_report_shows_streaks() {
    let env = CliTestEnv::new();
    let out = stdout(&run(&env, &["student", "S02"]));

    assert!(out.contains("Grace (S02)"), "missing header: {out}");
    assert!(out.contains("Current streak:         0 days"), "{out}");
    assert!(out.contains("Longest streak:         1 days"), "{out}");
}

#[test]
fn unknown_student_fails_with_message() {
    let env = CliTestEnv::new();
    let output = run(&env, &["student", "S99"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("S99"), "stderr was: {stderr}");
}

#[test]
fn summary_renders_exact_header() {
    let env = CliTestEnv::new();
    let out = stdout(&run(&env, &["summary"]));

    assert!(out.contains("Tuesday, 2nd January 2024"), "{out}");
    assert!(out.contains("Present: 1 / 2 (50%)"), "{out}");
}

#[test]
fn export_writes_csv_files() {
    let env = CliTestEnv::new();
    let dir = env.home.join("exports");
    fs::create_dir_all(&dir).unwrap();

    let out = stdout(&run(&env, &["export", "--dir", dir.to_str().unwrap()]));
    assert!(out.contains("students.csv"), "{out}");

    let students = fs::read_to_string(dir.join("students.csv")).unwrap();
    assert!(students.contains("S01,Ada"));

    let history = fs::read_to_string(dir.join("attendance_history.csv")).unwrap();
    assert!(history.contains("2024-01-02,1,1,Ada"));
}

#[test]
fn trend_lists_record_days_only() {
    let env = CliTestEnv::new();
    let out = stdout(&run(&env, &["trend"]));

    assert!(out.contains("2024-01-01"), "{out}");
    assert!(out.contains("2024-01-02"), "{out}");
    // Two records, header + two rows
    assert_eq!(out.lines().count(), 3, "{out}");
}
