use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tm-{nanos}-{file_name}"))
}

fn pad(field: &str) -> String {
    format!("{field:<22}")
}

fn row(name: &str, size: &str, start: &str, end: &str, description: &str) -> String {
    [pad(name), pad(size), pad(start), pad(end), pad(description)].concat()
}

fn seed_log(rows: &[String]) -> String {
    let mut out = String::from("Operation Log:\n\nTask Summary:\n");
    out.push_str(&row(
        "Task Name",
        "Task Size",
        "Start Time",
        "End Time",
        "Description",
    ));
    out.push('\n');
    for line in rows {
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn report_and_email() -> Vec<String> {
    vec![
        row(
            "Report",
            "S",
            "2024/03/01-09:00:00",
            "2024/03/01-09:30:00",
            "UNDEFINED",
        ),
        row(
            "Email",
            "S",
            "2024/03/01-10:00:00",
            "2024/03/01-10:10:00",
            "UNDEFINED",
        ),
        row(
            "Report",
            "S",
            "2024/03/01-11:00:00",
            "2024/03/01-11:15:00",
            "UNDEFINED",
        ),
    ]
}

fn tm(log_path: &PathBuf, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tm"))
        .args(args)
        .env("TM_LOG_PATH", log_path)
        .output()
        .expect("failed to run tm")
}

#[test]
fn rename_moves_every_window_to_the_new_name() {
    let log_path = temp_path("rename.txt");
    std::fs::write(&log_path, seed_log(&report_and_email())).unwrap();

    let output = tm(&log_path, &["rename", "Report", "WeeklyReport"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Renamed task: Report -> WeeklyReport (2 windows)"));

    let content = std::fs::read_to_string(&log_path).unwrap();
    std::fs::remove_file(&log_path).ok();
    assert_eq!(content.matches(&pad("WeeklyReport")).count(), 2);
    // Only the appended operation-log line still carries the old name.
    assert_eq!(content.matches(&pad("Report")).count(), 1);
}

#[test]
fn renamed_task_keeps_its_aggregated_total() {
    let log_path = temp_path("rename-total.txt");
    std::fs::write(&log_path, seed_log(&report_and_email())).unwrap();

    assert!(tm(&log_path, &["rename", "Report", "WeeklyReport"]).status.success());
    let output = tm(&log_path, &["summary", "WeeklyReport"]);
    std::fs::remove_file(&log_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 Hours, 45 Minutes, 0 Seconds"));
}

#[test]
fn rename_to_an_existing_name_is_rejected() {
    let log_path = temp_path("rename-collision.txt");
    let seed = seed_log(&report_and_email());
    std::fs::write(&log_path, &seed).unwrap();

    let output = tm(&log_path, &["rename", "Report", "Email"]);
    let content = std::fs::read_to_string(&log_path).unwrap();
    std::fs::remove_file(&log_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: state_conflict"));
    assert!(stderr.contains("Name: Email already exists"));
    assert_eq!(content, seed);
}

#[test]
fn rename_unknown_task_reports_not_found() {
    let log_path = temp_path("rename-unknown.txt");
    std::fs::write(&log_path, seed_log(&report_and_email())).unwrap();

    let output = tm(&log_path, &["rename", "Nothing", "Something"]);
    std::fs::remove_file(&log_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Couldn't find Nothing"));
}

#[test]
fn rename_to_a_size_label_is_rejected() {
    let log_path = temp_path("rename-reserved.txt");
    std::fs::write(&log_path, seed_log(&report_and_email())).unwrap();

    let output = tm(&log_path, &["rename", "Report", "XL"]);
    std::fs::remove_file(&log_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: state_conflict"));
}
