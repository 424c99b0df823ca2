//! Process-level tests for the Fatal level
//!
//! Fatal exits the process, so each scenario re-runs this test binary as a
//! child with a marker variable set. The child logs at Fatal; the parent checks
//! the exit status and what reached stdout.

use duallog::prelude::*;
use std::process::{Command, Output};

const CHILD_ENV: &str = "DUALLOG_FATAL_CHILD";
const UNREACHABLE_MARKER: &str = "after-fatal-unreachable";

fn run_child(test_name: &str) -> Output {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .output()
        .expect("failed to spawn child test process")
}

fn in_child() -> bool {
    std::env::var_os(CHILD_ENV).is_some()
}

/// Child body: structured record to stdout, then Fatal
#[test]
fn child_fatal_structured() {
    if !in_child() {
        return;
    }

    let logger = Logger::builder()
        .sink(std::io::stdout())
        .console_writer(std::io::sink())
        .colors(false)
        .build();

    logger.fatal("cannot continue", [Attr::new("reason", "disk full")]);
}

/// Child body: formatted Fatal through the default logger
#[test]
fn child_fatal_default_logger() {
    if !in_child() {
        return;
    }

    set_default(Logger::builder().colors(false).build());
    duallog::fatalf(format_args!("shutting down after {} errors", 3));
}

/// Child body: Fatal below the threshold still exits
#[test]
fn child_fatal_filtered() {
    if !in_child() {
        return;
    }

    let logger = Logger::builder()
        .sink(std::io::stdout())
        .console_writer(std::io::sink())
        .min_level(LogLevel::Fatal)
        .build();

    let _ = logger.error("not shown", []);
    let _ = logger.log(LogLevel::Fatal, "shown", []);
    println!("{}", UNREACHABLE_MARKER);
}

#[test]
fn test_fatal_exits_with_status_one() {
    if in_child() {
        return;
    }

    let output = run_child("child_fatal_structured");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    // libtest may print its own progress text ahead of the record
    let record_line = stdout
        .lines()
        .find_map(|l| l.find("{\"time\"").map(|i| &l[i..]))
        .expect("structured record flushed before exit");
    let record: serde_json::Value = serde_json::from_str(record_line).expect("valid json");
    assert_eq!(record["level"], "FATAL");
    assert_eq!(record["msg"], "cannot continue");
    assert_eq!(record["reason"], "disk full");
    assert!(record["source"]
        .as_str()
        .is_some_and(|s| s.contains("fatal_tests.rs:")));
}

#[test]
fn test_fatal_through_default_logger() {
    if in_child() {
        return;
    }

    let output = run_child("child_fatal_default_logger");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("| FATAL | ") && stdout.contains("> shutting down after 3 errors"),
        "missing console line in {:?}",
        stdout
    );
}

#[test]
fn test_no_code_runs_after_fatal() {
    if in_child() {
        return;
    }

    let output = run_child("child_fatal_filtered");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains(UNREACHABLE_MARKER));
    assert!(!stdout.contains("not shown"));
    assert!(stdout.contains(r#""msg":"shown""#));
}
