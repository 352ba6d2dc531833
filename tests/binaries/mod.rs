//! Integration tests running the crate binaries against an unreachable broker.

use std::path::Path;
use std::process::{Command, Output};

// nothing listens on port 1, so connecting fails right away
const UNREACHABLE_BROKER: &str = "amqp://127.0.0.1:1/%2f";

fn run_binary(binary: &str, csv_path: &Path) -> Output {
    Command::new(binary)
        .env("AMQP_ADDR", UNREACHABLE_BROKER)
        .env("CSV_PATH", csv_path)
        .env("RUST_LOG", "info")
        .env("LOG_FORMAT", "json")
        .output()
        .expect("failed to execute binary")
}

#[test]
fn consumer_creates_csv_header_then_exits_on_connection_failure() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("dane.csv");

    let output = run_binary(env!("CARGO_BIN_EXE_consumer"), &csv_path);

    assert!(
        output.status.success(),
        "binary exited with non-zero status.\nstderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not connect to RabbitMQ"), "stderr: {stderr}");

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), vec!["wiek;nazwisko;imie;jezyki_posortowane"]);
}

#[test]
fn test_publisher_logs_connection_failure_and_exits() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("unused.csv");

    let output = run_binary(env!("CARGO_BIN_EXE_test-publisher"), &csv_path);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Could not connect to RabbitMQ"), "stderr: {stderr}");
    assert!(!csv_path.exists());
}
