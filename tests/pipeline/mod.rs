//! Integration tests running published payloads through the consumer pipeline without a broker.

use queue_csv_bridge::{CsvSink, Disposition, handle_message, sample_people};

const PRE_EXISTING: &str =
    "wiek;nazwisko;imie;jezyki_posortowane\r\n40;Zieliński;Adam;[angielski]\r\n";

#[test]
fn fixtures_append_three_sorted_rows_after_existing_content() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dane.csv");
    std::fs::write(&path, PRE_EXISTING).unwrap();

    let sink = CsvSink::new(&path);
    sink.initialize().unwrap();

    // Act: payloads encoded the way the test publisher sends them
    let dispositions: Vec<Disposition> = sample_people()
        .iter()
        .map(|person| serde_json::to_vec_pretty(person).unwrap())
        .map(|body| handle_message(&body, &sink, |e| panic!("unexpected error: {e}")))
        .collect();

    // Assert
    assert_eq!(dispositions, vec![Disposition::Acknowledge; 3]);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "wiek;nazwisko;imie;jezyki_posortowane",
            "40;Zieliński;Adam;[angielski]",
            "30;Kowalski;Jan;[angielski, francuski, niemiecki]",
            "25;Nowak;Anna;[angielski, hiszpański]",
            "35;Wiśniewski;Piotr;[angielski, chiński, niemiecki, rosyjski]",
        ]
    );
}

#[test]
fn second_run_does_not_duplicate_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dane.csv");
    let body = serde_json::to_vec(&sample_people()[1]).unwrap();

    for _ in 0..2 {
        // each iteration is a fresh consumer start
        let sink = CsvSink::new(&path);
        sink.initialize().unwrap();
        handle_message(&body, &sink, |e| panic!("unexpected error: {e}"));
    }

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.matches("wiek;nazwisko;imie").count(), 1);
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn rejected_messages_leave_the_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dane.csv");
    let sink = CsvSink::new(&path);
    sink.initialize().unwrap();
    let before = std::fs::read(&path).unwrap();

    let bodies: [&[u8]; 3] = [
        b"{\"imie\": ",
        br#"{"imie":"Jan","wiek":30,"jezyki_obce":[]}"#,
        br#"{"nazwisko":"Nowak","wiek":25,"jezyki_obce":["angielski"]}"#,
    ];
    for body in bodies {
        assert_eq!(handle_message(body, &sink, |_| {}), Disposition::Reject);
    }

    assert_eq!(std::fs::read(&path).unwrap(), before);
}
