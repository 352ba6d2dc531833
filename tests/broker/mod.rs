//! Round trip through a real broker. Needs RabbitMQ reachable at `AMQP_ADDR` (default localhost), hence ignored:
//!   cargo nextest run --run-ignored only fixtures_round_trip_through_broker

use std::path::Path;
use std::time::Duration;

use lapin::{
    BasicProperties,
    options::{BasicPublishOptions, QueueDeclareOptions, QueueDeleteOptions},
    types::FieldTable,
};
use queue_csv_bridge::{Config, consumer, publish_fixtures, transport};

fn data_rows(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .skip(1) // header
        .map(str::to_string)
        .collect()
}

async fn rows_written(path: &Path, expected: usize) {
    while data_rows(path).len() < expected {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test(flavor = "current_thread")]
#[ignore = "needs a running RabbitMQ broker"]
async fn fixtures_round_trip_through_broker() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("dane.csv");
    let config = Config {
        person_queue: format!("queue-csv-bridge-test-{}", std::process::id()),
        csv_path: csv_path.display().to_string(),
        ..Config::from_env()
    };
    let queue = config.person_queue.as_str();

    let (connection, channel) = transport::connect(&config).await.unwrap();
    transport::declare_queue(&channel, queue).await.unwrap();
    channel
        .basic_publish(
            "",
            queue,
            BasicPublishOptions::default(),
            b"{\"imie\": \"Jan\",",
            BasicProperties::default(),
        )
        .await
        .unwrap()
        .await
        .unwrap();

    let sent = publish_fixtures(&config).await.expect("fixtures published");
    assert_eq!(sent, 3);

    // Act: the consumer stops once the three rows are on disk
    tokio::time::timeout(
        Duration::from_secs(30),
        consumer::run_until(&config, rows_written(&csv_path, sent)),
    )
    .await
    .expect("consumer finished in time")
    .expect("consumer ran without errors");

    // Assert
    assert_eq!(
        data_rows(&csv_path),
        vec![
            "30;Kowalski;Jan;[angielski, francuski, niemiecki]",
            "25;Nowak;Anna;[angielski, hiszpański]",
            "35;Wiśniewski;Piotr;[angielski, chiński, niemiecki, rosyjski]",
        ]
    );

    // the malformed message was rejected without requeue and the rest acknowledged
    let remaining = channel
        .queue_declare(
            queue,
            QueueDeclareOptions {
                passive: true,
                ..QueueDeclareOptions::default()
            },
            FieldTable::default(),
        )
        .await
        .unwrap()
        .message_count();
    assert_eq!(remaining, 0);

    channel
        .queue_delete(queue, QueueDeleteOptions::default())
        .await
        .unwrap();
    transport::close(connection).await.unwrap();
}
