//! Module for the test publisher injecting the fixed person records into the consumer's queue.

use lapin::Channel;
use tracing::{info, warn};

use crate::{Config, Error, domain::sample_people, transport};

/// Publishes the three sample people, in order, then closes the connection. Returns how many were sent.
pub async fn publish_fixtures(config: &Config) -> Result<usize, Error> {
    let (connection, channel) = transport::connect(config).await?;
    let result = publish_all(&channel, &config.person_queue).await;

    if let Err(err) = transport::close(connection).await {
        warn!("Failed to close the connection: {err}");
    }
    result
}

async fn publish_all(channel: &Channel, queue: &str) -> Result<usize, Error> {
    transport::declare_queue(channel, queue).await?;

    let people = sample_people();
    let total = people.len();
    for (i, person) in people.iter().enumerate() {
        transport::publish_json(channel, queue, person).await?;
        info!(
            queue,
            "Sent message {}/{total}: {} {}",
            i + 1,
            person.imie,
            person.nazwisko
        );
    }
    Ok(total)
}
