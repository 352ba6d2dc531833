//! Module wrapping the broker client: connecting, declaring queues and publishing JSON messages.

use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties,
    options::{BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{Config, Error};

pub const CONTENT_TYPE: &str = "application/json";
/// AMQP delivery mode of messages the broker may drop on restart
pub const NON_PERSISTENT: u8 = 1;

/// Opens a single connection and channel to the broker configured in `config`.
pub async fn connect(config: &Config) -> Result<(Connection, Channel), Error> {
    info!(addr = %config.amqp_addr, "Connecting to RabbitMQ");
    let connection = Connection::connect(&config.amqp_addr, ConnectionProperties::default())
        .await
        .map_err(Error::Connect)?;
    let channel = connection.create_channel().await.map_err(Error::Connect)?;
    info!("Connected to RabbitMQ successfully");
    Ok((connection, channel))
}

/// Declares a non-durable queue. Re-declaring an existing queue with the same properties is a no-op.
pub async fn declare_queue(channel: &Channel, name: &str) -> Result<(), Error> {
    let options = QueueDeclareOptions {
        passive: false,
        durable: false,
        exclusive: false,
        auto_delete: false,
        nowait: false,
    };
    channel
        .queue_declare(name, options, FieldTable::default())
        .await?;
    info!(queue = name, "Queue declared");
    Ok(())
}

/// Publishes `message` as pretty-printed JSON to `queue` through the default exchange.
pub async fn publish_json(
    channel: &Channel,
    queue: &str,
    message: &impl Serialize,
) -> Result<(), Error> {
    let payload = serde_json::to_vec_pretty(message).map_err(Error::Encode)?;

    channel
        .basic_publish(
            "",
            queue,
            BasicPublishOptions::default(),
            &payload,
            properties(),
        )
        .await?
        .await?;

    debug!(queue, bytes = payload.len(), "Published message");
    Ok(())
}

/// Closes the connection unless the broker already dropped it.
pub async fn close(connection: Connection) -> Result<(), Error> {
    if !connection.status().connected() {
        return Ok(());
    }
    connection.close(200, "OK").await?;
    info!("Connection closed");
    Ok(())
}

fn properties() -> BasicProperties {
    BasicProperties::default()
        .with_content_type(CONTENT_TYPE.into())
        .with_delivery_mode(NON_PERSISTENT)
}
