//! Module driving the broker side of the consumer: subscription, flow control and acknowledgements

use std::future::Future;

use futures::{Stream, StreamExt};
use lapin::{
    Channel, Consumer,
    message::Delivery,
    options::{BasicAckOptions, BasicConsumeOptions, BasicQosOptions, BasicRejectOptions},
    types::FieldTable,
};
use tracing::{error, info, warn};

use crate::{
    Config, Error,
    consumer::{Disposition, handle_message},
    output::CsvSink,
    transport,
};

const CONSUMER_TAG: &str = "queue-csv-bridge";
const PREFETCH_COUNT: u16 = 1;

/// A delivery waiting for its verdict: the message body plus the way to report the verdict to the broker.
pub(crate) trait Settle {
    fn body(&self) -> &[u8];

    fn settle(self, disposition: Disposition) -> impl Future<Output = Result<(), Error>>;
}

impl Settle for Delivery {
    fn body(&self) -> &[u8] {
        &self.data
    }

    async fn settle(self, disposition: Disposition) -> Result<(), Error> {
        match disposition {
            Disposition::Acknowledge => {
                self.acker.ack(BasicAckOptions::default()).await?;
            }
            Disposition::Reject => {
                self.acker.reject(reject_options()).await?;
            }
        }
        Ok(())
    }
}

// rejected messages are dropped by the broker, never redelivered
pub(crate) fn reject_options() -> BasicRejectOptions {
    BasicRejectOptions { requeue: false }
}

/// Runs the consumer until Ctrl-C is received or the broker ends the subscription.
pub async fn run(config: &Config) -> Result<(), Error> {
    run_until(config, interrupted()).await
}

/// Runs the consumer until `shutdown` completes or the broker ends the subscription.
///
/// The CSV file is initialized before connecting. On shutdown the message currently being handled is
/// finished first, then the connection is closed.
pub async fn run_until(config: &Config, shutdown: impl Future<Output = ()>) -> Result<(), Error> {
    let sink = CsvSink::new(&config.csv_path);
    sink.initialize()?;

    let (connection, channel) = transport::connect(config).await?;
    let result = match subscribe(&channel, &config.person_queue).await {
        Ok(deliveries) => {
            info!(queue = %config.person_queue, "Waiting for messages. Press CTRL+C to exit");
            let deliveries = deliveries.map(|delivery| delivery.map_err(Error::from));
            process_deliveries(deliveries, &sink, shutdown).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = transport::close(connection).await {
        warn!("Failed to close the connection: {err}");
    }
    result
}

async fn subscribe(channel: &Channel, queue: &str) -> Result<Consumer, Error> {
    transport::declare_queue(channel, queue).await?;

    // at most one unacknowledged delivery, so rows are written strictly one after another
    channel
        .basic_qos(PREFETCH_COUNT, BasicQosOptions::default())
        .await?;

    let deliveries = channel
        .basic_consume(
            queue,
            CONSUMER_TAG,
            BasicConsumeOptions::default(),
            FieldTable::default(),
        )
        .await?;
    Ok(deliveries)
}

/// Handles deliveries one at a time, settling each before pulling the next, until `shutdown` completes or the
/// stream ends. A failing stream or settlement stops the loop with that error.
pub(crate) async fn process_deliveries<S, D>(
    mut deliveries: S,
    sink: &CsvSink,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Error>
where
    S: Stream<Item = Result<D, Error>> + Unpin,
    D: Settle,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => break,
            next = deliveries.next() => {
                let Some(delivery) = next else {
                    info!("Delivery stream closed by the broker");
                    break;
                };
                let delivery = delivery?;
                info!("Received message");

                let disposition = handle_message(delivery.body(), sink, log_message_error);
                delivery.settle(disposition).await?;
            }
        }
    }

    Ok(())
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Consumer stopped by user"),
        Err(err) => {
            warn!("Failed to listen for the interrupt signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}

fn log_message_error(err: Error) {
    match err {
        Error::Decode(_) | Error::InvalidRecord(_) => error!("Rejecting malformed message: {err}"),
        other => error!("Rejecting message, it could not be saved: {other}"),
    }
}
