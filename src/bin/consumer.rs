use anyhow::Result;
use queue_csv_bridge::{Config, Error, consumer, setup_logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging()?;
    info!("Starting RabbitMQ consumer");

    let config = Config::from_env();
    if let Err(err) = consumer::run(&config).await {
        report(err);
    }
    Ok(())
}

// No distinct exit codes: failures are logged and the process ends normally
fn report(err: Error) {
    match err {
        Error::Connect(_) => {
            error!("Could not connect to RabbitMQ: {err}");
            error!("Make sure the RabbitMQ server is running");
        }
        other => error!("Unexpected error: {other}"),
    }
}
