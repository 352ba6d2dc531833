use anyhow::Result;
use queue_csv_bridge::{Config, Error, publish_fixtures, setup_logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging()?;
    info!("Starting test publisher");

    let config = Config::from_env();
    match publish_fixtures(&config).await {
        Ok(sent) => println!("\nSent {sent} test messages!"),
        Err(err @ Error::Connect(_)) => {
            error!("Could not connect to RabbitMQ: {err}");
            error!("Make sure the RabbitMQ server is running");
        }
        Err(err) => error!("Unexpected error: {err}"),
    }

    info!("Test publisher finished");
    Ok(())
}
