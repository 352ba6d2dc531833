use anyhow::Result;
use queue_csv_bridge::{Config, Error, producer, setup_logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging()?;
    info!("Starting RabbitMQ producer");

    let config = Config::from_env();
    let mut prompter = producer::Prompter::new(producer::ConsoleInput::spawn(), std::io::stdout());

    match producer::run(&config, &mut prompter).await {
        Ok(()) => {}
        Err(err @ Error::Connect(_)) => {
            error!("Could not connect to RabbitMQ: {err}");
            error!("Make sure the RabbitMQ server is running");
        }
        Err(err) => error!("Unexpected error: {err}"),
    }
    Ok(())
}
