//! Module for the interactive producer publishing course records.

mod prompt;


use std::future::Future;
use std::io::Write;

use tracing::{debug, error, info, warn};

use crate::{Config, Error, domain::CourseRecord, transport};

pub use prompt::{ConsoleInput, LineSource, Lines, Prompter, parse_grades, read_course};

/// Connects to the broker and publishes course records typed on the console until the user stops or
/// presses Ctrl-C.
pub async fn run<R: LineSource, W: Write>(
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> Result<(), Error> {
    let (connection, channel) = transport::connect(config).await?;
    let queue = config.course_queue.as_str();

    let result = match transport::declare_queue(&channel, queue).await {
        Ok(()) => {
            let channel = &channel;
            let publish = move |course: CourseRecord| async move {
                transport::publish_json(channel, queue, &course).await?;
                info!(queue, "Sent message");
                debug!(?course, "Message content");
                Ok::<(), Error>(())
            };
            publish_until(prompter, publish, interrupted()).await
        }
        Err(err) => Err(err),
    };

    if let Err(err) = transport::close(connection).await {
        warn!("Failed to close the connection: {err}");
    }
    info!("Producer finished");
    result
}

/// Runs [`publish_loop`] until it ends on its own or `shutdown` completes, whichever comes first.
pub async fn publish_until<R, W, F, Fut>(
    prompter: &mut Prompter<R, W>,
    publish: F,
    shutdown: impl Future<Output = ()>,
) -> Result<(), Error>
where
    R: LineSource,
    W: Write,
    F: FnMut(CourseRecord) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    tokio::select! {
        biased;

        () = shutdown => Ok(()),
        result = publish_loop(prompter, publish) => result,
    }
}

/// Reads a course, hands it to `publish` and asks to continue, until the user declines or the input ends.
///
/// A failed iteration is logged and the user decides whether to retry, without any attempt limit.
pub async fn publish_loop<R, W, F, Fut>(
    prompter: &mut Prompter<R, W>,
    mut publish: F,
) -> Result<(), Error>
where
    R: LineSource,
    W: Write,
    F: FnMut(CourseRecord) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    loop {
        let attempt = match read_course(prompter).await {
            Ok(course) => publish(course).await,
            Err(err) => Err(err),
        };

        let question = match attempt {
            Ok(()) => {
                prompter.say("\nMessage sent successfully!")?;
                "\nSend another message?"
            }
            Err(Error::InputClosed) => break,
            Err(err) => {
                error!("Error in main loop: {err}");
                "\nTry again?"
            }
        };

        match prompter.confirm(question).await {
            Ok(true) => continue,
            Ok(false) | Err(Error::InputClosed) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupted by user"),
        Err(err) => {
            warn!("Failed to listen for the interrupt signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
