//! Module defining the errors which are exposed to the users of the crate

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The broker could not be reached or refused the connection
    #[error("could not connect to the broker: {0}")]
    Connect(#[source] lapin::Error),

    /// Failure reported by the broker on an open connection (declare, publish, ack)
    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),

    /// Message body which is not valid JSON
    #[error("invalid JSON format: {0}")]
    Decode(#[source] serde_json::Error),

    /// Valid JSON with a missing or mistyped required field
    #[error("invalid record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    /// A record which cannot be serialized for publishing
    #[error("JSON encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Failure while writing the CSV sink
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The console input ended while a prompt was waiting for an answer
    #[error("input closed")]
    InputClosed,

    /// A value typed by the user which cannot be accepted
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub(crate) fn invalid_input(message: impl Into<String>) -> Error {
    Error::InvalidInput(message.into())
}
