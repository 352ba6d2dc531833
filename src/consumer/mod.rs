//! Module for the consumer: turning person messages into CSV rows, one delivery at a time.

mod orchestration;


use tracing::{debug, info};

use crate::{
    Error,
    domain::PersonRecord,
    input::decode_person,
    output::{CsvRow, CsvSink},
};

pub use orchestration::{run, run_until};

/// What to tell the broker about a delivery once it has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The row is on disk
    Acknowledge,
    /// Terminal negative acknowledgement, the broker drops the message without redelivering it
    Reject,
}

/// Validates a message body and appends it to `sink`.
///
/// Any failure, be it malformed JSON, a missing field or an I/O error while writing the row, is handed to
/// `on_error` and yields [`Disposition::Reject`]. A message is only acknowledged once its row has been
/// written, so a failed write can never be acknowledged silently.
pub fn handle_message(
    body: &[u8],
    sink: &CsvSink,
    mut on_error: impl FnMut(Error),
) -> Disposition {
    match persist(body, sink) {
        Ok(person) => {
            info!(
                first_name = %person.imie,
                last_name = %person.nazwisko,
                age = person.wiek,
                "Saved to CSV"
            );
            Disposition::Acknowledge
        }
        Err(err) => {
            on_error(err);
            Disposition::Reject
        }
    }
}

fn persist(body: &[u8], sink: &CsvSink) -> Result<PersonRecord, Error> {
    let person = decode_person(body)?;
    debug!(?person, "Parsed JSON data");
    sink.append(&CsvRow::from(&person))?;
    Ok(person)
}
