//! Bridge between a RabbitMQ broker and flat files.
//!
//! The crate ships three small programs sharing this library:
//!
//! - `consumer` reads person records (JSON) from the person queue, sorts their languages and appends one
//!   `;`-delimited row per record to a CSV file. Malformed messages are rejected without requeueing.
//! - `producer` asks for course details on the console and publishes them as JSON to the course queue.
//! - `test-publisher` pushes three fixed person records to the person queue to exercise the consumer.
//!
//! Everything runs strictly one message at a time. The broker address, queue names and CSV path come from a
//! [`Config`] built once at start-up.
//!
//! # Example
//!
//! The validate-and-persist step of the consumer can be driven without a broker:
//!
//! ```no_run
//! use queue_csv_bridge::{CsvSink, Disposition, handle_message};
//!
//! let sink = CsvSink::new("dane.csv");
//! sink.initialize().unwrap();
//!
//! let body = br#"{"imie":"Jan","nazwisko":"Kowalski","wiek":30,"jezyki_obce":["francuski","angielski"]}"#;
//! let disposition = handle_message(body, &sink, |e| eprintln!("rejected: {e}"));
//! assert_eq!(disposition, Disposition::Acknowledge);
//! ```

mod config;
pub mod consumer;
mod domain;
mod error;
mod input;
mod output;
pub mod producer;
mod publisher;
mod telemetry;
pub mod transport;

pub use config::Config;
pub use consumer::{Disposition, handle_message};
pub use domain::{CourseRecord, PersonRecord, TIMESTAMP_FORMAT, sample_people};
pub use error::Error;
pub use input::decode_person;
pub use output::{CsvRow, CsvSink, HEADER};
pub use publisher::publish_fixtures;
pub use telemetry::setup_logging;
