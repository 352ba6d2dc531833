//! Module holding the runtime configuration shared by the consumer, the producer and the test publisher.
//!
//! The configuration is read once at start-up and then passed explicitly to each component.


pub const DEFAULT_AMQP_ADDR: &str = "amqp://localhost:5672/%2f";
pub const DEFAULT_PERSON_QUEUE: &str = "testowa";
pub const DEFAULT_COURSE_QUEUE: &str = "przedmioty";
pub const DEFAULT_CSV_PATH: &str = "dane.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AMQP URI of the broker
    pub amqp_addr: String,
    /// Queue carrying person records, read by the consumer and fed by the test publisher
    pub person_queue: String,
    /// Queue carrying course records, fed by the producer
    pub course_queue: String,
    /// CSV file the consumer appends to
    pub csv_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            amqp_addr: DEFAULT_AMQP_ADDR.to_string(),
            person_queue: DEFAULT_PERSON_QUEUE.to_string(),
            course_queue: DEFAULT_COURSE_QUEUE.to_string(),
            csv_path: DEFAULT_CSV_PATH.to_string(),
        }
    }
}

impl Config {
    /// Reads `AMQP_ADDR`, `PERSON_QUEUE`, `COURSE_QUEUE` and `CSV_PATH`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            amqp_addr: get("AMQP_ADDR", DEFAULT_AMQP_ADDR),
            person_queue: get("PERSON_QUEUE", DEFAULT_PERSON_QUEUE),
            course_queue: get("COURSE_QUEUE", DEFAULT_COURSE_QUEUE),
            csv_path: get("CSV_PATH", DEFAULT_CSV_PATH),
        }
    }
}
