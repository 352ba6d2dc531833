//! Module defining the decoding of queue message bodies into validated domain types.

use crate::domain::PersonRecord;
use crate::error::Error;


/// Decodes a person record from a raw message body.
///
/// Malformed JSON (including invalid UTF-8) is reported as [`Error::Decode`], while well-formed JSON lacking
/// one of the required fields, or carrying one with the wrong type, is reported as [`Error::InvalidRecord`].
pub fn decode_person(body: &[u8]) -> Result<PersonRecord, Error> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(Error::Decode)?;
    serde_json::from_value(value).map_err(Error::InvalidRecord)
}
