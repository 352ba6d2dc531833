//! Module for the CSV sink the consumer appends person rows to.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::domain::PersonRecord;
use crate::error::Error;


pub const DELIMITER: u8 = b';';
pub const HEADER: [&str; 4] = ["wiek", "nazwisko", "imie", "jezyki_posortowane"];

/// One persisted row. The field order is the column order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub wiek: i64,
    pub nazwisko: String,
    pub imie: String,
    pub jezyki_posortowane: String,
}

impl From<&PersonRecord> for CsvRow {
    fn from(person: &PersonRecord) -> Self {
        Self {
            wiek: person.wiek,
            nazwisko: person.nazwisko.clone(),
            imie: person.imie.clone(),
            jezyki_posortowane: person.languages_display(),
        }
    }
}

/// Append-only CSV file. Every write opens, appends to and closes the file, so each row is on disk once
/// [`CsvSink::append`] returns.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with its header row if it does not exist yet. A populated file is left untouched.
    pub fn initialize(&self) -> Result<(), Error> {
        let (_, created) = self.open_with_header()?;
        if created {
            info!(path = %self.path.display(), "Created CSV file");
        }
        Ok(())
    }

    /// Appends a single row, writing the header first if the file is still empty.
    pub fn append(&self, row: &CsvRow) -> Result<(), Error> {
        let (file, _) = self.open_with_header()?;
        let mut wtr = writer(file);
        wtr.serialize(row)?;
        wtr.flush()?;
        Ok(())
    }

    // Returns the file opened for appending and whether the header had to be written
    fn open_with_header(&self) -> Result<(std::fs::File, bool), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if file.metadata()?.len() > 0 {
            return Ok((file, false));
        }

        let mut wtr = writer(&mut file);
        wtr.write_record(HEADER)?;
        wtr.flush()?;
        drop(wtr);
        file.flush()?;
        Ok((file, true))
    }
}

fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(inner)
}
