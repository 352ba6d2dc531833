//! Course records published by the interactive producer

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// Format of the `data_godzina` stamp, e.g. `16.10.2026 14:05:09`
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub nazwa_przedmiotu: String,
    pub liczba_ects: u64,
    /// Grades in the order they were typed
    pub lista_ocen: Vec<f64>,
    pub data_godzina: String,
}

impl CourseRecord {
    pub fn new<Tz>(
        subject_name: impl Into<String>,
        ects_credits: u64,
        grades: Vec<f64>,
        now: DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            nazwa_przedmiotu: subject_name.into(),
            liczba_ects: ects_credits,
            lista_ocen: grades,
            data_godzina: now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Stamps the record with the current local date and time
    pub fn stamped_now(
        subject_name: impl Into<String>,
        ects_credits: u64,
        grades: Vec<f64>,
    ) -> Self {
        Self::new(subject_name, ects_credits, grades, Local::now())
    }
}
