//! Person records consumed from the person queue

use serde::{Deserialize, Serialize};

/// A person as published on the person queue. Keys outside the four known ones are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub imie: String,
    pub nazwisko: String,
    pub wiek: i64,
    pub jezyki_obce: Vec<String>,
}

impl PersonRecord {
    pub fn new<L: Into<String>>(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
        languages: impl IntoIterator<Item = L>,
    ) -> Self {
        Self {
            imie: first_name.into(),
            nazwisko: last_name.into(),
            wiek: age,
            jezyki_obce: languages.into_iter().map(Into::into).collect(),
        }
    }

    /// Languages in case-sensitive lexicographic order
    pub fn sorted_languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.jezyki_obce.iter().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Sorted languages rendered as `[a, b, c]`
    pub fn languages_display(&self) -> String {
        format!("[{}]", self.sorted_languages().join(", "))
    }
}
