//! Module for the record types travelling over the queues.

mod course;
mod person;

pub use course::{CourseRecord, TIMESTAMP_FORMAT};
pub use person::PersonRecord;

/// The three person records injected by the test publisher, in publishing order.
pub fn sample_people() -> [PersonRecord; 3] {
    [
        PersonRecord::new("Jan", "Kowalski", 30, ["francuski", "angielski", "niemiecki"]),
        PersonRecord::new("Anna", "Nowak", 25, ["angielski", "hiszpański"]),
        PersonRecord::new(
            "Piotr",
            "Wiśniewski",
            35,
            ["niemiecki", "rosyjski", "angielski", "chiński"],
        ),
    ]
}
