//! The closed set of logical collections and their identity fields.
//!
//! A collection's identity field is the canonical field whose value doubles as the
//! store's native document identifier. Collections without one always rely on
//! store-generated identifiers.

use std::{fmt, str::FromStr};

use crate::error::StoreError;

/// A logical partition of records in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Courses,
    Sessions,
    Enrollments,
    Purchases,
    Attendance,
    Notes,
    Videos,
    Payouts,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Courses,
        Collection::Sessions,
        Collection::Enrollments,
        Collection::Purchases,
        Collection::Attendance,
        Collection::Notes,
        Collection::Videos,
        Collection::Payouts,
    ];

    /// Returns the name of the collection in the store.
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Courses => "courses",
            Collection::Sessions => "sessions",
            Collection::Enrollments => "enrollments",
            Collection::Purchases => "purchases",
            Collection::Attendance => "attendance",
            Collection::Notes => "notes",
            Collection::Videos => "videos",
            Collection::Payouts => "payouts",
        }
    }

    /// Returns the canonical identity field, if the collection declares one.
    pub const fn identity_field(self) -> Option<&'static str> {
        match self {
            Collection::Users => Some("uid"),
            Collection::Courses => Some("course_id"),
            Collection::Sessions => Some("session_id"),
            Collection::Enrollments => Some("enrollment_id"),
            Collection::Purchases => Some("ticket_number"),
            Collection::Attendance
            | Collection::Notes
            | Collection::Videos
            | Collection::Payouts => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| StoreError::CollectionNotFound(s.to_string()))
    }
}
