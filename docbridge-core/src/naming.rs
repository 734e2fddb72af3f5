//! Field-name translation between canonical snake_case and store-native camelCase.
//!
//! The alias table is a closed enumeration generated by [`field_aliases!`], so every
//! lookup is a `match` the compiler checks. Fields missing from the table pass through
//! unchanged in both directions. Only top-level keys are renamed; nested objects keep
//! their keys as written.

use bson::Document;
use serde_json::Value;

use crate::{
    error::StoreResult,
    value::{Record, to_canonical_value, to_native_value},
};

macro_rules! field_aliases {
    ($($variant:ident => $canonical:literal <=> $native:literal),* $(,)?) => {
        /// A field whose canonical and store-native names differ.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum FieldAlias {
            $($variant,)*
        }

        impl FieldAlias {
            /// Every entry of the alias table.
            pub const ALL: &'static [FieldAlias] = &[$(FieldAlias::$variant,)*];

            /// The snake_case name callers use.
            pub const fn canonical(self) -> &'static str {
                match self {
                    $(FieldAlias::$variant => $canonical,)*
                }
            }

            /// The camelCase name the store uses.
            pub const fn native(self) -> &'static str {
                match self {
                    $(FieldAlias::$variant => $native,)*
                }
            }

            pub fn from_canonical(name: &str) -> Option<Self> {
                match name {
                    $($canonical => Some(FieldAlias::$variant),)*
                    _ => None,
                }
            }

            pub fn from_native(name: &str) -> Option<Self> {
                match name {
                    $($native => Some(FieldAlias::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

field_aliases! {
    CourseId => "course_id" <=> "courseId",
    SessionId => "session_id" <=> "sessionId",
    UserId => "user_id" <=> "userId",
    StartTime => "start_time" <=> "startTime",
    EndTime => "end_time" <=> "endTime",
    TotalSeats => "total_seats" <=> "totalSeats",
    InstructorId => "instructor_id" <=> "instructorId",
    CreatedAt => "created_at" <=> "createdAt",
    UpdatedAt => "updated_at" <=> "updatedAt",
    EnrolledAt => "enrolled_at" <=> "enrolledAt",
    PurchasedAt => "purchased_at" <=> "purchasedAt",
    MarkedAt => "marked_at" <=> "markedAt",
    PaymentMethod => "payment_method" <=> "paymentMethod",
    PaymentId => "payment_id" <=> "paymentId",
    TicketNumber => "ticket_number" <=> "ticketNumber",
    AmountOwed => "amount_owed" <=> "amountOwed",
    AmountPaid => "amount_paid" <=> "amountPaid",
    PaymentReference => "payment_reference" <=> "paymentReference",
    PaidBy => "paid_by" <=> "paidBy",
    PaidAt => "paid_at" <=> "paidAt",
    FileUrl => "file_url" <=> "fileUrl",
    VideoUrl => "video_url" <=> "videoUrl",
    EnrollmentId => "enrollment_id" <=> "enrollmentId",
}

/// Returns the store-native name for a canonical field name.
pub fn native_field_name(name: &str) -> &str {
    FieldAlias::from_canonical(name)
        .map(FieldAlias::native)
        .unwrap_or(name)
}

/// Returns the canonical name for a store-native field name.
pub fn canonical_field_name(name: &str) -> &str {
    FieldAlias::from_native(name)
        .map(FieldAlias::canonical)
        .unwrap_or(name)
}

/// Translates a canonical record into a store-native document.
///
/// Keys with an alias are renamed, all other keys are kept. Values are converted
/// into the store's value tree.
pub fn to_store_native(record: Record) -> StoreResult<Document> {
    record
        .into_iter()
        .map(|(key, value)| {
            let key = native_field_name(&key).to_string();
            to_native_value(value).map(|bson| (key, bson))
        })
        .collect()
}

/// Translates a store-native document into a canonical record.
///
/// Timestamps anywhere in the tree are converted to ISO-8601 strings first. Then
/// every aliased native key is renamed to its canonical form; when a document holds
/// both spellings of a field, the native one wins.
pub fn to_canonical(native: Document) -> Record {
    let mut record = Record::new();
    let mut aliased: Vec<(FieldAlias, Value)> = Vec::new();

    for (key, value) in native {
        let value = to_canonical_value(value);

        match FieldAlias::from_native(&key) {
            Some(alias) => aliased.push((alias, value)),
            None => {
                record.insert(key, value);
            }
        }
    }

    for (alias, value) in aliased {
        record.insert(alias.canonical().to_string(), value);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{Bson, doc};
    use serde_json::json;
    use std::collections::HashSet;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn alias_table_is_injective() {
        let canonical = FieldAlias::ALL
            .iter()
            .map(|a| a.canonical())
            .collect::<HashSet<_>>();
        let native = FieldAlias::ALL
            .iter()
            .map(|a| a.native())
            .collect::<HashSet<_>>();

        assert_eq!(FieldAlias::ALL.len(), 23);
        assert_eq!(canonical.len(), FieldAlias::ALL.len());
        assert_eq!(native.len(), FieldAlias::ALL.len());
        assert!(canonical.is_disjoint(&native));
    }

    #[test]
    fn every_alias_round_trips() {
        for alias in FieldAlias::ALL {
            for value in [json!("v"), json!(42), json!(null), json!({ "courseId": [1, 2] })] {
                let original = record(json!({ alias.canonical(): value }));

                let native = to_store_native(original.clone()).unwrap();
                assert!(native.contains_key(alias.native()));
                assert!(!native.contains_key(alias.canonical()));

                assert_eq!(to_canonical(native), original);
            }
        }
    }

    #[test]
    fn unmapped_fields_pass_through_both_ways() {
        assert_eq!(native_field_name("title"), "title");
        assert_eq!(canonical_field_name("title"), "title");
        assert_eq!(native_field_name("uid"), "uid");

        let original = record(json!({ "title": "Intro", "uid": "u1", "price": 100 }));
        let native = to_store_native(original.clone()).unwrap();

        assert_eq!(native, doc! { "price": 100_i64, "title": "Intro", "uid": "u1" });
        assert_eq!(to_canonical(native), original);
    }

    #[test]
    fn nested_keys_are_not_renamed() {
        let native = to_store_native(record(json!({
            "schedule": { "start_time": "09:00" },
        })))
        .unwrap();

        assert_eq!(native, doc! { "schedule": { "start_time": "09:00" } });
    }

    #[test]
    fn canonical_form_converts_timestamps_before_renaming() {
        let native = doc! {
            "createdAt": Bson::DateTime(bson::DateTime::from_millis(0)),
            "title": "Intro",
        };

        assert_eq!(
            Value::Object(to_canonical(native)),
            json!({ "created_at": "1970-01-01T00:00:00.000Z", "title": "Intro" }),
        );
    }

    #[test]
    fn native_spelling_wins_when_both_are_stored() {
        let native = doc! { "course_id": "stale", "courseId": "c1" };

        assert_eq!(Value::Object(to_canonical(native)), json!({ "course_id": "c1" }));
    }
}
