//! Equality conditions used to locate records.
//!
//! A [`Condition`] is an ordered list of `(canonical field, value)` pairs. All entries
//! must match (logical AND). Order matters only for single-record resolution, which
//! filters on the first entry.

use serde_json::Value;

use crate::value::Record;

/// A conjunctive set of exact-match constraints on canonical fields.
///
/// # Example
///
/// ```ignore
/// use docbridge::condition::Condition;
///
/// let condition = Condition::new()
///     .eq("course_id", "c1")
///     .eq("user_id", "u1");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    entries: Vec<(String, Value)>,
}

impl Condition {
    /// Creates an empty condition, which matches every record.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds an equality constraint. A second constraint on the same field replaces
    /// the first one in place.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value constrained for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    /// Returns the first constraint in insertion order.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.entries
            .first()
            .map(|(f, v)| (f.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(f, v)| (f.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Condition
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Condition::new(), |condition, (k, v)| condition.eq(k, v))
    }
}

/// Entries follow the record's key order, which is the order the keys were written in.
/// The first key is the one a single-record lookup falls back on.
impl From<Record> for Condition {
    fn from(record: Record) -> Self {
        record.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order_and_replaces_duplicates() {
        let condition = Condition::new()
            .eq("user_id", "u1")
            .eq("course_id", "c1")
            .eq("user_id", "u2");

        assert_eq!(condition.len(), 2);
        assert_eq!(condition.first(), Some(("user_id", &json!("u2"))));
        assert_eq!(condition.get("course_id"), Some(&json!("c1")));
        assert_eq!(condition.get("title"), None);
    }

    #[test]
    fn collects_from_pairs() {
        let condition = [("course_id", json!("c1")), ("price", json!(100))]
            .into_iter()
            .collect::<Condition>();

        assert_eq!(
            condition.iter().collect::<Vec<_>>(),
            vec![("course_id", &json!("c1")), ("price", &json!(100))],
        );
    }

    #[test]
    fn records_convert_in_key_order() {
        let record = match json!({ "user_id": "u1", "course_id": "c1" }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };

        assert_eq!(Condition::from(record).first(), Some(("user_id", &json!("u1"))));
    }
}
