//! Query expression evaluation for in-memory document filtering.

use bson::{Bson, Document};

use docbridge_core::{
    query::{QueryVisitor, Expr},
    error::{StoreError, StoreResult},
};


/// Numeric value of a BSON number, widened to f64.
fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Equality as the remote store applies it. Numbers compare by value across widths
/// and documents ignore key order. BSON-only scalars such as binary never match.
pub(crate) fn values_equal(left: &Bson, right: &Bson) -> bool {
    if let (Some(l), Some(r)) = (as_number(left), as_number(right)) {
        return l == r;
    }

    match (left, right) {
        (Bson::Null, Bson::Null) => true,
        (Bson::Boolean(l), Bson::Boolean(r)) => l == r,
        (Bson::String(l), Bson::String(r)) => l == r,
        (Bson::DateTime(l), Bson::DateTime(r)) => l == r,
        (Bson::ObjectId(l), Bson::ObjectId(r)) => l == r,
        (Bson::Array(l), Bson::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        }
        (Bson::Document(l), Bson::Document(r)) => {
            l.len() == r.len()
                && l.iter().all(|(key, l)| r.get(key).is_some_and(|r| values_equal(l, r)))
        }
        _ => false,
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> StoreResult<bool> {
        self.visit_expr(expr)
    }

    /// Returns whether `document` satisfies `expr`.
    pub fn matches(document: &'a Document, expr: &Expr) -> bool {
        DocumentEvaluator::new(document)
            .evaluate(expr)
            .unwrap_or(false)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = StoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        // A missing field only matches an explicit null.
        Ok(match self.document.get(field) {
            Some(field_value) => values_equal(field_value, value),
            None => matches!(value, Bson::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use docbridge_core::query::Filter;

    #[test]
    fn numbers_compare_across_widths() {
        let document = doc! { "totalSeats": 30_i32 };

        assert!(DocumentEvaluator::matches(&document, &Filter::eq("totalSeats", 30_i64)));
        assert!(DocumentEvaluator::matches(&document, &Filter::eq("totalSeats", 30.0)));
        assert!(!DocumentEvaluator::matches(&document, &Filter::eq("totalSeats", 31_i64)));
    }

    #[test]
    fn conjunction_requires_every_field() {
        let document = doc! { "courseId": "c1", "userId": "u1" };

        assert!(DocumentEvaluator::matches(
            &document,
            &Filter::and([Filter::eq("courseId", "c1"), Filter::eq("userId", "u1")]),
        ));
        assert!(!DocumentEvaluator::matches(
            &document,
            &Filter::and([Filter::eq("courseId", "c1"), Filter::eq("userId", "u2")]),
        ));
    }

    #[test]
    fn nested_documents_ignore_key_order() {
        let document = doc! { "details": { "bank_name": "First", "account_id": "acc_1" } };

        assert!(DocumentEvaluator::matches(
            &document,
            &Filter::eq("details", doc! { "account_id": "acc_1", "bank_name": "First" }),
        ));
        assert!(!DocumentEvaluator::matches(
            &document,
            &Filter::eq("details", doc! { "account_id": "acc_1" }),
        ));
    }

    #[test]
    fn missing_field_matches_only_null() {
        let document = doc! { "title": "Intro" };

        assert!(DocumentEvaluator::matches(&document, &Filter::eq("price", Bson::Null)));
        assert!(!DocumentEvaluator::matches(&document, &Filter::eq("price", 0_i64)));
    }
}
