//! Query translation from docbridge filters to MongoDB query syntax.

use bson::{Document, Bson, doc};

use docbridge_core::{
    query::{QueryVisitor, Expr},
    error::StoreError,
};


/// Translates docbridge filter expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = StoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        if exprs.is_empty() {
            return Ok(doc! {});
        }

        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$eq": value },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbridge_core::query::Filter;

    #[test]
    fn equality_filters_become_an_and_of_eq_clauses() {
        let expr = Filter::and([Filter::eq("courseId", "c1"), Filter::eq("userId", "u1")]);

        assert_eq!(
            MongoQueryTranslator.visit_expr(&expr).unwrap(),
            doc! {
                "$and": [
                    { "courseId": { "$eq": "c1" } },
                    { "userId": { "$eq": "u1" } },
                ],
            },
        );
    }

    #[test]
    fn empty_conjunction_matches_everything() {
        assert_eq!(MongoQueryTranslator.visit_expr(&Filter::and([])).unwrap(), doc! {});
    }
}
