//! Store-level query construction.
//!
//! Queries are expressed over store-native field names and BSON values. Only
//! conjunctive equality filters and a result limit are supported, which is the full
//! query capability the adapter needs from a backend.
//!
//! ```ignore
//! use docbridge::query::{Query, Filter};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq("courseId", "c1").and(Filter::eq("userId", "u1")))
//!     .limit(1)
//!     .build();
//! ```
//!
//! Backends consume the filter through a [`QueryVisitor`].

use bson::Bson;

use crate::error::StoreError;

/// A filter expression for querying documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Exact match of a store-native field against a value.
    Eq {
        /// The store-native field name.
        field: String,
        /// The value to compare against.
        value: Bson,
    },
}

impl Expr {
    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// Helper for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field equals the specified value.
    pub fn eq(field: impl Into<String>, value: impl Into<Bson>) -> Expr {
        Expr::Eq { field: field.into(), value: value.into() }
    }

    /// Matches documents satisfying every expression.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }
}

/// A structured query: an optional filter and an optional result limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Optional filter expression to match documents.
    pub filter: Option<Expr>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl Query {
    /// Creates a new empty query matching every document.
    pub fn new() -> Self {
        Query { filter: None, limit: None }
    }

    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter expression for this query.
    pub fn filter(mut self, filter: Expr) -> Self {
        self.query.filter = Some(filter);
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.query.limit = Some(limit);
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

pub trait QueryVisitor {
    type Output;
    type Error: Into<StoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Eq { field, value } => self.visit_eq(field, value),
        }
    }
}
