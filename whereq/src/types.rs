//! Filter descriptor types
//!
//! Defines the compiled filter descriptor and the comparison operators
//! recognized by the query-string mini-language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A compiled filter/sort/pagination/aggregate request.
///
/// `query` is a parameterized predicate with `?` placeholders; `args` holds
/// the matching values in placeholder order. The number of placeholders in
/// `query` always equals `args.len()`, whether the descriptor came from
/// [`parse`](crate::parse) or from the builder methods.
///
/// Pagination fields use zero to mean "unset". When both `limit`/`offset`
/// and `page`/`page_size` are present the descriptor carries both; deciding
/// which pair is authoritative is left to the consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// Parameterized WHERE predicate, e.g. `(status = ?) AND (age >= ?)`.
    pub query: String,
    /// Values for the `?` placeholders, in order.
    pub args: Vec<String>,
    /// Association names to eager-load, in order. Duplicates allowed.
    pub preload: Vec<String>,
    /// Ascending sort field, at most one per query.
    pub order_by_asc: Option<String>,
    /// Descending sort field, at most one per query.
    pub order_by_desc: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub page: usize,
    pub page_size: usize,
    /// Aggregate function name to the ordered fields it applies to.
    pub aggregates: BTreeMap<String, Vec<String>>,
}

impl FilterQuery {
    /// An empty descriptor: no predicate, no directives.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the descriptor carries no predicate.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty()
    }
}

/// Comparison operator selected by the `__` suffix of a condition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Ne,
    Not,
}

impl CompareOp {
    /// Map an operator suffix to its comparison operator.
    ///
    /// Unrecognized suffixes fall back to equality, the same as a key with
    /// no suffix at all.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Self {
        match suffix {
            "gt" => Self::Gt,
            "gte" => Self::Gte,
            "lt" => Self::Lt,
            "lte" => Self::Lte,
            "ne" => Self::Ne,
            "not" => Self::Not,
            _ => Self::Eq,
        }
    }

    /// The SQL rendering of the operator.
    ///
    /// `Not` renders as the bare keyword `NOT` rather than an infix
    /// operator; downstream consumers rely on that exact spelling.
    #[must_use]
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Ne => "!=",
            Self::Not => "NOT",
        }
    }
}
