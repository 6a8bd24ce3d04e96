//! # whereq
//!
//! Query-string filter compiler: parses a compact URL-style mini-language
//! into a [`FilterQuery`] — a parameterized predicate with positional
//! arguments plus sort, pagination, preload, and aggregate directives —
//! ready to hand to whatever data-access layer renders it into a real query.
//!
//! ## The mini-language
//!
//! Clauses are separated by `&`, alternatives within a clause by `|`, and a
//! `__` key suffix selects the comparison operator:
//!
//! ```
//! let f = whereq::parse("status=active|status=pending&age__gte=21&with_team&limit=50").unwrap();
//!
//! assert_eq!(f.query, "(status = ? OR status = ?) AND (age >= ?)");
//! assert_eq!(f.args, vec!["active", "pending", "21"]);
//! assert_eq!(f.preload, vec!["team"]);
//! assert_eq!(f.limit, 50);
//! ```
//!
//! Descriptors can also be assembled programmatically with the builder
//! methods on [`FilterQuery`]; both paths produce identically shaped
//! descriptors.
//!
//! ## Leniency
//!
//! Condition fragments without an `=` separator are dropped silently (logged
//! at debug level via `tracing`) rather than rejected — a filter compiled
//! from a mistyped fragment matches *more* rows than intended, never fails.
//! The only hard error is a non-integer value on `limit`, `offset`, `page`,
//! or `pageSize`. Field names are not validated against any schema; that is
//! the caller's responsibility.

mod builder;
mod error;
mod parser;
mod types;

pub use error::ParseError;
pub use parser::parse;
pub use types::{CompareOp, FilterQuery};
