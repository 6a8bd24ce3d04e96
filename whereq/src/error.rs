//! Parse error types

use thiserror::Error;

/// Errors from compiling a filter query string.
///
/// Only recognized numeric keys can fail compilation; malformed condition
/// fragments are dropped silently (see crate docs).
#[derive(Error, Debug)]
pub enum ParseError {
    /// A pagination key (`limit`, `offset`, `page`, `pageSize`) carried a
    /// value that is not a non-negative base-10 integer.
    #[error("invalid value for `{key}`: `{value}` is not a non-negative integer")]
    InvalidCount {
        key: &'static str,
        value: String,
        source: std::num::ParseIntError,
    },
}
