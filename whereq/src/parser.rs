//! Query-string parsing
//!
//! Compiles the URL-style filter mini-language into a [`FilterQuery`].
//! Clauses are separated by `&`, alternatives within a clause by `|`, and
//! comparison operators are selected with a `__` key suffix:
//!
//! ```text
//! status=active&age__gte=21|role=admin&with_team&orderByASC=name&limit=50
//! ```
//!
//! Malformed condition fragments (no `=`) are dropped, not rejected; the
//! only hard failure is a non-integer value on a numeric pagination key.

use crate::error::ParseError;
use crate::types::{CompareOp, FilterQuery};

const AGGREGATE_PREFIX: &str = "agg__";
const PRELOAD_PREFIX: &str = "with_";

/// Clause prefixes reserved for caller-side flags. Never compiled.
const IGNORED_PREFIXES: &[&str] = &["useData", "useCache"];

/// Compile a raw query string into a [`FilterQuery`].
///
/// Each `&`-separated clause is tested in order as: aggregate directive
/// (`agg__fn=a|b`), empty, ignore marker, preload directive (`with_assoc`),
/// recognized sort/pagination key, and finally an OR-group of
/// `field[__op]=value` conditions. OR-groups are parenthesized and joined
/// with ` AND `; values are carried as opaque strings in placeholder order.
///
/// # Errors
///
/// Returns [`ParseError::InvalidCount`] when `limit`, `offset`, `page`, or
/// `pageSize` has a value that does not parse as a non-negative integer.
/// Everything else malformed is skipped silently (logged at debug level).
pub fn parse(raw: &str) -> Result<FilterQuery, ParseError> {
    let mut filter = FilterQuery::new();

    for clause in raw.split('&') {
        if let Some(directive) = clause.strip_prefix(AGGREGATE_PREFIX) {
            parse_aggregate(directive, &mut filter);
            continue;
        }
        if clause.is_empty() {
            continue;
        }
        if IGNORED_PREFIXES.iter().any(|p| clause.starts_with(p)) {
            continue;
        }
        if clause.starts_with(PRELOAD_PREFIX) {
            for assoc in clause.split('|') {
                let assoc = assoc.strip_prefix(PRELOAD_PREFIX).unwrap_or(assoc);
                filter.preload.push(assoc.to_string());
            }
            continue;
        }
        if let Some((key, value)) = clause.split_once('=') {
            match key {
                "orderByASC" => {
                    filter.order_by_asc = Some(value.to_string());
                    continue;
                }
                "orderByDESC" => {
                    filter.order_by_desc = Some(value.to_string());
                    continue;
                }
                "limit" => {
                    filter.limit = parse_count("limit", value)?;
                    continue;
                }
                "offset" => {
                    filter.offset = parse_count("offset", value)?;
                    continue;
                }
                "page" => {
                    filter.page = parse_count("page", value)?;
                    continue;
                }
                "pageSize" => {
                    filter.page_size = parse_count("pageSize", value)?;
                    continue;
                }
                _ => {}
            }
        }
        parse_or_group(clause, &mut filter);
    }

    Ok(filter)
}

/// Record an `agg__fn=a|b` directive. A repeated function name replaces the
/// earlier field list.
fn parse_aggregate(directive: &str, filter: &mut FilterQuery) {
    let Some((func, fields)) = directive.split_once('=') else {
        tracing::debug!(fragment = directive, "dropping aggregate directive without `=`");
        return;
    };
    let fields = fields.split('|').map(str::to_string).collect();
    filter.aggregates.insert(func.to_string(), fields);
}

/// Compile one clause of `|`-separated conditions into a parenthesized
/// OR-group appended to the predicate. Fragments without `=` contribute
/// nothing; a clause with no valid fragment contributes no group at all.
fn parse_or_group(clause: &str, filter: &mut FilterQuery) {
    let mut fragments = Vec::new();
    let mut args = Vec::new();

    for piece in clause.split('|') {
        let Some((key, value)) = piece.split_once('=') else {
            tracing::debug!(fragment = piece, "dropping filter fragment without `=`");
            continue;
        };
        let (field, op) = match key.split_once("__") {
            Some((field, suffix)) => (field, CompareOp::from_suffix(suffix)),
            None => (key, CompareOp::Eq),
        };
        fragments.push(format!("{field} {} ?", op.sql()));
        args.push(value.to_string());
    }

    if fragments.is_empty() {
        return;
    }

    let group = format!("({})", fragments.join(" OR "));
    if filter.query.is_empty() {
        filter.query = group;
    } else {
        filter.query.push_str(" AND ");
        filter.query.push_str(&group);
    }
    filter.args.extend(args);
}

fn parse_count(key: &'static str, value: &str) -> Result<usize, ParseError> {
    value.parse().map_err(|source| ParseError::InvalidCount {
        key,
        value: value.to_string(),
        source,
    })
}
