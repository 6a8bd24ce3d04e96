//! Programmatic filter construction
//!
//! A value-returning builder over [`FilterQuery`] for callers that assemble
//! filters in code rather than parsing a query string. Every method consumes
//! the descriptor and returns the extended one, so a descriptor can be
//! cloned and branched without shared mutation.
//!
//! The comparison helpers append parenthesized AND-groups, which keeps
//! builder-made descriptors shaped exactly like parsed ones:
//!
//! ```
//! use whereq::FilterQuery;
//!
//! let built = FilterQuery::new().eq("a", "1").gt("b", "2");
//! let parsed = whereq::parse("a=1&b__gt=2").unwrap();
//! assert_eq!(built, parsed);
//! ```

use crate::types::FilterQuery;

impl FilterQuery {
    /// Set the base predicate and arguments, replacing any prior predicate.
    #[must_use]
    pub fn condition<I, S>(mut self, query: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query = query.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append a raw sub-clause with ` AND `. An empty predicate takes the
    /// clause as its base instead.
    #[must_use]
    pub fn and<I, S>(self, clause: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.join(" AND ", clause, args)
    }

    /// Append a raw sub-clause with ` OR `. An empty predicate takes the
    /// clause as its base instead.
    #[must_use]
    pub fn or<I, S>(self, clause: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.join(" OR ", clause, args)
    }

    #[must_use]
    pub fn eq(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "=", value)
    }

    #[must_use]
    pub fn ne(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "!=", value)
    }

    #[must_use]
    pub fn gt(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, ">", value)
    }

    #[must_use]
    pub fn gte(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, ">=", value)
    }

    #[must_use]
    pub fn lt(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "<", value)
    }

    #[must_use]
    pub fn lte(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "<=", value)
    }

    /// Append `field LIKE ?` with the pattern passed through verbatim. The
    /// caller owns any wildcard placement and escaping; see [`contains`]
    /// for the escaped substring form.
    ///
    /// [`contains`]: FilterQuery::contains
    #[must_use]
    pub fn like(self, field: &str, pattern: impl Into<String>) -> Self {
        self.compare(field, "LIKE", pattern)
    }

    /// Append a substring match: `field LIKE ?` with the value escaped
    /// (`%`, `_`, `\`) and wrapped in `%…%`, so user input cannot smuggle
    /// wildcards into the pattern.
    #[must_use]
    pub fn contains(self, field: &str, substring: &str) -> Self {
        let pattern = format!("%{}%", escape_like(substring));
        self.compare(field, "LIKE", pattern)
    }

    #[must_use]
    pub fn is(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "IS", value)
    }

    #[must_use]
    pub fn is_not(self, field: &str, value: impl Into<String>) -> Self {
        self.compare(field, "IS NOT", value)
    }

    /// Append `LENGTH(field) > ?`.
    #[must_use]
    pub fn length_gt(self, field: &str, len: usize) -> Self {
        self.and_group(format!("LENGTH({field}) > ?"), [len.to_string()])
    }

    /// Append `field >= ? AND field <= ?` with the two bounds as arguments.
    #[must_use]
    pub fn date_range(
        self,
        field: &str,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.and_group(
            format!("{field} >= ? AND {field} <= ?"),
            [start.into(), end.into()],
        )
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn order_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by_asc = Some(field.into());
        self
    }

    #[must_use]
    pub fn order_desc(mut self, field: impl Into<String>) -> Self {
        self.order_by_desc = Some(field.into());
        self
    }

    /// Append one association name to the preload list.
    #[must_use]
    pub fn preload(mut self, assoc: impl Into<String>) -> Self {
        self.preload.push(assoc.into());
        self
    }

    /// Record an aggregate function over the given fields. A repeated
    /// function name replaces the earlier field list, like the parser.
    #[must_use]
    pub fn aggregate<I, S>(mut self, func: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregates
            .insert(func.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    fn compare(self, field: &str, op: &str, value: impl Into<String>) -> Self {
        self.and_group(format!("{field} {op} ?"), [value.into()])
    }

    fn and_group<I>(mut self, fragment: String, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let group = format!("({fragment})");
        if self.query.is_empty() {
            self.query = group;
        } else {
            self.query.push_str(" AND ");
            self.query.push_str(&group);
        }
        self.args.extend(args);
        self
    }

    fn join<I, S>(mut self, sep: &str, clause: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.query.is_empty() {
            self.query = clause.to_string();
        } else {
            self.query.push_str(sep);
            self.query.push_str(clause);
        }
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Escape SQL LIKE metacharacters (`%`, `_`, `\`) in user input.
fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn placeholder_count(query: &str) -> usize {
        query.matches('?').count()
    }

    #[test]
    fn comparison_helpers_match_parsed_output() {
        let built = FilterQuery::new().eq("a", "1").gt("b", "2");
        let parsed = parse("a=1&b__gt=2").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn all_comparison_helpers() {
        let f = FilterQuery::new()
            .eq("a", "1")
            .ne("b", "2")
            .gt("c", "3")
            .gte("d", "4")
            .lt("e", "5")
            .lte("f", "6");
        assert_eq!(
            f.query,
            "(a = ?) AND (b != ?) AND (c > ?) AND (d >= ?) AND (e < ?) AND (f <= ?)"
        );
        assert_eq!(f.args, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn base_condition_replaces_predicate() {
        let f = FilterQuery::new()
            .eq("a", "1")
            .condition("b = ?", ["2"]);
        assert_eq!(f.query, "b = ?");
        assert_eq!(f.args, vec!["2"]);
    }

    #[test]
    fn raw_and_or_clauses() {
        let f = FilterQuery::new()
            .condition("a = ?", ["1"])
            .and("b > ?", ["2"])
            .or("c IS NULL", Vec::<String>::new());
        assert_eq!(f.query, "a = ? AND b > ? OR c IS NULL");
        assert_eq!(f.args, vec!["1", "2"]);
    }

    #[test]
    fn and_on_empty_predicate_becomes_base() {
        let f = FilterQuery::new().and("a = ?", ["1"]);
        assert_eq!(f.query, "a = ?");
        assert_eq!(f.args, vec!["1"]);
    }

    #[test]
    fn like_passes_pattern_verbatim() {
        let f = FilterQuery::new().like("name", "jo%");
        assert_eq!(f.query, "(name LIKE ?)");
        assert_eq!(f.args, vec!["jo%"]);
    }

    #[test]
    fn contains_escapes_and_wraps() {
        let f = FilterQuery::new().contains("name", "100%_done");
        assert_eq!(f.query, "(name LIKE ?)");
        assert_eq!(f.args, vec!["%100\\%\\_done%"]);
    }

    #[test]
    fn is_and_is_not() {
        let f = FilterQuery::new().is("deleted_at", "NULL").is_not("role", "guest");
        assert_eq!(f.query, "(deleted_at IS ?) AND (role IS NOT ?)");
        assert_eq!(f.args, vec!["NULL", "guest"]);
    }

    #[test]
    fn length_gt_wraps_field() {
        let f = FilterQuery::new().length_gt("name", 8);
        assert_eq!(f.query, "(LENGTH(name) > ?)");
        assert_eq!(f.args, vec!["8"]);
    }

    #[test]
    fn date_range_emits_two_placeholders() {
        let f = FilterQuery::new().date_range("created_at", "2024-01-01", "2024-12-31");
        assert_eq!(f.query, "(created_at >= ? AND created_at <= ?)");
        assert_eq!(f.args, vec!["2024-01-01", "2024-12-31"]);
    }

    #[test]
    fn directive_setters_never_touch_the_predicate() {
        let f = FilterQuery::new()
            .limit(10)
            .offset(5)
            .page(2)
            .page_size(25)
            .order_asc("name")
            .order_desc("created_at")
            .preload("team")
            .preload("team")
            .aggregate("sum", ["amount", "tax"]);
        assert_eq!(f.query, "");
        assert!(f.args.is_empty());
        assert_eq!((f.limit, f.offset, f.page, f.page_size), (10, 5, 2, 25));
        assert_eq!(f.order_by_asc.as_deref(), Some("name"));
        assert_eq!(f.order_by_desc.as_deref(), Some("created_at"));
        assert_eq!(f.preload, vec!["team", "team"]);
        assert_eq!(f.aggregates["sum"], vec!["amount", "tax"]);
    }

    #[test]
    fn repeated_aggregate_last_wins() {
        let f = FilterQuery::new()
            .aggregate("sum", ["amount"])
            .aggregate("sum", ["tax"]);
        assert_eq!(f.aggregates["sum"], vec!["tax"]);
    }

    #[test]
    fn cloned_base_branches_independently() {
        let base = FilterQuery::new().eq("tenant", "acme");
        let active = base.clone().eq("status", "active");
        let archived = base.clone().eq("status", "archived");

        assert_eq!(base.args, vec!["acme"]);
        assert_eq!(active.query, "(tenant = ?) AND (status = ?)");
        assert_eq!(archived.args, vec!["acme", "archived"]);
    }

    #[test]
    fn placeholders_always_match_args() {
        let f = FilterQuery::new()
            .eq("a", "1")
            .date_range("t", "x", "y")
            .contains("name", "jo")
            .and("b > ?", ["2"])
            .length_gt("c", 3);
        assert_eq!(placeholder_count(&f.query), f.args.len());
    }
}
