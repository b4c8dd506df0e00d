//! Text substitution filters applied to element content.
//!
//! Every pattern is a regular expression in `regex` crate syntax and every
//! replacement may reference capture groups (`$1`, `${name}`); a literal `$`
//! is written `$$`. Rules run in table order, each replacing all matches in
//! the output of the previous rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::DEFAULT_FILTERS;
use crate::error::{FeedError, Result};

#[allow(clippy::expect_used)] // Built from compile-time constants that are guaranteed to be valid
static STANDARD_TABLE: LazyLock<FilterTable> = LazyLock::new(|| {
    FilterTable::new(DEFAULT_FILTERS.iter().copied()).expect("valid default filters")
});

/// A single pattern -> replacement rule.
#[derive(Debug, Clone)]
struct FilterRule {
    pattern: Regex,
    replacement: String,
}

/// Ordered table of substitution rules.
#[derive(Debug, Clone, Default)]
pub struct FilterTable {
    rules: Vec<FilterRule>,
}

impl FilterTable {
    /// Compile a filter table from ordered `(pattern, replacement)` pairs.
    ///
    /// # Errors
    /// Returns `FeedError::InvalidFilterPattern` for the first pattern that
    /// does not compile.
    ///
    /// # Examples
    /// ```
    /// use rss_feed_generator::filter::FilterTable;
    ///
    /// let table = FilterTable::new([(r"\[nbsp\]", " ")]).unwrap();
    /// assert_eq!(table.apply("a[nbsp]b"), "a b");
    /// assert!(FilterTable::new([("(", "")]).is_err());
    /// ```
    pub fn new<I, P, R>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let rules = entries
            .into_iter()
            .map(|(pattern, replacement)| {
                let pattern = pattern.as_ref();
                let compiled =
                    Regex::new(pattern).map_err(|source| FeedError::InvalidFilterPattern {
                        pattern: pattern.to_string(),
                        source,
                    })?;
                Ok(FilterRule {
                    pattern: compiled,
                    replacement: replacement.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// The built-in default table (see [`DEFAULT_FILTERS`]).
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_TABLE.clone()
    }

    /// Apply every rule in order.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| {
            rule.pattern
                .replace_all(&acc, rule.replacement.as_str())
                .into_owned()
        })
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over `(pattern, replacement)` pairs in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules
            .iter()
            .map(|rule| (rule.pattern.as_str(), rule.replacement.as_str()))
    }
}

impl PartialEq for FilterTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries().eq(other.entries())
    }
}

impl Eq for FilterTable {}

/// Pick the table that applies to one element's content.
///
/// A present, non-empty local table replaces the default entirely; the two
/// are never merged.
#[must_use]
pub fn resolve<'a>(local: Option<&'a FilterTable>, default: &'a FilterTable) -> &'a FilterTable {
    match local {
        Some(table) if !table.is_empty() => table,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_in_order() {
        // The second rule sees the output of the first
        let table = FilterTable::new([("a", "b"), ("b", "c")]).unwrap();
        assert_eq!(table.apply("aab"), "ccc");

        let reversed = FilterTable::new([("b", "c"), ("a", "b")]).unwrap();
        assert_eq!(reversed.apply("aab"), "bbc");
    }

    #[test]
    fn test_apply_replaces_all_matches() {
        let table = FilterTable::new([("&shy;", "")]).unwrap();
        assert_eq!(table.apply("Bun&shy;des&shy;rat"), "Bundesrat");
    }

    #[test]
    fn test_apply_capture_groups() {
        let table = FilterTable::new([(r"(\w+)@(\w+)", "$2 at $1")]).unwrap();
        assert_eq!(table.apply("user@host"), "host at user");
    }

    #[test]
    fn test_empty_table_is_identity() {
        let table = FilterTable::default();
        assert!(table.is_empty());
        assert_eq!(table.apply("a<b & [nbsp]"), "a<b & [nbsp]");
    }

    #[test]
    fn test_standard_table() {
        let table = FilterTable::standard();
        assert_eq!(table.len(), 4);
        assert_eq!(table.apply("Ein[-]trag"), "Eintrag");
        assert_eq!(table.apply("Ein&shy;trag"), "Eintrag");
        assert_eq!(table.apply("a[nbsp]b&nbsp;c"), "a b c");
        assert_eq!(table.apply("a<b"), "a<b");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FilterTable::new([("ok", ""), ("[unclosed", "")]).unwrap_err();
        match err {
            FeedError::InvalidFilterPattern { pattern, .. } => assert_eq!(pattern, "[unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_prefers_non_empty_local() {
        let default = FilterTable::new([("X", "Y")]).unwrap();
        let local = FilterTable::new([("X", "Z")]).unwrap();

        let chosen = resolve(Some(&local), &default);
        assert_eq!(chosen.apply("X"), "Z");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let default = FilterTable::new([("X", "Y")]).unwrap();
        let empty = FilterTable::default();

        assert_eq!(resolve(None, &default).apply("X"), "Y");
        assert_eq!(resolve(Some(&empty), &default).apply("X"), "Y");
    }

    #[test]
    fn test_entries_and_equality() {
        let a = FilterTable::new([("x", "1"), ("y", "2")]).unwrap();
        let b = FilterTable::new([("x", "1"), ("y", "2")]).unwrap();
        let c = FilterTable::new([("y", "2"), ("x", "1")]).unwrap();

        assert_eq!(a.entries().collect::<Vec<_>>(), vec![("x", "1"), ("y", "2")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
