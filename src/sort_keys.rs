// Copyright 2025 Cowboy AI, LLC.

//! Sort-key mini-language
//!
//! A sort request is a comma-separated list of keys. Each key carries an
//! optional `+`/`-` direction sign and is either a bare field name (`code`,
//! `-position`) or a function call whose arguments may be double-quoted
//! strings (`sort:index.text:relevance("de","test(\"\")")`). Commas and
//! parentheses inside quoted arguments do not split keys.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::criteria::{Sort, SortDirection};

static KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[+-]?[A-Za-z0-9_.:]+(?:\((?:"(?:[^"\\]|\\.)*"|[^"()])*\))?"#)
        .expect("sort key pattern is valid")
});

/// Split a raw sort string into its keys, signs and call syntax kept verbatim
///
/// Never fails: unbalanced quotes or parentheses only reduce the tokens that
/// can be matched.
pub fn split_keys(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) if !raw.is_empty() => KEY
            .find_iter(raw)
            .map(|m| m.as_str().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

/// One sort key split into direction and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// Token as produced by [`split_keys`]
    pub raw: String,
    /// Direction from the leading sign, ascending when unsigned
    pub direction: SortDirection,
    /// Field or function-call name without the sign
    pub name: String,
}

impl SortKey {
    /// Split the direction sign off a token
    pub fn parse(raw: &str) -> Self {
        let (direction, name) = match raw.as_bytes().first() {
            Some(b'-') => (SortDirection::Descending, &raw[1..]),
            Some(b'+') => (SortDirection::Ascending, &raw[1..]),
            _ => (SortDirection::Ascending, raw),
        };

        Self {
            raw: raw.to_string(),
            direction,
            name: name.to_string(),
        }
    }

    /// Whether the key is function-call shaped
    pub fn is_function(&self) -> bool {
        self.name.contains('(')
    }

    /// Name without the argument list
    pub fn function_name(&self) -> &str {
        self.name.split('(').next().unwrap_or(&self.name)
    }

    /// Sort clause for a (possibly rewritten) key
    pub fn to_sort(&self, key: impl Into<String>) -> Sort {
        Sort::new(self.direction, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(Some("code,-position"), &["code", "-position"] ; "plain keys")]
    #[test_case(Some(r#"sort:fn("a,b)",1),-x"#), &[r#"sort:fn("a,b)",1)"#, "-x"] ; "quoted comma and paren")]
    #[test_case(Some(r#"-sort:index.text:relevance("de","test(\"\")"),+code"#), &[r#"-sort:index.text:relevance("de","test(\"\")")"#, "+code"] ; "escaped quotes")]
    #[test_case(Some("ctime, -price"), &["ctime", "-price"] ; "whitespace between keys")]
    #[test_case(Some(""), &[] ; "empty")]
    #[test_case(None, &[] ; "null")]
    fn test_split_keys(raw: Option<&str>, expected: &[&str]) {
        assert_eq!(split_keys(raw), expected.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_malformed_input_degrades() {
        // unterminated argument list: only the bare names survive
        assert_eq!(split_keys(Some(r#"fn("a"#)), vec!["fn".to_string(), "a".to_string()]);
        assert!(split_keys(Some(",,,((")).is_empty());
    }

    #[test]
    fn test_sort_key_parse() {
        let key = SortKey::parse("-position");
        assert_eq!(key.direction, SortDirection::Descending);
        assert_eq!(key.name, "position");
        assert!(!key.is_function());

        let key = SortKey::parse(r#"sort:index.text:relevance("de","x")"#);
        assert_eq!(key.direction, SortDirection::Ascending);
        assert!(key.is_function());
        assert_eq!(key.function_name(), "sort:index.text:relevance");

        let key = SortKey::parse("+code");
        assert_eq!(key.direction, SortDirection::Ascending);
        assert_eq!(key.name, "code");
        assert_eq!(key.raw, "+code");
    }
}
