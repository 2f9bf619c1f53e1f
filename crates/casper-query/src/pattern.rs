//! Glob patterns for `like` comparisons.
//!
//! A pattern uses `%` as a multi-character wildcard and `\%` as a literal
//! percent sign. Every other character is literal. Patterns match the whole
//! string, not a substring.

use std::fmt;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::Result;

/// A `like` pattern, compiled to a regular expression on first use.
///
/// Compilation happens at most once per pattern value, so a pattern stored in
/// a program is compiled once and then shared by every record the program is
/// evaluated against.
#[derive(Clone)]
pub struct GlobPattern {
    source: String,
    compiled: OnceCell<Regex>,
}

impl GlobPattern {
    /// Creates a pattern from its glob source.
    pub fn new(source: impl Into<String>) -> Self {
        GlobPattern {
            source: source.into(),
            compiled: OnceCell::new(),
        }
    }

    /// Returns the glob source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the compiled matcher, compiling it if needed.
    pub fn regex(&self) -> Result<&Regex> {
        self.compiled
            .get_or_try_init(|| Regex::new(&translate(&self.source)))
            .map_err(Into::into)
    }

    /// Tests the pattern against the full string.
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(text))
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobPattern").field(&self.source).finish()
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translates glob source into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2 + 8);
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    out.push_str("(?s)^");
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'%') => {
                chars.next();
                literal.push('%');
            }
            '%' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(".*");
            }
            other => literal.push(other),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(pattern: &str, text: &str) -> bool {
        GlobPattern::new(pattern).is_match(text).unwrap()
    }

    #[test]
    fn translate_wildcards_and_escapes() {
        assert_eq!(translate("Name%"), "(?s)^Name.*$");
        assert_eq!(translate("%"), "(?s)^.*$");
        assert_eq!(translate(r"\%"), "(?s)^%$");
        assert_eq!(translate("a.b"), r"(?s)^a\.b$");
    }

    #[test]
    fn prefix_suffix_and_infix() {
        assert!(matches("%ohn", "John"));
        assert!(matches("Joh%", "John"));
        assert!(matches("%oh%", "John"));
        assert!(matches("%John%", "John"));
        assert!(matches("John", "John"));
        assert!(!matches("Fish", "John"));
    }

    #[test]
    fn full_string_match_not_substring() {
        assert!(!matches("oh", "John"));
        assert!(!matches("John", "Johnny"));
    }

    #[test]
    fn escaped_percent_is_literal() {
        assert!(matches(r"%\%%", "Fighting clowns 100% of the time"));
        assert!(!matches(r"%\%%", "Fighting clowns all of the time"));
        assert!(matches(r"\%", "%"));
        assert!(!matches(r"\%", "x"));
        assert!(!matches(r"\%", "%%"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(matches("a.c", "a.c"));
        assert!(!matches("a.c", "abc"));
        assert!(matches("(x)%", "(x) marks"));
        assert!(matches(r"C:\dir%", r"C:\dir\file"));
    }

    #[test]
    fn wildcard_spans_newlines() {
        assert!(matches("a%b", "a\nb"));
    }

    #[test]
    fn compiled_once() {
        let pattern = GlobPattern::new("x%");
        let first = pattern.regex().unwrap() as *const Regex;
        let second = pattern.regex().unwrap() as *const Regex;
        assert_eq!(first, second);
    }

    #[test]
    fn equality_by_source() {
        assert_eq!(GlobPattern::new("a%"), GlobPattern::new("a%"));
        assert_ne!(GlobPattern::new("a%"), GlobPattern::new("b%"));
    }
}
