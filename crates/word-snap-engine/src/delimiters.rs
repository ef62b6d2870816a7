//! Word delimiter classification.
//!
//! A delimiter is any whitespace character or one of the fixed punctuation
//! characters in [`PUNCTUATION_CHARS`]. Selection boundaries snap to the
//! edges of delimiter runs.
//!
//! Two extra characters get special treatment at selection edges: a `)` is
//! stripped from the *leading* edge (selections starting right after a
//! closing parenthesis) and a `(` from the *trailing* edge. They are not
//! delimiters on their own.

use serde::{Deserialize, Serialize};

/// Punctuation characters that separate words, in addition to whitespace.
pub const PUNCTUATION_CHARS: [char; 6] = ['.', ',', '!', '?', ':', ';'];

/// Returns true if `ch` is whitespace or one of [`PUNCTUATION_CHARS`].
pub fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || PUNCTUATION_CHARS.contains(&ch)
}

/// Removes the leading run of delimiters (and `)`) from `s`.
pub fn trim_left(s: &str) -> &str {
    s.trim_start_matches(|c: char| is_delimiter(c) || c == ')')
}

/// Removes the trailing run of delimiters (and `(`) from `s`.
pub fn trim_right(s: &str) -> &str {
    s.trim_end_matches(|c: char| is_delimiter(c) || c == '(')
}

/// The set of characters that bound words during selection adjustment.
///
/// [`DelimiterSet::default`] is the fixed set used by the free functions in
/// this module. Custom sets come from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterSet {
    /// Punctuation treated as a word separator. Whitespace always is.
    pub punctuation: Vec<char>,
    /// Characters additionally stripped from the start of a selection.
    pub leading_extras: Vec<char>,
    /// Characters additionally stripped from the end of a selection.
    pub trailing_extras: Vec<char>,
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            punctuation: PUNCTUATION_CHARS.to_vec(),
            leading_extras: vec![')'],
            trailing_extras: vec!['('],
        }
    }
}

impl DelimiterSet {
    pub fn is_delimiter(&self, ch: char) -> bool {
        ch.is_whitespace() || self.punctuation.contains(&ch)
    }

    /// True if `ch` ends a word when scanning the start edge of a selection.
    pub fn is_leading_stop(&self, ch: char) -> bool {
        self.is_delimiter(ch) || self.leading_extras.contains(&ch)
    }

    /// True if `ch` ends a word when scanning the end edge of a selection.
    pub fn is_trailing_stop(&self, ch: char) -> bool {
        self.is_delimiter(ch) || self.trailing_extras.contains(&ch)
    }

    pub fn trim_left<'s>(&self, s: &'s str) -> &'s str {
        s.trim_start_matches(|c: char| self.is_leading_stop(c))
    }

    pub fn trim_right<'s>(&self, s: &'s str) -> &'s str {
        s.trim_end_matches(|c: char| self.is_trailing_stop(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('.', true)]
    #[case(',', true)]
    #[case('!', true)]
    #[case('?', true)]
    #[case(':', true)]
    #[case(';', true)]
    #[case(' ', true)]
    #[case('\t', true)]
    #[case('\n', true)]
    #[case('\u{a0}', true)]
    #[case('a', false)]
    #[case('-', false)]
    #[case(')', false)]
    #[case('(', false)]
    fn classifies_delimiters(#[case] ch: char, #[case] expected: bool) {
        assert_eq!(is_delimiter(ch), expected);
        assert_eq!(DelimiterSet::default().is_delimiter(ch), expected);
    }

    #[rstest]
    #[case("  hello", "hello")]
    #[case(", hello", "hello")]
    #[case(" ) hello", "hello")]
    #[case(")hello", "hello")]
    #[case("hello, ", "hello, ")]
    #[case("(hello", "(hello")]
    #[case(".,;", "")]
    #[case("", "")]
    fn trims_left(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(trim_left(input), expected);
        assert_eq!(DelimiterSet::default().trim_left(input), expected);
    }

    #[rstest]
    #[case("hello  ", "hello")]
    #[case("hello, ", "hello")]
    #[case("hello ( ", "hello")]
    #[case("hello(", "hello")]
    #[case(" hello", " hello")]
    #[case("hello)", "hello)")]
    #[case("?!", "")]
    fn trims_right(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(trim_right(input), expected);
        assert_eq!(DelimiterSet::default().trim_right(input), expected);
    }

    #[test]
    fn custom_set_replaces_punctuation_but_keeps_whitespace() {
        let set = DelimiterSet {
            punctuation: vec!['-'],
            leading_extras: vec![],
            trailing_extras: vec![],
        };
        assert!(set.is_delimiter('-'));
        assert!(set.is_delimiter(' '));
        assert!(!set.is_delimiter(','));
        assert_eq!(set.trim_left(")-x"), ")-x");
        assert_eq!(set.trim_right("x- "), "x");
    }

    #[test]
    fn extras_only_apply_to_their_edge() {
        let set = DelimiterSet::default();
        assert!(set.is_leading_stop(')'));
        assert!(!set.is_trailing_stop(')'));
        assert!(set.is_trailing_stop('('));
        assert!(!set.is_leading_stop('('));
    }
}
