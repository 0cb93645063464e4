//! # String helpers.
//!
//! Positions are counted in `char`s, not bytes.

use std::fmt::Display;

/// Replaces every `{i}` in `template` with `args[i]`.
///
/// Placeholders whose index is out of range, and any other braces, are kept as is.
///
/// # Example
/// ```
/// use evoke::format::format_indexed;
///
/// assert_eq!(format_indexed("{0} + {0} = {1}", &[&2, &4]), "2 + 2 = 4");
/// assert_eq!(format_indexed("{2}", &[&"a"]), "{2}");
/// ```
pub fn format_indexed(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let closed = digits > 0 && after.as_bytes().get(digits) == Some(&b'}');
        let arg = closed
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|i| args.get(i));

        match arg {
            Some(arg) => {
                out.push_str(&arg.to_string());
                rest = &after[digits + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// `true` if `search` occurs in `s` exactly at char `position`.
pub fn starts_with_at(s: &str, search: &str, position: usize) -> bool {
    char_suffix(s, position).is_some_and(|tail| tail.starts_with(search))
}

/// Case-insensitive [`starts_with_at`].
pub fn starts_with_ignore_case(s: &str, search: &str, position: usize) -> bool {
    starts_with_at(&s.to_lowercase(), &search.to_lowercase(), position)
}

/// `true` if `s`, truncated to its first `end` chars (all of it when `None`),
/// ends with `search`.
pub fn ends_with_at(s: &str, search: &str, end: Option<usize>) -> bool {
    char_prefix(s, end).ends_with(search)
}

/// Case-insensitive [`ends_with_at`].
pub fn ends_with_ignore_case(s: &str, search: &str, end: Option<usize>) -> bool {
    ends_with_at(&s.to_lowercase(), &search.to_lowercase(), end)
}

fn char_suffix(s: &str, position: usize) -> Option<&str> {
    if position == 0 {
        return Some(s);
    }
    match s.char_indices().nth(position) {
        Some((byte, _)) => Some(&s[byte..]),
        None if s.chars().count() == position => Some(""),
        None => None,
    }
}

fn char_prefix(s: &str, end: Option<usize>) -> &str {
    match end.and_then(|n| s.char_indices().nth(n)) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexed_placeholders() {
        assert_eq!(format_indexed("Hello {0}!", &[&"world"]), "Hello world!");
        assert_eq!(format_indexed("{1}{0}{1}", &[&"a", &"b"]), "bab");
        assert_eq!(format_indexed("{} {x} {0", &[&1]), "{} {x} {0");
        assert_eq!(format_indexed("{{0}}", &[&7]), "{7}");
        assert_eq!(format_indexed("no args {0}", &[]), "no args {0}");

        let zero: &dyn Display = &0;
        assert_eq!(format_indexed("{10}", &vec![zero; 11]), "0");
    }

    #[test]
    fn prefix_at_position() {
        let s = "To be, or not to be, that is the question.";
        assert!(starts_with_at(s, "To be", 0));
        assert!(!starts_with_at(s, "not to be", 0));
        assert!(starts_with_at(s, "not to be", 10));
        assert!(starts_with_at("abc", "", 3));
        assert!(!starts_with_at("abc", "", 4));
        assert!(starts_with_ignore_case(s, "TO BE", 0));
    }

    #[test]
    fn suffix_with_end() {
        let s = "To be, or not to be, that is the question.";
        assert!(ends_with_at(s, "question.", None));
        assert!(!ends_with_at(s, "to be", None));
        assert!(ends_with_at(s, "to be", Some(19)));
        assert!(ends_with_ignore_case(s, "QUESTION.", None));
        assert!(ends_with_at("héllo", "hé", Some(2)));
    }
}
