//! Placeholder scanning and template rendering.
//!
//! A message template may embed `{increment, N}` and `{decrement, N}`
//! markers. Scanning produces a typed list of occurrences; rendering
//! substitutes the current counter value for every occurrence of a kind
//! whose counter is active and leaves everything else untouched.

use std::ops::Range;

use crate::counters::CounterState;

/// The two counter kinds a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Increment,
    Decrement,
}

/// One placeholder occurrence found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub kind: PlaceholderKind,
    /// Numeric argument as written in this occurrence.
    pub seed: i64,
    /// Byte range of the whole `{...}` marker within the template.
    pub span: Range<usize>,
}

/// Scan a template for placeholder occurrences, in text order.
///
/// Accepted syntax is `{increment, N}` / `{decrement, N}` with any amount of
/// whitespace after the comma and a decimal N. Anything else (unknown word,
/// missing comma, non-numeric argument) is not a placeholder and will pass
/// through rendering as literal text.
pub fn scan(template: &str) -> Vec<Placeholder> {
    let mut found = Vec::new();
    let mut i = 0;
    while let Some(off) = template[i..].find('{') {
        let start = i + off;
        match parse_marker(&template[start..]) {
            Some((kind, seed, len)) => {
                found.push(Placeholder {
                    kind,
                    seed,
                    span: start..start + len,
                });
                i = start + len;
            }
            None => i = start + 1,
        }
    }
    found
}

/// Try to parse one `{kind, N}` marker at the start of `rest`.
///
/// Returns the kind, the numeric argument and the marker's byte length.
fn parse_marker(rest: &str) -> Option<(PlaceholderKind, i64, usize)> {
    let body = rest.strip_prefix('{')?;
    let (kind, after_word) = if let Some(r) = body.strip_prefix("increment") {
        (PlaceholderKind::Increment, r)
    } else if let Some(r) = body.strip_prefix("decrement") {
        (PlaceholderKind::Decrement, r)
    } else {
        return None;
    };
    let after_comma = after_word.strip_prefix(',')?;
    let digits_start = after_comma.trim_start_matches(char::is_whitespace);
    let digit_len = digits_start
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digit_len == 0 {
        return None;
    }
    let (digits, after_digits) = digits_start.split_at(digit_len);
    let after = after_digits.strip_prefix('}')?;
    let seed = digits.parse().ok()?;
    Some((kind, seed, rest.len() - after.len()))
}

/// Render a template against the current counter state.
///
/// Every occurrence of a kind whose counter is active is replaced with the
/// counter's current value; occurrences of an inactive kind stay literal.
/// Pure: the counter state is never touched, so rendering the same inputs
/// always yields the same output.
pub fn render(template: &str, counters: &CounterState) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for ph in scan(template) {
        let value = match ph.kind {
            PlaceholderKind::Increment => counters.increment,
            PlaceholderKind::Decrement => counters.decrement,
        };
        let Some(value) = value else { continue };
        out.push_str(&template[cursor..ph.span.start]);
        out.push_str(&value.to_string());
        cursor = ph.span.end;
    }
    out.push_str(&template[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_placeholders_in_order() {
        let template = "Day {increment, 5}, {decrement,30} left";
        let found = scan(template);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, PlaceholderKind::Increment);
        assert_eq!(found[0].seed, 5);
        assert_eq!(&template[found[0].span.clone()], "{increment, 5}");
        assert_eq!(found[1].kind, PlaceholderKind::Decrement);
        assert_eq!(found[1].seed, 30);
        assert_eq!(&template[found[1].span.clone()], "{decrement,30}");
    }

    #[test]
    fn scan_accepts_any_whitespace_after_comma() {
        assert_eq!(scan("{increment,7}")[0].seed, 7);
        assert_eq!(scan("{increment,    7}")[0].seed, 7);
        assert_eq!(scan("{increment,\t7}")[0].seed, 7);
    }

    #[test]
    fn scan_ignores_malformed_markers() {
        assert!(scan("{increment}").is_empty());
        assert!(scan("{increment, }").is_empty());
        assert!(scan("{increment, x}").is_empty());
        assert!(scan("{countdown, 3}").is_empty());
        assert!(scan("{ increment, 3}").is_empty());
        assert!(scan("no braces at all").is_empty());
    }

    #[test]
    fn render_without_placeholders_is_identity() {
        let counters = CounterState {
            increment: Some(42),
            decrement: Some(-3),
        };
        assert_eq!(render("plain text", &counters), "plain text");
        assert_eq!(render("", &counters), "");
    }

    #[test]
    fn render_replaces_every_occurrence_with_current_value() {
        let counters = CounterState {
            increment: Some(9),
            decrement: None,
        };
        assert_eq!(
            render("{increment, 1} and again {increment, 500}", &counters),
            "9 and again 9"
        );
    }

    #[test]
    fn render_leaves_inactive_placeholders_literal() {
        let counters = CounterState {
            increment: Some(2),
            decrement: None,
        };
        assert_eq!(
            render("up {increment, 1}, down {decrement, 10}", &counters),
            "up 2, down {decrement, 10}"
        );
    }

    #[test]
    fn render_is_deterministic_for_fixed_counters() {
        let counters = CounterState {
            increment: Some(3),
            decrement: Some(8),
        };
        let template = "i={increment, 0} d={decrement, 0}";
        let once = render(template, &counters);
        assert_eq!(render(template, &counters), once);
        assert_eq!(once, "i=3 d=8");
    }
}
