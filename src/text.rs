//! Text tokenizers and text based helpers.
//!
//! The matcher itself works on any sequence of [`Element`](crate::Element)s.
//! This module provides the common ways of turning a string into such a
//! sequence and a few utilities built on top of that.
//!
//! ```rust
//! use seqdiff::SequenceMatcher;
//! use seqdiff::text::split_lines;
//!
//! let old = split_lines("a\nb\nc");
//! let new = split_lines("a\nB\nc");
//! let matcher = SequenceMatcher::new(&old, &new);
//! assert_eq!(matcher.get_opcodes().unwrap().len(), 3);
//! ```
#![cfg(feature = "text")]
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::matcher::SequenceMatcher;

/// Splits text into lines.
///
/// The separator is `\n` unless the text contains `\r` but no `\n`, in
/// which case it is `\r`.  Line break characters at the start and end of
/// every line are stripped so `\r\n` terminated text produces clean lines.
/// Text ending in a line break yields a trailing empty line and the empty
/// string yields a single empty line.
pub fn split_lines(s: &str) -> Vec<&str> {
    let separator = if s.contains('\r') && !s.contains('\n') {
        '\r'
    } else {
        '\n'
    };
    s.split(separator)
        .map(|line| line.trim_matches(&['\r', '\n'][..]))
        .collect()
}

/// Splits text into one slice per `char`.
pub fn split_chars(s: &str) -> Vec<&str> {
    s.char_indices()
        .map(|(idx, c)| &s[idx..idx + c.len_utf8()])
        .collect()
}

/// Splits text into words with whitespace attached.
pub fn split_words(s: &str) -> Vec<&str> {
    let mut iter = s.char_indices().peekable();
    let mut last_pos = 0;

    std::iter::from_fn(move || {
        if let Some((idx, c)) = iter.next() {
            let mut rv = None;
            if c.is_whitespace() {
                let mut last = (idx, c);
                while let Some(&(next_idx, next_char)) = iter.peek() {
                    if !next_char.is_whitespace() {
                        break;
                    }
                    iter.next();
                    last = (next_idx, next_char);
                }
                let whitespace_end = last.0 + last.1.len_utf8();
                rv = Some(&s[last_pos..whitespace_end]);
                last_pos = whitespace_end;
            }
            Some(rv)
        } else if last_pos < s.len() {
            let tmp = &s[last_pos..];
            last_pos = s.len();
            Some(Some(tmp))
        } else {
            None
        }
    })
    .flatten()
    .collect()
}

/// Splits text into unicode words.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn split_unicode_words(s: &str) -> Vec<&str> {
    use unicode_segmentation::UnicodeSegmentation;
    s.split_word_bounds().collect()
}

/// Splits text into extended grapheme clusters.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn split_graphemes(s: &str) -> Vec<&str> {
    use unicode_segmentation::UnicodeSegmentation;
    s.graphemes(true).collect()
}

/// Use the sequence matcher to find `n` close matches.
///
/// `cutoff` defines the threshold which needs to be reached for a word
/// to be considered similar.  See [`SequenceMatcher::ratio`] for more
/// information.  The comparison is done on characters without any junk.
///
/// ```
/// # use seqdiff::text::get_close_matches;
/// let matches = get_close_matches(
///     "appel",
///     &["ape", "apple", "peach", "puppy"][..],
///     3,
///     0.6
/// );
/// assert_eq!(matches, vec!["apple", "ape"]);
/// ```
pub fn get_close_matches<'a>(
    word: &str,
    possibilities: &[&'a str],
    n: usize,
    cutoff: f32,
) -> Vec<&'a str> {
    if n == 0 {
        return vec![];
    }

    let mut matches = BinaryHeap::new();
    let seq2 = split_chars(word);
    let candidates = possibilities
        .iter()
        .map(|&possibility| (possibility, split_chars(possibility)))
        .collect::<Vec<_>>();

    let mut matcher = SequenceMatcher::configure().no_junk().build();
    matcher.set_second(&seq2);
    for (possibility, seq1) in &candidates {
        matcher.set_first(seq1);
        // the cheap upper bounds go first, both are infallible here
        // since the sequences are set
        let passes = |ratio: Result<f32, _>| ratio.map_or(false, |x| x >= cutoff);
        if !passes(matcher.real_quick_ratio()) || !passes(matcher.quick_ratio()) {
            continue;
        }
        if let Ok(ratio) = matcher.ratio() {
            if ratio >= cutoff {
                // we're putting the word itself in reverse in so that matches with
                // the same ratio are ordered lexicographically.
                matches.push(((ratio * u32::MAX as f32) as u32, Reverse(*possibility)));
            }
        }
    }

    let mut rv = vec![];
    for _ in 0..n {
        if let Some((_, elt)) = matches.pop() {
            rv.push(elt.0);
        } else {
            break;
        }
    }

    rv
}

#[test]
fn test_split_lines() {
    assert_eq!(
        split_lines("first\nsecond\r\nthird\n"),
        vec!["first", "second", "third", ""]
    );
    assert_eq!(split_lines("mac\rstyle\r"), vec!["mac", "style", ""]);
    assert_eq!(split_lines("\n\n"), vec!["", "", ""]);
    assert_eq!(split_lines("mixed\rline\nbreaks"), vec!["mixed\rline", "breaks"]);
    assert_eq!(split_lines(""), vec![""]);
}

#[test]
fn test_split_chars() {
    assert_eq!(split_chars("aü€"), vec!["a", "ü", "€"]);
    assert!(split_chars("").is_empty());
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words("foo    bar baz\n\n  aha"),
        ["foo    ", "bar ", "baz\n\n  ", "aha"]
    );
}

#[cfg(feature = "unicode")]
#[test]
fn test_split_unicode() {
    assert_eq!(
        split_unicode_words("The quick (\"brown\") fox"),
        vec!["The", " ", "quick", " ", "(", "\"", "brown", "\"", ")", " ", "fox"]
    );
    assert_eq!(split_graphemes("a\u{310}e"), vec!["a\u{310}", "e"]);
}

#[test]
fn test_line_matcher() {
    let old = split_lines("Hello World\nsome stuff here\nsome more stuff here\n");
    let new = split_lines("Hello World\nsome amazing stuff here\nsome more stuff here\n");
    let matcher = SequenceMatcher::new(&old, &new);
    let ops = matcher
        .get_opcodes()
        .unwrap()
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        ops,
        vec![
            "  equal a[0:1] b[0:1]",
            "replace a[1:2] b[1:2]",
            "  equal a[2:4] b[2:4]",
        ]
    );
}

#[test]
fn test_get_close_matches() {
    let matches = get_close_matches("appel", &["ape", "apple", "peach", "puppy"][..], 3, 0.6);
    assert_eq!(matches, vec!["apple", "ape"]);
    let matches = get_close_matches(
        "hulo",
        &[
            "hi", "hulu", "hali", "hoho", "amaz", "zulo", "blah", "hopp", "uulo", "aulo",
        ][..],
        5,
        0.7,
    );
    assert_eq!(matches, vec!["aulo", "hulu", "uulo", "zulo"]);
    assert!(get_close_matches("appel", &["apple"][..], 0, 0.0).is_empty());
}
