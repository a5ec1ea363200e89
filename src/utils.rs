//! One-call shortcuts.
//!
//! These construct a [`SequenceMatcher`] with the default configuration,
//! run it and expand the opcodes into changes.
#![cfg(feature = "text")]

use crate::common::opcodes_from_matching_blocks;
use crate::element::Element;
use crate::matcher::SequenceMatcher;
use crate::text::split_lines;
use crate::types::ChangeTag;

/// Shortcut for diffing two slices.
///
/// This function produces the diff of two slices and returns a vector
/// with the changes.
///
/// ```rust
/// use seqdiff::ChangeTag;
/// use seqdiff::utils::diff_slices;
///
/// let old = ["foo", "bar", "baz"];
/// let new = ["foo", "bar", "BAZ"];
/// assert_eq!(diff_slices(&old, &new), vec![
///     (ChangeTag::Equal, &["foo", "bar"][..]),
///     (ChangeTag::Delete, &["baz"][..]),
///     (ChangeTag::Insert, &["BAZ"][..]),
/// ]);
/// ```
pub fn diff_slices<'x, T: Element>(old: &'x [T], new: &'x [T]) -> Vec<(ChangeTag, &'x [T])> {
    let blocks = SequenceMatcher::new(old, new).compute_matching_blocks(old, new);
    opcodes_from_matching_blocks(&blocks)
        .iter()
        .flat_map(|op| op.iter_slices(old, new))
        .collect()
}

/// Shortcut for making a line diff.
///
/// The texts are split with [`split_lines`] and a change is returned for
/// every line.  Unlike [`diff_slices`] there is no grouping of adjacent
/// lines.
///
/// ```rust
/// use seqdiff::ChangeTag;
/// use seqdiff::utils::diff_lines;
///
/// assert_eq!(diff_lines("foo\nbar\nbaz\nblah", "foo\nbar\nbaz\nblurgh"), vec![
///     (ChangeTag::Equal, "foo"),
///     (ChangeTag::Equal, "bar"),
///     (ChangeTag::Equal, "baz"),
///     (ChangeTag::Delete, "blah"),
///     (ChangeTag::Insert, "blurgh"),
/// ]);
/// ```
pub fn diff_lines<'x>(old: &'x str, new: &'x str) -> Vec<(ChangeTag, &'x str)> {
    let old = split_lines(old);
    let new = split_lines(new);
    diff_slices(&old, &new)
        .into_iter()
        .flat_map(|(tag, lines)| lines.iter().map(move |&line| (tag, line)))
        .collect()
}

#[test]
fn test_diff_slices_empty() {
    let empty: [u32; 0] = [];
    assert!(diff_slices(&empty, &empty).is_empty());
    assert_eq!(
        diff_slices(&empty, &[1, 2]),
        vec![(ChangeTag::Insert, &[1, 2][..])]
    );
}

#[test]
fn test_diff_lines_crlf() {
    assert_eq!(
        diff_lines("a\r\nb\r\n", "a\r\nc\r\n"),
        vec![
            (ChangeTag::Equal, "a"),
            (ChangeTag::Delete, "b"),
            (ChangeTag::Insert, "c"),
            (ChangeTag::Equal, ""),
        ]
    );
}

#[test]
fn test_diff_slices_chars() {
    let old = ['q', 'a', 'b', 'x', 'c', 'd'];
    let new = ['a', 'b', 'y', 'c', 'd', 'f'];
    assert_eq!(
        diff_slices(&old, &new),
        vec![
            (ChangeTag::Delete, &['q'][..]),
            (ChangeTag::Equal, &['a', 'b'][..]),
            (ChangeTag::Delete, &['x'][..]),
            (ChangeTag::Insert, &['y'][..]),
            (ChangeTag::Equal, &['c', 'd'][..]),
            (ChangeTag::Insert, &['f'][..]),
        ]
    );
}
