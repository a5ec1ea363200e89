use std::fmt;

use thiserror::Error;

/// Identifies one of the two sequences of a matcher.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Side {
    /// The first sequence (`a`), the one being transformed.
    A,
    /// The second sequence (`b`), the one that is indexed.
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Side::A => "a",
            Side::B => "b",
        })
    }
}

/// Errors produced by [`SequenceMatcher`](crate::SequenceMatcher) queries.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MatchError {
    /// A query ran before both sequences were assigned.
    #[error("sequence {0} has not been set")]
    MissingSequence(Side),
    /// A search region is reversed or reaches past the end of a sequence.
    #[error(
        "invalid region a[{a_lo}..{a_hi}] b[{b_lo}..{b_hi}] for sequences of length {len_a} and {len_b}"
    )]
    #[allow(missing_docs)]
    InvalidRange {
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
        len_a: usize,
        len_b: usize,
    },
}

#[test]
fn test_error_display() {
    assert_eq!(
        MatchError::MissingSequence(Side::B).to_string(),
        "sequence b has not been set"
    );
    assert_eq!(
        MatchError::InvalidRange {
            a_lo: 2,
            a_hi: 1,
            b_lo: 0,
            b_hi: 4,
            len_a: 3,
            len_b: 4,
        }
        .to_string(),
        "invalid region a[2..1] b[0..4] for sequences of length 3 and 4"
    );
}
