use std::fmt;
use std::ops::Range;

/// A matching block between the two sequences.
///
/// `a[a..a + size] == b[b..b + size]`.  The last block returned by
/// [`SequenceMatcher::get_matching_blocks`](crate::SequenceMatcher::get_matching_blocks)
/// is always the sentinel `(len(a), len(b), 0)`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    /// Start of the block in the first sequence.
    pub a: usize,
    /// Start of the block in the second sequence.
    pub b: usize,
    /// Number of elements in the block.
    pub size: usize,
}

impl Match {
    /// Creates a new matching block.
    pub fn new(a: usize, b: usize, size: usize) -> Match {
        Match { a, b, size }
    }

    /// The range covered in the first sequence.
    pub fn a_range(&self) -> Range<usize> {
        self.a..self.a + self.size
    }

    /// The range covered in the second sequence.
    pub fn b_range(&self) -> Range<usize> {
        self.b..self.b + self.size
    }

    /// Returns `true` if `other` starts exactly where this block ends in
    /// both sequences.
    pub fn touches(&self, other: &Match) -> bool {
        self.a + self.size == other.a && self.b + self.size == other.b
    }
}

impl From<(usize, usize, usize)> for Match {
    fn from(value: (usize, usize, usize)) -> Match {
        Match::new(value.0, value.1, value.2)
    }
}

/// The tag of an [`Opcode`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DiffTag {
    /// `a[a1..a2] == b[b1..b2]`
    Equal,
    /// `a[a1..a2]` should be deleted (`b1 == b2`).
    Delete,
    /// `b[b1..b2]` should be inserted at `a1` (`a1 == a2`).
    Insert,
    /// `a[a1..a2]` should be replaced by `b[b1..b2]`.
    Replace,
}

impl DiffTag {
    /// Returns the lowercase name of the tag.
    pub fn as_str(&self) -> &'static str {
        match *self {
            DiffTag::Equal => "equal",
            DiffTag::Delete => "delete",
            DiffTag::Insert => "insert",
            DiffTag::Replace => "replace",
        }
    }
}

impl fmt::Display for DiffTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The tag of an expanded change.
///
/// Unlike [`DiffTag`] there is no replace variant, a replacement expands
/// into a delete followed by an insert.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ChangeTag {
    /// The change indicates equality (not a change)
    Equal,
    /// The change indicates deleted content.
    Delete,
    /// The change indicates inserted content.
    Insert,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                ChangeTag::Equal => ' ',
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
            }
        )
    }
}

/// A single edit instruction turning `a[a1..a2]` into `b[b1..b2]`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode {
    /// What to do with the two spans.
    pub tag: DiffTag,
    /// Start of the span in the first sequence.
    pub a1: usize,
    /// End of the span in the first sequence.
    pub a2: usize,
    /// Start of the span in the second sequence.
    pub b1: usize,
    /// End of the span in the second sequence.
    pub b2: usize,
}

impl Opcode {
    /// Creates a new opcode.
    pub fn new(tag: DiffTag, a1: usize, a2: usize, b1: usize, b2: usize) -> Opcode {
        Opcode {
            tag,
            a1,
            a2,
            b1,
            b2,
        }
    }

    /// The span of the first sequence this opcode covers.
    pub fn a_range(&self) -> Range<usize> {
        self.a1..self.a2
    }

    /// The span of the second sequence this opcode covers.
    pub fn b_range(&self) -> Range<usize> {
        self.b1..self.b2
    }

    /// Returns the opcode as a tuple of tag and both ranges.
    pub fn as_tag_tuple(&self) -> (DiffTag, Range<usize>, Range<usize>) {
        (self.tag, self.a_range(), self.b_range())
    }

    /// Given the two sequences yields the changes this opcode encodes.
    ///
    /// A replace yields a delete of the old slice and an insert of the new
    /// slice, all other tags yield exactly one item.
    ///
    /// ```rust
    /// use seqdiff::{ChangeTag, DiffTag, Opcode};
    ///
    /// let a = ["foo", "bar"];
    /// let b = ["foo", "baz"];
    /// let op = Opcode::new(DiffTag::Replace, 1, 2, 1, 2);
    /// assert_eq!(op.iter_slices(&a, &b).collect::<Vec<_>>(), vec![
    ///     (ChangeTag::Delete, &["bar"][..]),
    ///     (ChangeTag::Insert, &["baz"][..]),
    /// ]);
    /// ```
    pub fn iter_slices<'x, T>(
        &self,
        a: &'x [T],
        b: &'x [T],
    ) -> impl Iterator<Item = (ChangeTag, &'x [T])> {
        let (first, second) = match self.tag {
            DiffTag::Equal => ((ChangeTag::Equal, &a[self.a_range()]), None),
            DiffTag::Delete => ((ChangeTag::Delete, &a[self.a_range()]), None),
            DiffTag::Insert => ((ChangeTag::Insert, &b[self.b_range()]), None),
            DiffTag::Replace => (
                (ChangeTag::Delete, &a[self.a_range()]),
                Some((ChangeTag::Insert, &b[self.b_range()])),
            ),
        };
        Some(first).into_iter().chain(second)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>7} a[{}:{}] b[{}:{}]",
            self.tag, self.a1, self.a2, self.b1, self.b2
        )
    }
}

#[test]
fn test_match_touches() {
    let first = Match::new(0, 2, 3);
    assert!(first.touches(&Match::new(3, 5, 1)));
    assert!(!first.touches(&Match::new(3, 6, 1)));
    assert!(!first.touches(&Match::new(4, 5, 1)));
    assert_eq!(first.a_range(), 0..3);
    assert_eq!(first.b_range(), 2..5);
}

#[test]
fn test_opcode_display() {
    let ops = vec![
        Opcode::new(DiffTag::Delete, 0, 1, 0, 0),
        Opcode::new(DiffTag::Equal, 1, 3, 0, 2),
        Opcode::new(DiffTag::Replace, 3, 4, 2, 3),
    ];
    let rendered = ops.iter().map(|x| x.to_string()).collect::<Vec<_>>();
    assert_eq!(
        rendered,
        vec![
            " delete a[0:1] b[0:0]",
            "  equal a[1:3] b[0:2]",
            "replace a[3:4] b[2:3]",
        ]
    );
}

#[test]
fn test_iter_slices() {
    let a = ['q', 'a', 'b'];
    let b = ['a', 'b', 'f'];
    let changes = [
        Opcode::new(DiffTag::Delete, 0, 1, 0, 0),
        Opcode::new(DiffTag::Equal, 1, 3, 0, 2),
        Opcode::new(DiffTag::Insert, 3, 3, 2, 3),
    ]
    .iter()
    .flat_map(|op| op.iter_slices(&a, &b))
    .collect::<Vec<_>>();
    assert_eq!(
        changes,
        vec![
            (ChangeTag::Delete, &['q'][..]),
            (ChangeTag::Equal, &['a', 'b'][..]),
            (ChangeTag::Insert, &['f'][..]),
        ]
    );
}

#[test]
#[cfg(feature = "serde")]
fn test_serde() {
    let op = Opcode::new(DiffTag::Replace, 3, 4, 2, 3);
    let json = serde_json::to_string(&op).unwrap();
    assert_eq!(json, r#"{"tag":"replace","a1":3,"a2":4,"b1":2,"b2":3}"#);
    assert_eq!(serde_json::from_str::<Opcode>(&json).unwrap(), op);
    assert_eq!(
        serde_json::to_string(&Match::new(1, 2, 3)).unwrap(),
        r#"{"a":1,"b":2,"size":3}"#
    );
    assert_eq!(serde_json::to_string(&ChangeTag::Insert).unwrap(), r#""insert""#);
}
