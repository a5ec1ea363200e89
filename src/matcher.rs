//! The sequence matcher.
//!
//! [`SequenceMatcher`] compares two sequences of hashable elements.  The
//! idea is to find the longest contiguous matching block that contains no
//! junk elements and then to apply the same idea recursively to the pieces
//! on the left and on the right of it.  This does not yield minimal edit
//! sequences but tends to produce matches that look right to people.
//!
//! The second sequence is indexed when it is assigned, so comparing one
//! sequence against many others is cheapest when the fixed one is set with
//! [`SequenceMatcher::set_second`] once and the others are cycled through
//! [`SequenceMatcher::set_first`].
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::mem;
use std::ptr;

use log::{debug, trace};

use crate::common::{
    calculate_ratio, collapse_matching_blocks, group_opcodes, matched_len,
    opcodes_from_matching_blocks,
};
use crate::config::{JunkFilter, MatcherConfig};
use crate::element::Element;
use crate::error::{MatchError, Side};
use crate::hook::{replay, DiffHook};
use crate::types::{Match, Opcode};

/// Second sequences shorter than this never have popular elements.
const POPULAR_MIN_LEN: usize = 200;

/// Row state for the longest match search.
///
/// `j2len[j]` is the length of the longest junk free match ending with
/// `a[i - 1]` and `b[j]`.  Both maps are reused across rows and queries.
#[derive(Default)]
struct Scratch {
    j2len: HashMap<usize, usize>,
    new_j2len: HashMap<usize, usize>,
}

/// Compares two sequences and describes how to turn the first into the
/// second.
///
/// ```rust
/// use seqdiff::SequenceMatcher;
///
/// let a = ['a', 'b', 'c', 'd'];
/// let b = ['b', 'c', 'd', 'e'];
/// let matcher = SequenceMatcher::new(&a, &b);
/// assert_eq!(matcher.ratio().unwrap(), 0.75);
/// ```
pub struct SequenceMatcher<'a, T: Element> {
    a: Option<&'a [T]>,
    b: Option<&'a [T]>,
    junk: JunkFilter<T>,
    autojunk: bool,
    b2j: HashMap<&'a T, Vec<usize>>,
    bjunk: HashSet<&'a T>,
    bpopular: HashSet<&'a T>,
    fullbcount: OnceCell<HashMap<&'a T, usize>>,
    matching_blocks: OnceCell<Vec<Match>>,
    opcodes: OnceCell<Vec<Opcode>>,
}

impl<'a, T: Element> Default for SequenceMatcher<'a, T> {
    fn default() -> Self {
        SequenceMatcher::configure().build()
    }
}

impl<'a, T: Element> SequenceMatcher<'a, T> {
    /// Configures a matcher before creating it.
    pub fn configure() -> MatcherConfig<T> {
        MatcherConfig::default()
    }

    /// Creates a matcher for two sequences with the default configuration.
    ///
    /// Equivalent to `SequenceMatcher::configure().matcher(a, b)`.
    pub fn new(a: &'a [T], b: &'a [T]) -> SequenceMatcher<'a, T> {
        SequenceMatcher::configure().matcher(a, b)
    }

    pub(crate) fn from_config(junk: JunkFilter<T>, autojunk: bool) -> SequenceMatcher<'a, T> {
        SequenceMatcher {
            a: None,
            b: None,
            junk,
            autojunk,
            b2j: HashMap::new(),
            bjunk: HashSet::new(),
            bpopular: HashSet::new(),
            fullbcount: OnceCell::new(),
            matching_blocks: OnceCell::new(),
            opcodes: OnceCell::new(),
        }
    }

    /// Sets both sequences.
    pub fn set_sequences(&mut self, a: &'a [T], b: &'a [T]) {
        self.set_first(a);
        self.set_second(b);
    }

    /// Sets the first sequence.
    ///
    /// Passing the very same slice again keeps all cached results.
    /// Otherwise the matching blocks and opcodes are discarded, the index
    /// of the second sequence is kept.
    pub fn set_first(&mut self, a: &'a [T]) {
        if let Some(old) = self.a {
            if ptr::eq(old, a) {
                return;
            }
        }
        self.a = Some(a);
        self.matching_blocks.take();
        self.opcodes.take();
    }

    /// Sets the second sequence.
    ///
    /// Passing the very same slice again keeps all cached results.
    /// Otherwise the sequence is indexed from scratch and every cached
    /// result is discarded.
    pub fn set_second(&mut self, b: &'a [T]) {
        if let Some(old) = self.b {
            if ptr::eq(old, b) {
                return;
            }
        }
        self.b = Some(b);
        self.matching_blocks.take();
        self.opcodes.take();
        self.fullbcount.take();
        self.chain_b(b);
    }

    /// Returns the first sequence if set.
    pub fn first(&self) -> Option<&'a [T]> {
        self.a
    }

    /// Returns the second sequence if set.
    pub fn second(&self) -> Option<&'a [T]> {
        self.b
    }

    /// Returns `true` if `item` was classified as junk in the second
    /// sequence.
    pub fn is_b_junk(&self, item: &T) -> bool {
        self.bjunk.contains(item)
    }

    /// Returns `true` if `item` is so frequent in the second sequence that
    /// it is excluded from anchoring matches.
    pub fn is_b_popular(&self, item: &T) -> bool {
        self.bpopular.contains(item)
    }

    /// Returns the ascending positions in the second sequence at which
    /// `item` occurs, or `None` for junk, popular and absent elements.
    pub fn b_positions(&self, item: &T) -> Option<&[usize]> {
        self.b2j.get(item).map(|x| &x[..])
    }

    fn sequences(&self) -> Result<(&'a [T], &'a [T]), MatchError> {
        match (self.a, self.b) {
            (Some(a), Some(b)) => Ok((a, b)),
            (None, _) => Err(MatchError::MissingSequence(Side::A)),
            (_, None) => Err(MatchError::MissingSequence(Side::B)),
        }
    }

    fn chain_b(&mut self, b: &'a [T]) {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (idx, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(idx);
        }

        // junk is purged before popularity is decided, so an element is
        // never in both sets
        let mut bjunk = HashSet::new();
        if !self.junk.is_disabled() {
            let junk = self.junk;
            b2j.retain(|item, _| {
                if junk.is_junk(item) {
                    bjunk.insert(*item);
                    false
                } else {
                    true
                }
            });
        }

        let mut bpopular = HashSet::new();
        if self.autojunk && b.len() >= POPULAR_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|item, indexes| {
                if indexes.len() > ntest {
                    bpopular.insert(*item);
                    false
                } else {
                    true
                }
            });
        }

        debug!(
            "indexed second sequence: len={} keys={} junk={} popular={}",
            b.len(),
            b2j.len(),
            bjunk.len(),
            bpopular.len()
        );

        self.b2j = b2j;
        self.bjunk = bjunk;
        self.bpopular = bpopular;
    }

    /// Finds the longest matching block in `a[a_lo..a_hi]` and
    /// `b[b_lo..b_hi]`.
    ///
    /// Of all maximal blocks the one starting earliest in `a` is returned,
    /// and of those the one starting earliest in `b`.  The search first
    /// ignores junk and popular elements, the winning block is then grown
    /// over adjacent equal elements on both sides.  A block never starts on
    /// junk unless junk is all that matches.  If nothing matches
    /// `(a_lo, b_lo, 0)` is returned.
    ///
    /// ```rust
    /// use seqdiff::{Match, SequenceMatcher};
    ///
    /// let a = " abcd".chars().collect::<Vec<_>>();
    /// let b = "abcd abcd".chars().collect::<Vec<_>>();
    /// let matcher = SequenceMatcher::new(&a, &b);
    /// assert_eq!(matcher.find_longest_match(0, 5, 0, 9).unwrap(), Match::new(1, 0, 4));
    /// ```
    pub fn find_longest_match(
        &self,
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Result<Match, MatchError> {
        let (a, b) = self.sequences()?;
        if a_lo > a_hi || b_lo > b_hi || a_hi > a.len() || b_hi > b.len() {
            return Err(MatchError::InvalidRange {
                a_lo,
                a_hi,
                b_lo,
                b_hi,
                len_a: a.len(),
                len_b: b.len(),
            });
        }
        let mut scratch = Scratch::default();
        Ok(self.longest_match(&mut scratch, a, b, a_lo, a_hi, b_lo, b_hi))
    }

    #[allow(clippy::too_many_arguments)]
    fn longest_match(
        &self,
        scratch: &mut Scratch,
        a: &[T],
        b: &[T],
        a_lo: usize,
        a_hi: usize,
        b_lo: usize,
        b_hi: usize,
    ) -> Match {
        let mut best = Match::new(a_lo, b_lo, 0);

        scratch.j2len.clear();
        for i in a_lo..a_hi {
            scratch.new_j2len.clear();
            if let Some(indexes) = self.b2j.get(&a[i]) {
                let start = indexes.partition_point(|&j| j < b_lo);
                for &j in &indexes[start..] {
                    if j >= b_hi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| scratch.j2len.get(&prev))
                        .map_or(0, |&x| x)
                        + 1;
                    scratch.new_j2len.insert(j, k);
                    if k > best.size {
                        best = Match::new(i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            mem::swap(&mut scratch.j2len, &mut scratch.new_j2len);
        }

        // Popular elements are not in b2j so the best block so far holds
        // neither junk nor popular elements.  Grow it over equal non-junk
        // elements first, then suck up adjacent equal junk.
        for junk in [false, true] {
            while best.a > a_lo
                && best.b > b_lo
                && self.is_b_junk(&b[best.b - 1]) == junk
                && a[best.a - 1] == b[best.b - 1]
            {
                best.a -= 1;
                best.b -= 1;
                best.size += 1;
            }
            while best.a + best.size < a_hi
                && best.b + best.size < b_hi
                && self.is_b_junk(&b[best.b + best.size]) == junk
                && a[best.a + best.size] == b[best.b + best.size]
            {
                best.size += 1;
            }
        }

        best
    }

    /// Returns the list of matching blocks.
    ///
    /// Blocks are ascending and non-overlapping in both sequences, no two
    /// neighbours touch end-to-end and the last block is the sentinel
    /// `(len(a), len(b), 0)`.  The result is cached until either sequence
    /// changes.
    ///
    /// ```rust
    /// use seqdiff::{Match, SequenceMatcher};
    ///
    /// let a = ['a', 'b', 'x', 'c', 'd'];
    /// let b = ['a', 'b', 'c', 'd'];
    /// let matcher = SequenceMatcher::new(&a, &b);
    /// assert_eq!(matcher.get_matching_blocks().unwrap(), &[
    ///     Match::new(0, 0, 2),
    ///     Match::new(3, 2, 2),
    ///     Match::new(5, 4, 0),
    /// ]);
    /// ```
    pub fn get_matching_blocks(&self) -> Result<&[Match], MatchError> {
        let (a, b) = self.sequences()?;
        if let Some(blocks) = self.matching_blocks.get() {
            trace!("matching blocks cache hit");
            return Ok(blocks);
        }
        Ok(self
            .matching_blocks
            .get_or_init(|| self.compute_matching_blocks(a, b)))
    }

    pub(crate) fn compute_matching_blocks(&self, a: &[T], b: &[T]) -> Vec<Match> {
        let mut scratch = Scratch::default();
        let mut blocks = Vec::new();

        // A work queue instead of recursion so that heavily fragmented
        // inputs cannot exhaust the stack.
        let mut queue = vec![(0, a.len(), 0, b.len())];
        while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
            let m = self.longest_match(&mut scratch, a, b, a_lo, a_hi, b_lo, b_hi);
            trace!(
                "region a[{}..{}] b[{}..{}] -> ({}, {}, {})",
                a_lo,
                a_hi,
                b_lo,
                b_hi,
                m.a,
                m.b,
                m.size
            );
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if a_lo < m.a && b_lo < m.b {
                queue.push((a_lo, m.a, b_lo, m.b));
            }
            if m.a + m.size < a_hi && m.b + m.size < b_hi {
                queue.push((m.a + m.size, a_hi, m.b + m.size, b_hi));
            }
        }

        let rv = collapse_matching_blocks(blocks, a.len(), b.len());
        debug!("computed {} matching blocks", rv.len() - 1);
        rv
    }

    /// Returns the opcodes that turn the first sequence into the second.
    ///
    /// The first opcode starts at `(0, 0)`, every following one starts
    /// where the previous one ended and the last one ends at
    /// `(len(a), len(b))`.  The result is cached until either sequence
    /// changes.
    pub fn get_opcodes(&self) -> Result<&[Opcode], MatchError> {
        if let Some(ops) = self.opcodes.get() {
            trace!("opcodes cache hit");
            return Ok(ops);
        }
        let blocks = self.get_matching_blocks()?;
        Ok(self
            .opcodes
            .get_or_init(|| opcodes_from_matching_blocks(blocks)))
    }

    /// Isolates change clusters with up to `n` elements of context.
    ///
    /// See [`group_opcodes`](crate::common::group_opcodes) for the exact
    /// rules.  [`DEFAULT_CONTEXT_SIZE`](crate::DEFAULT_CONTEXT_SIZE) is the
    /// customary value for `n`.
    pub fn get_grouped_opcodes(&self, n: usize) -> Result<Vec<Vec<Opcode>>, MatchError> {
        Ok(group_opcodes(self.get_opcodes()?.to_vec(), n))
    }

    /// Return a measure of the sequences' similarity in the range `0..=1`.
    ///
    /// This is `2.0 * M / T` where `T` is the total number of elements in
    /// both sequences and `M` the number of matched elements.  It is `1.0`
    /// for identical sequences and `0.0` if nothing matches.
    pub fn ratio(&self) -> Result<f32, MatchError> {
        let (a, b) = self.sequences()?;
        let matches = matched_len(self.get_matching_blocks()?);
        Ok(calculate_ratio(matches, a.len() + b.len()))
    }

    /// Returns an upper bound on [`ratio`](Self::ratio) relatively quickly.
    ///
    /// Both sequences are treated as multisets, the number of matches is
    /// the size of their intersection.
    pub fn quick_ratio(&self) -> Result<f32, MatchError> {
        let (a, b) = self.sequences()?;
        let fullbcount = self.fullbcount.get_or_init(|| {
            let mut counts = HashMap::new();
            for item in b {
                *counts.entry(item).or_insert(0) += 1;
            }
            counts
        });

        // avail[x] is how many more times x can still be matched in b
        let mut avail: HashMap<&T, usize> = HashMap::new();
        let mut matches = 0;
        for item in a {
            let numb = match avail.get(item) {
                Some(&numb) => numb,
                None => fullbcount.get(item).map_or(0, |&x| x),
            };
            if numb > 0 {
                matches += 1;
            }
            avail.insert(item, numb.saturating_sub(1));
        }

        Ok(calculate_ratio(matches, a.len() + b.len()))
    }

    /// Returns an upper bound on [`ratio`](Self::ratio) very quickly.
    ///
    /// There cannot be more matches than elements in the shorter sequence.
    pub fn real_quick_ratio(&self) -> Result<f32, MatchError> {
        let (a, b) = self.sequences()?;
        Ok(calculate_ratio(a.len().min(b.len()), a.len() + b.len()))
    }

    /// Replays the opcodes into a [`DiffHook`].
    pub fn diff<D>(&self, d: &mut D) -> Result<(), D::Error>
    where
        D: DiffHook,
        D::Error: From<MatchError>,
    {
        replay(d, self.get_opcodes()?)
    }
}

#[cfg(test)]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_ratio_and_opcodes() {
    let a = chars("abcd");
    let b = chars("bcde");
    let matcher = SequenceMatcher::new(&a, &b);
    assert_eq!(matcher.ratio().unwrap(), 0.75);
    assert_eq!(matcher.quick_ratio().unwrap(), 0.75);
    assert_eq!(matcher.real_quick_ratio().unwrap(), 1.0);
    insta::assert_debug_snapshot!(matcher.get_opcodes().unwrap(), @r###"
    [
        Opcode {
            tag: Delete,
            a1: 0,
            a2: 1,
            b1: 0,
            b2: 0,
        },
        Opcode {
            tag: Equal,
            a1: 1,
            a2: 4,
            b1: 0,
            b2: 3,
        },
        Opcode {
            tag: Insert,
            a1: 4,
            a2: 4,
            b1: 3,
            b2: 4,
        },
    ]
    "###);
}

#[test]
fn test_opcodes_with_replace() {
    let a = chars("qabxcd");
    let b = chars("abycdf");
    let matcher = SequenceMatcher::new(&a, &b);
    let rendered = matcher
        .get_opcodes()
        .unwrap()
        .iter()
        .map(|op| {
            format!(
                "{} {} -> {}",
                op.tag,
                a[op.a_range()].iter().collect::<String>(),
                b[op.b_range()].iter().collect::<String>()
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        rendered,
        vec![
            "delete q -> ",
            "equal ab -> ab",
            "replace x -> y",
            "equal cd -> cd",
            "insert  -> f",
        ]
    );
}

#[test]
fn test_no_match() {
    let a = chars("ab");
    let b = chars("c");
    let matcher = SequenceMatcher::new(&a, &b);
    assert_eq!(matcher.find_longest_match(0, 2, 0, 1).unwrap(), Match::new(0, 0, 0));
    assert_eq!(matcher.ratio().unwrap(), 0.0);
    assert_eq!(
        matcher.get_opcodes().unwrap(),
        &[Opcode::new(crate::DiffTag::Replace, 0, 2, 0, 1)]
    );
}

#[test]
fn test_empty_sequences() {
    let a: Vec<char> = vec![];
    let b: Vec<char> = vec![];
    let matcher = SequenceMatcher::new(&a, &b);
    assert_eq!(matcher.ratio().unwrap(), 1.0);
    assert_eq!(matcher.quick_ratio().unwrap(), 1.0);
    assert_eq!(matcher.real_quick_ratio().unwrap(), 1.0);
    assert_eq!(matcher.get_matching_blocks().unwrap(), &[Match::new(0, 0, 0)]);
    assert!(matcher.get_opcodes().unwrap().is_empty());
    assert!(matcher.get_grouped_opcodes(3).unwrap().is_empty());
}

#[test]
fn test_one_side_empty() {
    let empty: Vec<char> = vec![];
    let full = chars("abc");

    let matcher = SequenceMatcher::new(&empty, &full);
    assert_eq!(
        matcher.get_opcodes().unwrap(),
        &[Opcode::new(crate::DiffTag::Insert, 0, 0, 0, 3)]
    );
    assert_eq!(matcher.ratio().unwrap(), 0.0);

    let matcher = SequenceMatcher::new(&full, &empty);
    assert_eq!(
        matcher.get_opcodes().unwrap(),
        &[Opcode::new(crate::DiffTag::Delete, 0, 3, 0, 0)]
    );
    assert_eq!(
        matcher.get_grouped_opcodes(3).unwrap(),
        vec![vec![Opcode::new(crate::DiffTag::Delete, 0, 3, 0, 0)]]
    );
}

#[test]
fn test_junk_skips_leading_blank() {
    let a = chars(" abcd");
    let b = chars("abcd abcd");

    let matcher = SequenceMatcher::new(&a, &b);
    assert!(matcher.is_b_junk(&' '));
    assert_eq!(matcher.b_positions(&' '), None);
    assert_eq!(matcher.b_positions(&'a'), Some(&[0, 5][..]));
    assert_eq!(matcher.find_longest_match(0, 5, 0, 9).unwrap(), Match::new(1, 0, 4));

    let matcher = SequenceMatcher::configure().no_junk().matcher(&a, &b);
    assert!(!matcher.is_b_junk(&' '));
    assert_eq!(matcher.find_longest_match(0, 5, 0, 9).unwrap(), Match::new(0, 4, 5));
}

#[test]
fn test_junk_is_absorbed_at_edges() {
    // the best block is "bc", the surrounding blanks are junk but equal
    let a = chars("a bc d");
    let b = chars("x bc y");
    let matcher = SequenceMatcher::new(&a, &b);
    assert_eq!(matcher.find_longest_match(0, 6, 0, 6).unwrap(), Match::new(1, 1, 4));
}

#[test]
fn test_custom_junk_lines() {
    let a = vec!["fn main() {", "", "    foo();", "}"];
    let b = vec!["fn main() {", "", "    bar();", "", "}"];
    let matcher = SequenceMatcher::<&str>::configure()
        .junk(|line| line.trim().is_empty())
        .matcher(&a, &b);
    assert!(matcher.is_b_junk(&""));
    assert!(!matcher.is_b_junk(&"}"));
    insta::assert_debug_snapshot!(matcher.get_matching_blocks().unwrap(), @r###"
    [
        Match {
            a: 0,
            b: 0,
            size: 2,
        },
        Match {
            a: 3,
            b: 4,
            size: 1,
        },
        Match {
            a: 4,
            b: 5,
            size: 0,
        },
    ]
    "###);
}

#[cfg(test)]
fn with_popular_element() -> Vec<u32> {
    (0..200u32).map(|x| if x % 20 == 0 { 1000 } else { x }).collect()
}

#[test]
fn test_popular_elements() {
    let b = with_popular_element();
    let a = b.clone();

    let matcher = SequenceMatcher::new(&a, &b);
    assert!(matcher.is_b_popular(&1000));
    assert!(!matcher.is_b_junk(&1000));
    assert_eq!(matcher.b_positions(&1000), None);
    assert_eq!(matcher.b_positions(&7), Some(&[7][..]));
    // popular elements are recovered when growing the best block
    assert_eq!(
        matcher.find_longest_match(0, 200, 0, 200).unwrap(),
        Match::new(0, 0, 200)
    );
    assert_eq!(matcher.ratio().unwrap(), 1.0);

    let matcher = SequenceMatcher::configure().autojunk(false).matcher(&a, &b);
    assert!(!matcher.is_b_popular(&1000));
    assert_eq!(matcher.b_positions(&1000).map(|x| x.len()), Some(10));
}

#[test]
fn test_junk_wins_over_popular() {
    let b = with_popular_element();
    let a = b.clone();
    let matcher = SequenceMatcher::<u32>::configure()
        .junk(|x| *x == 1000)
        .matcher(&a, &b);
    assert!(matcher.is_b_junk(&1000));
    assert!(!matcher.is_b_popular(&1000));
}

#[test]
fn test_short_sequences_have_no_popular_elements() {
    let b = vec![1u32; 199];
    let a = b.clone();
    let matcher = SequenceMatcher::new(&a, &b);
    assert!(!matcher.is_b_popular(&1));
    assert_eq!(matcher.b_positions(&1).map(|x| x.len()), Some(199));
}

#[test]
fn test_grouped_opcodes() {
    let a: Vec<String> = (1..40).map(|x| x.to_string()).collect();
    let mut b = a.clone();
    b.insert(8, "i".to_string());
    b[20].push('x');
    b.drain(23..28);
    b[30].push('y');

    let matcher = SequenceMatcher::new(&a, &b);
    let groups = matcher
        .get_grouped_opcodes(crate::DEFAULT_CONTEXT_SIZE)
        .unwrap()
        .into_iter()
        .map(|group| group.iter().map(|op| op.to_string()).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    insta::assert_debug_snapshot!(groups, @r###"
    [
        [
            "  equal a[5:8] b[5:8]",
            " insert a[8:8] b[8:9]",
            "  equal a[8:11] b[9:12]",
        ],
        [
            "  equal a[16:19] b[17:20]",
            "replace a[19:20] b[20:21]",
            "  equal a[20:22] b[21:23]",
            " delete a[22:27] b[23:23]",
            "  equal a[27:30] b[23:26]",
        ],
        [
            "  equal a[31:34] b[27:30]",
            "replace a[34:35] b[30:31]",
        ],
    ]
    "###);
}

#[test]
fn test_grouped_opcodes_with_all_context() {
    let a = chars("abc");
    let b = chars("axc");
    let matcher = SequenceMatcher::new(&a, &b);
    assert_eq!(
        matcher.get_grouped_opcodes(usize::MAX).unwrap(),
        vec![vec![
            Opcode::new(crate::DiffTag::Equal, 0, 1, 0, 1),
            Opcode::new(crate::DiffTag::Replace, 1, 2, 1, 2),
        ]]
    );
}

#[test]
fn test_missing_sequences() {
    let a = chars("abc");
    let mut matcher = SequenceMatcher::<char>::default();
    assert_eq!(
        matcher.get_opcodes().unwrap_err(),
        MatchError::MissingSequence(Side::A)
    );
    matcher.set_first(&a);
    assert_eq!(
        matcher.get_grouped_opcodes(3).unwrap_err(),
        MatchError::MissingSequence(Side::B)
    );
    assert_eq!(
        matcher.ratio().unwrap_err(),
        MatchError::MissingSequence(Side::B)
    );
    matcher.set_second(&a);
    assert_eq!(matcher.ratio().unwrap(), 1.0);
}

#[test]
fn test_invalid_range() {
    let a = chars("abc");
    let b = chars("abcd");
    let matcher = SequenceMatcher::new(&a, &b);
    assert!(matches!(
        matcher.find_longest_match(0, 4, 0, 4),
        Err(MatchError::InvalidRange { len_a: 3, .. })
    ));
    assert!(matches!(
        matcher.find_longest_match(2, 1, 0, 4),
        Err(MatchError::InvalidRange { .. })
    ));
    assert_eq!(matcher.find_longest_match(1, 3, 1, 4).unwrap(), Match::new(1, 1, 2));
}

#[test]
fn test_cache_invalidation() {
    let a = chars("abcd");
    let a_copy = a.clone();
    let b = chars("bcde");
    let b_copy = b.clone();

    let mut matcher = SequenceMatcher::new(&a, &b);
    let first = matcher.get_opcodes().unwrap().to_vec();
    assert_eq!(matcher.get_opcodes().unwrap(), &first[..]);
    matcher.quick_ratio().unwrap();
    assert!(matcher.matching_blocks.get().is_some());
    assert!(matcher.opcodes.get().is_some());
    assert!(matcher.fullbcount.get().is_some());

    // the very same slices keep everything
    matcher.set_sequences(&a, &b);
    assert!(matcher.matching_blocks.get().is_some());
    assert!(matcher.opcodes.get().is_some());
    assert!(matcher.fullbcount.get().is_some());

    // an equal but distinct first sequence drops the results only
    matcher.set_first(&a_copy);
    assert!(matcher.matching_blocks.get().is_none());
    assert!(matcher.opcodes.get().is_none());
    assert!(matcher.fullbcount.get().is_some());
    assert_eq!(matcher.get_opcodes().unwrap(), &first[..]);

    // a new second sequence drops everything
    matcher.set_second(&b_copy);
    assert!(matcher.matching_blocks.get().is_none());
    assert!(matcher.opcodes.get().is_none());
    assert!(matcher.fullbcount.get().is_none());
    assert_eq!(matcher.get_opcodes().unwrap(), &first[..]);

    // sub-slices of the same buffer are different sequences
    matcher.set_first(&a[..2]);
    assert!(matcher.matching_blocks.get().is_none());
    assert_eq!(matcher.ratio().unwrap(), 2.0 * 1.0 / 6.0);
}

#[test]
fn test_compare_one_against_many() {
    let word = chars("apple");
    let candidates = ["ape", "apply", "maple", "pear"]
        .iter()
        .map(|x| chars(x))
        .collect::<Vec<_>>();
    let mut matcher = SequenceMatcher::configure().build();
    matcher.set_second(&word);
    let ratios = candidates
        .iter()
        .map(|candidate| {
            matcher.set_first(candidate);
            matcher.ratio().unwrap()
        })
        .collect::<Vec<_>>();
    assert_eq!(ratios, vec![0.75, 0.8, 0.8, 2.0 * 2.0 / 9.0]);
}

#[test]
fn test_diff_hook() {
    use std::ops::Range;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl DiffHook for Recorder {
        type Error = MatchError;

        fn equal(&mut self, a: Range<usize>, b: Range<usize>) -> Result<(), MatchError> {
            self.0.push(format!("equal {:?} {:?}", a, b));
            Ok(())
        }

        fn delete(&mut self, a: Range<usize>, b_pos: usize) -> Result<(), MatchError> {
            self.0.push(format!("delete {:?} {}", a, b_pos));
            Ok(())
        }

        fn insert(&mut self, a_pos: usize, b: Range<usize>) -> Result<(), MatchError> {
            self.0.push(format!("insert {} {:?}", a_pos, b));
            Ok(())
        }

        fn finish(&mut self) -> Result<(), MatchError> {
            self.0.push("finish".into());
            Ok(())
        }
    }

    let a = chars("qabxcd");
    let b = chars("abycdf");
    let matcher = SequenceMatcher::new(&a, &b);
    let mut d = Recorder::default();
    matcher.diff(&mut d).unwrap();
    assert_eq!(
        d.0,
        vec![
            "delete 0..1 0",
            "equal 1..3 0..2",
            "delete 3..4 2",
            "insert 4 2..3",
            "equal 4..6 3..5",
            "insert 6 5..6",
            "finish",
        ]
    );

    let mut d = Recorder::default();
    let matcher = SequenceMatcher::<char>::default();
    assert_eq!(
        matcher.diff(&mut d).unwrap_err(),
        MatchError::MissingSequence(Side::A)
    );
    assert!(d.0.is_empty());
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::common::apply_opcodes;
    use crate::types::DiffTag;
    use proptest::prelude::*;

    fn check_blocks(a: &[u8], b: &[u8], blocks: &[Match]) -> Result<(), TestCaseError> {
        let (last, rest) = blocks.split_last().expect("sentinel missing");
        prop_assert_eq!(*last, Match::new(a.len(), b.len(), 0));
        let mut prev: Option<&Match> = None;
        for block in rest {
            prop_assert!(block.size > 0);
            prop_assert_eq!(&a[block.a_range()], &b[block.b_range()]);
            if let Some(prev) = prev {
                prop_assert!(prev.a + prev.size <= block.a);
                prop_assert!(prev.b + prev.size <= block.b);
                prop_assert!(!prev.touches(block));
            }
            prev = Some(block);
        }
        if let Some(prev) = prev {
            prop_assert!(prev.a + prev.size <= last.a);
            prop_assert!(prev.b + prev.size <= last.b);
        }
        Ok(())
    }

    fn check_opcodes(a: &[u8], b: &[u8], ops: &[Opcode]) -> Result<(), TestCaseError> {
        let (mut i, mut j) = (0, 0);
        for op in ops {
            prop_assert_eq!((op.a1, op.b1), (i, j));
            match op.tag {
                DiffTag::Equal => prop_assert_eq!(&a[op.a_range()], &b[op.b_range()]),
                DiffTag::Delete => prop_assert!(op.b1 == op.b2 && op.a1 < op.a2),
                DiffTag::Insert => prop_assert!(op.a1 == op.a2 && op.b1 < op.b2),
                DiffTag::Replace => prop_assert!(op.a1 < op.a2 && op.b1 < op.b2),
            }
            i = op.a2;
            j = op.b2;
        }
        prop_assert_eq!((i, j), (a.len(), b.len()));
        let rebuilt = apply_opcodes(ops, a, b);
        prop_assert_eq!(rebuilt, b.iter().collect::<Vec<_>>());
        Ok(())
    }

    fn check_groups(ops: &[Opcode], groups: &[Vec<Opcode>], n: usize) -> Result<(), TestCaseError> {
        let changes = ops
            .iter()
            .filter(|op| op.tag != DiffTag::Equal)
            .collect::<Vec<_>>();
        let grouped_changes = groups
            .iter()
            .flatten()
            .filter(|op| op.tag != DiffTag::Equal)
            .collect::<Vec<_>>();
        prop_assert_eq!(grouped_changes, changes);

        for group in groups {
            prop_assert!(group.iter().any(|op| op.tag != DiffTag::Equal));
            for pair in group.windows(2) {
                prop_assert_eq!((pair[0].a2, pair[0].b2), (pair[1].a1, pair[1].b1));
            }
            for (idx, op) in group.iter().enumerate() {
                if op.tag != DiffTag::Equal {
                    continue;
                }
                prop_assert_eq!(op.a2 - op.a1, op.b2 - op.b1);
                let inner = idx > 0 && idx + 1 < group.len();
                let limit = if inner { n.saturating_mul(2) } else { n };
                prop_assert!(op.a2 - op.a1 <= limit);
            }
        }

        if let Some(last) = groups.last().and_then(|group| group.last()) {
            prop_assert_ne!(last.tag, DiffTag::Equal);
        }
        Ok(())
    }

    fn context_size() -> impl Strategy<Value = usize> {
        prop_oneof![
            0usize..6,
            Just(usize::MAX),
            Just(usize::MAX / 2 + 1),
        ]
    }

    fn check_ratios(matcher: &SequenceMatcher<u8>) -> Result<(), TestCaseError> {
        let ratio = matcher.ratio().unwrap();
        let quick = matcher.quick_ratio().unwrap();
        let real_quick = matcher.real_quick_ratio().unwrap();
        prop_assert!((0.0..=1.0).contains(&ratio));
        prop_assert!(ratio <= quick);
        prop_assert!(quick <= real_quick);
        Ok(())
    }

    proptest! {
        /// Opcodes applied to the first sequence rebuild the second one.
        #[test]
        fn opcodes_round_trip(
            a in prop::collection::vec(0u8..6, 0..60),
            b in prop::collection::vec(0u8..6, 0..60),
        ) {
            let matcher = SequenceMatcher::new(&a, &b);
            check_blocks(&a, &b, matcher.get_matching_blocks().unwrap())?;
            check_opcodes(&a, &b, matcher.get_opcodes().unwrap())?;
            check_ratios(&matcher)?;
        }

        /// Blank bytes are junk by default and must not break the laws.
        #[test]
        fn junk_keeps_invariants(
            a in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b' ', b'\t']), 0..60),
            b in prop::collection::vec(prop::sample::select(vec![b'a', b'b', b' ', b'\t']), 0..60),
        ) {
            let matcher = SequenceMatcher::new(&a, &b);
            check_blocks(&a, &b, matcher.get_matching_blocks().unwrap())?;
            check_opcodes(&a, &b, matcher.get_opcodes().unwrap())?;
            check_ratios(&matcher)?;
        }

        /// Long inputs over a small alphabet make every element popular.
        #[test]
        fn popular_keeps_invariants(
            a in prop::collection::vec(0u8..8, 150..260),
            b in prop::collection::vec(0u8..8, 200..260),
        ) {
            let matcher = SequenceMatcher::new(&a, &b);
            check_blocks(&a, &b, matcher.get_matching_blocks().unwrap())?;
            check_opcodes(&a, &b, matcher.get_opcodes().unwrap())?;
            check_ratios(&matcher)?;
        }

        /// Without junk a ratio of one means equality, zero means disjoint.
        #[test]
        fn ratio_extremes(
            a in prop::collection::vec(0u8..10, 0..40),
            b in prop::collection::vec(0u8..10, 0..40),
        ) {
            let matcher = SequenceMatcher::configure().no_junk().matcher(&a, &b);
            let ratio = matcher.ratio().unwrap();
            prop_assert_eq!(ratio == 1.0, a == b);
            let disjoint = !a.iter().any(|x| b.contains(x));
            prop_assert_eq!(ratio == 0.0, disjoint && !(a.is_empty() && b.is_empty()));

            let same = SequenceMatcher::configure().no_junk().matcher(&a, &a);
            prop_assert_eq!(same.ratio().unwrap(), 1.0);
        }

        /// Grouping keeps every change once and trims context to `n`.
        #[test]
        fn grouping_trims_context(
            a in prop::collection::vec(0u8..4, 0..80),
            b in prop::collection::vec(0u8..4, 0..80),
            n in context_size(),
        ) {
            let matcher = SequenceMatcher::new(&a, &b);
            let ops = matcher.get_opcodes().unwrap();
            let groups = matcher.get_grouped_opcodes(n).unwrap();
            check_groups(ops, &groups, n)?;

            let same = SequenceMatcher::new(&a, &a);
            prop_assert!(same.get_grouped_opcodes(n).unwrap().is_empty());
        }

        /// Repeated queries return the cached result.
        #[test]
        fn queries_are_idempotent(
            a in prop::collection::vec(0u8..6, 0..40),
            b in prop::collection::vec(0u8..6, 0..40),
        ) {
            let matcher = SequenceMatcher::new(&a, &b);
            let blocks = matcher.get_matching_blocks().unwrap().to_vec();
            let ops = matcher.get_opcodes().unwrap().to_vec();
            prop_assert_eq!(matcher.get_matching_blocks().unwrap(), &blocks[..]);
            prop_assert_eq!(matcher.get_opcodes().unwrap(), &ops[..]);

            let fresh = SequenceMatcher::new(&a, &b);
            prop_assert_eq!(fresh.get_opcodes().unwrap(), &ops[..]);
        }
    }
}
