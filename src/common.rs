//! Helpers operating on already computed matching blocks and opcodes.
//!
//! These do not need access to a [`SequenceMatcher`](crate::SequenceMatcher)
//! and are exposed so that opcode lists obtained elsewhere (for instance
//! deserialized ones) can be processed the same way.
use crate::types::{DiffTag, Match, Opcode};

/// Return a measure of similarity in the range `0..=1`.
///
/// `matches` is the number of matched elements, `length` the combined
/// length of both sequences.  Two empty sequences are a complete match.
///
/// The division happens in `f64`.  The result is still an `f32`, so once
/// the combined length exceeds 2^25 elements a single mismatch can round
/// to `1.0`.
pub fn calculate_ratio(matches: usize, length: usize) -> f32 {
    if length == 0 {
        1.0
    } else {
        (2.0 * matches as f64 / length as f64) as f32
    }
}

/// Sorts raw matching blocks, merges the ones that touch end-to-end and
/// appends the `(len_a, len_b, 0)` sentinel.
pub fn collapse_matching_blocks(
    mut blocks: Vec<Match>,
    len_a: usize,
    len_b: usize,
) -> Vec<Match> {
    blocks.sort();

    let mut rv = Vec::with_capacity(blocks.len() + 1);
    let mut pending = Match::default();
    for block in blocks {
        if pending.touches(&block) {
            pending.size += block.size;
        } else {
            // a zero sized pending block is the initial dummy
            if pending.size > 0 {
                rv.push(pending);
            }
            pending = block;
        }
    }
    if pending.size > 0 {
        rv.push(pending);
    }

    rv.push(Match::new(len_a, len_b, 0));
    rv
}

/// Turns a sentinel terminated list of matching blocks into opcodes.
pub fn opcodes_from_matching_blocks(blocks: &[Match]) -> Vec<Opcode> {
    let mut rv = Vec::new();
    let mut i = 0;
    let mut j = 0;

    for block in blocks {
        // everything before the block in either sequence is uncovered
        let tag = match (i < block.a, j < block.b) {
            (true, true) => Some(DiffTag::Replace),
            (true, false) => Some(DiffTag::Delete),
            (false, true) => Some(DiffTag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            rv.push(Opcode::new(tag, i, block.a, j, block.b));
        }
        i = block.a + block.size;
        j = block.b + block.size;
        if block.size > 0 {
            rv.push(Opcode::new(DiffTag::Equal, block.a, i, block.b, j));
        }
    }

    rv
}

/// Isolate change clusters by eliminating ranges with no changes.
///
/// Every group carries at most `n` elements of context on either side of
/// its changes.  Equal ranges longer than `2 * n` end the current group
/// and start a new one.  The trailing equal opcode of the final group is
/// dropped, and so is the final group if nothing else remains in it.
///
/// An empty opcode list is treated like a single equal element on both
/// sides, which yields no groups.
pub fn group_opcodes(mut ops: Vec<Opcode>, n: usize) -> Vec<Vec<Opcode>> {
    if ops.is_empty() {
        ops.push(Opcode::new(DiffTag::Equal, 0, 1, 0, 1));
    }

    if let Some(op) = ops.first_mut() {
        if op.tag == DiffTag::Equal {
            op.a1 = op.a1.max(op.a2.saturating_sub(n));
            op.b1 = op.b1.max(op.b2.saturating_sub(n));
        }
    }

    if let Some(op) = ops.last_mut() {
        if op.tag == DiffTag::Equal {
            op.a2 = op.a2.min(op.a1.saturating_add(n));
            op.b2 = op.b2.min(op.b1.saturating_add(n));
        }
    }

    let mut rv = Vec::new();
    let mut pending_group = Vec::new();

    for mut op in ops {
        // End the current group and start a new one whenever
        // there is a large range with no changes.
        if op.tag == DiffTag::Equal && op.a2 - op.a1 > n.saturating_mul(2) {
            pending_group.push(Opcode::new(
                DiffTag::Equal,
                op.a1,
                op.a2.min(op.a1.saturating_add(n)),
                op.b1,
                op.b2.min(op.b1.saturating_add(n)),
            ));
            rv.push(std::mem::take(&mut pending_group));
            op.a1 = op.a1.max(op.a2.saturating_sub(n));
            op.b1 = op.b1.max(op.b2.saturating_sub(n));
        }
        pending_group.push(op);
    }

    if let Some(DiffTag::Equal) = pending_group.last().map(|op| op.tag) {
        pending_group.pop();
    }
    if !pending_group.is_empty() {
        rv.push(pending_group);
    }

    rv
}

/// Rebuilds the second sequence by applying `ops` to `a`.
///
/// Equal spans are taken from `a`, inserted and replacing spans from `b`.
/// For a correct opcode list the result is element-wise equal to `b`.
pub fn apply_opcodes<'x, T>(ops: &[Opcode], a: &'x [T], b: &'x [T]) -> Vec<&'x T> {
    let mut rv = Vec::with_capacity(b.len());
    for op in ops {
        match op.tag {
            DiffTag::Equal => rv.extend(&a[op.a_range()]),
            DiffTag::Delete => {}
            DiffTag::Insert | DiffTag::Replace => rv.extend(&b[op.b_range()]),
        }
    }
    rv
}

/// Counts the matched elements of a list of matching blocks.
pub fn matched_len(blocks: &[Match]) -> usize {
    blocks.iter().map(|block| block.size).sum()
}

#[test]
fn test_calculate_ratio() {
    assert_eq!(calculate_ratio(0, 0), 1.0);
    assert_eq!(calculate_ratio(3, 8), 0.75);
    assert_eq!(calculate_ratio(0, 3), 0.0);
}

#[test]
fn test_calculate_ratio_large_lengths() {
    // 2^24 + 1 is not representable as an f32
    assert!(calculate_ratio(1 << 23, (1 << 24) + 1) < 1.0);
    assert_eq!(calculate_ratio(1 << 24, 1 << 25), 1.0);
}

#[test]
fn test_collapse_matching_blocks() {
    let blocks = vec![
        Match::new(4, 4, 1),
        Match::new(0, 0, 2),
        Match::new(2, 2, 1),
        Match::new(6, 7, 1),
    ];
    insta::assert_debug_snapshot!(collapse_matching_blocks(blocks, 8, 9), @r###"
    [
        Match {
            a: 0,
            b: 0,
            size: 3,
        },
        Match {
            a: 4,
            b: 4,
            size: 1,
        },
        Match {
            a: 6,
            b: 7,
            size: 1,
        },
        Match {
            a: 8,
            b: 9,
            size: 0,
        },
    ]
    "###);
}

#[test]
fn test_collapse_empty() {
    assert_eq!(
        collapse_matching_blocks(vec![], 0, 0),
        vec![Match::new(0, 0, 0)]
    );
}

#[test]
fn test_opcodes_from_matching_blocks() {
    // "qabxcd" vs "abycdf"
    let blocks = vec![Match::new(1, 0, 2), Match::new(4, 3, 2), Match::new(6, 6, 0)];
    let ops = opcodes_from_matching_blocks(&blocks)
        .into_iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        ops,
        vec![
            " delete a[0:1] b[0:0]",
            "  equal a[1:3] b[0:2]",
            "replace a[3:4] b[2:3]",
            "  equal a[4:6] b[3:5]",
            " insert a[6:6] b[5:6]",
        ]
    );
}

#[test]
fn test_group_opcodes() {
    use DiffTag::*;
    let ops = vec![
        Opcode::new(Equal, 0, 8, 0, 8),
        Opcode::new(Insert, 8, 8, 8, 9),
        Opcode::new(Equal, 8, 19, 9, 20),
        Opcode::new(Replace, 19, 20, 20, 21),
        Opcode::new(Equal, 20, 22, 21, 23),
        Opcode::new(Delete, 22, 27, 23, 23),
        Opcode::new(Equal, 27, 34, 23, 30),
        Opcode::new(Replace, 34, 35, 30, 31),
        Opcode::new(Equal, 35, 39, 31, 35),
    ];
    let groups = group_opcodes(ops, 3);
    assert_eq!(
        groups,
        vec![
            vec![
                Opcode::new(Equal, 5, 8, 5, 8),
                Opcode::new(Insert, 8, 8, 8, 9),
                Opcode::new(Equal, 8, 11, 9, 12),
            ],
            vec![
                Opcode::new(Equal, 16, 19, 17, 20),
                Opcode::new(Replace, 19, 20, 20, 21),
                Opcode::new(Equal, 20, 22, 21, 23),
                Opcode::new(Delete, 22, 27, 23, 23),
                Opcode::new(Equal, 27, 30, 23, 26),
            ],
            vec![
                Opcode::new(Equal, 31, 34, 27, 30),
                Opcode::new(Replace, 34, 35, 30, 31),
            ],
        ]
    );
}

#[test]
fn test_group_opcodes_degenerate() {
    assert!(group_opcodes(vec![], 3).is_empty());
    assert!(group_opcodes(vec![Opcode::new(DiffTag::Equal, 0, 40, 0, 40)], 3).is_empty());
    assert_eq!(
        group_opcodes(vec![Opcode::new(DiffTag::Insert, 0, 0, 0, 2)], 3),
        vec![vec![Opcode::new(DiffTag::Insert, 0, 0, 0, 2)]]
    );
}

#[test]
fn test_group_opcodes_huge_context() {
    use DiffTag::*;
    let ops = vec![
        Opcode::new(Equal, 0, 4, 0, 4),
        Opcode::new(Replace, 4, 5, 4, 5),
        Opcode::new(Equal, 5, 9, 5, 9),
    ];
    for &n in &[usize::MAX, usize::MAX / 2 + 1] {
        assert_eq!(
            group_opcodes(ops.clone(), n),
            vec![vec![
                Opcode::new(Equal, 0, 4, 0, 4),
                Opcode::new(Replace, 4, 5, 4, 5),
            ]]
        );
    }
    assert_eq!(
        group_opcodes(
            vec![Opcode::new(Replace, 0, 1, 0, 1), Opcode::new(Equal, 1, 5, 1, 5)],
            usize::MAX / 2 + 1
        ),
        vec![vec![Opcode::new(Replace, 0, 1, 0, 1)]]
    );
}

#[test]
fn test_apply_opcodes() {
    let a = ['q', 'a', 'b', 'x', 'c', 'd'];
    let b = ['a', 'b', 'y', 'c', 'd', 'f'];
    let blocks = vec![Match::new(1, 0, 2), Match::new(4, 3, 2), Match::new(6, 6, 0)];
    let ops = opcodes_from_matching_blocks(&blocks);
    assert_eq!(apply_opcodes(&ops, &a, &b), b.iter().collect::<Vec<_>>());
}
