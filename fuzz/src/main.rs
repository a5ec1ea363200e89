#![allow(clippy::all)]

use afl::fuzz;
use arbitrary::Arbitrary;
use seqdiff::common::apply_opcodes;
use seqdiff::text::{split_chars, split_lines, split_words};
use seqdiff::{Element, Match, SequenceMatcher};

#[derive(Arbitrary, Debug)]
enum FuzzVariant {
    Bytes(Vec<u8>, Vec<u8>),
    Chars(String, String),
    Lines(String, String),
    Words(String, String),
}

#[derive(Arbitrary, Debug)]
struct FuzzOptions {
    no_junk: bool,
    autojunk: bool,
    context: u8,
    variant: FuzzVariant,
}

fn check<T: Element>(options: &FuzzOptions, a: &[T], b: &[T]) {
    let mut config = SequenceMatcher::configure();
    config.autojunk(options.autojunk);
    if options.no_junk {
        config.no_junk();
    }
    let matcher = config.matcher(a, b);

    let blocks = matcher.get_matching_blocks().unwrap();
    assert_eq!(blocks.last(), Some(&Match::new(a.len(), b.len(), 0)));
    for block in blocks {
        assert!(a[block.a_range()] == b[block.b_range()]);
    }

    let ops = matcher.get_opcodes().unwrap();
    let rebuilt = apply_opcodes(ops, a, b);
    assert!(rebuilt.into_iter().eq(b.iter()));

    let ratio = matcher.ratio().unwrap();
    assert!(ratio <= matcher.quick_ratio().unwrap());
    assert!(matcher.quick_ratio().unwrap() <= matcher.real_quick_ratio().unwrap());
    let _ = matcher.get_grouped_opcodes(options.context as usize).unwrap();
}

fn main() {
    fuzz!(|data: FuzzOptions| {
        match &data.variant {
            FuzzVariant::Bytes(old, new) => check(&data, old, new),
            FuzzVariant::Chars(old, new) => check(&data, &split_chars(old), &split_chars(new)),
            FuzzVariant::Lines(old, new) => check(&data, &split_lines(old), &split_lines(new)),
            FuzzVariant::Words(old, new) => check(&data, &split_words(old), &split_words(new)),
        };
    });
}
