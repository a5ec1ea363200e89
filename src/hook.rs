use std::ops::Range;

use crate::types::{DiffTag, Opcode};

/// Receives the opcodes of a comparison one at a time.
///
/// Ranges index the first sequence (`a`) or the second sequence (`b`) of a
/// [`SequenceMatcher`](crate::SequenceMatcher).  Positions passed alongside
/// a single range say where in the other sequence the change happens.
/// Renderers implement this instead of matching on [`DiffTag`] themselves.
pub trait DiffHook {
    /// The error produced from the hook methods.
    type Error;

    /// `a[a]` and `b[b]` hold equal elements.  Does nothing by default.
    fn equal(&mut self, a: Range<usize>, b: Range<usize>) -> Result<(), Self::Error> {
        let _ = (a, b);
        Ok(())
    }

    /// `a[a]` is removed.  `b_pos` is the matching position in `b`.
    fn delete(&mut self, a: Range<usize>, b_pos: usize) -> Result<(), Self::Error>;

    /// `b[b]` is added in front of `a[a_pos]`.
    fn insert(&mut self, a_pos: usize, b: Range<usize>) -> Result<(), Self::Error>;

    /// `a[a]` is replaced by `b[b]`.
    ///
    /// Defaults to a delete of `a[a]` followed by an insert of `b[b]` at
    /// the end of the removed range.
    fn replace(&mut self, a: Range<usize>, b: Range<usize>) -> Result<(), Self::Error> {
        let a_end = a.end;
        self.delete(a, b.start)?;
        self.insert(a_end, b)
    }

    /// Called once after the last opcode.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Feeds a list of opcodes into a hook and finishes it.
///
/// Stops at the first error a hook method returns, `finish` is not called
/// in that case.
pub fn replay<D: DiffHook>(d: &mut D, ops: &[Opcode]) -> Result<(), D::Error> {
    for op in ops {
        match op.tag {
            DiffTag::Equal => d.equal(op.a_range(), op.b_range())?,
            DiffTag::Delete => d.delete(op.a_range(), op.b1)?,
            DiffTag::Insert => d.insert(op.a1, op.b_range())?,
            DiffTag::Replace => d.replace(op.a_range(), op.b_range())?,
        }
    }
    d.finish()
}

#[test]
fn test_replay_counts_lengths() {
    #[derive(Default)]
    struct Counter {
        deleted: usize,
        inserted: usize,
        finished: bool,
    }

    impl DiffHook for Counter {
        type Error = ();

        fn delete(&mut self, a: Range<usize>, _: usize) -> Result<(), ()> {
            self.deleted += a.len();
            Ok(())
        }

        fn insert(&mut self, _: usize, b: Range<usize>) -> Result<(), ()> {
            self.inserted += b.len();
            Ok(())
        }

        fn finish(&mut self) -> Result<(), ()> {
            self.finished = true;
            Ok(())
        }
    }

    let ops = [
        Opcode::new(DiffTag::Equal, 0, 2, 0, 2),
        Opcode::new(DiffTag::Replace, 2, 5, 2, 3),
        Opcode::new(DiffTag::Insert, 5, 5, 3, 7),
        Opcode::new(DiffTag::Delete, 5, 6, 7, 7),
    ];
    let mut counter = Counter::default();
    replay(&mut counter, &ops).unwrap();
    assert_eq!(counter.deleted, 4);
    assert_eq!(counter.inserted, 5);
    assert!(counter.finished);
}

#[test]
fn test_replace_splits_at_removed_range() {
    struct Log(Vec<String>);

    impl DiffHook for Log {
        type Error = ();

        fn delete(&mut self, a: Range<usize>, b_pos: usize) -> Result<(), ()> {
            self.0.push(format!("-a{:?} @b{}", a, b_pos));
            Ok(())
        }

        fn insert(&mut self, a_pos: usize, b: Range<usize>) -> Result<(), ()> {
            self.0.push(format!("+b{:?} @a{}", b, a_pos));
            Ok(())
        }
    }

    let mut log = Log(vec![]);
    replay(&mut log, &[Opcode::new(DiffTag::Replace, 3, 5, 2, 3)]).unwrap();
    assert_eq!(log.0, vec!["-a3..5 @b2", "+b2..3 @a5"]);
}

#[test]
fn test_replay_stops_on_error() {
    struct FailOnInsert(usize);

    impl DiffHook for FailOnInsert {
        type Error = &'static str;

        fn equal(&mut self, _: Range<usize>, _: Range<usize>) -> Result<(), Self::Error> {
            self.0 += 1;
            Ok(())
        }

        fn delete(&mut self, _: Range<usize>, _: usize) -> Result<(), Self::Error> {
            Ok(())
        }

        fn insert(&mut self, _: usize, _: Range<usize>) -> Result<(), Self::Error> {
            Err("insert rejected")
        }

        fn finish(&mut self) -> Result<(), Self::Error> {
            Err("finished after an error")
        }
    }

    let ops = [
        Opcode::new(DiffTag::Equal, 0, 1, 0, 1),
        Opcode::new(DiffTag::Insert, 1, 1, 1, 2),
        Opcode::new(DiffTag::Equal, 1, 2, 2, 3),
    ];
    let mut d = FailOnInsert(0);
    assert_eq!(replay(&mut d, &ops), Err("insert rejected"));
    assert_eq!(d.0, 1);
}
