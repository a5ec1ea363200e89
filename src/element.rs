use std::hash::Hash;

/// An item that can be placed in a sequence handed to the matcher.
///
/// Elements need to be hashable since the second sequence is indexed by
/// value.  The provided [`is_default_junk`](Element::is_default_junk)
/// method is what [`JunkFilter::Default`](crate::JunkFilter::Default)
/// consults.  For text like types it considers lone whitespace characters
/// (space, tab, newline, form feed and carriage return) junk, everything
/// else is never junk unless a custom filter is configured.
pub trait Element: Hash + Eq {
    /// Returns `true` if this element is junk under the default filter.
    fn is_default_junk(&self) -> bool {
        false
    }
}

fn is_junk_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0c' | '\r')
}

impl Element for char {
    fn is_default_junk(&self) -> bool {
        is_junk_char(*self)
    }
}

impl Element for u8 {
    fn is_default_junk(&self) -> bool {
        is_junk_char(*self as char)
    }
}

impl Element for str {
    fn is_default_junk(&self) -> bool {
        let mut chars = self.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => is_junk_char(c),
            _ => false,
        }
    }
}

impl Element for String {
    fn is_default_junk(&self) -> bool {
        self.as_str().is_default_junk()
    }
}

impl Element for [u8] {
    fn is_default_junk(&self) -> bool {
        match *self {
            [c] => c.is_default_junk(),
            _ => false,
        }
    }
}

impl Element for Vec<u8> {
    fn is_default_junk(&self) -> bool {
        self.as_slice().is_default_junk()
    }
}

impl<'a, T: Element + ?Sized> Element for &'a T {
    fn is_default_junk(&self) -> bool {
        (**self).is_default_junk()
    }
}

macro_rules! impl_never_junk {
    ($($ty:ty),*) => {
        $(impl Element for $ty {})*
    };
}

impl_never_junk!(bool, i8, i16, i32, i64, i128, isize, u16, u32, u64, u128, usize);

#[test]
fn test_default_junk() {
    assert!(' '.is_default_junk());
    assert!('\x0c'.is_default_junk());
    assert!(!'a'.is_default_junk());
    assert!(b'\t'.is_default_junk());
    assert!(" ".is_default_junk());
    assert!("\r".is_default_junk());
    assert!(!"  ".is_default_junk());
    assert!(!"".is_default_junk());
    assert!(!"x".is_default_junk());
    assert!(String::from("\n").is_default_junk());
    assert!((&&" ").is_default_junk());
    assert!(b" "[..].is_default_junk());
    assert!(!42u32.is_default_junk());
}
