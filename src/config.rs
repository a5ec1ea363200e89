use std::fmt;

use crate::element::Element;
use crate::matcher::SequenceMatcher;

/// The default number of context elements used for grouping opcodes.
pub const DEFAULT_CONTEXT_SIZE: usize = 3;

/// Decides which elements of the second sequence are junk.
///
/// Junk elements never anchor a match but may still be absorbed at the
/// edges of one.
pub enum JunkFilter<T> {
    /// Uses [`Element::is_default_junk`].
    Default,
    /// Nothing is junk.
    Disabled,
    /// A custom predicate.
    Custom(fn(&T) -> bool),
}

impl<T: Element> JunkFilter<T> {
    /// Returns `true` if no element can ever be junk.
    pub fn is_disabled(&self) -> bool {
        matches!(self, JunkFilter::Disabled)
    }

    /// Classifies an element.
    pub fn is_junk(&self, item: &T) -> bool {
        match *self {
            JunkFilter::Default => item.is_default_junk(),
            JunkFilter::Disabled => false,
            JunkFilter::Custom(f) => f(item),
        }
    }
}

impl<T> Clone for JunkFilter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JunkFilter<T> {}

impl<T> Default for JunkFilter<T> {
    fn default() -> Self {
        JunkFilter::Default
    }
}

impl<T> fmt::Debug for JunkFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JunkFilter::Default => f.write_str("Default"),
            JunkFilter::Disabled => f.write_str("Disabled"),
            JunkFilter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A builder type config for more complex uses of [`SequenceMatcher`].
pub struct MatcherConfig<T> {
    junk: JunkFilter<T>,
    autojunk: bool,
}

impl<T> Clone for MatcherConfig<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatcherConfig<T> {}

impl<T> fmt::Debug for MatcherConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MatcherConfig")
            .field("junk", &self.junk)
            .field("autojunk", &self.autojunk)
            .finish()
    }
}

impl<T> Default for MatcherConfig<T> {
    fn default() -> MatcherConfig<T> {
        MatcherConfig {
            junk: JunkFilter::Default,
            autojunk: true,
        }
    }
}

impl<T: Element> MatcherConfig<T> {
    /// Sets a custom junk predicate.
    ///
    /// The predicate is only ever called on elements of the second
    /// sequence, once per distinct element whenever that sequence is set.
    pub fn junk(&mut self, f: fn(&T) -> bool) -> &mut Self {
        self.junk = JunkFilter::Custom(f);
        self
    }

    /// Turns junk classification off.
    pub fn no_junk(&mut self) -> &mut Self {
        self.junk = JunkFilter::Disabled;
        self
    }

    /// Controls the popular element heuristic.
    ///
    /// When enabled (the default) elements making up more than 1% of a
    /// second sequence of at least 200 elements are not used to anchor
    /// matches.
    pub fn autojunk(&mut self, yes: bool) -> &mut Self {
        self.autojunk = yes;
        self
    }

    /// Returns the configured junk filter.
    pub fn junk_filter(&self) -> &JunkFilter<T> {
        &self.junk
    }

    /// Returns `true` if the popular element heuristic is enabled.
    pub fn autojunk_enabled(&self) -> bool {
        self.autojunk
    }

    /// Creates a matcher with both sequences assigned.
    pub fn matcher<'a>(&self, a: &'a [T], b: &'a [T]) -> SequenceMatcher<'a, T> {
        let mut rv = self.build();
        rv.set_sequences(a, b);
        rv
    }

    /// Creates a matcher without any sequences assigned.
    ///
    /// All queries fail with [`MatchError::MissingSequence`](crate::MatchError::MissingSequence)
    /// until both sequences are set.
    pub fn build<'a>(&self) -> SequenceMatcher<'a, T>
    where
        T: 'a,
    {
        SequenceMatcher::from_config(self.junk, self.autojunk)
    }
}

#[test]
fn test_junk_filter() {
    let filter: JunkFilter<char> = JunkFilter::Default;
    assert!(filter.is_junk(&' '));
    assert!(!filter.is_junk(&'x'));

    let filter: JunkFilter<char> = JunkFilter::Disabled;
    assert!(filter.is_disabled());
    assert!(!filter.is_junk(&' '));

    let filter: JunkFilter<char> = JunkFilter::Custom(|c| *c == 'x');
    assert!(filter.is_junk(&'x'));
    assert!(!filter.is_junk(&' '));
    assert_eq!(format!("{:?}", filter), "Custom(..)");
}

#[test]
fn test_config_builder() {
    let mut config = MatcherConfig::<char>::default();
    assert!(config.autojunk_enabled());
    config.no_junk().autojunk(false);
    assert!(config.junk_filter().is_disabled());
    assert!(!config.autojunk_enabled());
}
