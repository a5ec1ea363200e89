//! This crate implements a sequence matcher in the spirit of Python's
//! `difflib`.  It compares two sequences of hashable elements, finds the
//! blocks they have in common and describes how to turn the first sequence
//! into the second one.
//!
//! The matcher looks for the longest contiguous matching block that does
//! not contain "junk" elements and then applies the same idea to the
//! pieces left and right of it.  The results are not minimal edit scripts
//! but tend to look natural to people.
//!
//! ```rust
//! use seqdiff::{DiffTag, SequenceMatcher};
//!
//! let a = "qabxcd".chars().collect::<Vec<_>>();
//! let b = "abycdf".chars().collect::<Vec<_>>();
//! let matcher = SequenceMatcher::new(&a, &b);
//!
//! for op in matcher.get_opcodes().unwrap() {
//!     println!("{}", op);
//! }
//! assert_eq!(matcher.get_opcodes().unwrap()[0].tag, DiffTag::Delete);
//! assert!(matcher.ratio().unwrap() > 0.6);
//! ```
//!
//! The crate is split into a few parts:
//!
//! * [`SequenceMatcher`]: the matcher itself, configured through
//!   [`MatcherConfig`].
//! * [`common`]: helpers that operate on already computed matching blocks
//!   and opcodes.
//! * [`text`]: tokenizers that turn strings into sequences plus
//!   [`get_close_matches`](text::get_close_matches).
//! * [`utils`]: one call shortcuts.
//!
//! # Junk
//!
//! Elements of the second sequence can be classified as junk.  Junk never
//! anchors a match but is absorbed when it borders one.  By default the
//! [`Element::is_default_junk`] classification is used which treats single
//! blank characters as junk.  In addition, when the second sequence has at
//! least 200 elements, elements making up more than 1% of it are treated as
//! "popular" and excluded the same way.  Both can be turned off through
//! [`SequenceMatcher::configure`].
//!
//! # Features
//!
//! * `text`: enables the text tokenizers and the [`utils`] module.  This is
//!   on by default.
//! * `unicode`: enables unicode word and grapheme tokenization.
//! * `serde`: adds serde support for the result types.
#![warn(missing_docs)]

pub mod common;
mod config;
mod element;
mod error;
mod hook;
mod matcher;
#[cfg(feature = "text")]
pub mod text;
mod types;
#[cfg(feature = "text")]
pub mod utils;

pub use self::config::{JunkFilter, MatcherConfig, DEFAULT_CONTEXT_SIZE};
pub use self::element::Element;
pub use self::error::{MatchError, Side};
pub use self::hook::{replay, DiffHook};
pub use self::matcher::SequenceMatcher;
pub use self::types::{ChangeTag, DiffTag, Match, Opcode};
