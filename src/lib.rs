#![deny(unsafe_op_in_unsafe_fn)]
#![deny(missing_docs, missing_debug_implementations)]
//! Variation-sequence aware text handling for Japanese.
//!
//! Japanese text distinguishes itaiji, glyph variants of the same
//! kanji, by following a base character with a Unicode variation
//! selector: a standardized one (U+FE00..U+FE0F) for CJK compatibility
//! ideographs, or an ideographic one (U+E0100..U+E01EF) registered in
//! an IVD collection such as Adobe-Japan1, Hanyo-Denshi or Moji-Joho.
//! Byte-wise string operations tear these two-scalar sequences apart
//! and treat `神` and `神︀` as unrelated.
//!
//! This crate works on `KanjiChar` units instead: a base scalar plus
//! its optional selector. On top of that it provides
//!
//! * segmentation of UTF-8 and UTF-16 text into units ([`KanjiChars`],
//!   [`KanjiCharsUtf16`]), lossy over malformed input;
//! * equality, substring search and replacement that either honor or
//!   ignore selectors ([`equals`], [`find`], [`replace`] and friends);
//! * a registry of registered sequences ([`VariantRegistry`]) with a
//!   bundled Japanese snapshot;
//! * selector stripping and compatibility-ideograph conversion
//!   ([`strip_selectors`], [`convert_compatibility_ideographs`]).
//!
//! Reported match positions count UTF-16 code units, the unit most
//! Japanese text processing stacks index by.

pub(crate) mod decode;

pub(crate) mod kanji_char;

pub(crate) mod normalize;

pub(crate) mod registry;

pub(crate) mod search;

pub(crate) mod segment;

pub(crate) mod tables;

pub use crate::decode::{
    decode_first_utf16, decode_first_utf8, decode_last_utf16, decode_last_utf8, Decoded,
};
pub use crate::kanji_char::{
    is_compatibility_ideograph, is_ivs, is_svs, is_variation_selector, ConstructionError,
    KanjiChar,
};
pub use crate::normalize::{
    convert_compatibility_ideographs, convert_compatibility_ideographs_utf16,
    has_invalid_selector, has_invalid_selector_utf16, strip_selectors, strip_selectors_utf16,
    CompatTarget, StripMode, TargetError,
};
pub use crate::registry::{CompatInfo, VariantCollection, VariantRegistry};
pub use crate::search::{
    contains, contains_utf16, equals, equals_utf16, equals_utf8, find, find_utf16, replace,
    replace_utf16, rfind, rfind_utf16, IvsComparison, KanjiMatch,
};
pub use crate::segment::{length_as_kanji_utf16, KanjiChars, KanjiCharsUtf16, KanjiSegmentation};
