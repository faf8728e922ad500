//! The `KanjiChar` value type: one base scalar plus an optional
//! variation selector.

use std::{fmt, hash, str::FromStr};
use thiserror::Error;

/// Returns whether this scalar is a Standardized Variation Selector
/// (`U+FE00..=U+FE0F`).
pub fn is_svs(ch: char) -> bool {
    matches!(ch, '\u{FE00}'..='\u{FE0F}')
}

/// Returns whether this scalar is an Ideographic Variation Selector
/// (`U+E0100..=U+E01EF`).
pub fn is_ivs(ch: char) -> bool {
    matches!(ch, '\u{E0100}'..='\u{E01EF}')
}

/// Returns whether this scalar is a variation selector (SVS or IVS).
pub fn is_variation_selector(ch: char) -> bool {
    is_svs(ch) || is_ivs(ch)
}

/// Returns whether this scalar lies in one of the CJK Compatibility
/// Ideographs blocks.
pub fn is_compatibility_ideograph(ch: char) -> bool {
    matches!(ch, '\u{F900}'..='\u{FAFF}' | '\u{2F800}'..='\u{2FA1F}')
}

/// The error returned when a `KanjiChar` cannot be constructed from the
/// given parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The selector scalar lies outside the SVS and IVS ranges.
    #[error("selector U+{0:04X} is outside the SVS and IVS ranges")]
    SelectorOutOfRange(u32),
    /// The base text contained no scalar at all.
    #[error("base text is empty")]
    EmptyBase,
    /// The base text contained more than one base scalar.
    #[error("base text contains more than one scalar")]
    MultipleScalars,
    /// The scalar following the base is not a variation selector.
    #[error("trailing scalar U+{0:04X} is not a variation selector")]
    TrailingScalar(u32),
}

/// One kanji unit: a base scalar and an optional variation selector.
///
/// When a string contains a lone selector, or a selector directly
/// following another selector, segmentation produces units whose *base*
/// is the selector scalar and whose selector is `None`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct KanjiChar {
    base: char,
    selector: Option<char>,
}

impl KanjiChar {
    /// Creates a unit without a selector.
    pub const fn new(base: char) -> Self {
        KanjiChar {
            base,
            selector: None,
        }
    }

    /// Creates a unit from a base scalar and a selector scalar.
    ///
    /// Fails when the selector is outside the SVS and IVS ranges.
    pub fn with_selector(base: char, selector: char) -> Result<Self, ConstructionError> {
        if !is_variation_selector(selector) {
            return Err(ConstructionError::SelectorOutOfRange(selector as u32));
        }
        Ok(KanjiChar {
            base,
            selector: Some(selector),
        })
    }

    pub(crate) fn attach_unchecked(base: char, selector: char) -> Self {
        debug_assert!(is_variation_selector(selector));
        KanjiChar {
            base,
            selector: Some(selector),
        }
    }

    /// The base scalar.
    pub const fn base(self) -> char {
        self.base
    }

    /// The variation selector, if any.
    pub const fn selector(self) -> Option<char> {
        self.selector
    }

    /// Returns whether this unit carries a variation selector.
    pub const fn is_variation(self) -> bool {
        self.selector.is_some()
    }

    /// Returns whether this unit carries an SVS selector.
    pub fn is_svs_variation(self) -> bool {
        matches!(self.selector, Some(sel) if is_svs(sel))
    }

    /// Returns whether this unit carries an IVS selector.
    pub fn is_ivs_variation(self) -> bool {
        matches!(self.selector, Some(sel) if is_ivs(sel))
    }

    /// Packs the unit into the 32-bit lookup key shared with the
    /// registry tables: `(base << 8) | (selector & 0xFF)`, with a zero
    /// low byte when no selector is present.
    ///
    /// `U+FE00` and `U+E0100` share the low byte 0x00, so a registry
    /// table keyed this way must hold SVS and IVS entries separately.
    pub const fn packed_key(self) -> u32 {
        let low = match self.selector {
            Some(sel) => sel as u32 & 0xFF,
            None => 0,
        };
        ((self.base as u32) << 8) | low
    }

    /// The length of this unit encoded in UTF-8, in bytes.
    pub fn len_utf8(self) -> usize {
        self.base.len_utf8() + self.selector.map_or(0, char::len_utf8)
    }

    /// The length of this unit encoded in UTF-16, in code units.
    pub fn len_utf16(self) -> usize {
        self.base.len_utf16() + self.selector.map_or(0, char::len_utf16)
    }

    /// The length of this unit in scalar values (1 or 2).
    pub const fn len_utf32(self) -> usize {
        match self.selector {
            Some(_) => 2,
            None => 1,
        }
    }
}

impl hash::Hash for KanjiChar {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.packed_key());
    }
}

impl FromStr for KanjiChar {
    type Err = ConstructionError;

    /// Parses one base scalar followed by an optional variation
    /// selector; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scalars = s.chars();
        let base = scalars.next().ok_or(ConstructionError::EmptyBase)?;
        match scalars.next() {
            None => Ok(KanjiChar::new(base)),
            Some(sel) if is_variation_selector(sel) => {
                if scalars.next().is_some() {
                    return Err(ConstructionError::MultipleScalars);
                }
                Ok(KanjiChar {
                    base,
                    selector: Some(sel),
                })
            }
            Some(other) => Err(ConstructionError::TrailingScalar(other as u32)),
        }
    }
}

impl From<char> for KanjiChar {
    fn from(base: char) -> Self {
        KanjiChar::new(base)
    }
}

impl PartialEq<char> for KanjiChar {
    fn eq(&self, rhs: &char) -> bool {
        self.selector.is_none() && self.base == *rhs
    }
}

impl PartialEq<KanjiChar> for char {
    fn eq(&self, rhs: &KanjiChar) -> bool {
        rhs == self
    }
}

impl fmt::Display for KanjiChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if let Some(sel) = self.selector {
            write!(f, "{}", sel)?;
        }
        Ok(())
    }
}

impl fmt::Debug for KanjiChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KanjiChar(U+{:04X}", self.base as u32)?;
        if let Some(sel) = self.selector {
            write!(f, " U+{:04X}", sel as u32)?;
        }
        write!(f, ")")
    }
}
