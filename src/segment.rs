//! Lazy segmentation of text into `KanjiChar` units.
//!
//! A selector scalar attaches to the scalar before it, unless that
//! scalar is itself a selector. Everything else becomes a singleton
//! unit. This is *not* grapheme-cluster segmentation: combining marks,
//! ZWJ sequences and the like are split per scalar.

use crate::decode;
use crate::kanji_char::{is_variation_selector, KanjiChar};
use std::fmt;

/// An iterator over the `KanjiChar` units of UTF-8 text.
///
/// Malformed byte sequences are replaced with U+FFFD before grouping;
/// iteration never fails. The iterator is `Copy`, so enumerating twice
/// from the same starting value yields identical sequences.
#[derive(Clone, Copy)]
pub struct KanjiChars<'a> {
    rest: &'a [u8],
    pending: Option<char>,
}

impl<'a> KanjiChars<'a> {
    /// Creates an iterator over the units of a string slice.
    pub fn new(s: &'a str) -> Self {
        KanjiChars {
            rest: s.as_bytes(),
            pending: None,
        }
    }

    /// Creates an iterator over the units of a raw, possibly malformed
    /// UTF-8 buffer.
    pub fn from_utf8(bytes: &'a [u8]) -> Self {
        KanjiChars {
            rest: bytes,
            pending: None,
        }
    }

    fn next_scalar(&mut self) -> Option<char> {
        if self.rest.is_empty() {
            return None;
        }
        let decoded = decode::decode_first_utf8(self.rest);
        self.rest = &self.rest[decoded.len()..];
        Some(decoded.scalar_lossy())
    }
}

impl<'a> Iterator for KanjiChars<'a> {
    type Item = KanjiChar;

    fn next(&mut self) -> Option<Self::Item> {
        let prev = match self.pending.take() {
            Some(prev) => prev,
            None => self.next_scalar()?,
        };
        match self.next_scalar() {
            None => Some(KanjiChar::new(prev)),
            Some(next) if is_variation_selector(next) && !is_variation_selector(prev) => {
                Some(KanjiChar::attach_unchecked(prev, next))
            }
            Some(next) => {
                self.pending = Some(next);
                Some(KanjiChar::new(prev))
            }
        }
    }
}

impl<'a> DoubleEndedIterator for KanjiChars<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return self.pending.take().map(KanjiChar::new);
        }
        let decoded = decode::decode_last_utf8(self.rest);
        let tail = decoded.scalar_lossy();
        let head = &self.rest[..self.rest.len() - decoded.len()];
        if !is_variation_selector(tail) {
            self.rest = head;
            return Some(KanjiChar::new(tail));
        }
        // a trailing selector attaches to the scalar before it, unless
        // that scalar is itself a selector
        if head.is_empty() {
            match self.pending {
                Some(prev) if !is_variation_selector(prev) => {
                    self.pending = None;
                    self.rest = head;
                    Some(KanjiChar::attach_unchecked(prev, tail))
                }
                _ => {
                    self.rest = head;
                    Some(KanjiChar::new(tail))
                }
            }
        } else {
            let prev_decoded = decode::decode_last_utf8(head);
            let prev = prev_decoded.scalar_lossy();
            if is_variation_selector(prev) {
                self.rest = head;
                Some(KanjiChar::new(tail))
            } else {
                self.rest = &head[..head.len() - prev_decoded.len()];
                Some(KanjiChar::attach_unchecked(prev, tail))
            }
        }
    }
}

impl fmt::Debug for KanjiChars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KanjiChars(")?;
        f.debug_list().entries(*self).finish()?;
        write!(f, ")")
    }
}

/// An iterator over the `KanjiChar` units of a UTF-16 code-unit buffer.
///
/// Invalid code units are replaced with U+FFFD before grouping. An
/// invalid unit and its replacement are both one code unit long, so
/// positions derived from unit lengths stay aligned with the source
/// buffer. (No such property holds for UTF-8.)
#[derive(Clone, Copy)]
pub struct KanjiCharsUtf16<'a> {
    rest: &'a [u16],
    pending: Option<char>,
}

impl<'a> KanjiCharsUtf16<'a> {
    /// Creates an iterator over the units of a UTF-16 buffer.
    pub fn new(units: &'a [u16]) -> Self {
        KanjiCharsUtf16 {
            rest: units,
            pending: None,
        }
    }

    fn next_scalar(&mut self) -> Option<char> {
        if self.rest.is_empty() {
            return None;
        }
        let decoded = decode::decode_first_utf16(self.rest);
        self.rest = &self.rest[decoded.len()..];
        Some(decoded.scalar_lossy())
    }
}

impl<'a> Iterator for KanjiCharsUtf16<'a> {
    type Item = KanjiChar;

    fn next(&mut self) -> Option<Self::Item> {
        let prev = match self.pending.take() {
            Some(prev) => prev,
            None => self.next_scalar()?,
        };
        match self.next_scalar() {
            None => Some(KanjiChar::new(prev)),
            Some(next) if is_variation_selector(next) && !is_variation_selector(prev) => {
                Some(KanjiChar::attach_unchecked(prev, next))
            }
            Some(next) => {
                self.pending = Some(next);
                Some(KanjiChar::new(prev))
            }
        }
    }
}

impl<'a> DoubleEndedIterator for KanjiCharsUtf16<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return self.pending.take().map(KanjiChar::new);
        }
        let decoded = decode::decode_last_utf16(self.rest);
        let tail = decoded.scalar_lossy();
        let head = &self.rest[..self.rest.len() - decoded.len()];
        if !is_variation_selector(tail) {
            self.rest = head;
            return Some(KanjiChar::new(tail));
        }
        if head.is_empty() {
            match self.pending {
                Some(prev) if !is_variation_selector(prev) => {
                    self.pending = None;
                    self.rest = head;
                    Some(KanjiChar::attach_unchecked(prev, tail))
                }
                _ => {
                    self.rest = head;
                    Some(KanjiChar::new(tail))
                }
            }
        } else {
            let prev_decoded = decode::decode_last_utf16(head);
            let prev = prev_decoded.scalar_lossy();
            if is_variation_selector(prev) {
                self.rest = head;
                Some(KanjiChar::new(tail))
            } else {
                self.rest = &head[..head.len() - prev_decoded.len()];
                Some(KanjiChar::attach_unchecked(prev, tail))
            }
        }
    }
}

impl fmt::Debug for KanjiCharsUtf16<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KanjiCharsUtf16(")?;
        f.debug_list().entries(*self).finish()?;
        write!(f, ")")
    }
}

/// Variation-selector aware segmentation methods for string slices.
pub trait KanjiSegmentation {
    /// Returns an iterator over the `KanjiChar` units of this text.
    fn kanji_chars(&self) -> KanjiChars<'_>;

    /// The number of `KanjiChar` units in this text.
    ///
    /// This is not a grapheme count; every scalar outside the
    /// base-plus-selector pattern counts as one unit.
    fn length_as_kanji(&self) -> usize;
}

impl KanjiSegmentation for str {
    fn kanji_chars(&self) -> KanjiChars<'_> {
        KanjiChars::new(self)
    }

    fn length_as_kanji(&self) -> usize {
        self.kanji_chars().count()
    }
}

/// The number of `KanjiChar` units in a UTF-16 buffer.
pub fn length_as_kanji_utf16(units: &[u16]) -> usize {
    KanjiCharsUtf16::new(units).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! str {
        ($($v:expr),* $(,)?) => {
            [$($v),*].into_iter().collect::<String>()
        };
    }

    fn units(s: &str) -> Vec<KanjiChar> {
        s.kanji_chars().collect()
    }

    #[test]
    fn test_selector_attaches() {
        assert_eq!(
            vec![
                KanjiChar::new('山'),
                KanjiChar::new('本'),
                KanjiChar::attach_unchecked('博', '\u{E0100}'),
            ],
            units(&str!['山', '本', '博', '\u{E0100}'])
        );
        assert_eq!(
            vec![
                KanjiChar::new('山'),
                KanjiChar::new('本'),
                KanjiChar::attach_unchecked('神', '\u{FE00}'),
            ],
            units(&str!['山', '本', '神', '\u{FE00}'])
        );
    }

    #[test]
    fn test_lone_selector_is_its_own_base() {
        assert_eq!(
            vec![KanjiChar::new('\u{E0100}')],
            units(&str!['\u{E0100}'])
        );
    }

    #[test]
    fn test_selector_run_never_chains() {
        // the second selector finds a selector before it and stays alone
        assert_eq!(
            vec![
                KanjiChar::attach_unchecked('博', '\u{E0100}'),
                KanjiChar::new('\u{E0101}'),
            ],
            units(&str!['博', '\u{E0100}', '\u{E0101}'])
        );
        assert_eq!(
            vec![
                KanjiChar::new('\u{E0100}'),
                KanjiChar::new('\u{E0101}'),
                KanjiChar::new('\u{E0102}'),
            ],
            units(&str!['\u{E0100}', '\u{E0101}', '\u{E0102}'])
        );
    }

    #[test]
    fn test_empty_and_plain() {
        assert_eq!(Vec::<KanjiChar>::new(), units(""));
        assert_eq!(3, "あいう".length_as_kanji());
        assert_eq!(3, str!['山', '本', '博', '\u{E0100}'].length_as_kanji());
    }

    #[test]
    fn test_malformed_utf8_becomes_replacement() {
        let collected: Vec<_> = KanjiChars::from_utf8(&[0x41, 0x80, 0xE1, 0x80]).collect();
        assert_eq!(
            vec![
                KanjiChar::new('A'),
                KanjiChar::new('\u{FFFD}'),
                KanjiChar::new('\u{FFFD}'),
            ],
            collected
        );
    }

    #[test]
    fn test_utf16_segmentation() {
        // 山本𩸽(U+29E3D)+VS17, with the supplementary pair spelled out
        let text = [0x5C71, 0x672C, 0xD867, 0xDE3D, 0xDB40, 0xDD00];
        let collected: Vec<_> = KanjiCharsUtf16::new(&text).collect();
        assert_eq!(
            vec![
                KanjiChar::new('山'),
                KanjiChar::new('本'),
                KanjiChar::attach_unchecked('\u{29E3D}', '\u{E0100}'),
            ],
            collected
        );
    }

    #[test]
    fn test_utf16_lone_surrogate_becomes_replacement() {
        let collected: Vec<_> = KanjiCharsUtf16::new(&[0xD867, 0x5C71]).collect();
        assert_eq!(
            vec![KanjiChar::new('\u{FFFD}'), KanjiChar::new('山')],
            collected
        );
    }

    #[test]
    fn test_reverse_matches_forward() {
        for text in [
            str!['山', '本', '博', '\u{E0100}', 'で', 'す'],
            str!['博', '\u{E0100}', '\u{E0101}'],
            str!['\u{E0100}', '\u{E0101}', '\u{E0102}'],
            str!['\u{FE00}'],
            str!['山', '本', '\u{29E3D}', '\u{E0100}'],
        ] {
            let forward: Vec<_> = text.kanji_chars().collect();
            let mut backward: Vec<_> = text.kanji_chars().rev().collect();
            backward.reverse();
            assert_eq!(forward, backward, "text {:?}", text);
        }
    }

    #[test]
    fn test_reverse_matches_forward_on_malformed_utf8() {
        // a truncated sequence is one unit from either end
        let truncated: &[u8] = &[0x41, 0xE1, 0x80];
        let forward: Vec<_> = KanjiChars::from_utf8(truncated).collect();
        assert_eq!(
            vec![KanjiChar::new('A'), KanjiChar::new('\u{FFFD}')],
            forward
        );
        for bytes in [
            truncated,
            &[0x80, 0x80],
            &[0x41, 0x80],
            &[0xED, 0xA0, 0x80],
            &[0xF0, 0x90, 0x80],
            &[0xF0, 0x90, 0x80, 0x80, 0x80],
        ] {
            let forward: Vec<_> = KanjiChars::from_utf8(bytes).collect();
            let mut backward: Vec<_> = KanjiChars::from_utf8(bytes).rev().collect();
            backward.reverse();
            assert_eq!(forward, backward, "bytes {:?}", bytes);
        }
    }

    #[test]
    fn test_restartable() {
        let text = str!['山', '博', '\u{E0100}'];
        let iter = text.kanji_chars();
        let first: Vec<_> = iter.collect();
        let second: Vec<_> = iter.collect();
        assert_eq!(first, second);
    }
}
