//! Variation-selector aware equality, search and replacement.
//!
//! All searching runs over `KanjiChar` units, so a base and its
//! selector are matched (or ignored) as one thing and a match can
//! never start in the middle of a variation sequence. Reported
//! positions count UTF-16 code units.

use crate::kanji_char::KanjiChar;
use crate::segment::{KanjiChars, KanjiCharsUtf16, KanjiSegmentation};
use smallvec::SmallVec;
use std::borrow::Cow;

type KanjiCharVec = SmallVec<[KanjiChar; 8]>;

/// How two `KanjiChar` units are compared during matching.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IvsComparison {
    /// Base and selector must both agree.
    ExactMatch,
    /// Only the bases are compared; selectors on either side are
    /// ignored.
    IgnoreSelector,
}

impl IvsComparison {
    /// Whether two units are equal under this comparison.
    pub fn matches(self, a: KanjiChar, b: KanjiChar) -> bool {
        match self {
            IvsComparison::ExactMatch => a == b,
            IvsComparison::IgnoreSelector => a.base() == b.base(),
        }
    }
}

/// A located occurrence of a pattern.
///
/// Both fields count UTF-16 code units of the searched text. Under
/// `IgnoreSelector` the length can differ from the pattern's own
/// length, since the occurrence keeps the source's selectors.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct KanjiMatch {
    /// Offset of the first matched code unit.
    pub index: usize,
    /// Number of matched code units.
    pub length: usize,
}

fn equals_units(
    mut a: impl Iterator<Item = KanjiChar>,
    mut b: impl Iterator<Item = KanjiChar>,
    comparison: IvsComparison,
) -> bool {
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if comparison.matches(x, y) => {}
            _ => return false,
        }
    }
}

/// Whether two strings are equal under the given comparison.
pub fn equals(a: &str, b: &str, comparison: IvsComparison) -> bool {
    equals_units(a.kanji_chars(), b.kanji_chars(), comparison)
}

/// Whether two UTF-16 buffers are equal under the given comparison.
///
/// Invalid code units decode to U+FFFD first, so two differently
/// malformed buffers can compare equal.
pub fn equals_utf16(a: &[u16], b: &[u16], comparison: IvsComparison) -> bool {
    equals_units(
        KanjiCharsUtf16::new(a),
        KanjiCharsUtf16::new(b),
        comparison,
    )
}

/// Whether two raw UTF-8 buffers are equal under the given comparison,
/// after replacing malformed sequences with U+FFFD.
pub fn equals_utf8(a: &[u8], b: &[u8], comparison: IvsComparison) -> bool {
    equals_units(
        KanjiChars::from_utf8(a),
        KanjiChars::from_utf8(b),
        comparison,
    )
}

/// The standard KMP failure function, computed under the chosen
/// comparison so that `IgnoreSelector` self-overlaps are found too.
fn failure_table(pattern: &[KanjiChar], comparison: IvsComparison) -> SmallVec<[usize; 8]> {
    let mut table = SmallVec::with_capacity(pattern.len());
    if pattern.is_empty() {
        return table;
    }
    table.push(0);
    let mut j = 0;
    for i in 1..pattern.len() {
        while j > 0 && !comparison.matches(pattern[i], pattern[j]) {
            j = table[j - 1];
        }
        if comparison.matches(pattern[i], pattern[j]) {
            j += 1;
        }
        table.push(j);
    }
    table
}

/// Runs KMP over `source`, reporting each match's starting unit index.
/// The callback returns the value to resume `j` with, which lets the
/// caller choose between overlapping and non-overlapping scans, and
/// `None` to stop early.
fn scan_units(
    source: &[KanjiChar],
    pattern: &[KanjiChar],
    comparison: IvsComparison,
    table: &[usize],
    mut on_match: impl FnMut(usize) -> Option<usize>,
) {
    let mut j = 0;
    for (i, &unit) in source.iter().enumerate() {
        while j > 0 && !comparison.matches(unit, pattern[j]) {
            j = table[j - 1];
        }
        if comparison.matches(unit, pattern[j]) {
            j += 1;
        }
        if j == pattern.len() {
            match on_match(i + 1 - pattern.len()) {
                Some(next) => j = next,
                None => return,
            }
        }
    }
}

fn find_in_units(
    source: &[KanjiChar],
    pattern: &[KanjiChar],
    comparison: IvsComparison,
    find_last: bool,
) -> Option<usize> {
    if pattern.is_empty() {
        return Some(0);
    }
    let table = failure_table(pattern, comparison);
    let mut found = None;
    scan_units(source, pattern, comparison, &table, |start| {
        found = Some(start);
        if find_last {
            // keep going; overlapping occurrences count
            Some(table[pattern.len() - 1])
        } else {
            None
        }
    });
    found
}

fn to_match(source: &[KanjiChar], start: usize, pattern_len: usize) -> KanjiMatch {
    let index = source[..start].iter().map(|k| k.len_utf16()).sum();
    let length = source[start..start + pattern_len]
        .iter()
        .map(|k| k.len_utf16())
        .sum();
    KanjiMatch { index, length }
}

fn find_impl(
    source: &[KanjiChar],
    pattern: &[KanjiChar],
    comparison: IvsComparison,
    find_last: bool,
) -> Option<KanjiMatch> {
    let start = find_in_units(source, pattern, comparison, find_last)?;
    Some(to_match(source, start, pattern.len()))
}

/// Finds the first occurrence of `pattern` in `source`.
///
/// An empty pattern matches at the start with length zero.
pub fn find(source: &str, pattern: &str, comparison: IvsComparison) -> Option<KanjiMatch> {
    let source: KanjiCharVec = source.kanji_chars().collect();
    let pattern: KanjiCharVec = pattern.kanji_chars().collect();
    find_impl(&source, &pattern, comparison, false)
}

/// Finds the last occurrence of `pattern` in `source`, counting
/// occurrences that overlap an earlier one.
pub fn rfind(source: &str, pattern: &str, comparison: IvsComparison) -> Option<KanjiMatch> {
    let source: KanjiCharVec = source.kanji_chars().collect();
    let pattern: KanjiCharVec = pattern.kanji_chars().collect();
    find_impl(&source, &pattern, comparison, true)
}

/// Whether `source` contains `pattern`.
pub fn contains(source: &str, pattern: &str, comparison: IvsComparison) -> bool {
    find(source, pattern, comparison).is_some()
}

/// UTF-16 variant of [`find`].
pub fn find_utf16(
    source: &[u16],
    pattern: &[u16],
    comparison: IvsComparison,
) -> Option<KanjiMatch> {
    let source: KanjiCharVec = KanjiCharsUtf16::new(source).collect();
    let pattern: KanjiCharVec = KanjiCharsUtf16::new(pattern).collect();
    find_impl(&source, &pattern, comparison, false)
}

/// UTF-16 variant of [`rfind`].
pub fn rfind_utf16(
    source: &[u16],
    pattern: &[u16],
    comparison: IvsComparison,
) -> Option<KanjiMatch> {
    let source: KanjiCharVec = KanjiCharsUtf16::new(source).collect();
    let pattern: KanjiCharVec = KanjiCharsUtf16::new(pattern).collect();
    find_impl(&source, &pattern, comparison, true)
}

/// UTF-16 variant of [`contains`].
pub fn contains_utf16(source: &[u16], pattern: &[u16], comparison: IvsComparison) -> bool {
    find_utf16(source, pattern, comparison).is_some()
}

fn nonoverlapping_ranges(
    source: &[KanjiChar],
    pattern: &[KanjiChar],
    comparison: IvsComparison,
) -> Vec<(usize, usize)> {
    let table = failure_table(pattern, comparison);
    let mut ranges = Vec::new();
    scan_units(source, pattern, comparison, &table, |start| {
        ranges.push((start, start + pattern.len()));
        Some(0)
    });
    ranges
}

/// Replaces every non-overlapping occurrence of `from` with `to`.
///
/// Returns the source unchanged when `from` is empty or never occurs.
/// Under `IgnoreSelector` the replaced span includes the source's
/// selectors, and `to` is inserted as written.
pub fn replace<'a>(
    source: &'a str,
    from: &str,
    to: &str,
    comparison: IvsComparison,
) -> Cow<'a, str> {
    let units: KanjiCharVec = source.kanji_chars().collect();
    let pattern: KanjiCharVec = from.kanji_chars().collect();
    if pattern.is_empty() {
        return Cow::Borrowed(source);
    }
    let ranges = nonoverlapping_ranges(&units, &pattern, comparison);
    if ranges.is_empty() {
        return Cow::Borrowed(source);
    }
    // byte offset of each unit boundary
    let mut offsets = Vec::with_capacity(units.len() + 1);
    let mut pos = 0;
    offsets.push(0);
    for unit in &units {
        pos += unit.len_utf8();
        offsets.push(pos);
    }
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    for (start, end) in ranges {
        out.push_str(&source[copied..offsets[start]]);
        out.push_str(to);
        copied = offsets[end];
    }
    out.push_str(&source[copied..]);
    Cow::Owned(out)
}

/// UTF-16 variant of [`replace`]. Invalid code units in matched spans
/// are compared as U+FFFD; unmatched spans are copied through
/// untouched.
pub fn replace_utf16<'a>(
    source: &'a [u16],
    from: &[u16],
    to: &[u16],
    comparison: IvsComparison,
) -> Cow<'a, [u16]> {
    let units: KanjiCharVec = KanjiCharsUtf16::new(source).collect();
    let pattern: KanjiCharVec = KanjiCharsUtf16::new(from).collect();
    if pattern.is_empty() {
        return Cow::Borrowed(source);
    }
    let ranges = nonoverlapping_ranges(&units, &pattern, comparison);
    if ranges.is_empty() {
        return Cow::Borrowed(source);
    }
    // an invalid code unit and its U+FFFD stand-in are both one unit
    // wide, so these offsets index the original buffer
    let mut offsets = Vec::with_capacity(units.len() + 1);
    let mut pos = 0;
    offsets.push(0);
    for unit in &units {
        pos += unit.len_utf16();
        offsets.push(pos);
    }
    let mut out = Vec::with_capacity(source.len());
    let mut copied = 0;
    for (start, end) in ranges {
        out.extend_from_slice(&source[copied..offsets[start]]);
        out.extend_from_slice(to);
        copied = offsets[end];
    }
    out.extend_from_slice(&source[copied..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: KanjiMatch = KanjiMatch { index: 0, length: 0 };

    fn m(index: usize, length: usize) -> KanjiMatch {
        KanjiMatch { index, length }
    }

    #[test]
    fn test_equals() {
        assert!(equals("神", "神\u{FE00}", IvsComparison::IgnoreSelector));
        assert!(!equals("神", "神\u{FE00}", IvsComparison::ExactMatch));
        assert!(equals(
            "博\u{E0100}",
            "博\u{E0100}",
            IvsComparison::ExactMatch
        ));
        assert!(!equals(
            "博\u{E0100}",
            "博\u{E0101}",
            IvsComparison::ExactMatch
        ));
        assert!(equals("", "", IvsComparison::ExactMatch));
        assert!(!equals("神", "", IvsComparison::IgnoreSelector));
    }

    #[test]
    fn test_equals_utf8_lossy() {
        // a malformed sequence and a literal U+FFFD compare equal
        assert!(equals_utf8(
            &[0x41, 0x80],
            "A\u{FFFD}".as_bytes(),
            IvsComparison::ExactMatch
        ));
    }

    #[test]
    fn test_find_basic() {
        assert_eq!(
            Some(m(2, 3)),
            find("私は山本博です", "山本博", IvsComparison::ExactMatch)
        );
        assert_eq!(
            Some(m(2, 3)),
            find("私は山本博です", "山本博", IvsComparison::IgnoreSelector)
        );
        assert_eq!(None, find("私は山本です", "山本博", IvsComparison::ExactMatch));
    }

    #[test]
    fn test_find_with_selector_in_source() {
        let source = "私は山本博\u{E0100}です";
        assert_eq!(None, find(source, "山本博", IvsComparison::ExactMatch));
        // the match keeps the source's selector, so it is five units long
        assert_eq!(
            Some(m(2, 5)),
            find(source, "山本博", IvsComparison::IgnoreSelector)
        );
    }

    #[test]
    fn test_find_with_selector_in_pattern() {
        let source = "私は山本博です";
        assert_eq!(
            None,
            find(source, "山本博\u{E0100}", IvsComparison::ExactMatch)
        );
        assert_eq!(
            Some(m(2, 3)),
            find(source, "山本博\u{E0100}", IvsComparison::IgnoreSelector)
        );
    }

    #[test]
    fn test_find_empty_pattern() {
        assert_eq!(Some(M), find("私は", "", IvsComparison::ExactMatch));
        assert_eq!(Some(M), find("", "", IvsComparison::ExactMatch));
        assert_eq!(None, find("", "私", IvsComparison::ExactMatch));
    }

    #[test]
    fn test_rfind_overlapping() {
        assert_eq!(
            Some(m(0, 2)),
            find("ははは", "はは", IvsComparison::ExactMatch)
        );
        assert_eq!(
            Some(m(1, 2)),
            rfind("ははは", "はは", IvsComparison::ExactMatch)
        );
    }

    #[test]
    fn test_contains() {
        assert!(contains("私は山本博です", "博", IvsComparison::ExactMatch));
        assert!(!contains(
            "私は山本博\u{E0100}です",
            "博",
            IvsComparison::ExactMatch
        ));
        assert!(contains(
            "私は山本博\u{E0100}です",
            "博",
            IvsComparison::IgnoreSelector
        ));
    }

    #[test]
    fn test_find_utf16_counts_code_units() {
        // 山本𩸽(U+29E3D)+VS17
        let source = [0x5C71, 0x672C, 0xD867, 0xDE3D, 0xDB40, 0xDD00];
        let pattern = [0xD867, 0xDE3D];
        assert_eq!(
            Some(m(2, 4)),
            find_utf16(&source, &pattern, IvsComparison::IgnoreSelector)
        );
        assert_eq!(
            None,
            find_utf16(&source, &pattern, IvsComparison::ExactMatch)
        );
    }

    #[test]
    fn test_find_in_str_counts_utf16_units() {
        // 𩸽 is one char and four bytes but two UTF-16 code units, so
        // the reported index is neither a char nor a byte offset
        let source = "\u{29E3D}は博です";
        assert_eq!(
            Some(m(3, 1)),
            find(source, "博", IvsComparison::ExactMatch)
        );
        assert_eq!(
            Some(m(0, 2)),
            find(source, "\u{29E3D}", IvsComparison::ExactMatch)
        );
        let with_selector = "\u{29E3D}\u{E0100}は博です";
        assert_eq!(
            Some(m(5, 1)),
            find(with_selector, "博", IvsComparison::ExactMatch)
        );
        assert_eq!(
            Some(m(0, 4)),
            find(with_selector, "\u{29E3D}", IvsComparison::IgnoreSelector)
        );
    }

    #[test]
    fn test_replace_after_supplementary_prefix() {
        assert_eq!(
            "\u{29E3D}はひろしです",
            replace(
                "\u{29E3D}は博です",
                "博",
                "ひろし",
                IvsComparison::ExactMatch
            )
        );
        assert_eq!(
            "魚は博です",
            replace(
                "\u{29E3D}\u{E0100}は博です",
                "\u{29E3D}",
                "魚",
                IvsComparison::IgnoreSelector
            )
        );
    }

    #[test]
    fn test_replace() {
        assert_eq!(
            "私は高橋です",
            replace("私は山本博です", "山本博", "高橋", IvsComparison::ExactMatch)
        );
        assert_eq!(
            "私は高橋です",
            replace(
                "私は山本博\u{E0100}です",
                "山本博",
                "高橋",
                IvsComparison::IgnoreSelector
            )
        );
        assert_eq!(
            "私は山本博\u{E0100}です",
            replace(
                "私は山本博\u{E0100}です",
                "山本博",
                "高橋",
                IvsComparison::ExactMatch
            )
        );
    }

    #[test]
    fn test_replace_borrows_when_unchanged() {
        let source = "私は山本です";
        assert!(matches!(
            replace(source, "博", "空", IvsComparison::ExactMatch),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            replace(source, "", "空", IvsComparison::ExactMatch),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_replace_nonoverlapping() {
        assert_eq!(
            "xは",
            replace("ははは", "はは", "x", IvsComparison::ExactMatch)
        );
        assert_eq!("xx", replace("はははは", "はは", "x", IvsComparison::ExactMatch));
    }

    #[test]
    fn test_replace_utf16() {
        // replace 𩸽+VS17 with 魚 under IgnoreSelector
        let source = [0x5C71, 0xD867, 0xDE3D, 0xDB40, 0xDD00, 0x672C];
        let from = [0xD867, 0xDE3D];
        let to = [0x9B5A];
        assert_eq!(
            Cow::<[u16]>::Owned(vec![0x5C71, 0x9B5A, 0x672C]),
            replace_utf16(&source, &from, &to, IvsComparison::IgnoreSelector)
        );
        assert!(matches!(
            replace_utf16(&source, &from, &to, IvsComparison::ExactMatch),
            Cow::Borrowed(_)
        ));
    }
}
