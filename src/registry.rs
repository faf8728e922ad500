//! Registered variation-sequence data and lookups over it.

use crate::kanji_char::{is_compatibility_ideograph, is_ivs, is_svs, KanjiChar};
use crate::tables;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// The set of registries a variation sequence is registered in.
///
/// Implemented as a bit set so one sequence can belong to several
/// registries at once, as Hanyo-Denshi and Moji-Joho entries commonly
/// do.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantCollection(u32);

impl VariantCollection {
    /// Registered nowhere.
    pub const NONE: Self = VariantCollection(0);
    /// Registered in the Adobe-Japan1 IVD collection.
    pub const ADOBE_JAPAN: Self = VariantCollection(1 << 0);
    /// Registered in the Hanyo-Denshi IVD collection.
    pub const HANYO_DENSHI: Self = VariantCollection(1 << 1);
    /// Registered in the Moji-Joho IVD collection.
    pub const MOJI_JOHO: Self = VariantCollection(1 << 2);
    /// A standardized variation sequence for a CJK compatibility
    /// ideograph.
    pub const COMPATIBILITY_IDEOGRAPH: Self = VariantCollection(1 << 3);
    /// Carries a selector, but no registration is known for it.
    pub const UNKNOWN: Self = VariantCollection(1 << 31);
    /// Registered in both Hanyo-Denshi and Moji-Joho.
    pub const HD_AND_MJ: Self =
        VariantCollection(Self::HANYO_DENSHI.0 | Self::MOJI_JOHO.0);

    /// Reconstructs a set from its raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        VariantCollection(bits)
    }

    /// The raw bits of this set.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no registry bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The union of two sets.
    pub const fn union(self, other: Self) -> Self {
        VariantCollection(self.0 | other.0)
    }

    /// Whether every bit of `self` is also set in `other`.
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    /// Whether every bit of `other` is also set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        other.is_subset_of(self)
    }
}

impl BitOr for VariantCollection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for VariantCollection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for VariantCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: &[(u32, &str)] = &[
            (1 << 0, "ADOBE_JAPAN"),
            (1 << 1, "HANYO_DENSHI"),
            (1 << 2, "MOJI_JOHO"),
            (1 << 3, "COMPATIBILITY_IDEOGRAPH"),
            (1 << 31, "UNKNOWN"),
        ];
        if self.0 == 0 {
            return write!(f, "NONE");
        }
        let mut rest = self.0;
        let mut first = true;
        for &(bit, name) in NAMES {
            if rest & bit != 0 {
                if !first {
                    write!(f, " | ")?;
                }
                write!(f, "{}", name)?;
                first = false;
                rest &= !bit;
            }
        }
        if rest != 0 {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{:#x}", rest)?;
        }
        Ok(())
    }
}

/// The registered spellings of one CJK compatibility ideograph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CompatInfo {
    /// The unified ideograph the compatibility character folds to.
    pub base: char,
    /// The standardized variation selector that preserves the glyph.
    pub svs: char,
    /// The equivalent Adobe-Japan1 ideographic variation selector.
    pub adobe_japan1: char,
    /// The equivalent Moji-Joho ideographic variation selector.
    pub moji_joho: char,
}

/// A snapshot of variation-sequence registration data.
///
/// All four tables are sorted by packed key (`(base << 8) | low byte
/// of the selector`) and searched with binary search. SVS and IVS
/// selectors collide at low byte zero, which is why the SVS entries
/// live in their own tables.
#[derive(Clone, Copy, Debug)]
pub struct VariantRegistry<'a> {
    ivs_collections: &'a [(u32, u32)],
    svs_variants: &'a [u32],
    ivs_to_svs: &'a [(u32, char)],
    compat_ideographs: &'a [(u32, CompatInfo)],
}

static JAPANESE: VariantRegistry<'static> = VariantRegistry::new(
    tables::IVS_COLLECTIONS,
    tables::SVS_VARIANTS,
    tables::IVS_TO_SVS,
    tables::COMPAT_IDEOGRAPHS,
);

impl<'a> VariantRegistry<'a> {
    /// Builds a registry from caller-supplied tables.
    ///
    /// Each table must be sorted ascending by its packed key; lookups
    /// silently miss otherwise.
    pub const fn new(
        ivs_collections: &'a [(u32, u32)],
        svs_variants: &'a [u32],
        ivs_to_svs: &'a [(u32, char)],
        compat_ideographs: &'a [(u32, CompatInfo)],
    ) -> Self {
        VariantRegistry {
            ivs_collections,
            svs_variants,
            ivs_to_svs,
            compat_ideographs,
        }
    }

    /// The bundled snapshot of Japanese registration data.
    pub fn japanese() -> &'static VariantRegistry<'static> {
        &JAPANESE
    }

    /// The registries the given unit's variation sequence is
    /// registered in.
    ///
    /// A unit without a selector is `NONE`. A unit whose sequence is
    /// not found in the tables is `UNKNOWN`.
    pub fn classify(&self, kanji: KanjiChar) -> VariantCollection {
        let selector = match kanji.selector() {
            Some(selector) => selector,
            None => return VariantCollection::NONE,
        };
        let key = kanji.packed_key();
        if is_svs(selector) {
            if self.svs_variants.binary_search(&key).is_ok() {
                return VariantCollection::COMPATIBILITY_IDEOGRAPH;
            }
            return VariantCollection::UNKNOWN;
        }
        match self
            .ivs_collections
            .binary_search_by_key(&key, |&(k, _)| k)
        {
            Ok(i) => VariantCollection::from_bits(self.ivs_collections[i].1),
            Err(_) => VariantCollection::UNKNOWN,
        }
    }

    /// The standardized selector that spells the same glyph as the
    /// given ideographic variation sequence, if one is registered.
    pub fn svs_equivalent(&self, kanji: KanjiChar) -> Option<char> {
        match kanji.selector() {
            Some(selector) if is_ivs(selector) => {}
            _ => return None,
        }
        let key = kanji.packed_key();
        match self.ivs_to_svs.binary_search_by_key(&key, |&(k, _)| k) {
            Ok(i) => Some(self.ivs_to_svs[i].1),
            Err(_) => None,
        }
    }

    /// The registered spellings for a compatibility ideograph, looked
    /// up either by the compatibility character itself or by its
    /// base-plus-SVS spelling.
    pub fn compat_info(&self, kanji: KanjiChar) -> Option<&'a CompatInfo> {
        match kanji.selector() {
            Some(selector) if !is_svs(selector) => return None,
            None if !is_compatibility_ideograph(kanji.base()) => return None,
            _ => {}
        }
        let key = kanji.packed_key();
        match self
            .compat_ideographs
            .binary_search_by_key(&key, |&(k, _)| k)
        {
            Ok(i) => Some(&self.compat_ideographs[i].1),
            Err(_) => None,
        }
    }
}
