//! Stripping selectors and converting compatibility ideographs.

use crate::kanji_char::{is_ivs, is_variation_selector, KanjiChar};
use crate::registry::{VariantCollection, VariantRegistry};
use crate::segment::{KanjiCharsUtf16, KanjiSegmentation};
use thiserror::Error;

/// What [`strip_selectors`] removes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StripMode {
    /// Remove every variation selector. A unit whose base is itself a
    /// selector disappears entirely.
    RemoveAll,
    /// Remove ideographic selectors only; standardized selectors (and
    /// lone standardized-selector units) survive.
    RemoveIvs,
    /// Like `RemoveIvs`, but an ideographic selector whose glyph has a
    /// registered standardized spelling is rewritten to that
    /// standardized selector instead of dropped.
    RemoveToSvs,
}

/// Which spelling [`convert_compatibility_ideographs`] rewrites to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompatTarget {
    /// Unified base plus standardized variation selector.
    Svs,
    /// Unified base plus the Adobe-Japan1 ideographic selector.
    AdobeJapan1,
    /// Unified base plus the Moji-Joho ideographic selector.
    MojiJoho,
}

/// The validity target passed to [`has_invalid_selector`] named no
/// collection at all.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("validity target must name at least one collection")]
pub struct TargetError;

fn strip_unit(
    kanji: KanjiChar,
    mode: StripMode,
    registry: &VariantRegistry<'_>,
    mut emit: impl FnMut(char),
) {
    let base = kanji.base();
    match mode {
        StripMode::RemoveAll => {
            if !is_variation_selector(base) {
                emit(base);
            }
        }
        StripMode::RemoveIvs | StripMode::RemoveToSvs => {
            if is_ivs(base) {
                return;
            }
            emit(base);
            match kanji.selector() {
                Some(selector) if is_ivs(selector) => {
                    if mode == StripMode::RemoveToSvs {
                        if let Some(svs) = registry.svs_equivalent(kanji) {
                            emit(svs);
                        }
                    }
                }
                Some(selector) => emit(selector),
                None => {}
            }
        }
    }
}

/// Removes variation selectors from a string according to `mode`.
pub fn strip_selectors(source: &str, mode: StripMode, registry: &VariantRegistry<'_>) -> String {
    let mut out = String::with_capacity(source.len());
    for kanji in source.kanji_chars() {
        strip_unit(kanji, mode, registry, |c| out.push(c));
    }
    out
}

/// UTF-16 variant of [`strip_selectors`]. Invalid code units come out
/// as U+FFFD.
pub fn strip_selectors_utf16(
    source: &[u16],
    mode: StripMode,
    registry: &VariantRegistry<'_>,
) -> Vec<u16> {
    let mut out = Vec::with_capacity(source.len());
    let mut pair = [0u16; 2];
    for kanji in KanjiCharsUtf16::new(source) {
        strip_unit(kanji, mode, registry, |c| {
            out.extend_from_slice(c.encode_utf16(&mut pair));
        });
    }
    out
}

fn convert_unit(
    kanji: KanjiChar,
    target: CompatTarget,
    registry: &VariantRegistry<'_>,
    mut emit: impl FnMut(char),
) {
    match registry.compat_info(kanji) {
        Some(info) => {
            emit(info.base);
            emit(match target {
                CompatTarget::Svs => info.svs,
                CompatTarget::AdobeJapan1 => info.adobe_japan1,
                CompatTarget::MojiJoho => info.moji_joho,
            });
        }
        None => {
            emit(kanji.base());
            if let Some(selector) = kanji.selector() {
                emit(selector);
            }
        }
    }
}

/// Rewrites compatibility ideographs, and base-plus-SVS spellings of
/// them, to the unified base followed by the `target` selector.
/// Everything else passes through unchanged.
pub fn convert_compatibility_ideographs(
    source: &str,
    target: CompatTarget,
    registry: &VariantRegistry<'_>,
) -> String {
    let mut out = String::with_capacity(source.len());
    for kanji in source.kanji_chars() {
        convert_unit(kanji, target, registry, |c| out.push(c));
    }
    out
}

/// UTF-16 variant of [`convert_compatibility_ideographs`].
pub fn convert_compatibility_ideographs_utf16(
    source: &[u16],
    target: CompatTarget,
    registry: &VariantRegistry<'_>,
) -> Vec<u16> {
    let mut out = Vec::with_capacity(source.len());
    let mut pair = [0u16; 2];
    for kanji in KanjiCharsUtf16::new(source) {
        convert_unit(kanji, target, registry, |c| {
            out.extend_from_slice(c.encode_utf16(&mut pair));
        });
    }
    out
}

fn unit_is_invalid(
    kanji: KanjiChar,
    target: VariantCollection,
    registry: &VariantRegistry<'_>,
) -> bool {
    let class = registry.classify(kanji);
    !class.is_empty() && !class.is_subset_of(target)
}

/// Whether any variation sequence in `source` is registered outside
/// the `target` collections.
///
/// A unit without a selector is always valid; an unregistered
/// sequence (`UNKNOWN`) is always invalid. A `NONE` target is
/// rejected.
pub fn has_invalid_selector(
    source: &str,
    target: VariantCollection,
    registry: &VariantRegistry<'_>,
) -> Result<bool, TargetError> {
    if target.is_empty() {
        return Err(TargetError);
    }
    Ok(source
        .kanji_chars()
        .any(|kanji| unit_is_invalid(kanji, target, registry)))
}

/// UTF-16 variant of [`has_invalid_selector`].
pub fn has_invalid_selector_utf16(
    source: &[u16],
    target: VariantCollection,
    registry: &VariantRegistry<'_>,
) -> Result<bool, TargetError> {
    if target.is_empty() {
        return Err(TargetError);
    }
    Ok(KanjiCharsUtf16::new(source)
        .any(|kanji| unit_is_invalid(kanji, target, registry)))
}
