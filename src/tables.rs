//! Registration data for the bundled Japanese registry snapshot.
//!
//! Rows are keyed by `(base << 8) | (selector & 0xFF)` and sorted
//! ascending by key, as `VariantRegistry` requires. Collection bits:
//! 1 Adobe-Japan1, 2 Hanyo-Denshi, 4 Moji-Joho.

use crate::registry::CompatInfo;

/// Ideographic variation sequences and the collections registering
/// them.
pub(crate) static IVS_COLLECTIONS: &[(u32, u32)] = &[
    (0x53_5A00, 1), // 博 U+E0100
    (0x53_5A02, 6), // 博 U+E0102
    (0x53_5A07, 2), // 博 U+E0107
    (0x53_5A0A, 4), // 博 U+E010A
    (0x58_5A00, 1), // 塚 U+E0100
    (0x58_5A02, 1), // 塚 U+E0102
    (0x58_5A03, 4), // 塚 U+E0103
    (0x66_7400, 1), // 晴 U+E0100
    (0x66_7403, 6), // 晴 U+E0103
    (0x73_2A00, 1), // 猪 U+E0100
    (0x73_2A02, 2), // 猪 U+E0102
    (0x76_CA00, 1), // 益 U+E0100
    (0x76_CA03, 4), // 益 U+E0103
    (0x79_3C00, 1), // 礼 U+E0100
    (0x79_3C02, 6), // 礼 U+E0102
    (0x79_5E00, 1), // 神 U+E0100
    (0x79_5E01, 1), // 神 U+E0101
    (0x79_5E03, 4), // 神 U+E0103
    (0x79_6500, 1), // 祥 U+E0100
    (0x79_6503, 4), // 祥 U+E0103
    (0x79_8F00, 1), // 福 U+E0100
    (0x79_8F03, 4), // 福 U+E0103
    (0x79_B000, 1), // 禰 U+E0100
    (0x79_B002, 6), // 禰 U+E0102
    (0x7C_BE00, 1), // 精 U+E0100
    (0x7C_BE03, 4), // 精 U+E0103
    (0x7F_BD00, 1), // 羽 U+E0100
    (0x7F_BD03, 4), // 羽 U+E0103
    (0x84_5B00, 1), // 葛 U+E0100
    (0x84_5B01, 1), // 葛 U+E0101
    (0x84_5B03, 6), // 葛 U+E0103
    (0x8F_BB00, 1), // 辻 U+E0100
    (0x8F_BB01, 1), // 辻 U+E0101
    (0x8F_BB03, 6), // 辻 U+E0103
    (0x90_8900, 1), // 邉 U+E0100
    (0x90_8901, 1), // 邉 U+E0101
    (0x90_8903, 1), // 邉 U+E0103
    (0x90_8904, 2), // 邉 U+E0104
    (0x90_8905, 4), // 邉 U+E0105
    (0x90_8A00, 1), // 邊 U+E0100
    (0x90_8A01, 1), // 邊 U+E0101
    (0x90_8A05, 6), // 邊 U+E0105
    (0x90_FD00, 1), // 都 U+E0100
    (0x90_FD03, 4), // 都 U+E0103
    (0x97_5600, 1), // 靖 U+E0100
    (0x97_5603, 4), // 靖 U+E0103
    (0x98_F400, 1), // 飴 U+E0100
    (0x98_F402, 2), // 飴 U+E0102
    (0x29E_3D00, 1), // 𩸽 U+E0100
    (0x29E_3D02, 6), // 𩸽 U+E0102
];

/// Standardized variation sequences for compatibility ideographs.
pub(crate) static SVS_VARIANTS: &[u32] = &[
    0x51_DE00, // 凞 U+FE00
    0x58_5A00, // 塚 U+FE00
    0x66_7400, // 晴 U+FE00
    0x73_2A00, // 猪 U+FE00
    0x76_CA00, // 益 U+FE00
    0x79_3C00, // 礼 U+FE00
    0x79_5E00, // 神 U+FE00
    0x79_6500, // 祥 U+FE00
    0x79_8F00, // 福 U+FE00
    0x7C_BE00, // 精 U+FE00
    0x7F_BD00, // 羽 U+FE00
    0x90_FD00, // 都 U+FE00
    0x97_5600, // 靖 U+FE00
];

/// Ideographic variation sequences whose glyph also has a
/// standardized spelling.
pub(crate) static IVS_TO_SVS: &[(u32, char)] = &[
    (0x58_5A00, '\u{FE00}'), // 塚 U+E0100
    (0x58_5A03, '\u{FE00}'), // 塚 U+E0103
    (0x66_7400, '\u{FE00}'), // 晴 U+E0100
    (0x73_2A00, '\u{FE00}'), // 猪 U+E0100
    (0x76_CA00, '\u{FE00}'), // 益 U+E0100
    (0x79_3C00, '\u{FE00}'), // 礼 U+E0100
    (0x79_5E00, '\u{FE00}'), // 神 U+E0100
    (0x79_5E03, '\u{FE00}'), // 神 U+E0103
    (0x79_6500, '\u{FE00}'), // 祥 U+E0100
    (0x79_8F00, '\u{FE00}'), // 福 U+E0100
    (0x79_8F03, '\u{FE00}'), // 福 U+E0103
    (0x7C_BE00, '\u{FE00}'), // 精 U+E0100
    (0x7F_BD00, '\u{FE00}'), // 羽 U+E0100
    (0x90_FD00, '\u{FE00}'), // 都 U+E0100
    (0x97_5600, '\u{FE00}'), // 靖 U+E0100
];

const CI_FA10: CompatInfo = compat('\u{585A}', '\u{E0103}'); // 塚
const CI_FA12: CompatInfo = compat('\u{6674}', '\u{E0103}'); // 晴
const CI_FA15: CompatInfo = compat('\u{51DE}', '\u{E0103}'); // 凞
const CI_FA16: CompatInfo = compat('\u{732A}', '\u{E0103}'); // 猪
const CI_FA17: CompatInfo = compat('\u{76CA}', '\u{E0103}'); // 益
const CI_FA18: CompatInfo = compat('\u{793C}', '\u{E0103}'); // 礼
const CI_FA19: CompatInfo = compat('\u{795E}', '\u{E0103}'); // 神
const CI_FA1A: CompatInfo = compat('\u{7965}', '\u{E0103}'); // 祥
const CI_FA1B: CompatInfo = compat('\u{798F}', '\u{E0103}'); // 福
const CI_FA1C: CompatInfo = compat('\u{9756}', '\u{E0103}'); // 靖
const CI_FA1D: CompatInfo = compat('\u{7CBE}', '\u{E0103}'); // 精
const CI_FA1E: CompatInfo = compat('\u{7FBD}', '\u{E0103}'); // 羽
const CI_FA26: CompatInfo = compat('\u{90FD}', '\u{E0103}'); // 都

const fn compat(base: char, moji_joho: char) -> CompatInfo {
    CompatInfo {
        base,
        svs: '\u{FE00}',
        adobe_japan1: '\u{E0100}',
        moji_joho,
    }
}

/// Compatibility-ideograph spellings, keyed both by the compatibility
/// character itself and by its base-plus-SVS form.
pub(crate) static COMPAT_IDEOGRAPHS: &[(u32, CompatInfo)] = &[
    (0x51_DE00, CI_FA15),
    (0x58_5A00, CI_FA10),
    (0x66_7400, CI_FA12),
    (0x73_2A00, CI_FA16),
    (0x76_CA00, CI_FA17),
    (0x79_3C00, CI_FA18),
    (0x79_5E00, CI_FA19),
    (0x79_6500, CI_FA1A),
    (0x79_8F00, CI_FA1B),
    (0x7C_BE00, CI_FA1D),
    (0x7F_BD00, CI_FA1E),
    (0x90_FD00, CI_FA26),
    (0x97_5600, CI_FA1C),
    (0xFA_1000, CI_FA10),
    (0xFA_1200, CI_FA12),
    (0xFA_1500, CI_FA15),
    (0xFA_1600, CI_FA16),
    (0xFA_1700, CI_FA17),
    (0xFA_1800, CI_FA18),
    (0xFA_1900, CI_FA19),
    (0xFA_1A00, CI_FA1A),
    (0xFA_1B00, CI_FA1B),
    (0xFA_1C00, CI_FA1C),
    (0xFA_1D00, CI_FA1D),
    (0xFA_1E00, CI_FA1E),
    (0xFA_2600, CI_FA26),
];
