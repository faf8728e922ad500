//! Strict scalar decoding from untrusted code-unit buffers.
//!
//! All decoders report a status together with the number of code units
//! consumed, so callers can substitute U+FFFD and keep a deterministic
//! position in the buffer. UTF-8 error lengths follow the Unicode
//! "maximal subpart" recommendation.

/// The outcome of decoding one scalar from the edge of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoded {
    /// A well-formed scalar occupying `len` code units.
    Valid {
        /// The decoded scalar value.
        scalar: char,
        /// Number of code units consumed.
        len: usize,
    },
    /// The buffer ended inside a sequence that more data could still
    /// complete; `len` code units were consumed.
    Incomplete {
        /// Number of code units consumed.
        len: usize,
    },
    /// A malformed sequence; `len` code units were consumed.
    Invalid {
        /// Number of code units consumed.
        len: usize,
    },
}

impl Decoded {
    /// Number of code units consumed, regardless of status.
    pub fn len(self) -> usize {
        match self {
            Decoded::Valid { len, .. } | Decoded::Incomplete { len } | Decoded::Invalid { len } => {
                len
            }
        }
    }

    /// The decoded scalar, with U+FFFD substituted on any non-valid status.
    pub fn scalar_lossy(self) -> char {
        match self {
            Decoded::Valid { scalar, .. } => scalar,
            Decoded::Incomplete { .. } | Decoded::Invalid { .. } => char::REPLACEMENT_CHARACTER,
        }
    }
}

fn scalar_from(value: u32) -> char {
    match char::from_u32(value) {
        Some(scalar) => scalar,
        None => unreachable!(),
    }
}

/// Decode the first scalar of a UTF-16 code-unit buffer.
pub fn decode_first_utf16(units: &[u16]) -> Decoded {
    let first = match units.first() {
        Some(&first) => first,
        None => return Decoded::Incomplete { len: 0 },
    };
    match first {
        0xD800..=0xDBFF => match units.get(1) {
            None => Decoded::Incomplete { len: 1 },
            Some(&second @ 0xDC00..=0xDFFF) => {
                let value =
                    0x10000 + (((u32::from(first) - 0xD800) << 10) | (u32::from(second) - 0xDC00));
                Decoded::Valid {
                    scalar: scalar_from(value),
                    len: 2,
                }
            }
            Some(_) => Decoded::Invalid { len: 1 },
        },
        0xDC00..=0xDFFF => Decoded::Invalid { len: 1 },
        _ => Decoded::Valid {
            scalar: scalar_from(u32::from(first)),
            len: 1,
        },
    }
}

/// Decode the last scalar of a UTF-16 code-unit buffer.
pub fn decode_last_utf16(units: &[u16]) -> Decoded {
    let last = match units.last() {
        Some(&last) => last,
        None => return Decoded::Incomplete { len: 0 },
    };
    match last {
        0xDC00..=0xDFFF => {
            if units.len() < 2 {
                // the pairing high surrogate may lie before this window
                return Decoded::Incomplete { len: 1 };
            }
            let prev = units[units.len() - 2];
            if (0xD800..=0xDBFF).contains(&prev) {
                let value =
                    0x10000 + (((u32::from(prev) - 0xD800) << 10) | (u32::from(last) - 0xDC00));
                Decoded::Valid {
                    scalar: scalar_from(value),
                    len: 2,
                }
            } else {
                Decoded::Invalid { len: 1 }
            }
        }
        // a high surrogate can never be completed from behind
        0xD800..=0xDBFF => Decoded::Invalid { len: 1 },
        _ => Decoded::Valid {
            scalar: scalar_from(u32::from(last)),
            len: 1,
        },
    }
}

const CONT_PREFIX_MASK: u8 = 0b1100_0000;
const TAG_CONT: u8 = 0b1000_0000;

fn is_cont_byte(v: u8) -> bool {
    (v & CONT_PREFIX_MASK) == TAG_CONT
}

/// Decode the first scalar of a UTF-8 byte buffer.
pub fn decode_first_utf8(bytes: &[u8]) -> Decoded {
    let lead = match bytes.first() {
        Some(&lead) => lead,
        None => return Decoded::Incomplete { len: 0 },
    };
    // The second-byte range depends on the lead so that overlong forms
    // and surrogate-range encodings fail on the lead itself.
    let (mut value, total_len, second_min, second_max) = match lead {
        0x00..=0x7F => {
            return Decoded::Valid {
                scalar: lead as char,
                len: 1,
            }
        }
        0xC2..=0xDF => (u32::from(lead & 0x1F), 2, 0x80, 0xBF),
        0xE0 => (u32::from(lead & 0x0F), 3, 0xA0, 0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (u32::from(lead & 0x0F), 3, 0x80, 0xBF),
        0xED => (u32::from(lead & 0x0F), 3, 0x80, 0x9F),
        0xF0 => (u32::from(lead & 0x07), 4, 0x90, 0xBF),
        0xF1..=0xF3 => (u32::from(lead & 0x07), 4, 0x80, 0xBF),
        0xF4 => (u32::from(lead & 0x07), 4, 0x80, 0x8F),
        _ => return Decoded::Invalid { len: 1 },
    };
    let mut len = 1;
    let (mut min, mut max) = (second_min, second_max);
    while len < total_len {
        match bytes.get(len) {
            None => return Decoded::Incomplete { len },
            Some(&b) if min <= b && b <= max => {
                value = (value << 6) | u32::from(b & 0x3F);
                len += 1;
                min = 0x80;
                max = 0xBF;
            }
            Some(_) => return Decoded::Invalid { len },
        }
    }
    Decoded::Valid {
        scalar: scalar_from(value),
        len,
    }
}

/// Decode the last scalar of a UTF-8 byte buffer.
///
/// Consumed lengths mirror a forward maximal-subpart scan of the same
/// buffer, so front and back decoding partition it identically.
pub fn decode_last_utf8(bytes: &[u8]) -> Decoded {
    if bytes.is_empty() {
        return Decoded::Incomplete { len: 0 };
    }
    let cont = bytes
        .iter()
        .rev()
        .take(4)
        .take_while(|&&b| is_cont_byte(b))
        .count();
    if cont == 4 {
        // no sequence carries four continuation bytes
        return Decoded::Invalid { len: 1 };
    }
    if cont == bytes.len() {
        // the window may begin in the middle of a sequence; a forward
        // scan would fault one byte at a time
        return Decoded::Incomplete { len: 1 };
    }
    let lead_idx = bytes.len() - cont - 1;
    let decoded = decode_first_utf8(&bytes[lead_idx..]);
    match decoded {
        // the sequence at the lead reaches the end of the buffer, so
        // it is exactly the unit a forward scan produces there
        Decoded::Valid { .. } | Decoded::Incomplete { .. } if decoded.len() == cont + 1 => decoded,
        // otherwise a forward scan faults the trailing continuation
        // byte on its own
        _ => Decoded::Invalid { len: 1 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf16_forward() {
        assert_eq!(Decoded::Incomplete { len: 0 }, decode_first_utf16(&[]));
        assert_eq!(
            Decoded::Valid {
                scalar: '博',
                len: 1
            },
            decode_first_utf16(&[0x535A])
        );
        // 𩸽 U+29E3D
        assert_eq!(
            Decoded::Valid {
                scalar: '\u{29E3D}',
                len: 2
            },
            decode_first_utf16(&[0xD867, 0xDE3D])
        );
        // lone high surrogate at buffer end
        assert_eq!(Decoded::Incomplete { len: 1 }, decode_first_utf16(&[0xD867]));
        // high surrogate followed by a non-low-surrogate
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_first_utf16(&[0xD867, 0x0041])
        );
        // lone low surrogate
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_first_utf16(&[0xDE3D, 0x0041])
        );
    }

    #[test]
    fn test_utf16_backward() {
        assert_eq!(Decoded::Incomplete { len: 0 }, decode_last_utf16(&[]));
        assert_eq!(
            Decoded::Valid {
                scalar: '\u{29E3D}',
                len: 2
            },
            decode_last_utf16(&[0x0041, 0xD867, 0xDE3D])
        );
        assert_eq!(Decoded::Incomplete { len: 1 }, decode_last_utf16(&[0xDE3D]));
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_last_utf16(&[0x0041, 0xDE3D])
        );
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_last_utf16(&[0x0041, 0xD867])
        );
    }

    #[test]
    fn test_utf8_forward_valid() {
        assert_eq!(
            Decoded::Valid {
                scalar: 'A',
                len: 1
            },
            decode_first_utf8(b"A")
        );
        assert_eq!(
            Decoded::Valid {
                scalar: '博',
                len: 3
            },
            decode_first_utf8("博".as_bytes())
        );
        assert_eq!(
            Decoded::Valid {
                scalar: '\u{E0100}',
                len: 4
            },
            decode_first_utf8("\u{E0100}".as_bytes())
        );
    }

    #[test]
    fn test_utf8_forward_maximal_subparts() {
        // overlong two-byte form: lead alone is the invalid subsequence
        assert_eq!(Decoded::Invalid { len: 1 }, decode_first_utf8(&[0xC0, 0xAF]));
        // surrogate-range encoding rejected on the second byte check
        assert_eq!(Decoded::Invalid { len: 1 }, decode_first_utf8(&[0xED, 0xA0, 0x80]));
        // out-of-range second byte after F4
        assert_eq!(Decoded::Invalid { len: 1 }, decode_first_utf8(&[0xF4, 0x90, 0x80, 0x80]));
        // valid prefix broken by a non-continuation byte
        assert_eq!(
            Decoded::Invalid { len: 2 },
            decode_first_utf8(&[0xE1, 0x80, 0x41])
        );
        assert_eq!(
            Decoded::Invalid { len: 3 },
            decode_first_utf8(&[0xF1, 0x80, 0x80, 0x41])
        );
        // truncated but so-far-valid prefix
        assert_eq!(Decoded::Incomplete { len: 1 }, decode_first_utf8(&[0xC2]));
        assert_eq!(
            Decoded::Incomplete { len: 3 },
            decode_first_utf8(&[0xF0, 0x90, 0x80])
        );
        // bare continuation byte
        assert_eq!(Decoded::Invalid { len: 1 }, decode_first_utf8(&[0x80]));
    }

    #[test]
    fn test_utf8_backward() {
        assert_eq!(
            Decoded::Valid {
                scalar: '博',
                len: 3
            },
            decode_last_utf8("あ博".as_bytes())
        );
        assert_eq!(
            Decoded::Valid {
                scalar: '\u{E0100}',
                len: 4
            },
            decode_last_utf8("博\u{E0100}".as_bytes())
        );
        // a truncated trailing sequence is one maximal subpart, just
        // as a forward scan reports it
        assert_eq!(
            Decoded::Incomplete { len: 2 },
            decode_last_utf8(&[0x41, 0xE1, 0x80])
        );
        assert_eq!(
            Decoded::Incomplete { len: 3 },
            decode_last_utf8(&[0xF0, 0x90, 0x80])
        );
        // a continuation byte after a complete scalar is a lone fault
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_last_utf8(&[0x41, 0x80])
        );
        // a pure continuation window may continue before its start,
        // but forward scanning faults it byte by byte
        assert_eq!(Decoded::Incomplete { len: 1 }, decode_last_utf8(&[0x80, 0x80]));
        assert_eq!(
            Decoded::Invalid { len: 1 },
            decode_last_utf8(&[0x80, 0x80, 0x80, 0x80])
        );
    }
}
