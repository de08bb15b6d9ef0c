//! Static signature table used for content sniffing.
//!
//! Each [`FormatSignature`] recognizes one format either by fixed magic bytes
//! at an offset or by a predicate over the byte window starting at that
//! offset. The table is ordered and the first matching entry wins.

use super::id::FormatId;

/// How a signature recognizes its format.
#[derive(Clone, Copy)]
pub enum Matcher {
    /// Fixed byte sequence that must appear at the signature offset.
    Magic(&'static [u8]),
    /// Custom check over the window starting at the signature offset.
    Predicate(fn(&[u8]) -> bool),
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Magic(magic) => f.debug_tuple("Magic").field(magic).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A single entry of the signature table.
#[derive(Debug, Clone)]
pub struct FormatSignature {
    /// Format reported when this entry matches.
    pub name: FormatId,
    /// Offset from the start of the inspected window.
    pub offset: usize,
    /// Recognition rule.
    pub matcher: Matcher,
}

impl FormatSignature {
    const fn magic(name: FormatId, offset: usize, magic: &'static [u8]) -> Self {
        Self {
            name,
            offset,
            matcher: Matcher::Magic(magic),
        }
    }

    const fn predicate(name: FormatId, check: fn(&[u8]) -> bool) -> Self {
        Self {
            name,
            offset: 0,
            matcher: Matcher::Predicate(check),
        }
    }

    /// Checks this signature against `window`, the bytes read from the start
    /// of the input.
    ///
    /// An entry whose offset lies at or beyond the end of the window never
    /// matches, and neither does a magic sequence that would run past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcroute_core::formats::signature::SIGNATURES;
    ///
    /// let zip = SIGNATURES.iter().find(|s| s.name == "zip").unwrap();
    /// assert!(zip.matches(b"PK\x03\x04rest"));
    /// assert!(!zip.matches(b"PK\x03"));
    /// ```
    #[must_use]
    pub fn matches(&self, window: &[u8]) -> bool {
        if self.offset >= window.len() {
            return false;
        }
        match self.matcher {
            Matcher::Predicate(check) => check(&window[self.offset..]),
            Matcher::Magic(magic) => window
                .get(self.offset..self.offset + magic.len())
                .is_some_and(|candidate| candidate == magic),
        }
    }
}

/// Offset of the `ustar` marker inside a tar header block.
pub const TAR_MAGIC_OFFSET: usize = 257;

/// Brotli has no magic number; this recognizes the stream header produced by
/// common encoders.
fn is_brotli(data: &[u8]) -> bool {
    matches!(data, [0x1B, 0x1F, 0x00..=0x03, ..])
}

fn is_zlib(data: &[u8]) -> bool {
    matches!(data, [0x78, 0x01..=0xDA, ..])
}

fn is_snappy_framed(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0x06, 0x00, 0x00])
}

/// Signature catalogue in match order.
///
/// `s2` and `sz` share the stream identifier `FF 06 00 00`; `s2` comes first
/// and therefore always wins content sniffing.
pub static SIGNATURES: &[FormatSignature] = &[
    FormatSignature::magic(FormatId::SEVEN_Z, 0, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
    FormatSignature::magic(FormatId::RAR, 0, &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00]),
    // RAR 5
    FormatSignature::magic(FormatId::RAR, 0, &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x01]),
    FormatSignature::magic(FormatId::ZIP, 0, &[0x50, 0x4B, 0x03, 0x04]),
    FormatSignature::magic(FormatId::GZ, 0, &[0x1F, 0x8B]),
    FormatSignature::magic(FormatId::BZ2, 0, &[0x42, 0x5A, 0x68]),
    FormatSignature::magic(FormatId::XZ, 0, &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]),
    FormatSignature::magic(FormatId::ZST, 0, &[0x28, 0xB5, 0x2F, 0xFD]),
    FormatSignature::magic(FormatId::LZ4, 0, &[0x04, 0x22, 0x4D, 0x18]),
    FormatSignature::magic(FormatId::LZ, 0, &[0x4C, 0x5A, 0x49, 0x50]),
    FormatSignature::magic(FormatId::S2, 0, &[0xFF, 0x06, 0x00, 0x00]),
    FormatSignature::magic(FormatId::TAR, TAR_MAGIC_OFFSET, b"ustar"),
    FormatSignature::predicate(FormatId::BR, is_brotli),
    FormatSignature::predicate(FormatId::ZZ, is_zlib),
    FormatSignature::predicate(FormatId::SZ, is_snappy_framed),
];
