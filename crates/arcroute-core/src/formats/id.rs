//! Format identifiers.

use std::borrow::Borrow;
use std::borrow::Cow;
use std::fmt;

/// Short string key naming an archive or compression format (`"zip"`,
/// `"gz"`, ...).
///
/// The set is closed for the built-in signature table but open for callers:
/// any string coming from a file extension is a valid identifier, and
/// third-party handlers may register under identifiers of their own.
///
/// # Examples
///
/// ```
/// use arcroute_core::FormatId;
///
/// let id = FormatId::from("gz");
/// assert_eq!(id, FormatId::GZ);
/// assert_eq!(id.as_str(), "gz");
/// assert_eq!(id.to_string(), "gz");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatId(Cow<'static, str>);

impl FormatId {
    /// 7-Zip archive.
    pub const SEVEN_Z: Self = Self::from_static("7z");
    /// RAR archive (v4 and v5).
    pub const RAR: Self = Self::from_static("rar");
    /// ZIP archive.
    pub const ZIP: Self = Self::from_static("zip");
    /// Gzip stream.
    pub const GZ: Self = Self::from_static("gz");
    /// Bzip2 stream.
    pub const BZ2: Self = Self::from_static("bz2");
    /// XZ stream.
    pub const XZ: Self = Self::from_static("xz");
    /// Zstandard frame.
    pub const ZST: Self = Self::from_static("zst");
    /// LZ4 frame.
    pub const LZ4: Self = Self::from_static("lz4");
    /// Lzip stream.
    pub const LZ: Self = Self::from_static("lz");
    /// S2 stream.
    pub const S2: Self = Self::from_static("s2");
    /// POSIX tar archive.
    pub const TAR: Self = Self::from_static("tar");
    /// Brotli stream.
    pub const BR: Self = Self::from_static("br");
    /// Zlib stream.
    pub const ZZ: Self = Self::from_static("zz");
    /// Snappy framed stream.
    pub const SZ: Self = Self::from_static("sz");

    /// Creates an identifier from a static string.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormatId {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_owned()))
    }
}

impl From<String> for FormatId {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl AsRef<str> for FormatId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FormatId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FormatId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FormatId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_and_static_compare_equal() {
        assert_eq!(FormatId::from(String::from("zip")), FormatId::ZIP);
        assert_eq!(FormatId::ZIP, "zip");
        assert_ne!(FormatId::ZIP, FormatId::GZ);
    }

    #[test]
    fn test_hash_matches_str_lookup() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(FormatId::TAR);
        set.insert(FormatId::from("tar"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("tar"));
    }
}
