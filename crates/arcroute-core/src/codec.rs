//! Single-stream compression codecs.
//!
//! A [`Codec`] wraps one compressed stream (gzip, zlib, bzip2, xz, zstd). The
//! same codec is used to decode sources during extraction and to encode
//! output during [`compress`](crate::creation::compress).

use std::io;
use std::io::Read;
use std::io::Write;

use crate::FormatId;

/// Compression codec for single-stream formats.
///
/// | Codec | Format | Crate |
/// |-------|--------|-------|
/// | Gzip  | `gz`   | `flate2` (multi-member) |
/// | Zlib  | `zz`   | `flate2` |
/// | Bzip2 | `bz2`  | `bzip2` (multi-stream) |
/// | Xz    | `xz`   | `xz2` |
/// | Zstd  | `zst`  | `zstd` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Gzip (deflate with gzip framing).
    Gzip,
    /// Zlib (deflate with zlib framing).
    Zlib,
    /// Bzip2.
    Bzip2,
    /// Xz (LZMA2).
    Xz,
    /// Zstandard.
    Zstd,
}

impl Codec {
    /// All codecs, in registration order.
    pub const ALL: [Self; 5] = [Self::Gzip, Self::Zlib, Self::Bzip2, Self::Xz, Self::Zstd];

    /// Returns the format identifier this codec is registered under.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcroute_core::FormatId;
    /// use arcroute_core::codec::Codec;
    ///
    /// assert_eq!(Codec::Gzip.format(), FormatId::GZ);
    /// assert_eq!(Codec::Zstd.format(), FormatId::ZST);
    /// ```
    #[must_use]
    pub const fn format(self) -> FormatId {
        match self {
            Self::Gzip => FormatId::GZ,
            Self::Zlib => FormatId::ZZ,
            Self::Bzip2 => FormatId::BZ2,
            Self::Xz => FormatId::XZ,
            Self::Zstd => FormatId::ZST,
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Zlib => "zlib",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Wraps `reader` in a decoder for this codec.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the decoder cannot be initialized.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::Gzip => Box::new(flate2::read::MultiGzDecoder::new(reader)),
            Self::Zlib => Box::new(flate2::read::ZlibDecoder::new(reader)),
            Self::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(reader)),
            Self::Xz => Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::new(reader)?),
        })
    }

    /// Wraps `writer` in an encoder for this codec at its default level.
    ///
    /// The returned [`Encoder`] must be [finished](Encoder::finish) to write
    /// the stream trailer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the encoder cannot be initialized.
    pub fn encoder<W: Write>(self, writer: W) -> io::Result<Encoder<W>> {
        Ok(match self {
            Self::Gzip => Encoder::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            )),
            Self::Zlib => Encoder::Zlib(flate2::write::ZlibEncoder::new(
                writer,
                flate2::Compression::default(),
            )),
            Self::Bzip2 => {
                Encoder::Bzip2(bzip2::write::BzEncoder::new(writer, bzip2::Compression::default()))
            }
            Self::Xz => Encoder::Xz(xz2::write::XzEncoder::new(writer, 6)),
            Self::Zstd => Encoder::Zstd(zstd::stream::write::Encoder::new(writer, 0)?),
        })
    }
}

/// Streaming encoder returned by [`Codec::encoder`].
pub enum Encoder<W: Write> {
    /// Gzip encoder.
    Gzip(flate2::write::GzEncoder<W>),
    /// Zlib encoder.
    Zlib(flate2::write::ZlibEncoder<W>),
    /// Bzip2 encoder.
    Bzip2(bzip2::write::BzEncoder<W>),
    /// Xz encoder.
    Xz(xz2::write::XzEncoder<W>),
    /// Zstandard encoder.
    Zstd(zstd::stream::write::Encoder<'static, W>),
}

impl<W: Write> Encoder<W> {
    /// Writes the stream trailer and returns the inner writer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if flushing the trailer fails.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Gzip(encoder) => encoder.finish(),
            Self::Zlib(encoder) => encoder.finish(),
            Self::Bzip2(encoder) => encoder.finish(),
            Self::Xz(encoder) => encoder.finish(),
            Self::Zstd(encoder) => encoder.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Gzip(encoder) => encoder.write(buf),
            Self::Zlib(encoder) => encoder.write(buf),
            Self::Bzip2(encoder) => encoder.write(buf),
            Self::Xz(encoder) => encoder.write(buf),
            Self::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Gzip(encoder) => encoder.flush(),
            Self::Zlib(encoder) => encoder.flush(),
            Self::Bzip2(encoder) => encoder.flush(),
            Self::Xz(encoder) => encoder.flush(),
            Self::Zstd(encoder) => encoder.flush(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detect_bytes;

    #[test]
    fn test_encoded_output_is_sniffed_as_its_format() {
        for codec in Codec::ALL {
            let mut encoder = codec.encoder(Vec::new()).unwrap();
            encoder.write_all(b"payload payload payload").unwrap();
            let encoded = encoder.finish().unwrap();
            assert_eq!(detect_bytes(&encoded), Some(codec.format()), "{}", codec.name());
        }
    }

    #[test]
    fn test_decoder_restores_payload() {
        for codec in Codec::ALL {
            let mut encoder = codec.encoder(Vec::new()).unwrap();
            encoder.write_all(b"hello codec").unwrap();
            let encoded = encoder.finish().unwrap();

            let mut decoded = String::new();
            codec
                .decoder(encoded.as_slice())
                .unwrap()
                .read_to_string(&mut decoded)
                .unwrap();
            assert_eq!(decoded, "hello codec", "{}", codec.name());
        }
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut joined = Vec::new();
        for part in [b"first ".as_slice(), b"second"] {
            let mut encoder = Codec::Gzip.encoder(Vec::new()).unwrap();
            encoder.write_all(part).unwrap();
            joined.extend(encoder.finish().unwrap());
        }

        let mut decoded = String::new();
        Codec::Gzip
            .decoder(joined.as_slice())
            .unwrap()
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, "first second");
    }
}
