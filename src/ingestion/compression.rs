//! Transparent decompression selected from the file extension.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Decompression layer applied to a file before CSV parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Plain text.
    None,
    /// `.gz` (concatenated members are read as one stream).
    Gzip,
    /// `.bz2` (concatenated streams are read as one stream).
    Bzip2,
    /// `.xz` or `.lzma`; the container format is detected from the data.
    Lzma,
}

impl Compression {
    /// Pick a decompression layer from the lowercase path suffix.
    pub fn from_path(path: &Path) -> Self {
        let lower = path.to_string_lossy().to_lowercase();
        if lower.ends_with(".gz") {
            Self::Gzip
        } else if lower.ends_with(".bz2") {
            Self::Bzip2
        } else if lower.ends_with(".xz") || lower.ends_with(".lzma") {
            Self::Lzma
        } else {
            Self::None
        }
    }

    /// Human-readable name (for logging).
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Lzma => "lzma",
        }
    }

    /// Wrap `inner` in this decompression layer.
    pub fn wrap<'a, R: Read + 'a>(&self, inner: R) -> io::Result<Box<dyn Read + 'a>> {
        Ok(match self {
            Self::None => Box::new(inner),
            Self::Gzip => Box::new(flate2::read::MultiGzDecoder::new(inner)),
            Self::Bzip2 => Box::new(bzip2::read::MultiBzDecoder::new(inner)),
            Self::Lzma => {
                let stream =
                    xz2::stream::Stream::new_auto_decoder(u64::MAX, xz2::stream::CONCATENATED)?;
                Box::new(xz2::read::XzDecoder::new_stream(inner, stream))
            }
        })
    }

    /// Open `path` and wrap it in this decompression layer.
    ///
    /// The returned reader owns the file handle; dropping it closes the file.
    pub fn open(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        let file = File::open(path)?;
        self.wrap(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_DATA: &[u8] = b"id,name\n1,Ann\n2,Bo\n";

    fn read_all(codec: Compression, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        codec.wrap(data).unwrap().read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn selects_codec_from_suffix() {
        assert_eq!(Compression::from_path(Path::new("a.csv")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("a.CSV.GZ")), Compression::Gzip);
        assert_eq!(Compression::from_path(Path::new("a.csv.bz2")), Compression::Bzip2);
        assert_eq!(Compression::from_path(Path::new("a.csv.xz")), Compression::Lzma);
        assert_eq!(Compression::from_path(Path::new("a.csv.Lzma")), Compression::Lzma);
    }

    #[test]
    fn gzip_reads_concatenated_members() {
        let mut data = Vec::new();
        for chunk in [&TEST_DATA[..8], &TEST_DATA[8..]] {
            let mut enc = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            enc.write_all(chunk).unwrap();
            data.extend(enc.finish().unwrap());
        }
        assert_eq!(read_all(Compression::Gzip, &data), TEST_DATA);
    }

    #[test]
    fn bzip2_decodes() {
        let mut enc = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        enc.write_all(TEST_DATA).unwrap();
        let data = enc.finish().unwrap();
        assert_eq!(read_all(Compression::Bzip2, &data), TEST_DATA);
    }

    #[test]
    fn lzma_decodes_xz_and_legacy_containers() {
        let mut xz = xz2::write::XzEncoder::new(Vec::new(), 6);
        xz.write_all(TEST_DATA).unwrap();
        let xz = xz.finish().unwrap();
        assert_eq!(read_all(Compression::Lzma, &xz), TEST_DATA);

        let opts = xz2::stream::LzmaOptions::new_preset(6).unwrap();
        let stream = xz2::stream::Stream::new_lzma_encoder(&opts).unwrap();
        let mut alone = xz2::write::XzEncoder::new_stream(Vec::new(), stream);
        alone.write_all(TEST_DATA).unwrap();
        let alone = alone.finish().unwrap();
        assert_eq!(read_all(Compression::Lzma, &alone), TEST_DATA);
    }

    #[test]
    fn none_passes_bytes_through() {
        assert_eq!(read_all(Compression::None, TEST_DATA), TEST_DATA);
    }

    #[test]
    fn codec_names() {
        assert_eq!(Compression::Gzip.name(), "gzip");
        assert_eq!(Compression::None.name(), "none");
    }
}
