//! Transparent compression of the dataset file.
//!
//! Picks an encoding from the destination extension (.gz → gzip,
//! .zst/.zstd → zstd). The uncompressed bytes are identical to a plain file.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const ZSTD_LEVEL: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    Gzip,
    Zstd,
}

impl Encoding {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz" | "gzip") => Encoding::Gzip,
            Some("zst" | "zstd") => Encoding::Zstd,
            _ => Encoding::Plain,
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Encoding::Plain => "plain",
            Encoding::Gzip => "gzip",
            Encoding::Zstd => "zstd",
        })
    }
}

/// Owns the destination file for the length of one run.
///
/// Call [`OutputFile::finish`] to flush buffers and write any encoder
/// trailer. Dropping without `finish` still closes the file, but the
/// contents may be incomplete.
pub enum OutputFile {
    Plain(BufWriter<File>),
    Gzip(flate2::write::GzEncoder<BufWriter<File>>),
    Zstd(zstd::Encoder<'static, BufWriter<File>>),
}

impl OutputFile {
    /// Create or truncate `path` and wrap it in the encoder its extension
    /// asks for.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create file: {}", path.display()))?;
        let buffered = BufWriter::with_capacity(128 * 1024, file);
        Ok(match Encoding::from_path(path) {
            Encoding::Plain => OutputFile::Plain(buffered),
            Encoding::Gzip => OutputFile::Gzip(flate2::write::GzEncoder::new(
                buffered,
                flate2::Compression::default(),
            )),
            Encoding::Zstd => OutputFile::Zstd(
                zstd::Encoder::new(buffered, ZSTD_LEVEL).with_context(|| {
                    format!("failed to initialize zstd encoder for: {}", path.display())
                })?,
            ),
        })
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            OutputFile::Plain(_) => Encoding::Plain,
            OutputFile::Gzip(_) => Encoding::Gzip,
            OutputFile::Zstd(_) => Encoding::Zstd,
        }
    }

    pub fn finish(self) -> io::Result<()> {
        let mut buffered = match self {
            OutputFile::Plain(w) => w,
            OutputFile::Gzip(enc) => enc.finish()?,
            OutputFile::Zstd(enc) => enc.finish()?,
        };
        buffered.flush()
    }
}

impl Write for OutputFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputFile::Plain(w) => w.write(buf),
            OutputFile::Gzip(w) => w.write(buf),
            OutputFile::Zstd(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputFile::Plain(w) => w.write_all(buf),
            OutputFile::Gzip(w) => w.write_all(buf),
            OutputFile::Zstd(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputFile::Plain(w) => w.flush(),
            OutputFile::Gzip(w) => w.flush(),
            OutputFile::Zstd(w) => w.flush(),
        }
    }
}
