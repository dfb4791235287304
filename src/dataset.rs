//! Dataset file writer: a `key,value` header followed by one line per record.

use crate::compress::OutputFile;
use crate::record::{Record, Records, Source};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

pub const HEADER: &str = "key,value";

/// Records generated when no count is given.
pub const DEFAULT_COUNT: u64 = 1000;

/// `dataset{n}.csv`
pub fn default_filename(n: u64) -> String {
    format!("dataset{n}.csv")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    pub source: Source,
}

/// Write one `<key>,<value>\n` line.
///
/// The line is assembled in a stack buffer first so it reaches `out` in a
/// single `write_all`.
pub fn write_record(out: &mut impl Write, record: &Record) -> io::Result<()> {
    // 2 × 39 digits + ',' + '\n'
    let mut line = [0u8; 80];
    let mut key_buf = itoa::Buffer::new();
    let mut value_buf = itoa::Buffer::new();
    let key = key_buf.format(record.key).as_bytes();
    let value = value_buf.format(record.value).as_bytes();

    let mut len = 0;
    let parts: [&[u8]; 4] = [key, b",", value, b"\n"];
    for part in parts {
        line[len..len + part.len()].copy_from_slice(part);
        len += part.len();
    }
    out.write_all(&line[..len])
}

/// Write the header and then exactly `count` records pulled from `records`.
/// Returns the number of records written.
pub fn write_dataset(
    out: &mut impl Write,
    mut records: impl Iterator<Item = Record>,
    count: u64,
) -> io::Result<u64> {
    out.write_all(HEADER.as_bytes())?;
    out.write_all(b"\n")?;

    let mut written = 0;
    while written < count {
        let Some(record) = records.next() else {
            break;
        };
        write_record(out, &record)?;
        written += 1;
    }
    Ok(written)
}

/// Create (or truncate) `destination` and fill it with `count` random
/// records. A partially written file is left in place on error.
pub fn generate(count: u64, destination: &Path) -> Result<()> {
    generate_with(count, destination, &GenerateOptions::default()).map(|_| ())
}

/// Like [`generate`], with an explicit identifier source. Returns the number
/// of records written.
pub fn generate_with(count: u64, destination: &Path, options: &GenerateOptions) -> Result<u64> {
    let mut out = OutputFile::create(destination)?;
    log::debug!(
        "writing {count} records to {} (source: {}, encoding: {})",
        destination.display(),
        options.source,
        out.encoding()
    );

    let written = write_dataset(&mut out, Records::new(options.source), count)
        .with_context(|| format!("failed to write file: {}", destination.display()))?;
    out.finish()
        .with_context(|| format!("failed to finish file: {}", destination.display()))?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buf: &[u8]) -> Vec<&str> {
        std::str::from_utf8(buf).unwrap().lines().collect()
    }

    /// Accepts any writes until `limit` bytes, then fails.
    struct FailAfter {
        limit: usize,
        written: usize,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written + buf.len() > self.limit {
                return Err(io::Error::other("disk full"));
            }
            self.written += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn default_filenames() {
        assert_eq!(default_filename(DEFAULT_COUNT), "dataset1000.csv");
        assert_eq!(default_filename(0), "dataset0.csv");
        assert_eq!(default_filename(5), "dataset5.csv");
    }

    #[test]
    fn record_line_format() {
        let mut buf = Vec::new();
        write_record(&mut buf, &Record { key: 1, value: 22 }).unwrap();
        assert_eq!(buf, b"1,22\n");
    }

    #[test]
    fn record_line_extremes() {
        let mut buf = Vec::new();
        write_record(
            &mut buf,
            &Record {
                key: 0,
                value: u128::MAX,
            },
        )
        .unwrap();
        assert_eq!(buf, b"0,340282366920938463463374607431768211455\n");

        buf.clear();
        write_record(
            &mut buf,
            &Record {
                key: u128::MAX,
                value: u128::MAX,
            },
        )
        .unwrap();
        assert_eq!(buf.len(), 39 * 2 + 2);
    }

    #[test]
    fn zero_count_is_header_only() {
        let mut buf = Vec::new();
        let n = write_dataset(&mut buf, Records::new(Source::Os), 0).unwrap();
        assert_eq!(n, 0);
        assert_eq!(buf, b"key,value\n");
    }

    #[test]
    fn writes_exact_count_in_draw_order() {
        let expected: Vec<Record> = Records::new(Source::Seeded(3)).take(5).collect();
        let mut buf = Vec::new();
        let n = write_dataset(&mut buf, Records::new(Source::Seeded(3)), 5).unwrap();
        assert_eq!(n, 5);

        let lines = lines(&buf);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], HEADER);
        for (line, rec) in lines[1..].iter().zip(&expected) {
            assert_eq!(*line, format!("{},{}", rec.key, rec.value));
        }
    }

    #[test]
    fn write_error_propagates() {
        let mut out = FailAfter {
            limit: 100,
            written: 0,
        };
        let err = write_dataset(&mut out, Records::new(Source::Os), 10).unwrap_err();
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn no_partial_lines_on_failure() {
        // Room for the header only.
        let mut out = FailAfter {
            limit: 10,
            written: 0,
        };
        assert!(write_dataset(&mut out, Records::new(Source::Os), 3).is_err());
        assert_eq!(out.written, HEADER.len() + 1);
    }

    #[test]
    fn generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        generate(5, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "key,value");
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 2);
        }
    }

    #[test]
    fn generate_seeded_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let options = GenerateOptions {
            source: Source::Seeded(1234),
        };
        assert_eq!(generate_with(50, &a, &options).unwrap(), 50);
        assert_eq!(generate_with(50, &b, &options).unwrap(), 50);
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn generate_missing_parent_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = generate(5, &path).unwrap_err();
        assert!(format!("{err:#}").contains("out.csv"));
    }
}
