//! Record sources
//!
//! The builder is written once against `RecordSource`; variants adapt the
//! places heading records actually come from: a flat pre-extracted dump
//! file, or a live term enumeration over a full-text index.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::errors::{BuildError, BuildResult};
use crate::observe::Logger;

/// Field separator within a dump line
const KEY_SEPARATOR: u8 = 0x01;
/// Separator between filter tags in the third field
const FILTER_SEPARATOR: u8 = 0x02;

/// One record pulled from a source: display text, an optional pre-computed
/// sort key, and (field, value) filter tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub text: String,
    /// Raw key override for callers who normalized upstream
    pub key: Option<Vec<u8>>,
    pub filters: Vec<(String, String)>,
}

/// A stream of heading records
pub trait RecordSource {
    /// Next record, or `None` when the source is exhausted.
    fn next_record(&mut self) -> BuildResult<Option<SourceRecord>>;

    /// Filter tags dropped so far for being malformed
    fn skipped_tags(&self) -> u64 {
        0
    }
}

/// Flat heading dump: CRLF-terminated lines of
/// `base64(sort key) \x01 display text [\x01 field:value \x02 field:value ...]`.
///
/// A bare `\r` inside a field is record data and is preserved; only `\r\n`
/// ends a line. Lines without a text field are skipped, as are filter tags
/// without a `field:` prefix (logged, never fatal).
pub struct FlatFileSource {
    path: PathBuf,
    reader: BufReader<File>,
    skipped_tags: u64,
}

impl FlatFileSource {
    /// Open a dump file for reading.
    pub fn open(path: &Path) -> BuildResult<Self> {
        let file = File::open(path).map_err(|e| BuildError::SourceIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            skipped_tags: 0,
        })
    }

    fn source_io(&self, e: std::io::Error) -> BuildError {
        BuildError::SourceIo {
            path: self.path.clone(),
            source: e,
        }
    }

    /// Read one `\r\n`-terminated line. A partial line at EOF is discarded.
    fn read_crlf_line(&mut self) -> BuildResult<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        loop {
            let n = self.reader.read(&mut byte).map_err(|e| self.source_io(e))?;
            if n == 0 {
                return Ok(None);
            }

            if byte[0] == b'\r' {
                let n = self.reader.read(&mut byte).map_err(|e| self.source_io(e))?;
                if n == 0 {
                    return Ok(None);
                }
                if byte[0] == b'\n' {
                    return Ok(Some(line));
                }
                // Embedded carriage return: keep it and the byte after it
                line.push(b'\r');
            }

            line.push(byte[0]);
        }
    }

    fn parse_filters(&mut self, raw: &[u8]) -> Vec<(String, String)> {
        let mut filters = Vec::new();

        for tag in raw.split(|b| *b == FILTER_SEPARATOR) {
            if tag.is_empty() {
                continue;
            }
            let tag_text = String::from_utf8_lossy(tag);
            match tag_text.find(':') {
                Some(sep) if sep > 0 => {
                    filters.push((tag_text[..sep].to_string(), tag_text[sep + 1..].to_string()));
                }
                _ => {
                    self.skipped_tags += 1;
                    Logger::warn("MALFORMED_FILTER_TAG", &[("tag", &tag_text)]);
                }
            }
        }

        filters
    }
}

impl RecordSource for FlatFileSource {
    fn next_record(&mut self) -> BuildResult<Option<SourceRecord>> {
        loop {
            let line = match self.read_crlf_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            let fields: Vec<&[u8]> = line.split(|b| *b == KEY_SEPARATOR).collect();
            if fields.len() < 2 {
                continue;
            }

            let key = match BASE64.decode(fields[0]) {
                Ok(key) => key,
                Err(_) => {
                    Logger::warn(
                        "MALFORMED_SOURCE_LINE",
                        &[("path", &self.path.display().to_string()), ("reason", "bad base64 key")],
                    );
                    continue;
                }
            };

            let text = String::from_utf8_lossy(fields[1]).into_owned();
            let filters = if fields.len() > 2 {
                self.parse_filters(fields[2])
            } else {
                Vec::new()
            };

            return Ok(Some(SourceRecord {
                text,
                key: Some(key),
                filters,
            }));
        }
    }

    fn skipped_tags(&self) -> u64 {
        self.skipped_tags
    }
}

/// External term-enumeration capability over a full-text index field.
pub trait TermFeed {
    /// Next term in enumeration order, or `None` when exhausted.
    fn next_term(&mut self) -> Result<Option<String>, String>;
}

/// Record source pulling headings live from a term enumeration.
///
/// Terms can be cross-checked against an existence oracle so that variant
/// headings nothing references are left out of the index. Keys are not
/// supplied; the builder normalizes each term itself.
pub struct EnumerationSource<F: TermFeed> {
    feed: F,
    exists: Option<Box<dyn Fn(&str) -> bool>>,
    filters: Vec<(String, String)>,
}

impl<F: TermFeed> EnumerationSource<F> {
    pub fn new(feed: F) -> Self {
        Self {
            feed,
            exists: None,
            filters: Vec::new(),
        }
    }

    /// Only include terms the oracle confirms are still referenced.
    pub fn with_existence_check(mut self, exists: Box<dyn Fn(&str) -> bool>) -> Self {
        self.exists = Some(exists);
        self
    }

    /// Attach fixed filter tags to every record from this source.
    pub fn with_filters(mut self, filters: Vec<(String, String)>) -> Self {
        self.filters = filters;
        self
    }
}

impl<F: TermFeed> RecordSource for EnumerationSource<F> {
    fn next_record(&mut self) -> BuildResult<Option<SourceRecord>> {
        loop {
            let term = match self.feed.next_term().map_err(BuildError::Source)? {
                Some(term) => term,
                None => return Ok(None),
            };

            if let Some(exists) = &self.exists {
                if !exists(&term) {
                    continue;
                }
            }

            return Ok(Some(SourceRecord {
                text: term,
                key: None,
                filters: self.filters.clone(),
            }));
        }
    }
}
