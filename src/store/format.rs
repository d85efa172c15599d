//! Snapshot file format
//!
//! ```text
//! +------------------+
//! | Magic            | ("BRWSIDX1", 8 bytes)
//! +------------------+
//! | Manifest record  | (JSON payload)
//! +------------------+
//! | Heading rows     | (rowid order: id, key, text)
//! +------------------+
//! | FilterType rows  | (id, name)
//! +------------------+
//! | FilterValue rows | (id, type_id, value)
//! +------------------+
//! | FilterLink rows  | (heading_id, filter_value_id)
//! +------------------+
//! ```
//!
//! Every record is framed as `[len u32 LE][payload][crc32 u32 LE]`; the
//! checksum covers the payload only. Row counts come from the manifest.
//! Strings and byte fields inside a payload are u32-length-prefixed.

use std::io::{Read, Write};
use std::path::Path;

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StoreError, StoreResult};

/// Magic bytes identifying a browse snapshot file
pub const MAGIC: &[u8; 8] = b"BRWSIDX1";

/// Records are bounded; anything larger is treated as corruption.
const MAX_RECORD_LEN: u32 = 16 * 1024 * 1024;

/// One browsable heading: dense builder-assigned id, binary sort key,
/// first-seen display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub id: u32,
    pub key: Vec<u8>,
    pub text: String,
}

/// One distinct filter field name, assigned in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterType {
    pub id: u32,
    pub name: String,
}

/// One distinct (type, value) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterValue {
    pub id: u32,
    pub type_id: u32,
    pub value: String,
}

/// Deduplicated heading/filter-value link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilterLink {
    pub heading_id: u32,
    pub filter_value_id: u32,
}

/// Write one framed record.
pub(crate) fn write_record<W: Write>(w: &mut W, path: &Path, payload: &[u8]) -> StoreResult<()> {
    let len = payload.len() as u32;
    w.write_all(&len.to_le_bytes())
        .and_then(|_| w.write_all(payload))
        .and_then(|_| w.write_all(&compute_checksum(payload).to_le_bytes()))
        .map_err(|e| StoreError::io(path, e))
}

/// Read one framed record, verifying its checksum.
pub(crate) fn read_record<R: Read>(r: &mut R, path: &Path) -> StoreResult<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    r.read_exact(&mut len_buf)
        .map_err(|e| StoreError::io(path, e))?;
    let len = u32::from_le_bytes(len_buf);
    if len > MAX_RECORD_LEN {
        return Err(StoreError::corrupt(path, format!("record length {} exceeds limit", len)));
    }

    let mut payload = vec![0u8; len as usize];
    r.read_exact(&mut payload)
        .map_err(|e| StoreError::io(path, e))?;

    let mut sum_buf = [0u8; 4];
    r.read_exact(&mut sum_buf)
        .map_err(|e| StoreError::io(path, e))?;
    let expected = u32::from_le_bytes(sum_buf);

    if !verify_checksum(&payload, expected) {
        return Err(StoreError::corrupt(path, "record checksum mismatch"));
    }

    Ok(payload)
}

/// Payload encoder for row fields
pub(crate) struct RowEncoder {
    buf: Vec<u8>,
}

impl RowEncoder {
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(64) }
    }

    pub fn put_u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_bytes(&mut self, v: &[u8]) -> &mut Self {
        self.put_u32(v.len() as u32);
        self.buf.extend_from_slice(v);
        self
    }

    pub fn put_str(&mut self, v: &str) -> &mut Self {
        self.put_bytes(v.as_bytes())
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Payload decoder for row fields
pub(crate) struct RowDecoder<'a> {
    buf: &'a [u8],
    pos: usize,
    path: &'a Path,
}

impl<'a> RowDecoder<'a> {
    pub fn new(buf: &'a [u8], path: &'a Path) -> Self {
        Self { buf, pos: 0, path }
    }

    fn short(&self, what: &str) -> StoreError {
        StoreError::corrupt(self.path, format!("truncated {} field in row payload", what))
    }

    pub fn take_u32(&mut self) -> StoreResult<u32> {
        let end = self.pos + 4;
        if end > self.buf.len() {
            return Err(self.short("u32"));
        }
        let mut b = [0u8; 4];
        b.copy_from_slice(&self.buf[self.pos..end]);
        self.pos = end;
        Ok(u32::from_le_bytes(b))
    }

    pub fn take_bytes(&mut self) -> StoreResult<Vec<u8>> {
        let len = self.take_u32()? as usize;
        let end = self.pos + len;
        if end > self.buf.len() {
            return Err(self.short("bytes"));
        }
        let out = self.buf[self.pos..end].to_vec();
        self.pos = end;
        Ok(out)
    }

    pub fn take_str(&mut self) -> StoreResult<String> {
        let bytes = self.take_bytes()?;
        String::from_utf8(bytes)
            .map_err(|_| StoreError::corrupt(self.path, "row field is not valid UTF-8"))
    }

    pub fn finish(self) -> StoreResult<()> {
        if self.pos != self.buf.len() {
            return Err(StoreError::corrupt(self.path, "trailing bytes in row payload"));
        }
        Ok(())
    }
}

impl Heading {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = RowEncoder::new();
        enc.put_u32(self.id).put_bytes(&self.key).put_str(&self.text);
        enc.finish()
    }

    pub(crate) fn decode(payload: &[u8], path: &Path) -> StoreResult<Self> {
        let mut dec = RowDecoder::new(payload, path);
        let id = dec.take_u32()?;
        let key = dec.take_bytes()?;
        let text = dec.take_str()?;
        dec.finish()?;
        Ok(Self { id, key, text })
    }
}

impl FilterType {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = RowEncoder::new();
        enc.put_u32(self.id).put_str(&self.name);
        enc.finish()
    }

    pub(crate) fn decode(payload: &[u8], path: &Path) -> StoreResult<Self> {
        let mut dec = RowDecoder::new(payload, path);
        let id = dec.take_u32()?;
        let name = dec.take_str()?;
        dec.finish()?;
        Ok(Self { id, name })
    }
}

impl FilterValue {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = RowEncoder::new();
        enc.put_u32(self.id).put_u32(self.type_id).put_str(&self.value);
        enc.finish()
    }

    pub(crate) fn decode(payload: &[u8], path: &Path) -> StoreResult<Self> {
        let mut dec = RowDecoder::new(payload, path);
        let id = dec.take_u32()?;
        let type_id = dec.take_u32()?;
        let value = dec.take_str()?;
        dec.finish()?;
        Ok(Self { id, type_id, value })
    }
}

impl FilterLink {
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut enc = RowEncoder::new();
        enc.put_u32(self.heading_id).put_u32(self.filter_value_id);
        enc.finish()
    }

    pub(crate) fn decode(payload: &[u8], path: &Path) -> StoreResult<Self> {
        let mut dec = RowDecoder::new(payload, path);
        let heading_id = dec.take_u32()?;
        let filter_value_id = dec.take_u32()?;
        dec.finish()?;
        Ok(Self { heading_id, filter_value_id })
    }
}
