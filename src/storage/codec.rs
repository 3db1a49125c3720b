//! Fixed-width binary record encoding
//!
//! Every store file is a back-to-back sequence of records of one size.
//! Integers are little-endian; text is UTF-8 padded with NUL bytes to the
//! field width.

use crate::error::{StorekeepError, StorekeepResult};
use crate::models::BoundedString;

/// A record shape that can be kept in a [`RecordStore`](super::RecordStore)
pub trait Record: Sized {
    /// Human-readable kind, used in log and error messages
    const KIND: &'static str;

    /// Encoded size in bytes; identical for every record of this type
    const SIZE: usize;

    /// Write exactly `SIZE` bytes
    fn encode(&self, out: &mut RecordWriter);

    /// Read one record from exactly `SIZE` bytes
    fn decode(input: &mut RecordReader<'_>) -> StorekeepResult<Self>;
}

/// A record with a positive integer id, eligible for id generation
pub trait Keyed: Record {
    fn key(&self) -> u32;
}

/// Encode a record into a freshly allocated buffer
pub fn encode_record<R: Record>(record: &R) -> Vec<u8> {
    let mut writer = RecordWriter::with_capacity(R::SIZE);
    record.encode(&mut writer);
    debug_assert_eq!(writer.len(), R::SIZE, "{} encoded to wrong size", R::KIND);
    writer.into_bytes()
}

/// Decode a record from a buffer of exactly `R::SIZE` bytes
pub fn decode_record<R: Record>(bytes: &[u8]) -> StorekeepResult<R> {
    if bytes.len() != R::SIZE {
        return Err(StorekeepError::Storage(format!(
            "{} record must be {} bytes, got {}",
            R::KIND,
            R::SIZE,
            bytes.len()
        )));
    }
    let mut reader = RecordReader::new(bytes);
    R::decode(&mut reader)
}

/// Append-only little-endian field writer
#[derive(Debug, Default)]
pub struct RecordWriter {
    buf: Vec<u8>,
}

impl RecordWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    /// Write text into an `N`-byte field, NUL padded
    pub fn put_text<const N: usize>(&mut self, text: &BoundedString<N>) {
        let bytes = text.as_bytes();
        self.buf.extend_from_slice(bytes);
        self.buf.resize(self.buf.len() + (N - bytes.len()), 0);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Sequential little-endian field reader over one record's bytes
#[derive(Debug)]
pub struct RecordReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> StorekeepResult<&'a [u8]> {
        let end = self.pos + len;
        let slice = self.buf.get(self.pos..end).ok_or_else(|| {
            StorekeepError::Storage(format!(
                "Record truncated: wanted {} bytes at offset {}",
                len, self.pos
            ))
        })?;
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const L: usize>(&mut self) -> StorekeepResult<[u8; L]> {
        let slice = self.take(L)?;
        let mut out = [0u8; L];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn get_u8(&mut self) -> StorekeepResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn get_u32(&mut self) -> StorekeepResult<u32> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn get_i64(&mut self) -> StorekeepResult<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    pub fn get_bool(&mut self) -> StorekeepResult<bool> {
        match self.get_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StorekeepError::Storage(format!(
                "Invalid flag byte {}",
                other
            ))),
        }
    }

    /// Read an `N`-byte NUL-padded text field
    pub fn get_text<const N: usize>(&mut self) -> StorekeepResult<BoundedString<N>> {
        let field = self.take(N)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(N);
        let text = std::str::from_utf8(&field[..end])
            .map_err(|e| StorekeepError::Storage(format!("Text field is not UTF-8: {}", e)))?;
        BoundedString::new(text)
            .map_err(|e| StorekeepError::Storage(format!("Text field rejected: {}", e)))
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}
