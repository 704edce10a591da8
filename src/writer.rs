//! A growable byte sink used by every encode path.
//!
//! Mirrors the encoding-writer half of the wire-format contract. Plain
//! `write`/`write_byte` are infallible (bounded only by the allocator);
//! `write_offset` is the one operation that can fail, when a computed
//! offset would not fit in the 4-byte little-endian field the format uses.

use alloc::vec::Vec;

use crate::constants::BYTES_PER_LENGTH_OFFSET;
use crate::error::{Result, SszError};

pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn written(&self) -> usize {
        self.buf.len()
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_byte(&mut self, b: u8) {
        self.buf.push(b);
    }

    /// Writes `prev_offset + elem_len` as a little-endian `u32` and returns
    /// it, so the caller can thread it into the next call as `prev_offset`.
    pub fn write_offset(&mut self, prev_offset: u64, elem_len: u64) -> Result<u64> {
        const LIMIT: u64 = 1 << 32;
        if prev_offset >= LIMIT || elem_len >= LIMIT {
            return Err(SszError::OffsetOverflow);
        }
        let offset = prev_offset + elem_len;
        if offset >= LIMIT {
            return Err(SszError::OffsetOverflow);
        }
        self.write(&(offset as u32).to_le_bytes());
        debug_assert_eq!(BYTES_PER_LENGTH_OFFSET, 4);
        Ok(offset)
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_offset_chains() {
        let mut w = Writer::new();
        let o1 = w.write_offset(12, 0).unwrap();
        assert_eq!(o1, 12);
        let o2 = w.write_offset(o1, 5).unwrap();
        assert_eq!(o2, 17);
        assert_eq!(&w.into_vec(), &[12, 0, 0, 0, 17, 0, 0, 0]);
    }

    #[test]
    fn write_offset_overflow_errors() {
        let mut w = Writer::new();
        assert!(matches!(
            w.write_offset(1u64 << 32, 0),
            Err(SszError::OffsetOverflow)
        ));
    }
}
