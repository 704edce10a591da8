//! A bounded byte-slice reader with scoping, used by every decode path.
//!
//! Mirrors the decoding-reader half of the wire-format contract: a cursor
//! bounded by `max`, with `scope` carving out sub-readers for offset-table
//! element ranges and `enable_fuzz_mode` relaxing validation for fuzz harnesses.

use alloc::vec::Vec;

use crate::error::{Result, SszError};

pub struct Reader<'a> {
    input: &'a [u8],
    i: usize,
    max: usize,
    fuzz_mode: bool,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        let max = input.len();
        Self {
            input,
            i: 0,
            max,
            fuzz_mode: false,
        }
    }

    pub fn index(&self) -> usize {
        self.i
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn bytes_span(&self) -> usize {
        self.max - self.i
    }

    pub fn is_fuzz_mode(&self) -> bool {
        self.fuzz_mode
    }

    pub fn enable_fuzz_mode(&mut self) {
        self.fuzz_mode = true;
    }

    /// Advances the cursor to an absolute position already validated by the
    /// caller (fuzz-mode element decoding, where a sub-reader may consume
    /// less than the scope it was offered and the parent must catch up only
    /// by that much, leaving the rest available to later elements).
    pub(crate) fn set_index(&mut self, index: usize) {
        self.i = index;
    }

    /// Carves out a sub-reader over the next `count` bytes, advancing `self`
    /// past them. The sub-reader inherits the fuzz-mode flag.
    pub fn scope(&mut self, count: usize) -> Result<Reader<'a>> {
        if count > self.bytes_span() {
            return Err(SszError::OutOfScope {
                requested: count,
                available: self.bytes_span(),
            });
        }
        let start = self.i;
        let end = start + count;
        self.i = end;
        Ok(Reader {
            input: self.input,
            i: start,
            max: end,
            fuzz_mode: self.fuzz_mode,
        })
    }

    /// Carves out a sub-reader over the explicit range `[start, end)` of the
    /// underlying slice (used by offset-table decoding, where the range is
    /// computed from two offsets rather than a running count).
    pub fn scope_range(&self, start: usize, end: usize) -> Result<Reader<'a>> {
        if start > end || end > self.max {
            return Err(SszError::OutOfScope {
                requested: end,
                available: self.max,
            });
        }
        Ok(Reader {
            input: self.input,
            i: start,
            max: end,
            fuzz_mode: self.fuzz_mode,
        })
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        if self.i + len > self.max {
            return Err(SszError::OutOfScope {
                requested: len,
                available: self.bytes_span(),
            });
        }
        buf.copy_from_slice(&self.input[self.i..self.i + len]);
        self.i += len;
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let mut b = [0u8; 1];
        self.read(&mut b)?;
        Ok(b[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut b = [0u8; 2];
        self.read(&mut b)?;
        Ok(u16::from_le_bytes(b))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut b = [0u8; 4];
        self.read(&mut b)?;
        Ok(u32::from_le_bytes(b))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut b = [0u8; 8];
        self.read(&mut b)?;
        Ok(u64::from_le_bytes(b))
    }

    pub fn read_offset(&mut self) -> Result<u64> {
        Ok(self.read_u32()? as u64)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        if self.i + n > self.max {
            return Err(SszError::OutOfScope {
                requested: n,
                available: self.bytes_span(),
            });
        }
        self.i += n;
        Ok(())
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.i..self.max]
    }

    pub fn remaining_vec(&self) -> Vec<u8> {
        self.remaining().to_vec()
    }

    /// Returns whether the cursor has reached `max` (used to reject
    /// unconsumed trailing bytes after a top-level decode).
    pub fn at_end(&self) -> bool {
        self.i == self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian_scalars() {
        let data = [0xef, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01];
        let mut r = Reader::new(&data);
        assert_eq!(r.read_u64().unwrap(), 0x0123_4567_89ab_cdef);
        assert!(r.at_end());
    }

    #[test]
    fn scope_bounds_child_reader() {
        let data = [1, 2, 3, 4, 5];
        let mut r = Reader::new(&data);
        let mut child = r.scope(3).unwrap();
        assert_eq!(child.read_byte().unwrap(), 1);
        assert_eq!(child.bytes_span(), 2);
        assert_eq!(r.index(), 3);
    }

    #[test]
    fn read_past_bound_errors() {
        let data = [1, 2];
        let mut r = Reader::new(&data);
        assert!(matches!(
            r.read_u32(),
            Err(SszError::OutOfScope { .. })
        ));
    }

    #[test]
    fn scope_past_bound_errors() {
        let data = [1, 2];
        let mut r = Reader::new(&data);
        assert!(matches!(r.scope(3), Err(SszError::OutOfScope { .. })));
    }
}
