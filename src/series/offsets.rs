//! Shared offset-table encode/decode machinery for variable-element series
//! (`Vector<T, N>`/`List<T, LIMIT>` of variable-size `T`). Containers
//! implement their own version of this since they mix fixed and variable
//! fields, but share the same strictness rules.
//!
//! Grounded on `types/elem_var_size_series.go` from the reference
//! implementation: encode is two-pass (offsets, then bodies); decode
//! validates that every offset lands exactly on the reader's current
//! cursor and that offsets never decrease.

use alloc::vec::Vec;

use crate::constants::BYTES_PER_LENGTH_OFFSET;
use crate::error::{Result, SszError};
use crate::merkleization::fuzz_uniform_u64;
use crate::reader::Reader;
use crate::ssz::{Ssz, SszTypeInfo};
use crate::writer::Writer;

pub(crate) fn encode_variable_bodies(bodies: &[alloc::vec::Vec<u8>], buffer: &mut alloc::vec::Vec<u8>) -> Result<()> {
    let n = bodies.len();
    let mut w = Writer::new();
    let mut offset = (n * BYTES_PER_LENGTH_OFFSET) as u64;
    let mut prev_size = 0u64;
    for body in bodies {
        offset = w.write_offset(offset, prev_size)?;
        prev_size = body.len() as u64;
    }
    buffer.extend_from_slice(w.as_slice());
    for body in bodies {
        buffer.extend_from_slice(body);
    }
    Ok(())
}

/// Decodes `n` elements from an offset table whose size is known up front
/// (the `Vector<T, N>` case, and the tail of the `List` case once `n` has
/// been derived from the first offset).
pub(crate) fn decode_known_count<T: Ssz + SszTypeInfo>(
    child: &mut Reader,
    total_len: usize,
    n: usize,
) -> Result<Vec<T>> {
    if n == 0 {
        return Ok(Vec::new());
    }
    if child.is_fuzz_mode() {
        return decode_fuzz_elements::<T>(child, n);
    }
    let series_start = child.index();
    let mut offsets = Vec::with_capacity(n);
    for _ in 0..n {
        offsets.push(child.read_offset()?);
    }
    let expected_first = (n * BYTES_PER_LENGTH_OFFSET) as u64;
    if offsets[0] != expected_first {
        return Err(SszError::InvalidOffset {
            reason: "first offset must equal 4*n",
            offset: offsets[0],
        });
    }
    decode_elements_from_offsets(child, series_start, total_len, &offsets)
}

/// Decodes a list whose element count isn't known up front: the first
/// offset's value divided by 4 *is* the count.
pub(crate) fn decode_derived_count<T: Ssz + SszTypeInfo>(
    child: &mut Reader,
    total_len: usize,
    limit: usize,
) -> Result<Vec<T>> {
    if total_len == 0 {
        return Ok(Vec::new());
    }
    if child.is_fuzz_mode() {
        let elem_min = T::fuzz_min_len().max(1);
        let max_fit = (total_len / elem_min).min(limit);
        let uniform = fuzz_uniform_u64(child.index(), total_len);
        let n = (uniform % (max_fit as u64 + 1)) as usize;
        return decode_fuzz_elements::<T>(child, n);
    }
    let series_start = child.index();
    let first_offset = child.read_offset()?;
    if first_offset % BYTES_PER_LENGTH_OFFSET as u64 != 0 {
        return Err(SszError::InvalidOffset {
            reason: "first offset must be a multiple of 4",
            offset: first_offset,
        });
    }
    if first_offset as usize > total_len {
        return Err(SszError::InvalidOffset {
            reason: "first offset exceeds series length",
            offset: first_offset,
        });
    }
    let n = (first_offset / BYTES_PER_LENGTH_OFFSET as u64) as usize;
    if n > limit {
        return Err(SszError::LimitExceeded { count: n, limit });
    }
    let mut offsets = Vec::with_capacity(n);
    offsets.push(first_offset);
    for _ in 1..n {
        offsets.push(child.read_offset()?);
    }
    decode_elements_from_offsets(child, series_start, total_len, &offsets)
}

fn decode_elements_from_offsets<T: Ssz>(
    child: &mut Reader,
    series_start: usize,
    total_len: usize,
    offsets: &[u64],
) -> Result<Vec<T>> {
    let n = offsets.len();
    for w in offsets.windows(2) {
        if w[1] < w[0] {
            return Err(SszError::InvalidOffset {
                reason: "offsets must be non-decreasing",
                offset: w[1],
            });
        }
    }
    if offsets[n - 1] > total_len as u64 {
        return Err(SszError::InvalidOffset {
            reason: "offset exceeds series length",
            offset: offsets[n - 1],
        });
    }

    let mut elements = Vec::with_capacity(n);
    for i in 0..n {
        let expected_abs = series_start + offsets[i] as usize;
        if child.index() != expected_abs {
            return Err(SszError::InvalidOffset {
                reason: "offset does not match reader cursor",
                offset: offsets[i],
            });
        }
        let elem_len = if i + 1 < n {
            offsets[i + 1] - offsets[i]
        } else {
            total_len as u64 - offsets[i]
        };
        let mut elem_reader = child.scope(elem_len as usize)?;
        let value = T::decode(&mut elem_reader)?;
        if !elem_reader.at_end() {
            return Err(SszError::LengthMismatch {
                expected: elem_reader.max(),
                got: elem_reader.index(),
            });
        }
        elements.push(value);
    }
    Ok(elements)
}

/// Fuzz-mode decode for `n` elements: no offset table is consulted. Each
/// element's scope is sized from the reader's remaining span minus a
/// running reserve of `fuzz_min_len` for elements not yet decoded, so an
/// earlier element can't starve a later one of its minimum share of bytes.
/// Grounded on `types/elem_var_size_series.go`'s `DecodeVarSeriesFuzzMode`.
fn decode_fuzz_elements<T: Ssz + SszTypeInfo>(child: &mut Reader, n: usize) -> Result<Vec<T>> {
    let elem_min = T::fuzz_min_len() as u64;
    let mut reserve = elem_min * n as u64;
    let mut elements = Vec::with_capacity(n);
    for _ in 0..n {
        reserve -= elem_min;
        let span = child.bytes_span() as u64;
        if span < reserve {
            return Err(SszError::UnderflowFuzz);
        }
        let available = (span - reserve) as usize;
        let start = child.index();
        let mut scoped = child.scope_range(start, start + available)?;
        scoped.enable_fuzz_mode();
        let value = T::decode(&mut scoped)?;
        child.set_index(scoped.index());
        elements.push(value);
    }
    Ok(elements)
}

#[cfg(test)]
mod fuzz_tests {
    use super::*;
    use crate::bytes::ByteList;

    #[test]
    fn fuzz_decode_underflows_when_input_too_short_for_reserved_minimum() {
        // Two elements, each with a fuzz_min_len of 4 (FixedBytes<4>), but
        // only 3 bytes remain: the reserve for the second element alone
        // already exceeds what's left for the first.
        let data = [0u8; 3];
        let mut r = Reader::new(&data);
        r.enable_fuzz_mode();
        let result: Result<Vec<crate::bytes::FixedBytes<4>>> = decode_known_count(&mut r, 3, 2);
        assert_eq!(result, Err(SszError::UnderflowFuzz));
    }

    #[test]
    fn fuzz_decode_known_count_respects_reserve_for_later_elements() {
        // elem_min for ByteList<4> is 0 (it can be empty), so every byte is
        // available to any element; fuzz decode should never fail here.
        let data = [5u8; 10];
        let mut r = Reader::new(&data);
        r.enable_fuzz_mode();
        let result: Vec<ByteList<4>> = decode_known_count(&mut r, 10, 3).unwrap();
        assert_eq!(result.len(), 3);
        for elem in &result {
            assert!(elem.len() <= 4);
        }
    }
}
