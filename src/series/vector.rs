//! `Vector<T, N>` — a fixed number of elements, expressed as a native Rust
//! array `[T; N]`. Built without `unsafe`, collecting into a `Vec<T>` first
//! and converting to `[T; N]` with `TryInto` instead of `MaybeUninit`.

use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::constants::BYTES_PER_LENGTH_OFFSET;
use crate::error::{Result, SszError};
use crate::merkleization::{chunk_count as shape_chunk_count, merkleize, pack, SszShape};
use crate::reader::Reader;
use crate::series::offsets::{decode_known_count, encode_variable_bodies};
use crate::series::pack_basic_elements;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

/// A friendly alias for the fixed-count series the format calls a Vector.
/// The actual trait impls below live directly on `[T; N]`.
pub type Vector<T, const N: usize> = [T; N];

impl<T: SszTypeInfo, const N: usize> SszTypeInfo for [T; N] {
    fn is_fixed_size() -> bool {
        T::is_fixed_size()
    }

    fn fixed_size() -> Option<usize> {
        T::fixed_size().map(|w| w * N)
    }

    fn fuzz_min_len() -> usize {
        N * T::fuzz_min_len()
    }
}

impl<T: Ssz + SszTypeInfo, const N: usize> Ssz for [T; N] {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let start = buffer.len();
        if T::is_fixed_size() {
            for item in self.iter() {
                item.serialize(buffer)?;
            }
        } else {
            let mut bodies = Vec::with_capacity(N);
            for item in self.iter() {
                let mut body = Vec::new();
                item.serialize(&mut body)?;
                bodies.push(body);
            }
            encode_variable_bodies(&bodies, buffer)?;
        }
        Ok(buffer.len() - start)
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        if T::is_fixed_size() {
            let mut elements = Vec::with_capacity(N);
            for _ in 0..N {
                elements.push(T::decode(reader)?);
            }
            match elements.try_into() {
                Ok(array) => Ok(array),
                Err(_) => unreachable!("exactly N elements were pushed"),
            }
        } else {
            let total_len = reader.bytes_span();
            if !reader.is_fuzz_mode() {
                let expected_table = N * BYTES_PER_LENGTH_OFFSET;
                if total_len < expected_table {
                    return Err(SszError::LengthMismatch {
                        expected: expected_table,
                        got: total_len,
                    });
                }
            }
            let mut child = reader.scope(total_len)?;
            let elements: Vec<T> = decode_known_count(&mut child, total_len, N)?;
            match elements.try_into() {
                Ok(array) => Ok(array),
                Err(_) => unreachable!("decode_known_count returns exactly n elements"),
            }
        }
    }
}

impl<T: Merkleize + Ssz + SszTypeInfo, const N: usize> Merkleize for [T; N] {
    fn hash_tree_root(&self) -> Result<B256> {
        let chunks = if T::is_basic_type() {
            let packed = pack_basic_elements(self)?;
            pack(&packed)
        } else {
            self.iter()
                .map(|e| e.hash_tree_root().map(|h| h.0))
                .collect::<Result<Vec<_>>>()?
        };
        merkleize(&chunks, Some(Self::chunk_count()))
    }

    fn chunk_count() -> usize {
        if T::is_basic_type() {
            shape_chunk_count(SszShape::Basic {
                elem_size: T::fixed_size().unwrap_or(1),
                count: N,
            })
        } else {
            shape_chunk_count(SszShape::Composite { count: N })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fixed_element_vector_roundtrips() {
        let v: Vector<u16, 4> = [1, 2, 3, 4];
        let encoded = v.encode().unwrap();
        assert_eq!(encoded, vec![1, 0, 2, 0, 3, 0, 4, 0]);
        assert_eq!(<[u16; 4]>::deserialize(&encoded).unwrap(), v);
    }

    #[test]
    fn variable_element_vector_roundtrips() {
        let v: Vector<crate::bytes::ByteList<8>, 3> = [
            crate::bytes::ByteList::new(vec![1, 2]).unwrap(),
            crate::bytes::ByteList::new(vec![3, 4, 5]).unwrap(),
            crate::bytes::ByteList::new(vec![6]).unwrap(),
        ];
        let encoded = v.encode().unwrap();
        let decoded = <[crate::bytes::ByteList<8>; 3]>::deserialize(&encoded).unwrap();
        assert_eq!(v, decoded);
    }

    #[test]
    fn basic_vector_hash_tree_root_packs_and_pads() {
        let v: Vector<u8, 4> = [1, 2, 3, 4];
        let root = v.hash_tree_root().unwrap();
        let expected = B256::from(alloy_primitives::hex!(
            "0102030400000000000000000000000000000000000000000000000000000000"
        ));
        assert_eq!(root, expected);
    }

    #[test]
    fn decode_rejects_non_monotonic_offsets() {
        // N=2 variable elements; second offset smaller than first is invalid.
        let bad = [8u8, 0, 0, 0, 4, 0, 0, 0];
        assert!(matches!(
            <[crate::bytes::ByteList<8>; 2]>::deserialize(&bad),
            Err(SszError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn fuzz_mode_decode_of_variable_elements_stays_in_bounds() {
        let data = [4u8; 16];
        let mut r = Reader::new(&data);
        r.enable_fuzz_mode();
        let v = <[crate::bytes::ByteList<4>; 2]>::decode(&mut r).unwrap();
        for elem in &v {
            assert!(elem.len() <= 4);
        }
    }

    #[test]
    fn fuzz_mode_underflows_when_span_cannot_cover_variable_element_reserve() {
        // [Bitlist<8>; 4] reserves 1 byte (the delimiter) per element; with
        // only 2 bytes total, the third element's reserve can't be met.
        let data = [0u8; 2];
        let mut r = Reader::new(&data);
        r.enable_fuzz_mode();
        assert_eq!(
            <[crate::bitfield::bitlist::Bitlist<8>; 4]>::decode(&mut r),
            Err(SszError::UnderflowFuzz)
        );
    }
}
