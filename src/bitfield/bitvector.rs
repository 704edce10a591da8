//! `Bitvector<N>`: exactly `N` bits, packed LSB-first into `ceil(N/8)` bytes.
//!
//! Decode enforces that the unused high bits of the last byte are zero
//! (`bitfields/bitvector.go`'s `BitvectorCheck` in the reference
//! implementation this format descends from).

use alloc::vec;
use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, SszError};
use crate::merkleization::{chunk_count as shape_chunk_count, merkleize, pack_bits, SszShape};
use crate::reader::Reader;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitvector<const N: usize> {
    bits: Vec<bool>,
}

fn byte_len(n: usize) -> usize {
    n.div_ceil(BITS_PER_BYTE)
}

impl<const N: usize> Default for Bitvector<N> {
    fn default() -> Self {
        Self {
            bits: vec![false; N],
        }
    }
}

impl<const N: usize> Bitvector<N> {
    pub fn from_bits(bits: Vec<bool>) -> Result<Self> {
        if bits.len() != N {
            return Err(SszError::LengthMismatch {
                expected: N,
                got: bits.len(),
            });
        }
        Ok(Self { bits })
    }

    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    pub fn set(&mut self, i: usize, v: bool) {
        self.bits[i] = v;
    }

    fn pack(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; byte_len(N)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i / BITS_PER_BYTE] |= 1 << (i % BITS_PER_BYTE);
            }
        }
        bytes
    }
}

impl<const N: usize> TryFrom<&[bool]> for Bitvector<N> {
    type Error = SszError;

    fn try_from(slice: &[bool]) -> Result<Self> {
        Self::from_bits(slice.to_vec())
    }
}

impl<const N: usize> SszTypeInfo for Bitvector<N> {
    fn is_fixed_size() -> bool {
        true
    }

    fn fixed_size() -> Option<usize> {
        Some(byte_len(N))
    }
}

impl<const N: usize> Ssz for Bitvector<N> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let bytes = self.pack();
        buffer.extend_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let len = byte_len(N);
        let mut data = vec![0u8; len];
        reader.read(&mut data)?;

        let used_bits_in_last_byte = N - (len - 1) * BITS_PER_BYTE;
        if used_bits_in_last_byte < BITS_PER_BYTE {
            let last = data[len - 1];
            let unused_mask = !0u8 << used_bits_in_last_byte;
            if last & unused_mask != 0 {
                if !reader.is_fuzz_mode() {
                    return Err(SszError::InvalidValue {
                        reason: "unused high bits of bitvector's last byte must be zero",
                    });
                }
                *data.last_mut().unwrap() &= !unused_mask;
            }
        }

        let mut bits = Vec::with_capacity(N);
        for i in 0..N {
            bits.push((data[i / BITS_PER_BYTE] >> (i % BITS_PER_BYTE)) & 1 != 0);
        }
        Ok(Self { bits })
    }
}

impl<const N: usize> Merkleize for Bitvector<N> {
    fn hash_tree_root(&self) -> Result<B256> {
        let chunks = pack_bits(&self.pack());
        merkleize(&chunks, Some(Self::chunk_count()))
    }

    fn chunk_count() -> usize {
        shape_chunk_count(SszShape::BitLen { limit_bits: N })
    }
}
