//! `FixedBytes<N>` (exactly N bytes) and `ByteList<LIMIT>` (0..=LIMIT bytes).
//!
//! Both are byte blobs rather than vectors of a basic element, so they skip
//! the packed-array machinery in `series` entirely and just copy bytes
//! directly.

use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::error::{Result, SszError};
use crate::merkleization::{chunk_count as shape_chunk_count, merkleize, mix_in_length, pack, SszShape};
use crate::reader::Reader;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    pub fn new(data: [u8; N]) -> Self {
        Self(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> SszTypeInfo for FixedBytes<N> {
    fn is_fixed_size() -> bool {
        true
    }

    fn fixed_size() -> Option<usize> {
        Some(N)
    }
}

impl<const N: usize> Ssz for FixedBytes<N> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        buffer.extend_from_slice(&self.0);
        Ok(N)
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let mut data = [0u8; N];
        reader.read(&mut data)?;
        Ok(Self(data))
    }
}

impl<const N: usize> Merkleize for FixedBytes<N> {
    fn hash_tree_root(&self) -> Result<B256> {
        let chunks = pack(&self.0);
        merkleize(&chunks, Some(Self::chunk_count()))
    }

    fn chunk_count() -> usize {
        shape_chunk_count(SszShape::Basic {
            elem_size: 1,
            count: N,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteList<const LIMIT: usize> {
    bytes: Vec<u8>,
}

impl<const LIMIT: usize> ByteList<LIMIT> {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > LIMIT {
            return Err(SszError::LimitExceeded {
                count: bytes.len(),
                limit: LIMIT,
            });
        }
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const LIMIT: usize> SszTypeInfo for ByteList<LIMIT> {
    fn is_fixed_size() -> bool {
        false
    }

    fn fixed_size() -> Option<usize> {
        None
    }
}

impl<const LIMIT: usize> Ssz for ByteList<LIMIT> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        buffer.extend_from_slice(&self.bytes);
        Ok(self.bytes.len())
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let span = reader.bytes_span();
        let len = if reader.is_fuzz_mode() {
            let divisor = span.min(LIMIT);
            if divisor == 0 {
                0
            } else {
                let uniform = crate::merkleization::fuzz_uniform_u64(reader.index(), span);
                (uniform % divisor as u64) as usize
            }
        } else {
            if span > LIMIT {
                return Err(SszError::LimitExceeded {
                    count: span,
                    limit: LIMIT,
                });
            }
            span
        };
        let mut bytes = alloc::vec![0u8; len];
        reader.read(&mut bytes)?;
        Ok(Self { bytes })
    }
}

impl<const LIMIT: usize> Merkleize for ByteList<LIMIT> {
    fn hash_tree_root(&self) -> Result<B256> {
        let chunks = pack(&self.bytes);
        let root = merkleize(&chunks, Some(Self::chunk_count()))?;
        Ok(mix_in_length(root, self.bytes.len()))
    }

    fn chunk_count() -> usize {
        shape_chunk_count(SszShape::Basic {
            elem_size: 1,
            count: LIMIT,
        })
    }
}
