//! Serialization, deserialization, and Merkleization for `bool`.

use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::error::{Result, SszError};
use crate::reader::Reader;
use crate::ssz::{Ssz, SszTypeInfo};

impl SszTypeInfo for bool {
    fn is_fixed_size() -> bool {
        true
    }

    fn fixed_size() -> Option<usize> {
        Some(1)
    }

    fn is_basic_type() -> bool {
        true
    }
}

impl Ssz for bool {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        buffer.push(if *self { 1 } else { 0 });
        Ok(1)
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let byte = reader.read_byte()?;
        if reader.is_fuzz_mode() {
            return Ok(byte & 1 != 0);
        }
        match byte {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SszError::InvalidValue {
                reason: "boolean byte must be 0 or 1",
            }),
        }
    }
}

impl crate::ssz::Merkleize for bool {
    fn hash_tree_root(&self) -> Result<B256> {
        let mut hash = B256::default();
        if *self {
            hash[0] = 1;
        }
        Ok(hash)
    }

    fn chunk_count() -> usize {
        1
    }
}
