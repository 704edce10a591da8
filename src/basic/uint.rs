//! Serialization, deserialization, and Merkleization for unsigned integers.

use alloc::vec::Vec;
use alloy_primitives::{B256, U256};

use crate::constants::BYTES;
use crate::error::Result;
use crate::reader::Reader;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

macro_rules! impl_uint {
    ($type:ty, $bytes:expr) => {
        impl Ssz for $type {
            fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
                let bytes: [u8; $bytes] = self.to_le_bytes();
                buffer.extend_from_slice(&bytes);
                Ok(bytes.len())
            }

            fn decode(reader: &mut Reader) -> Result<Self> {
                let mut bytes = [0u8; $bytes];
                reader.read(&mut bytes)?;
                Ok(Self::from_le_bytes(bytes))
            }
        }

        impl SszTypeInfo for $type {
            fn is_fixed_size() -> bool {
                true
            }

            fn fixed_size() -> Option<usize> {
                Some($bytes)
            }

            fn is_basic_type() -> bool {
                true
            }
        }

        impl Merkleize for $type {
            fn hash_tree_root(&self) -> Result<B256> {
                let bytes = self.to_le_bytes();
                let mut buf = [0u8; 32];
                buf[..$bytes].copy_from_slice(&bytes);
                Ok(B256::from(buf))
            }

            fn chunk_count() -> usize {
                1
            }
        }
    };
}

impl_uint!(u8, 1);
impl_uint!(u16, 2);
impl_uint!(u32, 4);
impl_uint!(u64, 8);
impl_uint!(u128, 16);

impl Ssz for U256 {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let bytes: [u8; BYTES] = self.to_le_bytes();
        buffer.extend_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let mut bytes = [0u8; BYTES];
        reader.read(&mut bytes)?;
        Ok(U256::from_le_bytes(bytes))
    }
}

impl SszTypeInfo for U256 {
    fn is_fixed_size() -> bool {
        true
    }

    fn fixed_size() -> Option<usize> {
        Some(BYTES)
    }

    fn is_basic_type() -> bool {
        true
    }
}

impl Merkleize for U256 {
    fn hash_tree_root(&self) -> Result<B256> {
        let bytes: [u8; BYTES] = self.to_le_bytes();
        Ok(B256::from_slice(&bytes))
    }

    fn chunk_count() -> usize {
        1
    }
}
