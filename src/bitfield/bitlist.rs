//! `Bitlist<LIMIT>`: a variable-length bit sequence where the highest set
//! bit of the last encoded byte is a delimiter marking the logical bit
//! length, rather than data.
//!
//! The delimiter search uses a 3-step halving probe (`bitfields/bitfield.go`'s
//! `BitIndex`) that only inspects the last byte, instead of rescanning the
//! whole blob bit by bit.

use alloc::vec;
use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, SszError};
use crate::merkleization::{chunk_count as shape_chunk_count, merkleize, mix_in_length, pack_bits, SszShape};
use crate::reader::Reader;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bitlist<const LIMIT: usize> {
    bits: Vec<bool>,
}

/// Index (0-based) of the highest set bit of `v`, via a 3-step halving
/// probe rather than a linear bit scan.
fn bit_index(mut v: u8) -> u32 {
    let mut out = 0u32;
    if v & 0xf0 != 0 {
        v >>= 4;
        out |= 4;
    }
    if v & 0x0c != 0 {
        v >>= 2;
        out |= 2;
    }
    if v & 0x02 != 0 {
        out |= 1;
    }
    out
}

impl<const LIMIT: usize> Bitlist<LIMIT> {
    pub fn from_bits(bits: Vec<bool>) -> Result<Self> {
        if bits.len() > LIMIT {
            return Err(SszError::LimitExceeded {
                count: bits.len(),
                limit: LIMIT,
            });
        }
        Ok(Self { bits })
    }

    pub fn push(&mut self, bit: bool) -> Result<()> {
        if self.bits.len() >= LIMIT {
            return Err(SszError::LimitExceeded {
                count: self.bits.len() + 1,
                limit: LIMIT,
            });
        }
        self.bits.push(bit);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    fn pack_with_delimiter(&self) -> Vec<u8> {
        let bit_len = self.bits.len();
        let mut bytes = vec![0u8; bit_len / BITS_PER_BYTE + 1];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i / BITS_PER_BYTE] |= 1 << (i % BITS_PER_BYTE);
            }
        }
        bytes[bit_len / BITS_PER_BYTE] |= 1 << (bit_len % BITS_PER_BYTE);
        bytes
    }
}

impl<const LIMIT: usize> TryFrom<&[bool]> for Bitlist<LIMIT> {
    type Error = SszError;

    fn try_from(slice: &[bool]) -> Result<Self> {
        Self::from_bits(slice.to_vec())
    }
}

impl<const LIMIT: usize> SszTypeInfo for Bitlist<LIMIT> {
    fn is_fixed_size() -> bool {
        false
    }

    fn fixed_size() -> Option<usize> {
        None
    }

    fn fuzz_min_len() -> usize {
        1
    }
}

impl<const LIMIT: usize> Ssz for Bitlist<LIMIT> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let bytes = self.pack_with_delimiter();
        buffer.extend_from_slice(&bytes);
        Ok(bytes.len())
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let span = reader.bytes_span();
        let mut data = vec![0u8; span];
        reader.read(&mut data)?;

        if data.is_empty() {
            if reader.is_fuzz_mode() {
                return Ok(Self { bits: Vec::new() });
            }
            return Err(SszError::InvalidValue {
                reason: "bitlist requires at least a delimiter byte",
            });
        }

        let last_idx = data.len() - 1;
        if data[last_idx] == 0 {
            if reader.is_fuzz_mode() {
                data[last_idx] |= 1;
            } else {
                return Err(SszError::InvalidValue {
                    reason: "bitlist's last byte must carry the delimiter bit",
                });
            }
        }

        let idx = bit_index(data[last_idx]) as usize;
        let bit_len = last_idx * BITS_PER_BYTE + idx;
        if bit_len > LIMIT {
            return Err(SszError::LimitExceeded {
                count: bit_len,
                limit: LIMIT,
            });
        }

        let mut bits = Vec::with_capacity(bit_len);
        for i in 0..bit_len {
            bits.push((data[i / BITS_PER_BYTE] >> (i % BITS_PER_BYTE)) & 1 != 0);
        }
        Ok(Self { bits })
    }
}

impl<const LIMIT: usize> Merkleize for Bitlist<LIMIT> {
    fn hash_tree_root(&self) -> Result<B256> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(BITS_PER_BYTE)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i / BITS_PER_BYTE] |= 1 << (i % BITS_PER_BYTE);
            }
        }
        let chunks = pack_bits(&bytes);
        let root = merkleize(&chunks, Some(Self::chunk_count()))?;
        Ok(mix_in_length(root, self.bits.len()))
    }

    fn chunk_count() -> usize {
        shape_chunk_count(SszShape::BitLen { limit_bits: LIMIT })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bitlist_is_just_the_delimiter() {
        let bl = Bitlist::<32>::default();
        assert_eq!(bl.encode().unwrap(), vec![1]);
        assert_eq!(Bitlist::<32>::deserialize(&[1]).unwrap(), bl);
    }

    #[test]
    fn serializes_known_pattern() {
        // T F T F F F T T F T
        let bits = vec![
            true, false, true, false, false, false, true, true, false, true,
        ];
        let bl = Bitlist::<32>::from_bits(bits).unwrap();
        assert_eq!(bl.encode().unwrap(), vec![0xc5, 0x06]);
    }

    #[test]
    fn roundtrips() {
        let bits = vec![
            false, false, false, true, true, false, false, false, false, false, false, false,
            false, false, false, true,
        ];
        let bl = Bitlist::<32>::from_bits(bits).unwrap();
        let encoded = bl.encode().unwrap();
        assert_eq!(Bitlist::<32>::deserialize(&encoded).unwrap(), bl);
    }

    #[test]
    fn decode_rejects_missing_delimiter() {
        assert_eq!(
            Bitlist::<32>::deserialize(&[0]),
            Err(SszError::InvalidValue {
                reason: "bitlist's last byte must carry the delimiter bit"
            })
        );
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert_eq!(
            Bitlist::<32>::deserialize(&[]),
            Err(SszError::InvalidValue {
                reason: "bitlist requires at least a delimiter byte"
            })
        );
    }

    #[test]
    fn push_beyond_limit_errors() {
        let mut bl = Bitlist::<3>::default();
        for _ in 0..3 {
            bl.push(true).unwrap();
        }
        assert!(matches!(
            bl.push(true),
            Err(SszError::LimitExceeded { count: 4, limit: 3 })
        ));
    }

    #[test]
    fn decode_rejects_bit_length_over_limit() {
        // Delimiter in byte 1 puts bit_len at 9, over a limit of 3.
        assert!(matches!(
            Bitlist::<3>::deserialize(&[0, 0b0000_0010]),
            Err(SszError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn fuzz_mode_repairs_missing_delimiter() {
        let mut r = Reader::new(&[0]);
        r.enable_fuzz_mode();
        let bl = Bitlist::<32>::decode(&mut r).unwrap();
        assert_eq!(bl.len(), 0);
    }
}
