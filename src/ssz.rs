//! The descriptor trait set: `SszTypeInfo` carries the static shape facts
//! (fixed vs. variable, fixed width, whether packing applies), `Ssz` carries
//! the encode/decode behavior, and `Merkleize`/`SigningRoot` carry the
//! hash-tree-root behavior. A concrete type's `impl` of these three traits
//! *is* its descriptor — there is no separate descriptor object assembled
//! at runtime.

use alloc::vec::Vec;
use alloy_primitives::B256;

use crate::error::{Result, SszError};
use crate::reader::Reader;

/// Static shape facts about a type, independent of any particular value.
pub trait SszTypeInfo {
    fn is_fixed_size() -> bool;
    fn fixed_size() -> Option<usize>;

    /// Whether this type packs into chunks alongside its siblings in a
    /// basic vector/list rather than being Merkleized individually.
    fn is_basic_type() -> bool {
        false
    }

    /// Smallest possible encoded length of a value of this type, used by
    /// fuzz-mode decoding to reserve budget for elements not yet decoded.
    /// Fixed-size types are exact; the default is exact for anything whose
    /// minimum is its fixed width, and `0` for anything that can encode to
    /// nothing (a `List`/`ByteList`/`Bitlist` at its empty value).
    fn fuzz_min_len() -> usize {
        Self::fixed_size().unwrap_or(0)
    }
}

/// Encode/decode behavior. `decode` is the composable primitive (it takes
/// a `Reader` so composites can scope sub-regions for their children);
/// `deserialize` is the entry point for a standalone byte slice and
/// enforces that the whole slice was consumed.
pub trait Ssz: Sized {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize>;

    fn decode(reader: &mut Reader) -> Result<Self>;

    fn deserialize(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);
        let value = Self::decode(&mut reader)?;
        if !reader.at_end() {
            return Err(SszError::LengthMismatch {
                expected: reader.index(),
                got: reader.max(),
            });
        }
        Ok(value)
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.serialize(&mut buf)?;
        Ok(buf)
    }

    /// Advances past this value's encoding without materializing it.
    /// Fixed-size types skip their known width; variable-size types fall
    /// back to a full decode-and-discard.
    fn dry_check(reader: &mut Reader) -> Result<()>
    where
        Self: SszTypeInfo,
    {
        if let Some(width) = Self::fixed_size() {
            reader.skip(width)
        } else {
            Self::decode(reader).map(|_| ())
        }
    }
}

/// Hash-tree-root behavior.
pub trait Merkleize {
    fn hash_tree_root(&self) -> Result<B256>;

    fn chunk_count() -> usize
    where
        Self: Sized;
}

/// Signing-root behavior. The default forwards to `hash_tree_root`;
/// containers override this to truncate their last field.
pub trait SigningRoot: Merkleize {
    fn signing_root(&self) -> Result<B256> {
        self.hash_tree_root()
    }
}
