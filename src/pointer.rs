//! `Pointer<T>` — a transparent heap indirection that proxies every
//! descriptor operation to its pointee, the way the reference
//! implementation's `SSZPtr` proxies to `elemSSZ` by dereferencing an
//! `unsafe.Pointer` before each call (`types/ssz_ptr.go`). Rust has no
//! reason to reach for `unsafe` here: `Box<T>` already is the owned
//! heap indirection, so `Pointer<T>` is a thin newtype around one.
//!
//! The one place the Go original and this type diverge is decode reuse.
//! `Ssz::decode` is an associated function — it has no existing `Self` to
//! write into, so it always allocates a fresh `Box`. When a `Pointer<T>`
//! already exists, call the inherent `decode_into` instead: it decodes
//! `T` in place inside the existing allocation rather than constructing
//! a new box and dropping the old one.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use alloy_primitives::B256;

use crate::error::Result;
use crate::reader::Reader;
use crate::ssz::{Merkleize, SigningRoot, Ssz, SszTypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointer<T>(Box<T>);

impl<T> Pointer<T> {
    pub fn new(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn into_inner(self) -> T {
        *self.0
    }

    /// Decodes a fresh `T` into this pointer's existing allocation,
    /// instead of allocating a new `Box` the way `decode` must.
    pub fn decode_into(&mut self, reader: &mut Reader) -> Result<()>
    where
        T: Ssz,
    {
        *self.0 = T::decode(reader)?;
        Ok(())
    }
}

impl<T> Deref for Pointer<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Pointer<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: SszTypeInfo> SszTypeInfo for Pointer<T> {
    fn is_fixed_size() -> bool {
        T::is_fixed_size()
    }

    fn fixed_size() -> Option<usize> {
        T::fixed_size()
    }

    fn is_basic_type() -> bool {
        T::is_basic_type()
    }

    fn fuzz_min_len() -> usize {
        T::fuzz_min_len()
    }
}

impl<T: Ssz> Ssz for Pointer<T> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        self.0.serialize(buffer)
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        Ok(Self(Box::new(T::decode(reader)?)))
    }
}

impl<T: Merkleize> Merkleize for Pointer<T> {
    fn hash_tree_root(&self) -> Result<B256> {
        self.0.hash_tree_root()
    }

    fn chunk_count() -> usize {
        T::chunk_count()
    }
}

impl<T: SigningRoot> SigningRoot for Pointer<T> {
    fn signing_root(&self) -> Result<B256> {
        self.0.signing_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn forwards_fixed_size_facts() {
        assert_eq!(Pointer::<u32>::is_fixed_size(), true);
        assert_eq!(Pointer::<u32>::fixed_size(), Some(4));
    }

    #[test]
    fn roundtrips_through_the_pointee_encoding() {
        let ptr = Pointer::new(1234u32);
        let encoded = ptr.encode().unwrap();
        assert_eq!(encoded, vec![0xd2, 0x04, 0, 0]);
        let decoded = Pointer::<u32>::deserialize(&encoded).unwrap();
        assert_eq!(decoded.into_inner(), 1234);
    }

    #[test]
    fn hash_tree_root_matches_the_pointee() {
        let ptr = Pointer::new(7u64);
        assert_eq!(ptr.hash_tree_root().unwrap(), 7u64.hash_tree_root().unwrap());
    }

    #[test]
    fn decode_into_reuses_the_existing_allocation() {
        let mut ptr = Pointer::new(1u32);
        let raw_ptr_before = Box::as_ref(&ptr.0) as *const u32;
        let encoded = 99u32.encode().unwrap();
        let mut reader = Reader::new(&encoded);
        ptr.decode_into(&mut reader).unwrap();
        let raw_ptr_after = Box::as_ref(&ptr.0) as *const u32;
        assert_eq!(*ptr, 99);
        assert_eq!(raw_ptr_before, raw_ptr_after);
    }
}
