//! Homogeneous element series: `Vector<T, N>` (fixed count, a plain
//! `[T; N]`) and `List<T, LIMIT>` (variable count up to `LIMIT`).

mod offsets;

pub mod list;
pub mod vector;

pub use list::List;
pub use vector::Vector;

use alloc::vec::Vec;

use crate::error::Result;
use crate::ssz::Ssz;

/// Concatenates each element's own encoding, byte-reversing it first on a
/// big-endian host so the packed chunks Merkleize identically across
/// architectures.
pub(crate) fn pack_basic_elements<T: Ssz>(elements: &[T]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for elem in elements {
        let start = buf.len();
        elem.serialize(&mut buf)?;
        if cfg!(target_endian = "big") {
            buf[start..].reverse();
        }
    }
    Ok(buf)
}
