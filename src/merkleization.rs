//! Logarithmic-space Merkleization, zero-hash cache, and the packing/mix-in
//! helpers every composite type's `hash_tree_root` builds on.
//!
//! Grounded on `merkle/merkleize.go` and `htr/hash_tree_root.go` from the
//! reference implementation this crate's wire format descends from: a
//! process-wide zero-hash table plus a single pass over the leaves that
//! keeps only `O(depth)` partial digests alive at once, rather than
//! materializing every tree layer.

use alloc::boxed::Box;
use alloc::vec::Vec;

use alloy_primitives::B256;
use once_cell::race::OnceBox;
use sha2::{Digest, Sha256};

use crate::constants::{BITS_PER_BYTE, BYTES_PER_CHUNK};
use crate::error::{Result, SszError};

/// Describes the shape of a composite value for the purpose of computing
/// its chunk-count limit. Kept as an explicit enum (rather than inlining
/// the arithmetic at each call site) so every composite's `hash_tree_root`
/// asks for its limit the same way.
#[derive(Debug, Clone, Copy)]
pub enum SszShape {
    Basic { elem_size: usize, count: usize },
    Composite { count: usize },
    BitLen { limit_bits: usize },
}

pub fn chunk_count(shape: SszShape) -> usize {
    match shape {
        SszShape::Basic { elem_size, count } => (elem_size * count).div_ceil(BYTES_PER_CHUNK),
        SszShape::Composite { count } => count,
        SszShape::BitLen { limit_bits } => limit_bits.div_ceil(BITS_PER_BYTE * BYTES_PER_CHUNK),
    }
}

const MAX_DEPTH: usize = 64;

fn zero_hashes() -> &'static [[u8; 32]; MAX_DEPTH + 1] {
    static ZERO_HASHES: OnceBox<[[u8; 32]; MAX_DEPTH + 1]> = OnceBox::new();
    ZERO_HASHES.get_or_init(|| {
        let mut table = [[0u8; 32]; MAX_DEPTH + 1];
        for k in 0..MAX_DEPTH {
            table[k + 1] = combine(&table[k], &table[k]);
        }
        Box::new(table)
    })
}

fn zero_hash(depth: usize) -> [u8; 32] {
    zero_hashes()[depth]
}

/// The crate's single SHA-256 primitive; every hash in the format is a
/// hash of exactly two 32-byte chunks concatenated.
pub fn combine(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let out = hasher.finalize();
    let mut result = [0u8; 32];
    result.copy_from_slice(&out);
    result
}

/// `depth(v) = ceil(log2(max(v, 1)))`.
pub fn depth(v: usize) -> u32 {
    if v <= 1 {
        0
    } else {
        usize::BITS - (v - 1).leading_zeros()
    }
}

/// Merkleizes `count` leaves (each already a 32-byte chunk) into a tree
/// padded to a virtual leaf-count of `2^depth(limit)`, using `O(depth)`
/// auxiliary digests rather than a full layer-by-layer tree.
pub fn merkleize(chunks: &[[u8; 32]], limit: Option<usize>) -> Result<B256> {
    let count = chunks.len();
    let limit = limit.unwrap_or(count);
    if count > limit {
        return Err(SszError::LimitExceeded { count, limit });
    }
    if limit == 0 {
        return Ok(B256::ZERO);
    }
    if limit == 1 {
        return Ok(B256::from(chunks.first().copied().unwrap_or([0u8; 32])));
    }

    let limit_depth = depth(limit) as usize;
    let mut tmp = [[0u8; 32]; MAX_DEPTH + 1];

    for (i, leaf) in chunks.iter().enumerate() {
        let mut h = *leaf;
        let mut j = 0usize;
        while (i >> j) & 1 == 1 {
            h = combine(&tmp[j], &h);
            j += 1;
        }
        tmp[j] = h;
    }

    // If count isn't a power of two, one more virtual merge (seeded with a
    // zero leaf at the final empty slot) closes the real data into a
    // single subtree root at `tmp[data_depth]`.
    let data_depth = depth(count) as usize;
    if count == 0 || (1usize << data_depth) != count {
        let mut h = zero_hash(0);
        let mut j = 0usize;
        while (count >> j) & 1 == 1 {
            h = combine(&tmp[j], &h);
            j += 1;
        }
        tmp[j] = h;
    }

    let mut h = tmp[data_depth];
    for j in data_depth..limit_depth {
        h = combine(&h, &zero_hash(j));
    }

    Ok(B256::from(h))
}

/// Deterministic stand-in for a uniform random `u64`, folded from a reader's
/// cursor position and remaining span through `combine`'s SHA-256 primitive.
/// Used by fuzz-mode length derivation so no RNG dependency is needed.
pub fn fuzz_uniform_u64(cursor: usize, span: usize) -> u64 {
    let mut a = [0u8; 32];
    a[..8].copy_from_slice(&(cursor as u64).to_le_bytes());
    let mut b = [0u8; 32];
    b[..8].copy_from_slice(&(span as u64).to_le_bytes());
    let digest = combine(&a, &b);
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(out)
}

/// Mixes a `u64` length into a root (used by every variable-length type:
/// lists, byte-lists, bitlists).
pub fn mix_in_length(root: B256, length: usize) -> B256 {
    let mut len_chunk = [0u8; 32];
    len_chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    B256::from(combine(root.as_ref(), &len_chunk))
}

/// Mixes a selector byte into a root.
pub fn mix_in_selector(root: B256, selector: u8) -> B256 {
    let mut sel_chunk = [0u8; 32];
    sel_chunk[0] = selector;
    B256::from(combine(root.as_ref(), &sel_chunk))
}

/// Packs a byte buffer into zero-padded 32-byte chunks.
pub fn pack(bytes: &[u8]) -> Vec<[u8; 32]> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let n = bytes.len().div_ceil(BYTES_PER_CHUNK);
    let mut chunks = Vec::with_capacity(n);
    for i in 0..n {
        let start = i * BYTES_PER_CHUNK;
        let end = (start + BYTES_PER_CHUNK).min(bytes.len());
        let mut chunk = [0u8; 32];
        chunk[..end - start].copy_from_slice(&bytes[start..end]);
        chunks.push(chunk);
    }
    chunks
}

/// Packs already byte-packed bits into zero-padded 32-byte chunks —
/// identical to `pack`, kept as a distinct name for call-site clarity in
/// the bitvector/bitlist modules.
pub fn pack_bits(packed_bytes: &[u8]) -> Vec<[u8; 32]> {
    pack(packed_bytes)
}
