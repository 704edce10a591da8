//! Contains all the constants required for ssz implementation.

/// Number of bytes per chunk.
pub const BYTES_PER_CHUNK: usize = 32;
/// Number of bytes per serialized length offset.
pub const BYTES_PER_LENGTH_OFFSET: usize = 4;
/// Number of bits per byte.
pub const BITS_PER_BYTE: usize = 8;
/// Bytes per U256.
pub const BYTES: usize = 32;
