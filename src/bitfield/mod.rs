//! Packed-bit composites: `Bitvector<N>` (fixed bit-length) and
//! `Bitlist<LIMIT>` (variable bit-length with a trailing delimiter bit).

pub mod bitlist;
pub mod bitvector;

pub use bitlist::Bitlist;
pub use bitvector::Bitvector;
