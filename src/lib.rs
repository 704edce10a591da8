//! SSZ encoding, decoding, and Merkleization.
#![no_std]
extern crate alloc;

pub mod constants;
pub use constants::*;

pub mod error;
pub use error::*;

pub mod reader;
pub use reader::Reader;

pub mod writer;
pub use writer::Writer;

pub mod merkleization;

pub mod ssz;
pub use ssz::*;

pub mod basic;
pub use basic::*;

pub mod bytes;
pub use bytes::*;

pub mod bitfield;
pub use bitfield::*;

pub mod series;
pub use series::*;

pub mod container;

pub mod pointer;
pub use pointer::Pointer;
