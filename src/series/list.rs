//! `List<T, LIMIT>` — 0..=LIMIT elements of `T`. Decode derives the element
//! count from the first offset (`types/elem_var_size_series.go`'s
//! `DecodeVarSeries`) instead of scanning for a terminator.

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use alloy_primitives::B256;

use crate::error::{Result, SszError};
use crate::merkleization::{chunk_count as shape_chunk_count, merkleize, mix_in_length, pack, SszShape};
use crate::reader::Reader;
use crate::series::offsets::{decode_derived_count, encode_variable_bodies};
use crate::series::pack_basic_elements;
use crate::ssz::{Merkleize, Ssz, SszTypeInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T, const LIMIT: usize> {
    elements: Vec<T>,
    _phantom: PhantomData<[T; LIMIT]>,
}

impl<T, const LIMIT: usize> List<T, LIMIT> {
    pub fn new(elements: Vec<T>) -> Result<Self> {
        if elements.len() > LIMIT {
            return Err(SszError::LimitExceeded {
                count: elements.len(),
                limit: LIMIT,
            });
        }
        Ok(Self {
            elements,
            _phantom: PhantomData,
        })
    }

    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T, const LIMIT: usize> Deref for List<T, LIMIT> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T, const LIMIT: usize> DerefMut for List<T, LIMIT> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.elements
    }
}

impl<T: SszTypeInfo, const LIMIT: usize> SszTypeInfo for List<T, LIMIT> {
    fn is_fixed_size() -> bool {
        false
    }

    fn fixed_size() -> Option<usize> {
        None
    }
}

impl<T: Ssz + SszTypeInfo, const LIMIT: usize> Ssz for List<T, LIMIT> {
    fn serialize(&self, buffer: &mut Vec<u8>) -> Result<usize> {
        let start = buffer.len();
        if T::is_fixed_size() {
            for item in &self.elements {
                item.serialize(buffer)?;
            }
        } else {
            let mut bodies = Vec::with_capacity(self.elements.len());
            for item in &self.elements {
                let mut body = Vec::new();
                item.serialize(&mut body)?;
                bodies.push(body);
            }
            encode_variable_bodies(&bodies, buffer)?;
        }
        Ok(buffer.len() - start)
    }

    fn decode(reader: &mut Reader) -> Result<Self> {
        let elements = if T::is_fixed_size() {
            let elem_size = T::fixed_size().unwrap_or(1).max(1);
            let span = reader.bytes_span();
            let count = if reader.is_fuzz_mode() {
                let uniform = crate::merkleization::fuzz_uniform_u64(reader.index(), span);
                let divisor = span.max(1) as u64;
                ((uniform % divisor) as usize / elem_size).min(LIMIT)
            } else {
                if span % elem_size != 0 {
                    return Err(SszError::LengthMismatch {
                        expected: (span / elem_size) * elem_size,
                        got: span,
                    });
                }
                let count = span / elem_size;
                if count > LIMIT {
                    return Err(SszError::LimitExceeded { count, limit: LIMIT });
                }
                count
            };
            let mut elements = Vec::with_capacity(count);
            for _ in 0..count {
                elements.push(T::decode(reader)?);
            }
            elements
        } else {
            let total_len = reader.bytes_span();
            let mut child = reader.scope(total_len)?;
            decode_derived_count(&mut child, total_len, LIMIT)?
        };
        Self::new(elements)
    }
}

impl<T: Merkleize + Ssz + SszTypeInfo, const LIMIT: usize> Merkleize for List<T, LIMIT> {
    fn hash_tree_root(&self) -> Result<B256> {
        let chunks = if T::is_basic_type() {
            let packed = pack_basic_elements(&self.elements)?;
            pack(&packed)
        } else {
            self.elements
                .iter()
                .map(|e| e.hash_tree_root().map(|h| h.0))
                .collect::<Result<Vec<_>>>()?
        };
        let root = merkleize(&chunks, Some(Self::chunk_count()))?;
        Ok(mix_in_length(root, self.elements.len()))
    }

    fn chunk_count() -> usize {
        if T::is_basic_type() {
            shape_chunk_count(SszShape::Basic {
                elem_size: T::fixed_size().unwrap_or(1),
                count: LIMIT,
            })
        } else {
            shape_chunk_count(SszShape::Composite { count: LIMIT })
        }
    }
}
