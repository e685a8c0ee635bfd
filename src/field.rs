//! Goldilocks views over decoded elements.
//!
//! Field elements travel as little-endian u64 limbs (one limb per base field
//! element, `D` limbs for a degree-`D` extension). Hash digests are 32 bytes
//! that map onto four field elements.

use p3_field::integers::QuotientMap;
use p3_field::PrimeField64;
use p3_goldilocks::Goldilocks;

use crate::utils::error_handling::{LayoutError, LayoutResult};

pub const LIMB_BYTES: usize = 8;

pub const DIGEST_BYTES: usize = 32;

fn read_limb(chunk: &[u8]) -> u64 {
    let mut raw = [0u8; LIMB_BYTES];
    raw.copy_from_slice(chunk);
    u64::from_le_bytes(raw)
}

/// Read an element as canonical little-endian Goldilocks limbs.
pub fn element_limbs(element: &[u8]) -> LayoutResult<Vec<Goldilocks>> {
    if element.is_empty() || element.len() % LIMB_BYTES != 0 {
        return Err(LayoutError::InvalidEncoding(format!(
            "element of {} bytes is not a whole number of {}-byte limbs",
            element.len(),
            LIMB_BYTES
        )));
    }
    element
        .chunks_exact(LIMB_BYTES)
        .map(|chunk| {
            let limb = read_limb(chunk);
            Goldilocks::from_canonical_checked(limb).ok_or_else(|| {
                LayoutError::InvalidEncoding(format!(
                    "limb {:#018x} is not below the field order {:#018x}",
                    limb,
                    Goldilocks::ORDER_U64
                ))
            })
        })
        .collect()
}

/// Map a 32-byte digest to four field elements, reducing each limb.
pub fn digest_limbs(digest: &[u8]) -> LayoutResult<[Goldilocks; 4]> {
    if digest.len() != DIGEST_BYTES {
        return Err(LayoutError::InvalidEncoding(format!(
            "digest must be {} bytes, got {}",
            DIGEST_BYTES,
            digest.len()
        )));
    }
    let mut out = [Goldilocks::from_int(0u64); 4];
    for (slot, chunk) in out.iter_mut().zip(digest.chunks_exact(LIMB_BYTES)) {
        *slot = Goldilocks::from_int(read_limb(chunk));
    }
    Ok(out)
}
