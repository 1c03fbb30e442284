//! The additive 16 bit checksum that trails every rdm package.

use crate::consts::{RDM_CHECKSUM_SIZE, RDM_MIN_PACKAGE_SIZE};

/// Sum of all bytes, wrapping at 16 bits.
#[inline]
pub fn compute(data: &[u8]) -> u16 {
    data.iter()
        .fold(0u16, |checksum, byte| checksum.wrapping_add(*byte as u16))
}

/// Checksum over several buffers as if they were one contiguous package.
pub fn compute_spans(spans: &[&[u8]]) -> u16 {
    spans
        .iter()
        .fold(0u16, |checksum, span| checksum.wrapping_add(compute(span)))
}

/// Verifies the big endian checksum in the last two bytes of `package`.
///
/// Packages shorter than the smallest possible rdm package never verify.
pub fn verify(package: &[u8]) -> bool {
    if package.len() < RDM_MIN_PACKAGE_SIZE {
        return false;
    }

    let (body, checksum) = package.split_at(package.len() - RDM_CHECKSUM_SIZE);

    compute(body) == u16::from_be_bytes([checksum[0], checksum[1]])
}
