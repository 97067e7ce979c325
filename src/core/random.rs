//! Unbiased index selection from a cryptographically secure source.

use rand::{CryptoRng, RngCore};

/// Pick an index in `0..len`, uniformly.
///
/// Draws raw 64-bit words through the fallible `try_fill_bytes` path and
/// rejects the tail above the largest multiple of `len`, so there is no
/// modulo bias.  `len` must be non-zero.
pub fn uniform_index<R>(rng: &mut R, len: usize) -> Result<usize, rand::Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    debug_assert!(len > 0, "uniform_index on an empty range");
    let bound = len.max(1) as u64;
    let zone = u64::MAX - (u64::MAX % bound);

    loop {
        let mut word = [0u8; 8];
        rng.try_fill_bytes(&mut word)?;
        let value = u64::from_le_bytes(word);
        if value < zone {
            return Ok((value % bound) as usize);
        }
    }
}
