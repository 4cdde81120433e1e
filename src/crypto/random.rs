//! Sources of cryptographically secure random bytes.

use crate::error::CryptoError;
use getrandom::fill;

/// A cryptographically secure random byte source.
///
/// Implementations must fail loudly: a buffer that could not be filled
/// completely is an error, never returned as-is.
pub trait RandomSource: Send + Sync {
    /// Fill `buf` entirely with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError>;

    /// Return `len` freshly drawn random bytes.
    fn bytes(&self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

/// Random bytes from the operating system generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        fill(buf).map_err(|e| {
            tracing::debug!(error = %e, "OS random generator failed");
            CryptoError::RandomSource
        })
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &R {
    fn fill(&self, buf: &mut [u8]) -> Result<(), CryptoError> {
        (**self).fill(buf)
    }
}
