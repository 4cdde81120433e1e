use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use super::KEY_LEN;
use super::random::{OsRandom, RandomSource};
use crate::error::CryptoError;

/// A 256-bit symmetric key. Wiped from memory on drop.
#[derive(Clone)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let decoded = Zeroizing::new(
            hex::decode(s.trim()).map_err(|e| CryptoError::Encoding(e.to_string()))?,
        );
        if decoded.len() != KEY_LEN {
            return Err(CryptoError::Construction {
                expected: KEY_LEN,
                actual: decoded.len(),
            });
        }

        let mut key = Self([0u8; KEY_LEN]);
        key.0.copy_from_slice(&decoded);
        Ok(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(<redacted>)")
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Produces fresh keys from a random source.
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator<R = OsRandom> {
    rng: R,
}

impl<R: RandomSource> KeyGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a new key. Generator failure is returned, never papered over.
    pub fn new_key(&self) -> Result<Key, CryptoError> {
        let mut key = Key([0u8; KEY_LEN]);
        self.rng.fill(&mut key.0)?;
        Ok(key)
    }
}

/// Generate a key from the OS random generator.
pub fn generate_key() -> Result<Key, CryptoError> {
    KeyGenerator::new(OsRandom).new_key()
}
