//! AES-256-GCM with hex transport encoding.
//!
//! Wire format:
//! ```text
//! hex( NONCE (12) | CIPHERTEXT (len(plaintext)) | TAG (16) )
//! ```
//!
//! Callers only learn whether an operation succeeded. The reason for a
//! failure is logged at debug level and otherwise dropped, so a decryption
//! endpoint cannot be used as an oracle.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use zeroize::Zeroizing;

use super::random::{OsRandom, RandomSource};
use super::{KEY_LEN, NONCE_LEN};
use crate::error::CryptoError;

/// Authenticated cipher drawing its nonces from `R`.
#[derive(Debug, Clone, Default)]
pub struct Cipher<R = OsRandom> {
    rng: R,
}

impl<R: RandomSource> Cipher<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Encrypt `plaintext` under `key` and return the hex wire form.
    ///
    /// Returns `None` on a key of the wrong length or when no nonce could be
    /// drawn. `plaintext` is only read; the sealed output is a new buffer.
    pub fn encrypt(&self, key: &[u8], plaintext: &[u8]) -> Option<String> {
        self.seal(key, plaintext)
            .inspect_err(|e| tracing::debug!(error = %e, "encryption failed"))
            .ok()
    }

    /// Decrypt a hex wire form produced by [`Cipher::encrypt`].
    ///
    /// Returns `None` for malformed hex, a bad key, truncated input or a tag
    /// mismatch. No plaintext bytes are released unless the tag verifies.
    pub fn decrypt(&self, key: &[u8], ciphertext: &str) -> Option<Zeroizing<Vec<u8>>> {
        open(key, ciphertext)
            .inspect_err(|e| tracing::debug!(error = %e, "decryption failed"))
            .ok()
    }

    fn seal(&self, key: &[u8], plaintext: &[u8]) -> Result<String, CryptoError> {
        let cipher = new_cipher(key)?;

        let mut nonce = [0u8; NONCE_LEN];
        self.rng.fill(&mut nonce)?;

        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| {
                CryptoError::Configuration("plaintext exceeds AES-GCM limits".into())
            })?;

        let mut wire = Vec::with_capacity(NONCE_LEN + sealed.len());
        wire.extend_from_slice(&nonce);
        wire.extend_from_slice(&sealed);

        Ok(hex::encode(wire))
    }
}

fn open(key: &[u8], ciphertext: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let data = hex::decode(ciphertext).map_err(|e| CryptoError::Encoding(e.to_string()))?;
    let cipher = new_cipher(key)?;

    if data.len() < NONCE_LEN {
        return Err(CryptoError::Authentication);
    }
    let (nonce, rest) = data.split_at(NONCE_LEN);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), rest)
        .map_err(|_| CryptoError::Authentication)?;
    Ok(Zeroizing::new(plaintext))
}

fn new_cipher(key: &[u8]) -> Result<Aes256Gcm, CryptoError> {
    Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::Construction {
        expected: KEY_LEN,
        actual: key.len(),
    })
}

/// Encrypt with a nonce from the OS random generator.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Option<String> {
    Cipher::new(OsRandom).encrypt(key, plaintext)
}

/// Decrypt a hex wire form. See [`Cipher::decrypt`].
pub fn decrypt(key: &[u8], ciphertext: &str) -> Option<Zeroizing<Vec<u8>>> {
    Cipher::new(OsRandom).decrypt(key, ciphertext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::TAG_LEN;
    use crate::crypto::generate_key;
    use crate::crypto::random::testing::{FailingRandom, FixedRandom};

    #[test]
    fn hola_mundo_roundtrip() {
        let key = generate_key().unwrap();
        let input = b"hola mundo".to_vec();

        let wire = encrypt(key.as_ref(), &input).unwrap();
        let plaintext = decrypt(key.as_ref(), &wire).unwrap();

        assert_eq!(plaintext.as_slice(), b"hola mundo");
        assert_eq!(String::from_utf8_lossy(&plaintext), "hola mundo");
        // input untouched
        assert_eq!(input, b"hola mundo");
    }

    #[test]
    fn empty_plaintext_is_nonce_and_tag() {
        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"").unwrap();

        assert_eq!(wire.len(), 2 * (NONCE_LEN + TAG_LEN));
        assert!(decrypt(key.as_ref(), &wire).unwrap().is_empty());
    }

    // McGrew & Viega GCM test case 13: zero key, zero IV, empty plaintext.
    #[test]
    fn known_answer_empty() {
        let cipher = Cipher::new(FixedRandom(0));
        let wire = cipher.encrypt(&[0u8; KEY_LEN], b"").unwrap();

        assert_eq!(
            wire,
            "000000000000000000000000530f8afbc74536b9a963b4f1c4cb738b"
        );
    }

    // McGrew & Viega GCM test case 14: zero key, zero IV, one zero block.
    #[test]
    fn known_answer_single_block() {
        let cipher = Cipher::new(FixedRandom(0));
        let wire = cipher.encrypt(&[0u8; KEY_LEN], &[0u8; 16]).unwrap();

        assert_eq!(
            wire,
            concat!(
                "000000000000000000000000",
                "cea7403d4d606b6e074ec5d3baf39d18",
                "d0d1c8a799996bf0265b98b5d48ab919"
            )
        );
        assert_eq!(
            decrypt(&[0u8; KEY_LEN], &wire).unwrap().as_slice(),
            &[0u8; 16]
        );
    }

    #[test]
    fn output_is_lowercase_hex() {
        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"some secret").unwrap();
        assert!(
            wire.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"abc").unwrap().to_uppercase();
        assert_eq!(decrypt(key.as_ref(), &wire).unwrap().as_slice(), b"abc");
    }

    #[test]
    fn invalid_key_length_fails() {
        for len in [0, 16, 24, 31, 33] {
            let key = vec![1u8; len];
            assert!(encrypt(&key, b"data").is_none());
        }

        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"data").unwrap();
        assert!(decrypt(&key.as_bytes()[..16], &wire).is_none());
    }

    #[test]
    fn random_source_failure_fails_encrypt() {
        let key = generate_key().unwrap();
        let cipher = Cipher::new(FailingRandom);
        assert!(cipher.encrypt(key.as_ref(), b"data").is_none());
    }

    #[test]
    fn malformed_hex_fails() {
        let key = generate_key().unwrap();
        assert!(decrypt(key.as_ref(), "abc").is_none());
        assert!(decrypt(key.as_ref(), "zz").is_none());
        assert!(decrypt(key.as_ref(), "not hex at all!").is_none());
    }

    #[test]
    fn truncated_input_fails() {
        let key = generate_key().unwrap();
        assert!(decrypt(key.as_ref(), "").is_none());
        assert!(decrypt(key.as_ref(), &"00".repeat(NONCE_LEN - 1)).is_none());
        // nonce present, tag missing
        assert!(decrypt(key.as_ref(), &"00".repeat(NONCE_LEN)).is_none());
        assert!(decrypt(key.as_ref(), &"00".repeat(NONCE_LEN + TAG_LEN - 1)).is_none());
    }

    #[test]
    fn tampered_tag_fails() {
        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"secret data").unwrap();

        let mut bytes = hex::decode(&wire).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        assert!(decrypt(key.as_ref(), &hex::encode(bytes)).is_none());
    }

    #[test]
    fn tampered_nonce_fails() {
        let key = generate_key().unwrap();
        let wire = encrypt(key.as_ref(), b"secret data").unwrap();

        let mut bytes = hex::decode(&wire).unwrap();
        bytes[0] ^= 0x80;

        assert!(decrypt(key.as_ref(), &hex::encode(bytes)).is_none());
    }

    #[test]
    fn wrong_key_fails() {
        let k1 = generate_key().unwrap();
        let k2 = generate_key().unwrap();
        let wire = encrypt(k1.as_ref(), b"secret data").unwrap();
        assert!(decrypt(k2.as_ref(), &wire).is_none());
    }

    #[test]
    fn successive_encryptions_differ() {
        let key = generate_key().unwrap();
        let a = encrypt(key.as_ref(), b"same plaintext").unwrap();
        let b = encrypt(key.as_ref(), b"same plaintext").unwrap();

        assert_ne!(a, b);
        assert_ne!(a[..2 * NONCE_LEN], b[..2 * NONCE_LEN]);
    }
}
