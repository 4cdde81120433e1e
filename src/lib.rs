//! Authenticated encryption and password hashing.
//!
//! * [`generate_key`] draws a fresh 256-bit key from the OS generator.
//! * [`encrypt`] / [`decrypt`] seal data with AES-256-GCM and move it around
//!   as lowercase hex of `nonce | ciphertext | tag`.
//! * [`hash_password`] derives a 32-byte scrypt hash (N = 16384, r = 8,
//!   p = 1) and hex encodes it.
//!
//! Encryption and decryption report failure as `None` without saying why.

mod crypto;
mod error;

pub use crate::crypto::{
    Cipher, HASH_LEN, KEY_LEN, KdfParams, Key, KeyGenerator, NONCE_LEN, OsRandom,
    PasswordHasher, RandomSource, TAG_LEN, decrypt, encrypt, generate_key, hash_password,
    verify_password,
};
pub use crate::error::CryptoError;
