//! Cryptographic primitives.
//!
//! Provides key generation, AES-256-GCM encryption and scrypt password
//! hashing.

pub mod aead;
pub mod kdf;
pub mod key;
pub mod random;

pub use aead::{Cipher, decrypt, encrypt};
pub use kdf::{KdfParams, PasswordHasher, hash_password, verify_password};
pub use key::{Key, KeyGenerator, generate_key};
pub use random::{OsRandom, RandomSource};

/// Length of the encryption key (32 bytes / 256 bits).
pub const KEY_LEN: usize = 32;
/// Length of the nonce (12 bytes for AES-GCM).
pub const NONCE_LEN: usize = 12;
/// Length of the authentication tag (16 bytes).
pub const TAG_LEN: usize = 16;
/// Length of the derived password hash (32 bytes).
pub const HASH_LEN: usize = 32;
