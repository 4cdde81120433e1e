use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::HASH_LEN;
use crate::error::CryptoError;

/// scrypt cost parameters.
///
/// Nothing about these is stored next to a hash. Every hash ever written
/// with one set can only be verified with that same set, so a deployment
/// that moves to new costs has to keep a hasher for the old ones around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    log_n: u8,
    r: u32,
    p: u32,
}

impl KdfParams {
    /// N = 16384, r = 8, p = 1. The parameters every stored hash depends on.
    pub const INTERACTIVE: Self = Self {
        log_n: 14,
        r: 8,
        p: 1,
    };

    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self, CryptoError> {
        let params = Self { log_n, r, p };
        params.validate()?;
        Ok(params)
    }

    pub fn log_n(&self) -> u8 {
        self.log_n
    }

    /// CPU/memory cost factor N.
    pub fn n(&self) -> u64 {
        1u64 << self.log_n
    }

    pub fn r(&self) -> u32 {
        self.r
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    pub fn validate(&self) -> Result<(), CryptoError> {
        self.to_scrypt().map(|_| ())
    }

    fn to_scrypt(self) -> Result<scrypt::Params, CryptoError> {
        scrypt::Params::new(self.log_n, self.r, self.p, HASH_LEN)
            .map_err(|e| CryptoError::Configuration(format!("invalid scrypt parameters: {e}")))
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::INTERACTIVE
    }
}

/// Derives password hashes with a fixed parameter set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    params: KdfParams,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: KdfParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Hash `password` with `salt` and return 64 lowercase hex characters.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Configuration`] if `salt` is empty. No
    /// derivation is attempted in that case.
    pub fn hash_password(&self, password: &str, salt: &str) -> Result<String, CryptoError> {
        let key = self.derive(password, salt)?;
        Ok(hex::encode(&key[..]))
    }

    /// Re-derive and compare against a stored hash in constant time.
    ///
    /// A stored value that is not 64 hex characters never matches.
    pub fn verify_password(
        &self,
        password: &str,
        salt: &str,
        expected: &str,
    ) -> Result<bool, CryptoError> {
        let key = self.derive(password, salt)?;

        let Ok(expected) = hex::decode(expected) else {
            tracing::debug!("stored password hash is not valid hex");
            return Ok(false);
        };

        Ok(key[..].ct_eq(&expected[..]).into())
    }

    fn derive(
        &self,
        password: &str,
        salt: &str,
    ) -> Result<Zeroizing<[u8; HASH_LEN]>, CryptoError> {
        if salt.is_empty() {
            return Err(CryptoError::Configuration(
                "password salt can't be empty".into(),
            ));
        }

        let params = self.params.to_scrypt()?;

        let mut key = Zeroizing::new([0u8; HASH_LEN]);
        scrypt::scrypt(password.as_bytes(), salt.as_bytes(), &params, &mut key[..])
            .map_err(|e| CryptoError::Configuration(format!("scrypt derivation failed: {e}")))?;

        Ok(key)
    }
}

/// Hash with the fixed deployment parameters.
pub fn hash_password(password: &str, salt: &str) -> Result<String, CryptoError> {
    PasswordHasher::new().hash_password(password, salt)
}

/// Verify against a hash produced by [`hash_password`].
pub fn verify_password(password: &str, salt: &str, expected: &str) -> Result<bool, CryptoError> {
    PasswordHasher::new().verify_password(password, salt, expected)
}
