use std::fmt;

/// Failure causes inside the crypto module.
///
/// `Cipher` never hands these out for encryption or decryption; they are
/// logged and collapsed into `None`. Only key generation and password
/// hashing return them to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key length does not fit the cipher.
    Construction { expected: usize, actual: usize },
    /// The OS random generator is unavailable or returned short.
    RandomSource,
    /// Ciphertext is not valid hexadecimal.
    Encoding(String),
    /// Tag verification failed, or the input is too short to carry a nonce.
    Authentication,
    /// The caller passed an unusable setting (empty salt, bad KDF parameters).
    Configuration(String),
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::Construction { expected, actual } => {
                write!(f, "invalid key length: expected {expected} bytes, got {actual}")
            }
            CryptoError::RandomSource => write!(f, "OS random generator unavailable"),
            CryptoError::Encoding(e) => write!(f, "malformed hex input: {e}"),
            CryptoError::Authentication => write!(f, "authentication failed"),
            CryptoError::Configuration(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CryptoError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_mentions_cause() {
        let err = CryptoError::Configuration("password salt can't be empty".into());
        assert_eq!(
            err.to_string(),
            "configuration error: password salt can't be empty"
        );
    }

    #[test]
    fn construction_error_reports_lengths() {
        let err = CryptoError::Construction {
            expected: 32,
            actual: 16,
        };
        assert!(err.to_string().contains("expected 32 bytes, got 16"));
    }
}
