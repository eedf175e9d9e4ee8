//! Wallet Error Hierarchy
//!
//! Every failure in this crate is terminal at this layer: nothing is retried
//! internally and no operation substitutes an alternate algorithm when the
//! primary one fails. The caller decides whether to regenerate a nonce,
//! refetch an account sequence, or ask the user for a different mnemonic.
//!
//! - Key material
//!   - Entropy
//!   - Derivation
//! - Encoding
//!   - Encoding (bech32 charset / checksum)
//!   - BitPadding
//!   - Canonicalization (amino JSON)
//!   - WireFormat (protobuf)
//! - Signing
//!   - Signature
//!   - AddressMismatch
//!   - InvalidPermit
//! - Encryption
//! - SecretStore (caller-provided storage)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    // === Key material ===
    /// OS random number generator unavailable
    #[error("Entropy error: {message}")]
    Entropy { message: String },

    /// Invalid mnemonic, checksum, derivation path or private key
    #[error("Derivation error: {message}")]
    Derivation { message: String },

    // === Encoding ===
    /// Bech32 charset, case, HRP or checksum violation
    #[error("Encoding error: {message}")]
    Encoding { message: String },

    /// Bit regrouping misuse (value too wide, non-zero or excess padding)
    #[error("Bit padding error ({from_bits} -> {to_bits}): {message}")]
    BitPadding {
        from_bits: u32,
        to_bits: u32,
        message: String,
    },

    /// Amino JSON document could not be produced in canonical form
    #[error("Canonicalization error: {message}")]
    Canonicalization { message: String },

    /// Protobuf tag, length or varint mismatch
    #[error("Wire format error: {message}")]
    WireFormat { message: String },

    // === Signing ===
    /// ECDSA signing, verification input or signature conversion failure
    #[error("Signature error: {message}")]
    Signature { message: String },

    /// Claimed sender is not the address the signing key produces
    #[error("Address mismatch: claimed {claimed}, key derives {derived}")]
    AddressMismatch { claimed: String, derived: String },

    /// Permit is structurally incomplete
    #[error("Invalid permit: {message}")]
    InvalidPermit { message: String },

    // === Encryption ===
    /// Key agreement or AEAD failure
    #[error("Encryption error: {message}")]
    Encryption { message: String },

    // === External collaborators ===
    /// Caller-provided secret store failed to produce a secret
    #[error("Secret store error: {message}")]
    SecretStore { message: String },
}

impl WalletError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::Entropy { .. } => "ENTROPY_ERROR",
            WalletError::Derivation { .. } => "DERIVATION_ERROR",
            WalletError::Encoding { .. } => "ENCODING_ERROR",
            WalletError::BitPadding { .. } => "BIT_PADDING_ERROR",
            WalletError::Canonicalization { .. } => "CANONICALIZATION_ERROR",
            WalletError::WireFormat { .. } => "WIRE_FORMAT_ERROR",
            WalletError::Signature { .. } => "SIGNATURE_ERROR",
            WalletError::AddressMismatch { .. } => "ADDRESS_MISMATCH",
            WalletError::InvalidPermit { .. } => "INVALID_PERMIT",
            WalletError::Encryption { .. } => "ENCRYPTION_ERROR",
            WalletError::SecretStore { .. } => "SECRET_STORE_ERROR",
        }
    }

    /// Always false: the core never retries, the caller owns retry policy.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Returns true if the failure concerns key material itself
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            WalletError::Entropy { .. }
                | WalletError::Derivation { .. }
                | WalletError::SecretStore { .. }
        )
    }

    /// Returns true if the failure is an encoding-level defect
    pub fn is_encoding_error(&self) -> bool {
        matches!(
            self,
            WalletError::Encoding { .. }
                | WalletError::BitPadding { .. }
                | WalletError::Canonicalization { .. }
                | WalletError::WireFormat { .. }
        )
    }

    pub(crate) fn wire(message: impl Into<String>) -> Self {
        WalletError::WireFormat {
            message: message.into(),
        }
    }

    pub(crate) fn encoding(message: impl Into<String>) -> Self {
        WalletError::Encoding {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Canonicalization {
            message: err.to_string(),
        }
    }
}

/// Result 타입 alias
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = WalletError::AddressMismatch {
            claimed: "secret1aaa".into(),
            derived: "secret1bbb".into(),
        };
        assert_eq!(err.code(), "ADDRESS_MISMATCH");
        assert!(err.to_string().contains("secret1aaa"));
        assert!(err.to_string().contains("secret1bbb"));

        let err = WalletError::BitPadding {
            from_bits: 5,
            to_bits: 8,
            message: "non-zero padding".into(),
        };
        assert_eq!(err.code(), "BIT_PADDING_ERROR");
        assert!(err.to_string().contains("5 -> 8"));
    }

    #[test]
    fn test_nothing_is_retryable() {
        let errors = vec![
            WalletError::Entropy {
                message: "rng".into(),
            },
            WalletError::Encryption {
                message: "aead".into(),
            },
            WalletError::WireFormat {
                message: "truncated".into(),
            },
        ];
        for err in errors {
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn test_error_families() {
        assert!(WalletError::Derivation {
            message: "bad checksum".into()
        }
        .is_key_error());
        assert!(WalletError::Canonicalization {
            message: "empty".into()
        }
        .is_encoding_error());
        assert!(!WalletError::Signature {
            message: "x".into()
        }
        .is_encoding_error());
    }

    #[test]
    fn test_from_serde_json() {
        let err: WalletError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), "CANONICALIZATION_ERROR");
    }
}
