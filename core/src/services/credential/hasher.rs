//! Digest algorithms for stored password hashes.

use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::errors::DomainError;

/// Digest used to compare a typed password with the stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Resolve a digest identifier such as `SHA-256`
    pub fn from_identifier(identifier: &str) -> Result<Self, DomainError> {
        let normalized = identifier.trim().to_ascii_uppercase().replace('-', "");
        match normalized.as_str() {
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA384" => Ok(HashAlgorithm::Sha384),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => Err(DomainError::UnsupportedHashAlgorithm {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// Canonical identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Lowercase hex digest of `input`
    pub fn digest_hex(&self, input: &str) -> String {
        match self {
            HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input.as_bytes())),
            HashAlgorithm::Sha384 => hex::encode(Sha384::digest(input.as_bytes())),
            HashAlgorithm::Sha512 => hex::encode(Sha512::digest(input.as_bytes())),
        }
    }

    /// Compare `password` against a stored hex digest
    ///
    /// Hex case and surrounding whitespace in the stored value are ignored.
    pub fn verify(&self, password: &str, stored_hex: &str) -> bool {
        let computed = self.digest_hex(password);
        let stored = stored_hex.trim().to_ascii_lowercase();
        constant_time_eq(computed.as_bytes(), stored.as_bytes())
    }
}
