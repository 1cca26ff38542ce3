//! Auth error types.

/// Errors produced while decoding, deriving or using a profile key.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The `salt:secret` text form could not be decoded.
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Argon2 rejected its parameters or failed to hash.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// An authorization value was malformed, expired or did not match.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl Error {
    #[must_use]
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
