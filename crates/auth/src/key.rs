//! The profile key and its `salt:secret` text form.

use std::{fmt, str::FromStr};

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    zeroize::{Zeroize, ZeroizeOnDrop},
};

use crate::error::Error;

/// Separator between the encoded salt and the encoded secret.
const SEPARATOR: char = ':';

/// A shared secret plus the salt it was derived with.
///
/// The salt is public. Only the passphrase has to stay client-side: anyone
/// holding passphrase and salt can reproduce [`Key::bytes`].
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    salt: Vec<u8>,
    bytes: Vec<u8>,
}

impl Key {
    pub fn new(salt: Vec<u8>, bytes: Vec<u8>) -> Self {
        Self { salt, bytes }
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("salt", &STANDARD.encode(&self.salt))
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Renders `base64(salt):base64(bytes)`, the form stored in profiles.
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}",
            STANDARD.encode(&self.salt),
            STANDARD.encode(&self.bytes)
        )
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (salt, bytes) = s
            .split_once(SEPARATOR)
            .ok_or_else(|| Error::invalid_key(format!("missing '{SEPARATOR}' separator")))?;
        let salt = STANDARD
            .decode(salt)
            .map_err(|e| Error::invalid_key(format!("salt: {e}")))?;
        let bytes = STANDARD
            .decode(bytes)
            .map_err(|e| Error::invalid_key(format!("secret: {e}")))?;
        if bytes.is_empty() {
            return Err(Error::invalid_key("secret is empty"));
        }
        Ok(Self::new(salt, bytes))
    }
}
