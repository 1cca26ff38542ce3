//! Shared-secret handling for clipboard profiles.
//!
//! A profile secret is an Argon2id-derived [`Key`] that travels in the
//! profile file as `base64(salt):base64(bytes)`. The same key signs
//! time-limited link authorizations with HMAC-SHA256 so a server holding the
//! secret can check that a link was issued by a peer and has not expired.

pub mod error;
pub mod kdf;
pub mod key;
pub mod signing;

pub use {
    error::{Error, Result},
    kdf::{
        KdfParams, derive_key, derive_key_with_params, generate_key, generate_key_with_params,
    },
    key::Key,
    signing::{authorization, verify_authorization},
};
