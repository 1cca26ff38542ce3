//! Argon2id derivation of a profile key from a passphrase.

use argon2::Argon2;

use crate::{
    error::{Error, Result},
    key::Key,
};

/// Length of the derived secret in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the random salt produced by [`generate_key`].
pub const SALT_LEN: usize = 16;

/// Argon2id cost parameters.
///
/// Every peer must derive with the same parameters, so profiles never store
/// them; [`KdfParams::default`] is the only set used outside tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB (default: 64 MiB = 65536).
    pub m_cost: u32,
    /// Number of iterations (default: 3).
    pub t_cost: u32,
    /// Degree of parallelism (default: 1).
    pub p_cost: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MiB
            t_cost: 3,
            p_cost: 1,
        }
    }
}

/// Derive the profile key for `passphrase` and `salt` with the fixed
/// default parameters.
///
/// This is slow on purpose and blocks the calling thread; run it off any
/// interactive path.
pub fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<Key> {
    derive_key_with_params(passphrase, salt, &KdfParams::default())
}

/// Derive a [`KEY_LEN`]-byte key using explicit Argon2id parameters.
pub fn derive_key_with_params(passphrase: &[u8], salt: &[u8], params: &KdfParams) -> Result<Key> {
    let argon2_params =
        argon2::Params::new(params.m_cost, params.t_cost, params.p_cost, Some(KEY_LEN))
            .map_err(|e| Error::Derivation(format!("invalid KDF params: {e}")))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut output = vec![0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase, salt, &mut output)
        .map_err(|e| Error::Derivation(format!("KDF failed: {e}")))?;

    Ok(Key::new(salt.to_vec(), output))
}

/// Derive a key for `passphrase` under a fresh random salt.
pub fn generate_key(passphrase: &[u8]) -> Result<Key> {
    generate_key_with_params(passphrase, &KdfParams::default())
}

/// [`generate_key`] with explicit Argon2id parameters.
pub fn generate_key_with_params(passphrase: &[u8], params: &KdfParams) -> Result<Key> {
    derive_key_with_params(passphrase, &random_salt(), params)
}

fn random_salt() -> [u8; SALT_LEN] {
    use rand::RngCore;

    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
