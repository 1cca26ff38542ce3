//! HMAC-SHA256 link authorization.
//!
//! An authorization value reads `HMAC <expires> <base64(mac)>`, where the MAC
//! is keyed by the profile secret and computed over
//! `<expires>:<method>:<path>`. `expires` is a unix timestamp in seconds.

use {
    base64::{Engine, engine::general_purpose::STANDARD},
    hmac::{Hmac, Mac},
    sha2::Sha256,
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    key::Key,
};

type HmacSha256 = Hmac<Sha256>;

/// Scheme marker every authorization value starts with.
pub const SCHEME: &str = "HMAC";

/// Build the authorization value for `method` and `path`, valid until the
/// unix timestamp `expires`.
pub fn authorization(key: &Key, method: &str, path: &str, expires: u64) -> Result<String> {
    let mac = compute_mac(key, method, path, expires)?;
    Ok(format!("{SCHEME} {expires} {}", STANDARD.encode(mac)))
}

/// Check an authorization value produced by [`authorization`].
///
/// `now` is the current unix timestamp in seconds. Fails with
/// [`Error::Unauthorized`] when the value is malformed, has expired, or its
/// MAC does not match.
pub fn verify_authorization(
    key: &Key,
    method: &str,
    path: &str,
    auth: &str,
    now: u64,
) -> Result<()> {
    let mut parts = auth.split(' ');
    let (Some(SCHEME), Some(expires), Some(mac), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::unauthorized("malformed authorization"));
    };
    let expires: u64 = expires
        .parse()
        .map_err(|_| Error::unauthorized("invalid expiry timestamp"))?;
    if now > expires {
        debug!(expires, now, "authorization expired");
        return Err(Error::unauthorized("authorization expired"));
    }

    let expected = STANDARD.encode(compute_mac(key, method, path, expires)?);

    // Constant-time comparison to prevent timing attacks.
    if !constant_time_eq(expected.as_bytes(), mac.as_bytes()) {
        return Err(Error::unauthorized("signature mismatch"));
    }
    Ok(())
}

fn compute_mac(key: &Key, method: &str, path: &str, expires: u64) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key.bytes())
        .map_err(|e| Error::invalid_key(format!("unusable HMAC key: {e}")))?;
    mac.update(format!("{expires}:{method}:{path}").as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0, |acc, (x, y)| acc | (x ^ y)) == 0
}
