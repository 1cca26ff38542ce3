//! Shareable HTTPS links for a profile.
//!
//! Links to a protected profile carry an `a` query parameter holding the
//! URL-safe base64 of an HMAC authorization (see
//! [`clipshare_auth::authorization`]) for a `GET` of the linked path.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

use crate::{
    error::{Error, Result},
    schema::{Config, expand_server_addr},
};

/// Name of the query parameter carrying the authorization.
pub const AUTH_QUERY_PARAM: &str = "a";

/// Method the link authorization is issued for.
const LINK_METHOD: &str = "GET";

impl Config {
    /// Build `https://<ServerAddr><path>`, signed for `validity` when the
    /// profile has a key.
    pub fn generate_url(&self, path: &str, validity: Duration) -> Result<String> {
        let server_addr = self
            .server_addr
            .as_deref()
            .ok_or_else(|| Error::validation("profile has no ServerAddr to link to"))?;
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let url = format!("https://{}{path}", expand_server_addr(server_addr));

        let Some(key) = &self.key else {
            return Ok(url);
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let expires = now.saturating_add(validity).as_secs();
        let auth = clipshare_auth::authorization(key, LINK_METHOD, &path, expires)?;
        Ok(format!(
            "{url}?{AUTH_QUERY_PARAM}={}",
            URL_SAFE_NO_PAD.encode(auth)
        ))
    }

    /// Link to the clipboard entry `id`.
    pub fn generate_clip_url(&self, id: &str, validity: Duration) -> Result<String> {
        self.generate_url(&format!("/{id}"), validity)
    }
}
