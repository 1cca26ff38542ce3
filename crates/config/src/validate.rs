//! Semantic checks run on every profile load.
//!
//! Only `CertFile` has to exist. `KeyFile` is left unchecked on purpose: a
//! server may generate its private key after the profile is written.

use tracing::debug;

use crate::{
    error::{Error, Result},
    schema::{Config, expand_server_addr},
};

/// Validate `config` and normalize its addresses.
///
/// After a successful call `server_addr` (when set) and `listen_addr` both
/// carry an explicit port.
pub fn validate(config: &mut Config) -> Result<()> {
    if let Some(cert_file) = &config.cert_file {
        std::fs::metadata(cert_file).map_err(|e| {
            Error::validation(format!(
                "certificate file {} is not accessible: {e}",
                cert_file.display()
            ))
        })?;
    }

    if let Some(addr) = config.server_addr.as_mut() {
        *addr = expand_server_addr(addr);
    }
    config.listen_addr = expand_server_addr(&config.listen_addr);

    debug!(
        server_addr = config.server_addr.as_deref().unwrap_or(""),
        listen_addr = %config.listen_addr,
        "config validated"
    );
    Ok(())
}
