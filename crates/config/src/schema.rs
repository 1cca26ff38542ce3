//! The clipboard profile model and its defaults.

use std::{path::PathBuf, time::Duration};

use clipshare_auth::Key;

/// Port used when an address does not name one.
pub const DEFAULT_PORT: u16 = 2586;

/// Bind address of a server profile that does not set `ListenAddr`.
pub const DEFAULT_LISTEN_ADDR: &str = ":2586";

/// Where a server keeps clipboard content unless `ClipboardDir` says otherwise.
pub const DEFAULT_CLIPBOARD_DIR: &str = "/var/cache/clipshare";

/// Whether the web UI is served when `WebUI` is not set.
pub const DEFAULT_WEB_UI: bool = true;

/// A clipboard profile.
///
/// Optional settings are `None` until set, which keeps "left at the default"
/// apart from "explicitly set" even when the explicit value equals the
/// default. Use the accessor methods for effective values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the server binds to, e.g. `:2586` or `127.0.0.1:8080`.
    pub listen_addr: String,
    /// `host[:port]` clients connect to.
    pub server_addr: Option<String>,
    /// Shared secret; without it the clipboard is unauthenticated.
    pub key: Option<Key>,
    /// PEM private key for the server certificate. May not exist yet.
    pub key_file: Option<PathBuf>,
    /// PEM server certificate. Must exist when the profile is loaded.
    pub cert_file: Option<PathBuf>,
    pub clipboard_dir: PathBuf,
    /// Total clipboard size in bytes.
    pub clipboard_size_limit: Option<u64>,
    /// Number of files kept in the clipboard.
    pub clipboard_count_limit: Option<u64>,
    /// Size of a single clipboard file in bytes.
    pub file_size_limit: Option<u64>,
    /// Age after which clipboard files are removed. Zero keeps them forever.
    pub file_expire_after: Duration,
    pub web_ui: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            server_addr: None,
            key: None,
            key_file: None,
            cert_file: None,
            clipboard_dir: PathBuf::from(DEFAULT_CLIPBOARD_DIR),
            clipboard_size_limit: None,
            clipboard_count_limit: None,
            file_size_limit: None,
            file_expire_after: Duration::ZERO,
            web_ui: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total clipboard size limit in bytes; `0` means unlimited.
    pub fn clipboard_size_limit(&self) -> u64 {
        self.clipboard_size_limit.unwrap_or(0)
    }

    /// Clipboard file count limit; `0` means unlimited.
    pub fn clipboard_count_limit(&self) -> u64 {
        self.clipboard_count_limit.unwrap_or(0)
    }

    /// Per-file size limit in bytes; `0` means unlimited.
    pub fn file_size_limit(&self) -> u64 {
        self.file_size_limit.unwrap_or(0)
    }

    /// `None` when files never expire.
    pub fn file_expiry(&self) -> Option<Duration> {
        (!self.file_expire_after.is_zero()).then_some(self.file_expire_after)
    }

    pub fn web_ui(&self) -> bool {
        self.web_ui.unwrap_or(DEFAULT_WEB_UI)
    }

    /// Whether links and requests for this profile must be signed.
    pub fn is_protected(&self) -> bool {
        self.key.is_some()
    }
}

/// Append the default port to `addr` unless it already names one.
///
/// A trailing `:` with no port counts as no port: `myhost:` → `myhost:2586`.
pub fn expand_server_addr(addr: &str) -> String {
    if has_port(addr) {
        return addr.to_string();
    }
    let host = addr.strip_suffix(':').unwrap_or(addr);
    format!("{host}:{DEFAULT_PORT}")
}

/// Strip the default port for display. Other ports are kept.
pub fn collapse_server_addr(addr: &str) -> String {
    addr.strip_suffix(&format!(":{DEFAULT_PORT}"))
        .unwrap_or(addr)
        .to_string()
}

/// Whether `addr` ends in `:<digits>`, looking past a bracketed IPv6 host.
pub(crate) fn has_port(addr: &str) -> bool {
    let host_end = addr.rfind(']').map_or(0, |i| i + 1);
    addr[host_end..]
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
