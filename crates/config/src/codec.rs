//! Reading and writing the profile text format.
//!
//! A profile is one directive per line, `<Key> <value>`. Lines starting with
//! `#` are comments. Parsing happens in two passes: [`load_raw_config`]
//! tolerantly splits lines into a key/value map, and [`load_config`] converts
//! the recognized keys into a typed [`Config`], failing on the first bad
//! value. Unknown keys survive the first pass and are ignored by the second.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    literal::{format_duration, format_size, parse_duration, parse_size},
    schema::{Config, DEFAULT_CLIPBOARD_DIR, DEFAULT_LISTEN_ADDR, expand_server_addr},
};

/// Leading marker of a comment line.
pub const COMMENT_MARKER: char = '#';

/// A raw directive value and the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    pub value: String,
    pub line: usize,
}

/// Directives of a profile before typed conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: HashMap<String, RawValue>,
}

impl RawConfig {
    /// The trimmed value of `key`, `""` when the key stands alone.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|raw| raw.value.as_str())
    }

    pub fn entry(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split profile text into directives. Never fails.
///
/// The first whitespace-delimited token of a line is the key, the trimmed
/// remainder its value. Later lines override earlier ones; comment lines
/// are skipped and never touch the map.
pub fn load_raw_config(text: &str) -> RawConfig {
    let mut entries = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }
        let (key, value) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(key, value)| (key, value.trim()));
        entries.insert(key.to_string(), RawValue {
            value: value.to_string(),
            line: idx + 1,
        });
    }
    RawConfig { entries }
}

/// Parse profile text into a [`Config`].
///
/// Missing directives keep their defaults and an empty value resets a
/// directive to its default. No file-system checks happen here; see
/// [`crate::validate::validate`].
pub fn load_config(text: &str) -> Result<Config> {
    let raw = load_raw_config(text);
    let mut config = Config::default();

    for field in Field::ALL {
        if let Some(raw_value) = raw.entry(field.name()) {
            field
                .read(&mut config, &raw_value.value)
                .map_err(|reason| Error::InvalidLiteral {
                    field: field.name(),
                    value: raw_value.value.clone(),
                    line: raw_value.line,
                    reason,
                })?;
        }
    }

    for key in raw.keys().filter(|key| Field::from_name(key).is_none()) {
        debug!(key, "ignoring unknown config directive");
    }
    Ok(config)
}

/// Render `config` in the profile format.
///
/// Settings that were never set are written as commented-out directives
/// (`# Key`), so the file lists every option without asserting values.
/// Fails with [`Error::Validation`] when a value cannot be written as a
/// single directive and read back unchanged.
pub fn render_config(config: &Config) -> Result<String> {
    let mut out = vec![
        "# clipshare profile".to_string(),
        "#".to_string(),
        "# One directive per line: <Key> <value>. Lines starting with '#' are ignored.".to_string(),
        "# Uncomment a directive to override its default.".to_string(),
    ];
    for field in Field::ALL {
        let value = field
            .render(config)
            .and_then(|value| value.map(check_value).transpose())
            .map_err(|reason| {
                Error::validation(format!("cannot write {}: {reason}", field.name()))
            })?;
        out.push(String::new());
        out.extend(
            field
                .description()
                .lines()
                .map(|line| format!("{COMMENT_MARKER} {line}")),
        );
        out.push(match value {
            Some(value) => format!("{} {value}", field.name()),
            None => format!("{COMMENT_MARKER} {}", field.name()),
        });
    }
    out.push(String::new());
    Ok(out.join("\n"))
}

/// A value must survive the line lexer untouched.
fn check_value(value: String) -> std::result::Result<String, &'static str> {
    if value.is_empty() {
        Err("value is empty")
    } else if value.contains(['\n', '\r']) {
        Err("value contains a line break")
    } else if value.trim() != value {
        Err("value has leading or trailing whitespace")
    } else {
        Ok(value)
    }
}

/// A recognized profile directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ListenAddr,
    ServerAddr,
    Key,
    KeyFile,
    CertFile,
    ClipboardDir,
    ClipboardSizeLimit,
    ClipboardCountLimit,
    FileSizeLimit,
    FileExpireAfter,
    WebUi,
}

impl Field {
    /// Every directive, in the order they are written.
    const ALL: [Self; 11] = [
        Self::ListenAddr,
        Self::ServerAddr,
        Self::Key,
        Self::KeyFile,
        Self::CertFile,
        Self::ClipboardDir,
        Self::ClipboardSizeLimit,
        Self::ClipboardCountLimit,
        Self::FileSizeLimit,
        Self::FileExpireAfter,
        Self::WebUi,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::ListenAddr => "ListenAddr",
            Self::ServerAddr => "ServerAddr",
            Self::Key => "Key",
            Self::KeyFile => "KeyFile",
            Self::CertFile => "CertFile",
            Self::ClipboardDir => "ClipboardDir",
            Self::ClipboardSizeLimit => "ClipboardSizeLimit",
            Self::ClipboardCountLimit => "ClipboardCountLimit",
            Self::FileSizeLimit => "FileSizeLimit",
            Self::FileExpireAfter => "FileExpireAfter",
            Self::WebUi => "WebUI",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListenAddr => "Address the server binds to, e.g. \":2586\" or \"10.0.0.1:8080\".",
            Self::ServerAddr => {
                "Hostname clients connect to. Port 2586 is assumed when none is given."
            },
            Self::Key => {
                "Shared secret as <base64 salt>:<base64 key>. Without it, anyone who can\n\
                 reach the server can read and write the clipboard."
            },
            Self::KeyFile => "PEM private key for the server certificate.",
            Self::CertFile => "PEM server certificate. Clients pin it when connecting.",
            Self::ClipboardDir => "Directory holding clipboard content.",
            Self::ClipboardSizeLimit => "Total clipboard size, e.g. 500M or 2G. 0 means unlimited.",
            Self::ClipboardCountLimit => "Maximum number of clipboard files. 0 means unlimited.",
            Self::FileSizeLimit => {
                "Maximum size of a single clipboard file, e.g. 10M. 0 means unlimited."
            },
            Self::FileExpireAfter => {
                "Delete clipboard files after this long, e.g. 7d, 12h or 30m. 0 keeps them."
            },
            Self::WebUi => "Serve the web UI (true or false).",
        }
    }

    /// Store `value` into `config`. An empty value restores the default.
    fn read(self, config: &mut Config, value: &str) -> std::result::Result<(), String> {
        let value = (!value.is_empty()).then_some(value);
        match self {
            Self::ListenAddr => {
                config.listen_addr = value.unwrap_or(DEFAULT_LISTEN_ADDR).to_string();
            },
            Self::ServerAddr => config.server_addr = value.map(expand_server_addr),
            Self::Key => {
                config.key = value
                    .map(str::parse::<clipshare_auth::Key>)
                    .transpose()
                    .map_err(|e| e.to_string())?;
            },
            Self::KeyFile => config.key_file = value.map(PathBuf::from),
            Self::CertFile => config.cert_file = value.map(PathBuf::from),
            Self::ClipboardDir => {
                config.clipboard_dir = PathBuf::from(value.unwrap_or(DEFAULT_CLIPBOARD_DIR));
            },
            Self::ClipboardSizeLimit => config.clipboard_size_limit = read_size(value)?,
            Self::ClipboardCountLimit => {
                config.clipboard_count_limit = value
                    .map(|v| v.parse::<u64>().map_err(|_| "expected a non-negative integer"))
                    .transpose()?;
            },
            Self::FileSizeLimit => config.file_size_limit = read_size(value)?,
            Self::FileExpireAfter => {
                config.file_expire_after = value
                    .map(parse_duration)
                    .transpose()
                    .map_err(|e| e.to_string())?
                    .unwrap_or_default();
            },
            Self::WebUi => {
                config.web_ui = value
                    .map(|v| match v {
                        "true" => Ok(true),
                        "false" => Ok(false),
                        _ => Err("expected true or false"),
                    })
                    .transpose()?;
            },
        }
        Ok(())
    }

    /// The directive value for `config`, or `None` when it should be
    /// written commented out.
    fn render(self, config: &Config) -> std::result::Result<Option<String>, &'static str> {
        Ok(match self {
            Self::ListenAddr => Some(config.listen_addr.clone()),
            Self::ServerAddr => config.server_addr.clone(),
            Self::Key => config.key.as_ref().map(ToString::to_string),
            Self::KeyFile => config.key_file.as_deref().map(path_value).transpose()?,
            Self::CertFile => config.cert_file.as_deref().map(path_value).transpose()?,
            Self::ClipboardDir => Some(path_value(&config.clipboard_dir)?),
            Self::ClipboardSizeLimit => config.clipboard_size_limit.map(format_size),
            Self::ClipboardCountLimit => config.clipboard_count_limit.map(|n| n.to_string()),
            Self::FileSizeLimit => config.file_size_limit.map(format_size),
            Self::FileExpireAfter => Some(format_duration(config.file_expire_after)),
            Self::WebUi => config.web_ui.map(|b| b.to_string()),
        })
    }
}

fn path_value(path: &Path) -> std::result::Result<String, &'static str> {
    path.to_str()
        .map(str::to_string)
        .ok_or("path is not valid UTF-8")
}

fn read_size(value: Option<&str>) -> std::result::Result<Option<u64>, String> {
    value
        .map(parse_size)
        .transpose()
        .map_err(|e| e.to_string())
}
